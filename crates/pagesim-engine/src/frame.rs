//! Physical frame management.

use pagesim_common::PageNumber;
use serde::{Deserialize, Serialize};

/// Identifier for a physical frame slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u32);

impl FrameId {
    /// Returns the slot index.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame:{}", self.0)
    }
}

/// A frame slot holding at most one resident page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    frame_id: FrameId,
    page: Option<PageNumber>,
}

impl Frame {
    /// Creates a new empty frame.
    pub fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            page: None,
        }
    }

    /// Returns the frame ID.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    /// Returns the page stored in this frame.
    #[inline]
    pub fn page(&self) -> Option<PageNumber> {
        self.page
    }

    /// Returns true if no page is loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
    }

    /// Loads a page into the frame.
    #[inline]
    pub fn assign(&mut self, page: PageNumber) {
        self.page = Some(page);
    }

    /// Empties the frame, returning the page it held.
    #[inline]
    pub fn clear(&mut self) -> Option<PageNumber> {
        self.page.take()
    }
}

/// Fixed-capacity ordered set of frames.
#[derive(Debug, Clone)]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    /// Creates a frame table with `frame_count` empty slots.
    pub fn new(frame_count: usize) -> Self {
        let frames = (0..frame_count)
            .map(|i| Frame::new(FrameId(i as u32)))
            .collect();
        Self { frames }
    }

    /// Returns the lowest empty slot, if any.
    pub fn get_unassigned(&self) -> Option<FrameId> {
        self.frames
            .iter()
            .find(|f| f.is_empty())
            .map(Frame::frame_id)
    }

    /// Loads `page` into slot `frame_id`.
    pub fn assign(&mut self, frame_id: FrameId, page: PageNumber) {
        if let Some(frame) = self.frames.get_mut(frame_id.index()) {
            frame.assign(page);
        }
    }

    /// Empties slot `frame_id`, returning the page it held.
    pub fn clear(&mut self, frame_id: FrameId) -> Option<PageNumber> {
        self.frames.get_mut(frame_id.index()).and_then(Frame::clear)
    }

    /// Empties every slot.
    pub fn clear_all(&mut self) {
        for frame in &mut self.frames {
            frame.clear();
        }
    }

    /// Resident pages in slot order.
    pub fn resident_pages(&self) -> Vec<PageNumber> {
        self.frames.iter().filter_map(Frame::page).collect()
    }

    /// Slot contents in slot order, `None` for empty slots.
    pub fn slots(&self) -> Vec<Option<PageNumber>> {
        self.frames.iter().map(Frame::page).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_id_display() {
        let frame_id = FrameId(42);
        assert_eq!(frame_id.to_string(), "frame:42");
        assert_eq!(frame_id.index(), 42);
    }

    #[test]
    fn test_frame_new_is_empty() {
        let frame = Frame::new(FrameId(0));
        assert_eq!(frame.frame_id(), FrameId(0));
        assert!(frame.page().is_none());
        assert!(frame.is_empty());
    }

    #[test]
    fn test_frame_assign_clear() {
        let mut frame = Frame::new(FrameId(1));

        frame.assign(7);
        assert_eq!(frame.page(), Some(7));
        assert!(!frame.is_empty());

        assert_eq!(frame.clear(), Some(7));
        assert!(frame.is_empty());
        assert_eq!(frame.clear(), None);
    }

    #[test]
    fn test_frame_table_fills_lowest_slot_first() {
        let mut table = FrameTable::new(3);
        assert_eq!(table.get_unassigned(), Some(FrameId(0)));

        table.assign(FrameId(0), 5);
        assert_eq!(table.get_unassigned(), Some(FrameId(1)));

        table.assign(FrameId(1), 6);
        table.assign(FrameId(2), 7);
        assert_eq!(table.get_unassigned(), None);
        assert_eq!(table.resident_pages(), vec![5, 6, 7]);

        assert_eq!(table.clear(FrameId(1)), Some(6));
        assert_eq!(table.get_unassigned(), Some(FrameId(1)));
    }

    #[test]
    fn test_frame_table_slots() {
        let mut table = FrameTable::new(3);
        table.assign(FrameId(0), 4);
        table.assign(FrameId(2), 9);

        assert_eq!(table.slots(), vec![Some(4), None, Some(9)]);
        assert_eq!(table.resident_pages(), vec![4, 9]);
    }

    #[test]
    fn test_frame_table_clear_all() {
        let mut table = FrameTable::new(2);
        table.assign(FrameId(0), 1);
        table.assign(FrameId(1), 2);

        table.clear_all();
        assert_eq!(table.slots(), vec![None, None]);
        assert_eq!(table.get_unassigned(), Some(FrameId(0)));
    }

    #[test]
    fn test_frame_table_out_of_bounds() {
        let mut table = FrameTable::new(2);

        table.assign(FrameId(10), 1);
        assert_eq!(table.clear(FrameId(10)), None);
        assert_eq!(table.slots(), vec![None, None]);
    }
}
