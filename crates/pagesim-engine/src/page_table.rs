//! Page table mapping virtual page numbers to frames.

use crate::frame::FrameId;
use pagesim_common::PageNumber;
use serde::{Deserialize, Serialize};

/// One page table entry, indexed by page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTableEntry {
    /// Virtual page number.
    pub page: PageNumber,
    /// Whether the page is resident in a frame.
    pub loaded: bool,
    /// Frame holding the page while loaded.
    pub frame: Option<FrameId>,
}

impl PageTableEntry {
    /// Creates an unloaded entry.
    pub fn new(page: PageNumber) -> Self {
        Self {
            page,
            loaded: false,
            frame: None,
        }
    }
}

/// Dense page table covering pages `0..size`.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Creates a page table with `size` unloaded entries.
    pub fn new(size: u32) -> Self {
        let entries = (0..size).map(PageTableEntry::new).collect();
        Self { entries }
    }

    /// Returns true if `page` is a valid page number.
    #[inline]
    pub fn in_range(&self, page: PageNumber) -> bool {
        (page as usize) < self.entries.len()
    }

    /// Returns the entry for `page`.
    pub fn entry(&self, page: PageNumber) -> Option<&PageTableEntry> {
        self.entries.get(page as usize)
    }

    /// Returns the frame holding `page`, if loaded.
    #[inline]
    pub fn get(&self, page: PageNumber) -> Option<FrameId> {
        self.entry(page).filter(|e| e.loaded).and_then(|e| e.frame)
    }

    /// Marks `page` loaded in `frame_id`. Returns false if out of range.
    pub fn insert(&mut self, page: PageNumber, frame_id: FrameId) -> bool {
        match self.entries.get_mut(page as usize) {
            Some(entry) => {
                entry.loaded = true;
                entry.frame = Some(frame_id);
                true
            }
            None => false,
        }
    }

    /// Marks `page` unloaded. Returns the frame it occupied.
    pub fn remove(&mut self, page: PageNumber) -> Option<FrameId> {
        let entry = self.entries.get_mut(page as usize)?;
        entry.loaded = false;
        entry.frame.take()
    }

    /// Unloads every page.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.loaded = false;
            entry.frame = None;
        }
    }

    /// All entries in page order.
    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }
}
