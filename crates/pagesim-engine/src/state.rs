//! Snapshot and per-access record types.

use crate::frame::FrameId;
use crate::page_table::PageTableEntry;
use pagesim_common::{Algorithm, PageNumber};
use serde::{Deserialize, Serialize};

/// Outcome of a single page access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Page that was accessed.
    pub page: PageNumber,
    /// True if the page was not resident.
    pub resulted_in_fault: bool,
    /// Page evicted to make room, if any.
    pub evicted_page: Option<PageNumber>,
    /// Frame holding the page after the access.
    pub frame: FrameId,
}

impl AccessRecord {
    /// Returns true if the access was a hit.
    pub fn is_hit(&self) -> bool {
        !self.resulted_in_fault
    }
}

/// Read-only copy of the engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub page_table_size: u32,
    pub frame_count: usize,
    /// Slot contents in slot order, `None` for empty slots.
    pub frames: Vec<Option<PageNumber>>,
    /// One entry per page, indexed by page number.
    pub page_table: Vec<PageTableEntry>,
    pub total_accesses: u64,
    pub total_faults: u64,
    pub algorithm: Algorithm,
    pub reference_string: Vec<PageNumber>,
    pub frame_occupancy: Vec<bool>,
    /// Hit percentage rounded to two decimals.
    pub hit_rate: f64,
    pub last_fault: bool,
    pub last_accessed: Option<PageNumber>,
}

impl SimulationState {
    /// Pages currently loaded, in page order.
    pub fn loaded_pages(&self) -> Vec<PageNumber> {
        self.page_table
            .iter()
            .filter(|e| e.loaded)
            .map(|e| e.page)
            .collect()
    }

    /// Pages currently resident, in slot order.
    pub fn resident_pages(&self) -> Vec<PageNumber> {
        self.frames.iter().flatten().copied().collect()
    }

    /// Number of accesses that hit.
    pub fn total_hits(&self) -> u64 {
        self.total_accesses - self.total_faults
    }
}

/// Result of running a whole access sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Faults incurred by this sequence alone.
    pub total_faults: u64,
    pub sequence: Vec<PageNumber>,
    pub records: Vec<AccessRecord>,
    pub final_state: SimulationState,
}

/// Computes the hit percentage rounded to two decimals.
pub(crate) fn hit_rate(total_accesses: u64, total_faults: u64) -> f64 {
    if total_accesses == 0 {
        return 0.0;
    }
    let rate = (total_accesses - total_faults) as f64 / total_accesses as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
