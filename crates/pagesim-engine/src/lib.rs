//! Paging engine for pagesim.
//!
//! This crate provides a page-replacement simulator with:
//! - Dense page table tracking which pages are loaded and where
//! - Fixed-capacity frame table filled lowest slot first
//! - FIFO, LRU and OPTIMAL replacement policies behind one interface
//! - Access and fault counters with read-only snapshots

mod engine;
mod frame;
mod page_table;
mod replacer;
mod state;

pub use engine::PagingEngine;
pub use frame::{Frame, FrameId, FrameTable};
pub use page_table::{PageTable, PageTableEntry};
pub use replacer::{FifoReplacer, LruReplacer, OptimalReplacer, ReplacementPolicy, Replacer};
pub use state::{AccessRecord, SimulationState, SimulationSummary};
