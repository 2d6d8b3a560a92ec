//! Paging engine.

use crate::frame::{FrameId, FrameTable};
use crate::page_table::PageTable;
use crate::replacer::{FifoReplacer, ReplacementPolicy, Replacer};
use crate::state::{hit_rate, AccessRecord, SimulationState, SimulationSummary};
use pagesim_common::{Algorithm, EngineConfig, PageNumber, PagesimError, Result};
use tracing::{debug, info};

/// Paging engine.
///
/// Owns the page table, the frame table and the active replacement policy,
/// and executes accesses one at a time:
/// - Hits refresh the policy's recency metadata
/// - Faults fill the lowest empty frame, or evict a victim chosen by the policy
/// - Counters track accesses and faults since the last reset
#[derive(Debug, Clone)]
pub struct PagingEngine {
    /// Active configuration.
    config: EngineConfig,
    /// Physical frames.
    frames: FrameTable,
    /// Page number to frame mapping.
    page_table: PageTable,
    /// Page replacement policy.
    policy: ReplacementPolicy,
    total_accesses: u64,
    total_faults: u64,
    last_fault: bool,
    last_accessed: Option<PageNumber>,
}

impl Default for PagingEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            frames: FrameTable::new(config.frame_count),
            page_table: PageTable::new(config.page_table_size),
            policy: ReplacementPolicy::Fifo(FifoReplacer::new()),
            config,
            total_accesses: 0,
            total_faults: 0,
            last_fault: false,
            last_accessed: None,
        }
    }
}

impl PagingEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let mut engine = Self::default();
        engine.configure(config)?;
        Ok(engine)
    }

    /// Replaces the configuration and resets all state.
    ///
    /// On error the previous configuration and state are kept.
    pub fn configure(&mut self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        let policy = ReplacementPolicy::new(config.algorithm, config.reference_string.as_deref())?;

        self.frames = FrameTable::new(config.frame_count);
        self.page_table = PageTable::new(config.page_table_size);
        self.policy = policy;
        self.config = config;
        self.clear_counters();

        info!(
            page_table_size = self.config.page_table_size,
            frame_count = self.config.frame_count,
            algorithm = %self.config.algorithm,
            "Engine configured"
        );
        Ok(())
    }

    /// Switches algorithm and optionally the frame count, keeping the page table size.
    ///
    /// Without a new reference string the previously configured one is reused.
    pub fn set_algorithm(
        &mut self,
        algorithm: Algorithm,
        frame_count: Option<usize>,
        reference_string: Option<Vec<PageNumber>>,
    ) -> Result<()> {
        let config = EngineConfig {
            page_table_size: self.config.page_table_size,
            frame_count: frame_count.unwrap_or(self.config.frame_count),
            algorithm,
            reference_string: reference_string.or_else(|| self.config.reference_string.clone()),
        };
        self.configure(config)
    }

    /// Clears frames, page table and counters, keeping the configuration.
    pub fn reset(&mut self) {
        self.frames.clear_all();
        self.page_table.clear();
        self.policy.reset();
        self.clear_counters();
        info!(algorithm = %self.config.algorithm, "Engine reset");
    }

    fn clear_counters(&mut self) {
        self.total_accesses = 0;
        self.total_faults = 0;
        self.last_fault = false;
        self.last_accessed = None;
    }

    /// Accesses a page.
    ///
    /// Returns `OutOfRange` without touching state if `page` is not below the
    /// page table size.
    pub fn access(&mut self, page: PageNumber) -> Result<AccessRecord> {
        self.check_range(page)?;
        let access_index = self.total_accesses as usize;

        if let Some(frame_id) = self.page_table.get(page) {
            self.total_accesses += 1;
            self.last_fault = false;
            self.last_accessed = Some(page);
            self.policy.record_hit(page);

            debug!(page, %frame_id, "Page hit");
            return Ok(AccessRecord {
                page,
                resulted_in_fault: false,
                evicted_page: None,
                frame: frame_id,
            });
        }

        // Choose the slot before mutating so a failed selection leaves state intact.
        let (frame_id, evicted_page) = self.allocate_frame(access_index)?;

        self.total_accesses += 1;
        self.total_faults += 1;
        self.last_fault = true;
        self.last_accessed = Some(page);

        if let Some(victim) = evicted_page {
            self.page_table.remove(victim);
            self.frames.clear(frame_id);
            self.policy.record_evict(victim);
        }

        self.frames.assign(frame_id, page);
        self.page_table.insert(page, frame_id);
        self.policy.record_insert(page);

        debug!(page, %frame_id, evicted = ?evicted_page, "Page fault");
        Ok(AccessRecord {
            page,
            resulted_in_fault: true,
            evicted_page,
            frame: frame_id,
        })
    }

    /// Picks a free frame, or the frame of the policy's victim.
    fn allocate_frame(&self, access_index: usize) -> Result<(FrameId, Option<PageNumber>)> {
        if let Some(frame_id) = self.frames.get_unassigned() {
            return Ok((frame_id, None));
        }

        let resident = self.frames.resident_pages();
        let victim = self.policy.select_victim(&resident, access_index)?;
        let frame_id = self
            .page_table
            .get(victim)
            .ok_or(PagesimError::NoVictimAvailable)?;
        Ok((frame_id, Some(victim)))
    }

    fn check_range(&self, page: PageNumber) -> Result<()> {
        if self.page_table.in_range(page) {
            Ok(())
        } else {
            Err(PagesimError::OutOfRange {
                page: i64::from(page),
                page_table_size: self.config.page_table_size,
            })
        }
    }

    /// Accesses every page of `sequence` in order.
    ///
    /// The whole sequence is range-checked first; an out-of-range page
    /// rejects the call without touching state.
    pub fn simulate(&mut self, sequence: &[PageNumber]) -> Result<SimulationSummary> {
        for &page in sequence {
            self.check_range(page)?;
        }

        let mut records = Vec::with_capacity(sequence.len());
        for &page in sequence {
            records.push(self.access(page)?);
        }
        let total_faults = records.iter().filter(|r| r.resulted_in_fault).count() as u64;

        Ok(SimulationSummary {
            total_faults,
            sequence: sequence.to_vec(),
            records,
            final_state: self.snapshot(),
        })
    }

    /// Returns a read-only copy of the current state.
    pub fn snapshot(&self) -> SimulationState {
        let frames = self.frames.slots();
        SimulationState {
            page_table_size: self.config.page_table_size,
            frame_count: self.config.frame_count,
            frame_occupancy: frames.iter().map(Option::is_some).collect(),
            frames,
            page_table: self.page_table.entries().to_vec(),
            total_accesses: self.total_accesses,
            total_faults: self.total_faults,
            algorithm: self.config.algorithm,
            reference_string: self.config.reference_string.clone().unwrap_or_default(),
            hit_rate: hit_rate(self.total_accesses, self.total_faults),
            last_fault: self.last_fault,
            last_accessed: self.last_accessed,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    pub fn frame_count(&self) -> usize {
        self.config.frame_count
    }

    pub fn page_table_size(&self) -> u32 {
        self.config.page_table_size
    }

    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    pub fn total_faults(&self) -> u64 {
        self.total_faults
    }
}
