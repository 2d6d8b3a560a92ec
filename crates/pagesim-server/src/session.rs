//! Session service serializing callers onto one paging engine.

use crate::protocol::{
    frame_count_from_wire, page_from_wire, reference_string_from_wire, AccessResponse,
    SetAlgorithmRequest, SetAlgorithmResponse, SimulateResponse, StatusResponse,
};
use pagesim_common::{Algorithm, EngineConfig, PagesimError, Result};
use pagesim_engine::{PagingEngine, SimulationState};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a caller experiences while another operation holds the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Wait for the in-flight operation to finish.
    #[default]
    Queue,
    /// Fail immediately with `SessionBusy`.
    Reject,
}

impl BusyPolicy {
    pub fn from_reject_flag(reject_when_busy: bool) -> Self {
        if reject_when_busy {
            BusyPolicy::Reject
        } else {
            BusyPolicy::Queue
        }
    }
}

/// One simulation session.
///
/// Every operation runs to completion under the session lock, so callers
/// never observe a partially applied access. Separate instances share nothing.
pub struct SessionService {
    /// The engine, held for the whole of each operation.
    engine: Mutex<PagingEngine>,
    busy_policy: BusyPolicy,
}

impl SessionService {
    /// Creates a session with the given engine configuration.
    pub fn new(config: EngineConfig, busy_policy: BusyPolicy) -> Result<Self> {
        let engine = PagingEngine::new(config)?;
        info!(?busy_policy, "Session created");
        Ok(Self {
            engine: Mutex::new(engine),
            busy_policy,
        })
    }

    /// Returns the busy policy.
    pub fn busy_policy(&self) -> BusyPolicy {
        self.busy_policy
    }

    /// Runs `op` with exclusive access to the engine.
    fn with_engine<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut PagingEngine) -> Result<T>,
    {
        let mut engine = match self.busy_policy {
            BusyPolicy::Queue => self.engine.lock(),
            BusyPolicy::Reject => self.engine.try_lock().ok_or(PagesimError::SessionBusy)?,
        };
        op(&mut *engine)
    }

    /// Returns the current state.
    pub fn state(&self) -> Result<SimulationState> {
        self.with_engine(|engine| Ok(engine.snapshot()))
    }

    /// Accesses one page.
    pub fn access(&self, page: i64) -> Result<AccessResponse> {
        self.with_engine(|engine| {
            let page = page_from_wire(page, engine.page_table_size())?;
            let record = engine.access(page)?;
            Ok(AccessResponse {
                record,
                state: engine.snapshot(),
            })
        })
    }

    /// Switches algorithm, optionally changing frame count and reference string.
    pub fn set_algorithm(&self, request: SetAlgorithmRequest) -> Result<SetAlgorithmResponse> {
        let algorithm: Algorithm = request.algorithm.parse()?;
        let frame_count = request.frame_count.map(frame_count_from_wire).transpose()?;
        let reference_string = request
            .reference_string
            .as_deref()
            .map(reference_string_from_wire)
            .transpose()?;

        self.with_engine(|engine| {
            engine.set_algorithm(algorithm, frame_count, reference_string)?;
            Ok(SetAlgorithmResponse {
                status: "ok".to_string(),
                algorithm: engine.algorithm(),
                frame_count: engine.frame_count(),
                state: engine.snapshot(),
            })
        })
    }

    /// Clears frames and counters.
    pub fn reset(&self) -> Result<StatusResponse> {
        self.with_engine(|engine| {
            engine.reset();
            Ok(StatusResponse::ok(engine.snapshot()))
        })
    }

    /// Accesses every page of `sequence` in order.
    pub fn simulate(&self, sequence: &[i64]) -> Result<SimulateResponse> {
        self.with_engine(|engine| {
            let size = engine.page_table_size();
            let pages = sequence
                .iter()
                .map(|&p| page_from_wire(p, size))
                .collect::<Result<Vec<_>>>()?;

            let summary = engine.simulate(&pages)?;
            debug!(
                length = pages.len(),
                faults = summary.total_faults,
                "Sequence simulated"
            );
            Ok(SimulateResponse {
                total_faults: summary.total_faults,
                sequence: summary.sequence,
                records: summary.records,
                final_state: summary.final_state,
            })
        })
    }
}
