//! Request and response payloads exchanged with session callers.
//!
//! Numbers arrive as `i64` so negative or oversized values can be reported as
//! `OutOfRange` / `InvalidConfig` instead of failing deserialization.

use pagesim_common::{Algorithm, PageNumber, PagesimError, Result};
use pagesim_engine::{AccessRecord, SimulationState};
use serde::{Deserialize, Serialize};

/// Body of `POST /access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub page: i64,
}

/// Result of one access merged with the resulting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessResponse {
    #[serde(flatten)]
    pub record: AccessRecord,
    #[serde(flatten)]
    pub state: SimulationState,
}

/// Body of `POST /set_algorithm`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetAlgorithmRequest {
    pub algorithm: String,
    #[serde(default)]
    pub frame_count: Option<i64>,
    #[serde(default)]
    pub reference_string: Option<Vec<i64>>,
}

/// Reply to `POST /set_algorithm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAlgorithmResponse {
    pub status: String,
    pub algorithm: Algorithm,
    pub frame_count: usize,
    pub state: SimulationState,
}

/// Reply to `POST /reset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub state: SimulationState,
}

impl StatusResponse {
    pub fn ok(state: SimulationState) -> Self {
        Self {
            status: "ok".to_string(),
            state,
        }
    }
}

/// Body of `POST /simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub sequence: Vec<i64>,
}

/// Reply to `POST /simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    /// Faults incurred by this sequence.
    pub total_faults: u64,
    pub sequence: Vec<PageNumber>,
    pub records: Vec<AccessRecord>,
    pub final_state: SimulationState,
}

/// Error payload returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&PagesimError> for ErrorResponse {
    fn from(err: &PagesimError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }
}

/// Converts a caller-supplied page number, rejecting values outside `0..page_table_size`.
pub fn page_from_wire(page: i64, page_table_size: u32) -> Result<PageNumber> {
    u32::try_from(page)
        .ok()
        .filter(|&p| p < page_table_size)
        .ok_or(PagesimError::OutOfRange {
            page,
            page_table_size,
        })
}

/// Converts a caller-supplied frame count, which must be positive.
pub fn frame_count_from_wire(frame_count: i64) -> Result<usize> {
    usize::try_from(frame_count)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            PagesimError::InvalidConfig(format!(
                "frame_count must be positive, got {}",
                frame_count
            ))
        })
}

/// Converts a caller-supplied reference string, which may not hold negative pages.
pub fn reference_string_from_wire(refs: &[i64]) -> Result<Vec<PageNumber>> {
    refs.iter()
        .map(|&p| {
            u32::try_from(p).map_err(|_| {
                PagesimError::InvalidConfig(format!(
                    "reference_string entries must be non-negative, got {}",
                    p
                ))
            })
        })
        .collect()
}
