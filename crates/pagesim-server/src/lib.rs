//! Session service, HTTP API and reporting for pagesim.
//!
//! This crate provides:
//! - `SessionService` serializing callers onto one paging engine
//! - JSON-over-HTTP routes for access, reset, set-algorithm, state and simulate
//! - Tracing setup and plain-text run reports for the `pagesim` binary

pub mod api;
pub mod protocol;
pub mod report;
pub mod server;
pub mod session;
pub mod telemetry;

pub use api::{create_router, ApiError, SharedSession};
pub use protocol::{
    AccessRequest, AccessResponse, ErrorResponse, SetAlgorithmRequest, SetAlgorithmResponse,
    SimulateRequest, SimulateResponse, StatusResponse,
};
pub use server::serve;
pub use session::{BusyPolicy, SessionService};
