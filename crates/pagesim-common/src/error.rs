//! Error types for pagesim.

use thiserror::Error;

/// Result type alias using PagesimError.
pub type Result<T> = std::result::Result<T, PagesimError>;

/// Errors that can occur while driving a paging simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagesimError {
    // Engine errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Page {page} out of range (0..{page_table_size})")]
    OutOfRange { page: i64, page_table_size: u32 },

    #[error("OPTIMAL replacement requires a non-empty reference string")]
    MissingReferenceString,

    #[error("No resident page available for eviction")]
    NoVictimAvailable,

    // Session errors
    #[error("Session busy, another operation is in flight")]
    SessionBusy,

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PagesimError {
    /// Returns the stable name of this error kind, as reported to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            PagesimError::InvalidConfig(_) => "InvalidConfig",
            PagesimError::OutOfRange { .. } => "OutOfRange",
            PagesimError::MissingReferenceString => "MissingReferenceString",
            PagesimError::NoVictimAvailable => "NoVictimAvailable",
            PagesimError::SessionBusy => "SessionBusy",
            PagesimError::ConfigError(_) => "ConfigError",
        }
    }
}
