//! pagesim common types, errors, and configuration.
//!
//! This crate provides shared definitions used across all pagesim components.

pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, PagesimConfig, ServerConfig, MAX_PAGE_TABLE_SIZE};
pub use error::{PagesimError, Result};
pub use types::{Algorithm, PageNumber};
