//! Configuration structures for pagesim.

use crate::error::{PagesimError, Result};
use crate::types::{Algorithm, PageNumber};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default number of virtual pages in the page table.
pub const DEFAULT_PAGE_TABLE_SIZE: u32 = 16;

/// Default number of physical frames.
pub const DEFAULT_FRAME_COUNT: usize = 4;

/// Largest accepted page table size. Frame counts are bounded by the page
/// table size, so this also caps the frame table.
pub const MAX_PAGE_TABLE_SIZE: u32 = 1 << 20;

/// Paging engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of virtual pages; valid page numbers are `0..page_table_size`.
    pub page_table_size: u32,
    /// Number of physical frames.
    pub frame_count: usize,
    /// Active replacement algorithm.
    pub algorithm: Algorithm,
    /// Future page requests, consulted only by OPTIMAL.
    #[serde(default)]
    pub reference_string: Option<Vec<PageNumber>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_table_size: DEFAULT_PAGE_TABLE_SIZE,
            frame_count: DEFAULT_FRAME_COUNT,
            algorithm: Algorithm::Fifo,
            reference_string: None,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration without a reference string.
    pub fn new(page_table_size: u32, frame_count: usize, algorithm: Algorithm) -> Self {
        Self {
            page_table_size,
            frame_count,
            algorithm,
            reference_string: None,
        }
    }

    /// Sets the reference string.
    pub fn with_reference_string(mut self, reference_string: Vec<PageNumber>) -> Self {
        self.reference_string = Some(reference_string);
        self
    }

    /// Checks the configuration before it is applied.
    pub fn validate(&self) -> Result<()> {
        if self.page_table_size == 0 {
            return Err(PagesimError::InvalidConfig(
                "page_table_size must be positive".to_string(),
            ));
        }
        if self.page_table_size > MAX_PAGE_TABLE_SIZE {
            return Err(PagesimError::InvalidConfig(format!(
                "page_table_size must be at most {}, got {}",
                MAX_PAGE_TABLE_SIZE, self.page_table_size
            )));
        }
        if self.frame_count == 0 {
            return Err(PagesimError::InvalidConfig(
                "frame_count must be positive".to_string(),
            ));
        }
        if self.frame_count > self.page_table_size as usize {
            return Err(PagesimError::InvalidConfig(format!(
                "frame_count must not exceed page_table_size ({}), got {}",
                self.page_table_size, self.frame_count
            )));
        }
        if self.algorithm.requires_reference_string() {
            match &self.reference_string {
                Some(refs) if !refs.is_empty() => {}
                _ => return Err(PagesimError::MissingReferenceString),
            }
        }
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    /// Reject concurrent operations with `SessionBusy` instead of queueing them.
    pub reject_when_busy: bool,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            reject_when_busy: false,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete pagesim configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesimConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

impl PagesimConfig {
    /// Loads defaults overridden by `PAGESIM_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults overridden by values from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("PAGESIM_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PAGESIM_PORT") {
            config.server.port = parse_var("PAGESIM_PORT", &port)?;
        }
        if let Some(reject) = lookup("PAGESIM_REJECT_WHEN_BUSY") {
            config.server.reject_when_busy = parse_var("PAGESIM_REJECT_WHEN_BUSY", &reject)?;
        }
        if let Some(level) = lookup("PAGESIM_LOG_LEVEL") {
            config.server.log_level = level;
        }

        if let Some(size) = lookup("PAGESIM_PAGE_TABLE_SIZE") {
            config.engine.page_table_size = parse_var("PAGESIM_PAGE_TABLE_SIZE", &size)?;
        }
        if let Some(frames) = lookup("PAGESIM_FRAME_COUNT") {
            config.engine.frame_count = parse_var("PAGESIM_FRAME_COUNT", &frames)?;
        }
        if let Some(algorithm) = lookup("PAGESIM_ALGORITHM") {
            config.engine.algorithm = algorithm
                .parse()
                .map_err(|e: PagesimError| PagesimError::ConfigError(format!("PAGESIM_ALGORITHM: {}", e)))?;
        }
        if let Some(refs) = lookup("PAGESIM_REFERENCE_STRING") {
            config.engine.reference_string = Some(parse_list("PAGESIM_REFERENCE_STRING", &refs)?);
        }

        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| PagesimError::ConfigError(format!("{}: {}", name, e)))
}

/// Parses a comma-separated list such as `1,2,3`.
fn parse_list<T>(name: &str, value: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_var(name, item))
        .collect()
}
