//! Core value types shared by the engine and its callers.

use crate::error::PagesimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Virtual page number. Valid pages lie in `0..page_table_size`.
pub type PageNumber = u32;

/// Page replacement algorithm used when a fault finds no free frame.
///
/// Serialized in upper case (`"FIFO"`, `"LRU"`, `"OPTIMAL"`), parsed
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// Evict the page that has been resident longest.
    #[default]
    Fifo,
    /// Evict the page with the oldest last access.
    Lru,
    /// Evict the page whose next use lies farthest in the reference string.
    Optimal,
}

impl Algorithm {
    /// All supported algorithms.
    pub const ALL: [Algorithm; 3] = [Algorithm::Fifo, Algorithm::Lru, Algorithm::Optimal];

    /// Returns the canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Lru => "LRU",
            Algorithm::Optimal => "OPTIMAL",
        }
    }

    /// Returns true if the algorithm needs the future reference string.
    pub fn requires_reference_string(&self) -> bool {
        matches!(self, Algorithm::Optimal)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PagesimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(Algorithm::Fifo),
            "LRU" => Ok(Algorithm::Lru),
            "OPTIMAL" | "OPT" => Ok(Algorithm::Optimal),
            other => Err(PagesimError::InvalidConfig(format!(
                "unknown replacement algorithm: {}",
                other
            ))),
        }
    }
}
