//! Plain-text reports for offline runs.

use pagesim_engine::{AccessRecord, SimulationState};
use std::fmt::{Display, Write};

/// Summary statistics of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub policy_name: String,
    pub frame_count: usize,
    pub page_table_size: u32,
    pub accesses: u64,
    pub hits: u64,
    pub faults: u64,
}

impl RunStats {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            policy_name: state.algorithm.to_string(),
            frame_count: state.frame_count,
            page_table_size: state.page_table_size,
            accesses: state.total_accesses,
            hits: state.total_hits(),
            faults: state.total_faults,
        }
    }

    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.hits as f64 / self.accesses as f64) * 100.0
        }
    }

    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            100.0 - self.hit_rate()
        }
    }
}

/// One line per access: index, page, outcome, frame and eviction.
pub fn format_trace(records: &[AccessRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let outcome = if record.resulted_in_fault { "FAULT" } else { "hit" };
        let _ = write!(
            out,
            "{:>4}  page {:<4} {:<5} {}",
            i, record.page, outcome, record.frame
        );
        if let Some(evicted) = record.evicted_page {
            let _ = write!(out, "  evicted {}", evicted);
        }
        out.push('\n');
    }
    out
}

/// Markdown table of conditions and statistics.
pub fn format_report(stats: &RunStats) -> String {
    let mut out = String::new();
    row_header(&mut out, &format!("## Stats for the `{}` policy", stats.policy_name));
    row(&mut out, "Frame count", &stats.frame_count);
    row(&mut out, "Page table size", &stats.page_table_size);
    row(&mut out, "Memory accesses", &stats.accesses);
    row(&mut out, "Page hits", &stats.hits);
    row(&mut out, "Page faults", &stats.faults);
    row(&mut out, "Hit rate", &format!("{:.2}%", stats.hit_rate()));
    row(&mut out, "Miss rate", &format!("{:.2}%", stats.miss_rate()));
    out
}

fn row_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "| {:<20} | {:<20} |", "Metric", "Value");
    let _ = writeln!(out, "| {:-<20} | {:-<20} |", "-", "-");
}

fn row(out: &mut String, label: &str, value: &dyn Display) {
    let _ = writeln!(out, "| {:<20} | {:<20} |", label, value);
}
