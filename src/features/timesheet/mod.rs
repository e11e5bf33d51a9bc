//! Timesheet module - sums clock ranges written on checklist lines
//!
//! This module provides:
//! - Checklist marker detection (`- [ ]`, `- [x]`, `* [?]`)
//! - Clock range parsing and per-task minute totals
//! - Rendering of the markdown time report inserted into a note

pub mod data;

// Re-export commonly used types
pub use data::{
    clock_diff_minutes, compute_task_time, compute_total_time, format_minutes, Report,
    ReportEntry, TaskDuration,
};
