//! Fixed text inserted at the cursor by the insertion commands

use chrono::{Local, Timelike};

pub const UNFINISHED_TASK: &str = "- [ ] ";
pub const FINISHED_TASK: &str = "- [x] ";

/// `HH:MM`, 24-hour, zero padded
pub fn clock_time_of<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub fn current_clock_time() -> String {
    clock_time_of(&Local::now())
}
