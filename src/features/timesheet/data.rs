use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

use crate::shared::I18n;

/// Checkbox marker at the start of a line: `- [ ]`, `- [x]`, `* [?]`, optionally indented
fn checklist_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)[-*]\s+\[[^\]]\](?:\s+|$)").expect("checklist marker pattern is valid")
    })
}

/// `H:MM-HH:MM`, with an ASCII hyphen or an en-dash between the clocks
fn clock_range() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})\b")
            .expect("clock range pattern is valid")
    })
}

/// Time spent on one checklist task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDuration {
    pub name: String,
    pub minutes: i64,
}

/// One task line of a report, with the original indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub indent: String,
    pub task: TaskDuration,
}

/// Result of one aggregation pass over a document
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub total_minutes: i64,
    pub computed_at: NaiveDateTime,
}

/// Split a checklist line into its indentation and the text after the marker.
/// Returns `None` for lines that are not checklist items.
pub fn strip_checklist_marker(line: &str) -> Option<(&str, &str)> {
    let caps = checklist_marker().captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let marker = caps.get(0)?;
    Some((indent, &line[marker.end()..]))
}

/// Parse a `H:MM` / `HH:MM` clock string
fn parse_clock(clock: &str) -> Option<NaiveTime> {
    let (hours, minutes) = clock.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Minutes from `start` to `end`, both read as clock times on `date`.
///
/// A range that ends before it starts gives a negative result. `None` means
/// one of the clocks could not be parsed.
pub fn clock_diff_minutes_on(date: NaiveDate, start: &str, end: &str) -> Option<i64> {
    let start = date.and_time(parse_clock(start)?);
    let end = date.and_time(parse_clock(end)?);
    Some((end - start).num_minutes())
}

/// Minutes from `start` to `end` on today's date
pub fn clock_diff_minutes(start: &str, end: &str) -> Option<i64> {
    clock_diff_minutes_on(Local::now().date_naive(), start, end)
}

/// Sum every clock range on a line whose checkbox marker was already stripped
pub fn compute_task_time_on(date: NaiveDate, text: &str) -> TaskDuration {
    let mut minutes = 0;
    for caps in clock_range().captures_iter(text) {
        let (start, end) = (&caps[1], &caps[2]);
        match clock_diff_minutes_on(date, start, end) {
            Some(diff) => minutes += diff,
            None => log::debug!("Ignoring unparseable range {start}-{end}"),
        }
    }

    let remainder = clock_range().replace_all(text, " ");
    let name = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

    TaskDuration { name, minutes }
}

pub fn compute_task_time(text: &str) -> TaskDuration {
    compute_task_time_on(Local::now().date_naive(), text)
}

/// `1h 30m (1.50 hours)`
pub fn format_minutes(minutes: i64, i18n: &I18n) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let magnitude = minutes.unsigned_abs();
    format!(
        "{sign}{}h {}m ({:.2} {})",
        magnitude / 60,
        magnitude % 60,
        minutes as f64 / 60.0,
        i18n.t("unit.hours")
    )
}

/// Aggregate every checklist line of a document as of `now`
pub fn compute_total_time_at(document: &str, now: NaiveDateTime) -> Report {
    let date = now.date();
    let mut entries = Vec::new();
    let mut total_minutes = 0;

    for line in document.lines() {
        let Some((indent, text)) = strip_checklist_marker(line) else {
            continue;
        };
        let task = compute_task_time_on(date, text);
        total_minutes += task.minutes;
        entries.push(ReportEntry {
            indent: indent.to_string(),
            task,
        });
    }

    log::debug!(
        "Aggregated {} checklist lines, {total_minutes} minutes",
        entries.len()
    );

    Report {
        entries,
        total_minutes,
        computed_at: now,
    }
}

pub fn compute_total_time(document: &str) -> Report {
    compute_total_time_at(document, Local::now().naive_local())
}

impl Report {
    /// Render the markdown summary inserted into the note
    pub fn render(&self, i18n: &I18n) -> String {
        let mut out = format!("### {}\n---\n", i18n.t("report.header"));
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{}{}: {}",
                entry.indent,
                entry.task.name,
                format_minutes(entry.task.minutes, i18n)
            );
        }
        let _ = write!(
            out,
            "\n\n---\n{}: {}\n\n{}: {}\n\n---\n",
            i18n.t("report.total"),
            format_minutes(self.total_minutes, i18n),
            i18n.t("report.computed_at"),
            self.computed_at.format("%Y-%m-%d %H:%M:%S")
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Language;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn noon() -> NaiveDateTime {
        day().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_clock_diff_minutes() {
        assert_eq!(clock_diff_minutes_on(day(), "10:25", "12:25"), Some(120));
        assert_eq!(clock_diff_minutes_on(day(), "9:05", "09:50"), Some(45));
        assert_eq!(clock_diff_minutes("10:25", "12:25"), Some(120));
    }

    #[test]
    fn test_clock_diff_across_midnight_is_negative() {
        assert_eq!(clock_diff_minutes_on(day(), "23:00", "01:00"), Some(-1320));
    }

    #[test]
    fn test_clock_diff_malformed() {
        assert_eq!(clock_diff_minutes_on(day(), "ab:cd", "10:00"), None);
        assert_eq!(clock_diff_minutes_on(day(), "10:00", "10:75"), None);
        assert_eq!(clock_diff_minutes_on(day(), "25:00", "26:00"), None);
        assert_eq!(clock_diff_minutes_on(day(), "1000", "11:00"), None);
    }

    #[test]
    fn test_compute_task_time_single_range() {
        let task = compute_task_time_on(day(), "Writing 09:00-10:30");
        assert_eq!(task.name, "Writing");
        assert_eq!(task.minutes, 90);
    }

    #[test]
    fn test_compute_task_time_multiple_ranges() {
        let task = compute_task_time_on(day(), "Study 08:00-09:00 14:00-15:30");
        assert_eq!(task.name, "Study");
        assert_eq!(task.minutes, 150);
    }

    #[test]
    fn test_compute_task_time_en_dash_and_inner_name() {
        let task = compute_task_time_on(day(), "Fix 9:00–9:40 parser bug");
        assert_eq!(task.name, "Fix parser bug");
        assert_eq!(task.minutes, 40);
    }

    #[test]
    fn test_compute_task_time_without_ranges() {
        let task = compute_task_time_on(day(), "Plan the week");
        assert_eq!(task.name, "Plan the week");
        assert_eq!(task.minutes, 0);
    }

    #[test]
    fn test_malformed_range_contributes_zero() {
        let task = compute_task_time_on(day(), "Gym 10:00-10:99 18:00-19:00");
        assert_eq!(task.minutes, 60);
    }

    #[test]
    fn test_strip_checklist_marker() {
        assert_eq!(strip_checklist_marker("- [ ] a"), Some(("", "a")));
        assert_eq!(strip_checklist_marker("  * [x] b"), Some(("  ", "b")));
        assert_eq!(strip_checklist_marker("\t- [?] c"), Some(("\t", "c")));
        assert_eq!(strip_checklist_marker("- [ ]"), Some(("", "")));
        assert_eq!(strip_checklist_marker("- plain bullet"), None);
        assert_eq!(strip_checklist_marker("text - [ ] later"), None);
    }

    #[test]
    fn test_format_minutes() {
        let en = I18n::new(Language::English);
        assert_eq!(format_minutes(90, &en), "1h 30m (1.50 hours)");
        assert_eq!(format_minutes(0, &en), "0h 0m (0.00 hours)");
        assert_eq!(format_minutes(-90, &en), "-1h 30m (-1.50 hours)");

        let zh = I18n::new(Language::ChineseSimplified);
        assert_eq!(format_minutes(45, &zh), "0h 45m (0.75 小时)");
    }

    #[test]
    fn test_compute_total_time_skips_plain_lines() {
        let doc = "# Today\n  - [x] Writing 09:00-10:30\nnotes 11:00-12:00\n";
        let report = compute_total_time_at(doc, noon());

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].indent, "  ");
        assert_eq!(report.entries[0].task.name, "Writing");
        assert_eq!(report.total_minutes, 90);
        assert_eq!(report.total_minutes, report.entries[0].task.minutes);
    }

    #[test]
    fn test_compute_total_time_keeps_zero_minute_tasks() {
        let doc = "- [ ] Idea\n- [x] Call 10:00-10:15\n";
        let report = compute_total_time_at(doc, noon());
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].task.minutes, 0);
        assert_eq!(report.total_minutes, 15);
    }

    #[test]
    fn test_render_report() {
        let doc = "- [x] Writing 09:00-10:30\n    - [ ] Review 10:30-11:00\n";
        let report = compute_total_time_at(doc, noon());
        let text = report.render(&I18n::new(Language::English));

        assert_eq!(
            text,
            "### Time spent\n---\n\
             Writing: 1h 30m (1.50 hours)\n    \
             Review: 0h 30m (0.50 hours)\n\
             \n\n---\n\
             Total time spent: 2h 0m (2.00 hours)\n\n\
             Last computed: 2026-10-19 12:00:00\n\n---\n"
        );
    }

    #[test]
    fn test_render_empty_report() {
        let report = compute_total_time_at("nothing here", noon());
        let text = report.render(&I18n::new(Language::ChineseSimplified));
        assert!(text.starts_with("### 时间花费统计\n---\n\n\n---\n"));
        assert!(text.contains("花费总时长: 0h 0m (0.00 小时)"));
    }
}
