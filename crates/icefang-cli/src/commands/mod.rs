pub mod analytics;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod event;
pub mod task;

use chrono::{Local, NaiveDate, NaiveDateTime};
use icefang_core::calendar::parse_day;
use icefang_core::{Config, Event};
use serde::Serialize;
use std::path::Path;

/// Settings shared by every command.
pub struct Context {
    pub owner: String,
    pub config: Config,
}

impl Context {
    /// Local wall-clock time; calendar days are compared without zone conversion.
    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// `--date` if given, else today.
    pub fn date_or_today(&self, date: Option<&str>) -> Result<NaiveDate, String> {
        match date {
            Some(d) => parse_date(d),
            None => Ok(self.today()),
        }
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_day(s).ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read a JSON array of event records.
///
/// Records that do not deserialize are skipped with a warning; field-level
/// problems such as a bad start time are left for the layout to report.
pub fn load_events_file(path: &Path) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Event>(record) {
            Ok(event) => events.push(event),
            Err(err) => tracing::warn!(index, "skipping record: {err}"),
        }
    }
    tracing::debug!(count = events.len(), path = %path.display(), "events loaded from file");
    Ok(events)
}

/// Shorten `s` to at most `width` characters, marking the cut with `~`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("standup", 10), "standup");
        assert_eq!(truncate("quarterly planning", 8), "quarter~");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025-10-16").is_ok());
        assert!(parse_date("16/10/2025").is_err());
    }
}
