//! Strict parsing of the wire formats used for event times and days.
//!
//! Times travel as `HH:MM` (24-hour) and days as `YYYY-MM-DD`. Anything else
//! is rejected; there is no locale-dependent fallback.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a day. `24:00` is representable as an end-of-day bound.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute resolution, `00:00..=24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Build from hour and minute. Returns `None` outside `00:00..=24:00`.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        let total = hour.checked_mul(60)?.checked_add(minute)?;
        (total <= MINUTES_PER_DAY).then_some(Self(total))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Add minutes, saturating at `24:00`.
    pub fn saturating_add_minutes(self, minutes: u16) -> Self {
        Self(self.0.saturating_add(minutes).min(MINUTES_PER_DAY))
    }

    /// Parse a strict `HH:MM` string. `24:00` is not accepted as input.
    pub fn parse(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() != 5 || b[2] != b':' {
            return None;
        }
        let hour = two_digits(b[0], b[1])?;
        let minute = two_digits(b[3], b[4])?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// 12-hour label, e.g. `09:30 AM`.
    pub fn to_12h(self) -> String {
        let h = self.hour() % 24;
        let (h12, suffix) = match h {
            0 => (12, "AM"),
            1..=11 => (h, "AM"),
            12 => (12, "PM"),
            _ => (h - 12, "PM"),
        };
        format!("{:02}:{:02} {}", h12, self.minute(), suffix)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == "24:00" {
            return Ok(Self::END_OF_DAY);
        }
        Self::parse(&s).ok_or_else(|| format!("invalid HH:MM time: {s}"))
    }
}

fn two_digits(hi: u8, lo: u8) -> Option<u16> {
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return None;
    }
    Some(u16::from(hi - b'0') * 10 + u16::from(lo - b'0'))
}

/// Parse a strict `YYYY-MM-DD` calendar day.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let digits_ok = b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Format a day in the wire form.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_hh_mm() {
        assert_eq!(TimeOfDay::parse("00:00"), Some(TimeOfDay::MIDNIGHT));
        assert_eq!(TimeOfDay::parse("09:05").map(|t| t.minutes()), Some(545));
        assert_eq!(TimeOfDay::parse("23:59").map(|t| t.minutes()), Some(1439));
    }

    #[test]
    fn rejects_loose_times() {
        for bad in ["9:00", "09:0", "24:00", "12:60", "0900", "09-00", " 9:00", "ab:cd", ""] {
            assert!(TimeOfDay::parse(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn saturates_at_end_of_day() {
        let t = TimeOfDay::parse("23:30").unwrap();
        assert_eq!(t.saturating_add_minutes(60), TimeOfDay::END_OF_DAY);
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn twelve_hour_labels() {
        assert_eq!(TimeOfDay::parse("00:15").unwrap().to_12h(), "12:15 AM");
        assert_eq!(TimeOfDay::parse("12:00").unwrap().to_12h(), "12:00 PM");
        assert_eq!(TimeOfDay::parse("18:45").unwrap().to_12h(), "06:45 PM");
    }

    #[test]
    fn parses_strict_days() {
        assert_eq!(
            parse_day("2025-10-26"),
            NaiveDate::from_ymd_opt(2025, 10, 26)
        );
        for bad in ["2025-2-01", "2025/10/26", "2025-02-30", "26-10-2025", "2025-10-26T00:00:00Z"] {
            assert!(parse_day(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn serde_uses_wire_form() {
        let t = TimeOfDay::parse("07:30").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:30\"");
        let back: TimeOfDay = serde_json::from_str("\"07:30\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"7:30\"").is_err());
    }
}
