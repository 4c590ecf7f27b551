//! Day ranges and bucketing of events into days.
//!
//! Day equality is a plain comparison of naive calendar days: an event's
//! `date` string is parsed as `YYYY-MM-DD` and never shifted by a time zone.
//! "Today" is likewise a naive date supplied by the caller.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::event::Event;

/// First day of the week in calendar grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Start of the week containing `day`.
    pub fn start_of_week(self, day: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => day.weekday().num_days_from_sunday(),
            WeekStart::Monday => day.weekday().num_days_from_monday(),
        };
        day - Duration::days(i64::from(offset))
    }

    pub fn end_of_week(self, day: NaiveDate) -> NaiveDate {
        self.start_of_week(day) + Duration::days(6)
    }
}

/// The 7 days of the week containing `reference`.
pub fn week_days(reference: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let start = week_start.start_of_week(reference);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// Days of a month grid: whole weeks covering the month of `reference`.
///
/// Yields 28, 35 or 42 days depending on how the month falls.
pub fn month_grid_days(reference: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let first = first_of_month(reference);
    let last = last_of_month(reference);
    days_between(week_start.start_of_week(first), week_start.end_of_week(last))
}

/// Inclusive day range; empty when `to < from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn last_of_month(day: NaiveDate) -> NaiveDate {
    let (y, m) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(day)
}

/// Bucket `events` by day for every day in `days`.
///
/// Each requested day gets an entry, empty if nothing falls on it. Events
/// keep their input order inside a bucket. Events with an unparseable date
/// are logged and left out; events outside `days` are ignored.
pub fn partition_by_day<'a>(
    events: &'a [Event],
    days: &[NaiveDate],
) -> BTreeMap<NaiveDate, Vec<&'a Event>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a Event>> =
        days.iter().map(|d| (*d, Vec::new())).collect();

    for event in events {
        match event.day() {
            Ok(day) => {
                if let Some(bucket) = buckets.get_mut(&day) {
                    bucket.push(event);
                }
            }
            Err(err) => tracing::warn!(event_id = %event.id, "skipping event: {err}"),
        }
    }
    buckets
}
