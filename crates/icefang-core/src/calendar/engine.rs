//! Month, week and day layouts built from the partition, capping, grouping,
//! column and geometry steps.
//!
//! The engine holds only options. Every call recomputes its output from the
//! events passed in, so the same input always yields the same layout.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::capper::{cap_ordered, CapOrder, DEFAULT_MAX_VISIBLE};
use super::columns::{assign_columns, PackingMode};
use super::event::{Event, TimedEvent};
use super::geometry::{
    now_line_offset, to_pixel_geometry, DEFAULT_MIN_BLOCK_HEIGHT, DEFAULT_PIXELS_PER_HOUR,
};
use super::overlap::group_overlaps;
use super::partition::{month_grid_days, partition_by_day, week_days, WeekStart};
use super::time::TimeOfDay;

/// Knobs for the layout engine, usually taken from `[calendar]` config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub max_visible: usize,
    pub cap_order: CapOrder,
    pub packing: PackingMode,
    pub pixels_per_hour: f64,
    pub min_block_height: f64,
    pub week_start: WeekStart,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            cap_order: CapOrder::Arrival,
            packing: PackingMode::GroupWidth,
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
            min_block_height: DEFAULT_MIN_BLOCK_HEIGHT,
            week_start: WeekStart::Sunday,
        }
    }
}

/// One month-view cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub visible: Vec<&'a Event>,
    pub overflow_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout<'a> {
    pub year: i32,
    pub month: u32,
    /// Rows of seven cells.
    pub weeks: Vec<Vec<DayCell<'a>>>,
}

impl<'a> MonthLayout<'a> {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.weeks.iter().flatten()
    }
}

/// An event placed on the time grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent<'a> {
    pub event: &'a Event,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// End was inverted and replaced by start + 1h.
    pub clamped: bool,
    pub top_offset_minutes: u16,
    pub height_minutes: u16,
    pub column_index: usize,
    pub column_count: usize,
    pub left_fraction: f64,
    pub width_fraction: f64,
    pub top: f64,
    pub height: f64,
}

/// An event left off the grid because its fields did not parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEvent<'a> {
    pub event_id: &'a str,
    pub reason: String,
}

/// One day of a week or day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Ordered by overlap group, then start time.
    pub blocks: Vec<PositionedEvent<'a>>,
    pub skipped: Vec<SkippedEvent<'a>>,
    /// Current-time indicator offset, only on today's column.
    pub now_line: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout<'a> {
    pub days: Vec<DayColumn<'a>>,
}

pub type DayLayout<'a> = DayColumn<'a>;

/// Stateless layout engine.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Month grid for the month containing `reference`.
    pub fn month<'a>(&self, events: &'a [Event], reference: NaiveDate, now: NaiveDateTime) -> MonthLayout<'a> {
        let days = month_grid_days(reference, self.options.week_start);
        let buckets = partition_by_day(events, &days);
        let today = now.date();

        let cells: Vec<DayCell<'a>> = buckets
            .into_iter()
            .map(|(date, day_events)| {
                let capped = cap_ordered(&day_events, self.options.max_visible, self.options.cap_order);
                DayCell {
                    date,
                    in_month: date.month() == reference.month() && date.year() == reference.year(),
                    is_today: date == today,
                    visible: capped.visible,
                    overflow_count: capped.overflow_count,
                }
            })
            .collect();

        MonthLayout {
            year: reference.year(),
            month: reference.month(),
            weeks: cells.chunks(7).map(<[DayCell<'a>]>::to_vec).collect(),
        }
    }

    /// Seven day columns for the week containing `reference`.
    pub fn week<'a>(&self, events: &'a [Event], reference: NaiveDate, now: NaiveDateTime) -> WeekLayout<'a> {
        let days = week_days(reference, self.options.week_start);
        let buckets = partition_by_day(events, &days);
        WeekLayout {
            days: buckets
                .into_iter()
                .map(|(date, day_events)| self.day_column(date, &day_events, now))
                .collect(),
        }
    }

    /// A single day column.
    pub fn day<'a>(&self, events: &'a [Event], date: NaiveDate, now: NaiveDateTime) -> DayLayout<'a> {
        let buckets = partition_by_day(events, &[date]);
        let day_events = buckets.get(&date).map(Vec::as_slice).unwrap_or_default();
        self.day_column(date, day_events, now)
    }

    /// Lay out events already known to fall on `date`.
    pub fn day_column<'a>(&self, date: NaiveDate, day_events: &[&'a Event], now: NaiveDateTime) -> DayColumn<'a> {
        let mut timed = Vec::with_capacity(day_events.len());
        let mut skipped = Vec::new();
        for &event in day_events {
            match TimedEvent::resolve_or_clamp(event) {
                Ok(t) => timed.push(t),
                Err(err) => {
                    tracing::warn!(event_id = %event.id, "skipping event: {err}");
                    skipped.push(SkippedEvent {
                        event_id: event.id.as_str(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let mut blocks = Vec::with_capacity(timed.len());
        for group in group_overlaps(&timed) {
            let slots = assign_columns(&group, self.options.packing);
            for (member, slot) in group.members.iter().zip(slots) {
                let geo = to_pixel_geometry(member, self.options.pixels_per_hour, self.options.min_block_height);
                blocks.push(PositionedEvent {
                    event: member.event,
                    start: member.start,
                    end: member.end,
                    clamped: member.clamped,
                    top_offset_minutes: member.start.minutes(),
                    height_minutes: member.duration_minutes(),
                    column_index: slot.column_index,
                    column_count: slot.column_count,
                    left_fraction: slot.left_fraction,
                    width_fraction: slot.width_fraction,
                    top: geo.top,
                    height: geo.height,
                });
            }
        }

        let is_today = date == now.date();
        let now_line = is_today
            .then(|| TimeOfDay::from_hm(now.hour() as u16, now.minute() as u16))
            .flatten()
            .map(|t| now_line_offset(t, self.options.pixels_per_hour));

        DayColumn {
            date,
            is_today,
            blocks,
            skipped,
            now_line,
        }
    }
}
