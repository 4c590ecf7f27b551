//! Calendar events and the layout engine.
//!
//! This module provides:
//! - Strict `HH:MM` / `YYYY-MM-DD` parsing
//! - Bucketing of events into the days of a month grid or week
//! - Month-cell capping with an overflow count
//! - Overlap grouping and column packing for the week/day time grid
//! - Pixel geometry for time-grid blocks

mod capper;
mod columns;
mod engine;
mod event;
mod geometry;
mod overlap;
mod partition;
mod time;

pub use capper::{cap_ordered, cap_visible, CapOrder, Capped, DEFAULT_MAX_VISIBLE};
pub use columns::{assign_columns, ColumnSlot, PackingMode};
pub use engine::{
    DayCell, DayColumn, DayLayout, LayoutEngine, LayoutOptions, MonthLayout, PositionedEvent,
    SkippedEvent, WeekLayout,
};
pub use event::{
    Category, Event, EventDraft, EventPatch, TimedEvent, DEFAULT_CATEGORY_COLOR,
    DEFAULT_EVENT_MINUTES,
};
pub use geometry::{
    now_line_offset, to_pixel_geometry, BlockGeometry, DEFAULT_MIN_BLOCK_HEIGHT,
    DEFAULT_PIXELS_PER_HOUR,
};
pub use overlap::{group_overlaps, OverlapGroup};
pub use partition::{
    days_between, first_of_month, last_of_month, month_grid_days, partition_by_day, week_days,
    WeekStart,
};
pub use time::{format_day, parse_day, TimeOfDay, MINUTES_PER_DAY};

#[cfg(test)]
pub(crate) use event::tests as test_support;
