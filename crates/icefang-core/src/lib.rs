//! # Icefang Core Library
//!
//! This library provides the core logic for the Icefang personal calendar
//! and task tracker. All operations are available through the standalone
//! `icefang` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Calendar**: Layout engine that turns flat event records into month
//!   cells and week/day time-grid blocks (partition, cap, group, pack, place)
//! - **Tasks**: To-do items with priority, category and completion tracking
//! - **Storage**: SQLite-based event/task storage and TOML-based configuration
//! - **Analytics**: Completion heatmap, completion-rate series, weekly recap
//!
//! ## Key Components
//!
//! - [`LayoutEngine`]: Month, week and day layouts
//! - [`Database`]: Event and task persistence
//! - [`Config`]: Application configuration management
//! - [`EventStore`] / [`TaskStore`]: Owner-scoped storage traits

pub mod analytics;
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod storage;
pub mod task;

pub use calendar::{
    Category, Event, EventDraft, EventPatch, LayoutEngine, LayoutOptions, MonthLayout,
    PositionedEvent, TimeOfDay, WeekLayout, WeekStart,
};
pub use dashboard::{dashboard, Dashboard};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use storage::{Config, Database, DateRange, EventStore, TaskStore};
pub use task::{Priority, StatusFilter, Task, TaskDraft, TaskFilter, TaskPatch};
