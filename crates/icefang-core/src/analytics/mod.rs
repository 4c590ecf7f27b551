//! Task and event statistics: completion heatmap, completion-rate series
//! and the weekly recap.

mod completion;
mod heatmap;

pub use completion::{
    completion_series, overall_completion, weekly_recap, CompletionPoint, Period, WeeklyRecap,
};
pub use heatmap::{
    completion_heatmap, heat_level, heatmap_weeks, DayPoint, HeatmapCell, HeatmapGrid, MonthLabel,
};
