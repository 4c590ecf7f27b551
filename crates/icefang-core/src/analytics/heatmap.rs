//! Completion heatmap: tasks completed per day over a date range.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::{days_between, WeekStart};
use crate::task::Task;

/// Completed-task count for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket, 0..=4.
    pub level: u8,
}

/// Intensity bucket for a count: 0, 1, 2, 3, then 4 for anything larger.
pub fn heat_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        _ => 4,
    }
}

/// One point per day in `[from, to]`, counting tasks by local completion day.
pub fn completion_heatmap(tasks: &[Task], from: NaiveDate, to: NaiveDate) -> Vec<DayPoint> {
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for task in tasks.iter().filter(|t| t.completed) {
        if let Some(day) = task.completed_day() {
            *counts.entry(day).or_default() += 1;
        }
    }

    days_between(from, to)
        .into_iter()
        .map(|date| {
            let count = counts.get(&date).copied().unwrap_or(0);
            DayPoint {
                date,
                count,
                level: heat_level(count),
            }
        })
        .collect()
}

/// A cell of the week-column heatmap grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    /// Padding days outside `[from, to]` are drawn blank.
    pub in_range: bool,
}

/// Month label anchored at a week column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    pub column: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    /// Week columns, seven cells each.
    pub weeks: Vec<Vec<HeatmapCell>>,
    pub month_labels: Vec<MonthLabel>,
}

/// Arrange `[from, to]` into whole-week columns.
///
/// A month label goes on the first column whose first day falls within the
/// first seven days of a month, unless the previous label has the same name.
pub fn heatmap_weeks(from: NaiveDate, to: NaiveDate, week_start: WeekStart) -> HeatmapGrid {
    if to < from {
        return HeatmapGrid {
            weeks: Vec::new(),
            month_labels: Vec::new(),
        };
    }

    let days = days_between(week_start.start_of_week(from), week_start.end_of_week(to));
    let weeks: Vec<Vec<HeatmapCell>> = days
        .chunks(7)
        .map(|week| {
            week.iter()
                .map(|&date| HeatmapCell {
                    date,
                    in_range: from <= date && date <= to,
                })
                .collect()
        })
        .collect();

    let mut month_labels: Vec<MonthLabel> = Vec::new();
    for (column, week) in weeks.iter().enumerate() {
        let Some(first) = week.first() else { continue };
        if first.date.day() > 7 {
            continue;
        }
        let name = first.date.format("%b").to_string();
        if month_labels.last().map_or(true, |l| l.name != name) {
            month_labels.push(MonthLabel { column, name });
        }
    }

    HeatmapGrid {
        weeks,
        month_labels,
    }
}
