//! Completion-rate series and the weekly recap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{days_between, first_of_month, last_of_month, Event, WeekStart};
use crate::task::Task;

/// Bucketing of the completion series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One point per day of the reference week.
    #[default]
    Weekly,
    /// One point per seven-day block of the reference month.
    Monthly,
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            other => Err(format!("expected weekly or monthly, got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPoint {
    pub label: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Tasks due in the bucket.
    pub due: u32,
    /// Of those, how many are completed.
    pub completed: u32,
    /// `completed / due` as a percentage; 0 when nothing is due.
    pub completion: f64,
}

fn point(label: String, from: NaiveDate, to: NaiveDate, tasks: &[Task]) -> CompletionPoint {
    let (due, completed) = tasks
        .iter()
        .filter(|t| t.due_day().is_some_and(|d| from <= d && d <= to))
        .fold((0u32, 0u32), |(due, done), t| (due + 1, done + u32::from(t.completed)));
    let completion = if due == 0 {
        0.0
    } else {
        f64::from(completed) * 100.0 / f64::from(due)
    };
    CompletionPoint {
        label,
        from,
        to,
        due,
        completed,
        completion,
    }
}

/// Completion percentage of due tasks, bucketed by `period` around
/// `reference`. Tasks without a due date do not count.
pub fn completion_series(
    tasks: &[Task],
    period: Period,
    reference: NaiveDate,
    week_start: WeekStart,
) -> Vec<CompletionPoint> {
    match period {
        Period::Weekly => {
            let start = week_start.start_of_week(reference);
            days_between(start, week_start.end_of_week(reference))
                .into_iter()
                .map(|day| point(day.format("%a").to_string(), day, day, tasks))
                .collect()
        }
        Period::Monthly => {
            let days = days_between(first_of_month(reference), last_of_month(reference));
            days.chunks(7)
                .enumerate()
                .filter_map(|(i, block)| {
                    let (first, last) = (block.first()?, block.last()?);
                    Some(point(format!("Week {}", i + 1), *first, *last, tasks))
                })
                .collect()
        }
    }
}

/// Headline numbers for the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRecap {
    pub week_start: NaiveDate,
    pub tasks_completed: u32,
    pub tasks_open: u32,
    pub events_scheduled: u32,
}

/// Tasks completed and events scheduled in the week containing `today`,
/// plus the number of tasks still open overall.
pub fn weekly_recap(tasks: &[Task], events: &[Event], today: NaiveDate, week_start: WeekStart) -> WeeklyRecap {
    let from = week_start.start_of_week(today);
    let to = week_start.end_of_week(today);
    let in_week = |d: NaiveDate| from <= d && d <= to;

    let tasks_completed = tasks
        .iter()
        .filter(|t| t.completed_day().is_some_and(in_week))
        .count();
    let tasks_open = tasks.iter().filter(|t| !t.completed).count();
    let events_scheduled = events
        .iter()
        .filter(|e| e.day().is_ok_and(in_week))
        .count();

    WeeklyRecap {
        week_start: from,
        tasks_completed: tasks_completed as u32,
        tasks_open: tasks_open as u32,
        events_scheduled: events_scheduled as u32,
    }
}

/// Share of all tasks that are completed, as a percentage.
pub fn overall_completion(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    done as f64 * 100.0 / tasks.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::test_support::event;
    use crate::calendar::Category;
    use crate::task::tests::task;
    use chrono::{Local, TimeZone, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn done(mut t: Task, y: i32, m: u32, d: u32) -> Task {
        t.set_completed(true, Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().with_timezone(&Utc));
        t
    }

    #[test]
    fn weekly_series_has_seven_days() {
        let tasks = vec![
            done(task("a", Category::Work, Some("2025-10-14")), 2025, 10, 14),
            task("b", Category::Work, Some("2025-10-14")),
            task("c", Category::Work, Some("2025-10-15")),
            task("undated", Category::Work, None),
        ];
        let series = completion_series(&tasks, Period::Weekly, ymd(2025, 10, 16), WeekStart::Sunday);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].label, "Sun");
        assert_eq!(series[2].due, 2);
        assert_eq!(series[2].completion, 50.0);
        assert_eq!(series[3].completion, 0.0);
        assert_eq!(series[6].due, 0);
    }

    #[test]
    fn monthly_series_uses_seven_day_blocks() {
        let tasks = vec![done(task("a", Category::Work, Some("2025-10-30")), 2025, 10, 30)];
        let series = completion_series(&tasks, Period::Monthly, ymd(2025, 10, 3), WeekStart::Sunday);
        let labels: Vec<_> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"]);
        assert_eq!(series[4].from, ymd(2025, 10, 29));
        assert_eq!(series[4].completion, 100.0);
    }

    #[test]
    fn recap_counts_this_week() {
        let tasks = vec![
            done(task("a", Category::Work, None), 2025, 10, 13),
            done(task("old", Category::Work, None), 2025, 10, 1),
            task("open", Category::Work, None),
        ];
        let events = vec![
            event("in", "2025-10-18", "09:00", None),
            event("out", "2025-10-19", "09:00", None),
            event("bad", "soon", "09:00", None),
        ];
        let recap = weekly_recap(&tasks, &events, ymd(2025, 10, 16), WeekStart::Sunday);
        assert_eq!(recap.week_start, ymd(2025, 10, 12));
        assert_eq!(recap.tasks_completed, 1);
        assert_eq!(recap.tasks_open, 1);
        assert_eq!(recap.events_scheduled, 1);
    }

    #[test]
    fn overall_completion_percentage() {
        assert_eq!(overall_completion(&[]), 0.0);
        let tasks = vec![
            done(task("a", Category::Work, None), 2025, 10, 1),
            task("b", Category::Work, None),
            task("c", Category::Work, None),
            task("d", Category::Work, None),
        ];
        assert_eq!(overall_completion(&tasks), 25.0);
    }

    #[test]
    fn period_parsing() {
        assert_eq!("Monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert!("daily".parse::<Period>().is_err());
    }
}
