//! Completion statistics commands.

use chrono::{Duration, NaiveDate};
use clap::Subcommand;
use icefang_core::analytics::{
    completion_heatmap, completion_series, heatmap_weeks, overall_completion, weekly_recap,
    DayPoint, HeatmapGrid, Period,
};
use icefang_core::{Database, EventStore, TaskFilter, TaskStore};
use serde_json::json;
use std::collections::HashMap;

use super::{parse_date, print_json, Context};

const LEVEL_GLYPHS: [char; 5] = ['.', '░', '▒', '▓', '█'];

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Tasks completed per day
    Heatmap {
        /// First day (YYYY-MM-DD, default: 52 weeks before --to)
        #[arg(long)]
        from: Option<String>,
        /// Last day (YYYY-MM-DD, default: today)
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Completion rate of due tasks
    Completion {
        /// weekly (days of the week) or monthly (weeks of the month)
        #[arg(long, default_value = "weekly")]
        period: Period,
        /// Any day in the period (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// This week's numbers
    Recap {
        /// Any day in the week (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AnalyticsAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tasks = db.list_tasks(&ctx.owner, &TaskFilter::default())?;
    let week_start = ctx.config.calendar.week_start;

    match action {
        AnalyticsAction::Heatmap { from, to, json } => {
            let to = ctx.date_or_today(to.as_deref())?;
            let from = match from {
                Some(f) => parse_date(&f)?,
                None => to - Duration::weeks(52) + Duration::days(1),
            };
            if from > to {
                return Err(format!("--from {from} is after --to {to}").into());
            }
            let points = completion_heatmap(&tasks, from, to);
            if json {
                print_json(&points)?;
            } else {
                print!("{}", render_heatmap(&heatmap_weeks(from, to, week_start), &points));
            }
        }
        AnalyticsAction::Completion { period, date, json } => {
            let reference = ctx.date_or_today(date.as_deref())?;
            let series = completion_series(&tasks, period, reference, week_start);
            if json {
                print_json(&json!({
                    "series": series,
                    "overall": overall_completion(&tasks),
                }))?;
            } else {
                for point in &series {
                    println!(
                        "{:<7} {:>3}/{:<3} {:>5.1}%",
                        point.label, point.completed, point.due, point.completion
                    );
                }
                println!("overall {:.1}%", overall_completion(&tasks));
            }
        }
        AnalyticsAction::Recap { date, json } => {
            let today = ctx.date_or_today(date.as_deref())?;
            let events = db.list_events(&ctx.owner, None)?;
            let recap = weekly_recap(&tasks, &events, today, week_start);
            if json {
                print_json(&recap)?;
            } else {
                println!("week of {}", recap.week_start);
                println!("  tasks completed   {}", recap.tasks_completed);
                println!("  tasks open        {}", recap.tasks_open);
                println!("  events scheduled  {}", recap.events_scheduled);
            }
        }
    }
    Ok(())
}

fn render_heatmap(grid: &HeatmapGrid, points: &[DayPoint]) -> String {
    let levels: HashMap<NaiveDate, u8> = points.iter().map(|p| (p.date, p.level)).collect();
    let mut out = String::new();

    let mut labels = vec![' '; grid.weeks.len() + 3];
    for label in &grid.month_labels {
        for (offset, ch) in label.name.chars().enumerate() {
            if let Some(slot) = labels.get_mut(label.column + offset) {
                *slot = ch;
            }
        }
    }
    out.push_str(&format!("    {}\n", labels.iter().collect::<String>().trim_end()));

    for row in 0..7 {
        let Some(first) = grid.weeks.first().and_then(|w| w.get(row)) else {
            break;
        };
        let line: String = grid
            .weeks
            .iter()
            .filter_map(|week| week.get(row))
            .map(|cell| {
                if !cell.in_range {
                    return ' ';
                }
                let level = levels.get(&cell.date).copied().unwrap_or(0);
                LEVEL_GLYPHS[usize::from(level.min(4))]
            })
            .collect();
        out.push_str(&format!("{} {}\n", first.date.format("%a"), line.trim_end()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use icefang_core::calendar::WeekStart;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn heatmap_text_has_a_row_per_weekday() {
        let (from, to) = (day("2025-10-01"), day("2025-10-31"));
        let mut points = completion_heatmap(&[], from, to);
        points[14].count = 4;
        points[14].level = 4;
        let text = render_heatmap(&heatmap_weeks(from, to, WeekStart::Sunday), &points);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("Oct"));
        assert!(lines[1].starts_with("Sun"));
        // 2025-10-15 is a Wednesday in the third column
        assert!(lines[4].starts_with("Wed"));
        assert_eq!(lines[4].chars().nth(6), Some('█'));
    }
}
