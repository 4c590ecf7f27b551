//! Month, week and day views.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use icefang_core::calendar::{
    month_grid_days, week_days, DayColumn, Event, LayoutEngine, MonthLayout, WeekLayout,
};
use icefang_core::{Database, DateRange, EventStore};
use std::path::PathBuf;

use super::{load_events_file, print_json, truncate, Context};

const CELL_WIDTH: usize = 12;

#[derive(Args)]
pub struct ViewArgs {
    /// Any day in the period to show (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,
    /// Print the layout as JSON
    #[arg(long)]
    json: bool,
    /// Lay out events from a JSON file instead of the database
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Month grid with capped cells
    Month(ViewArgs),
    /// Seven day columns with packed time blocks
    Week(ViewArgs),
    /// A single day column
    Day(ViewArgs),
}

fn load_events(args: &ViewArgs, ctx: &Context, days: &[NaiveDate]) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    if let Some(path) = &args.input {
        return load_events_file(path);
    }
    let (Some(&from), Some(&to)) = (days.first(), days.last()) else {
        return Ok(Vec::new());
    };
    let db = Database::open()?;
    Ok(db.list_events(&ctx.owner, Some(DateRange::new(from, to)))?)
}

pub fn run(action: CalendarAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let engine = LayoutEngine::new(ctx.config.layout_options());
    let options = *engine.options();
    let now = ctx.now();

    match action {
        CalendarAction::Month(args) => {
            let reference = ctx.date_or_today(args.date.as_deref())?;
            let events = load_events(&args, ctx, &month_grid_days(reference, options.week_start))?;
            let layout = engine.month(&events, reference, now);
            if args.json {
                print_json(&layout)?;
            } else {
                print!("{}", render_month(&layout));
            }
        }
        CalendarAction::Week(args) => {
            let reference = ctx.date_or_today(args.date.as_deref())?;
            let events = load_events(&args, ctx, &week_days(reference, options.week_start))?;
            let layout = engine.week(&events, reference, now);
            if args.json {
                print_json(&layout)?;
            } else {
                print!("{}", render_week(&layout));
            }
        }
        CalendarAction::Day(args) => {
            let date = ctx.date_or_today(args.date.as_deref())?;
            let events = load_events(&args, ctx, &[date])?;
            let layout = engine.day(&events, date, now);
            if args.json {
                print_json(&layout)?;
            } else {
                print!("{}", render_day(&layout));
            }
        }
    }
    Ok(())
}

fn render_month(layout: &MonthLayout<'_>) -> String {
    let mut out = String::new();
    let Some(first) = layout.cells().find(|c| c.in_month) else {
        return out;
    };
    out.push_str(&format!("{}\n", first.date.format("%B %Y")));

    if let Some(week) = layout.weeks.first() {
        let header: Vec<String> = week
            .iter()
            .map(|c| format!("{:<CELL_WIDTH$}", c.date.format("%a").to_string()))
            .collect();
        out.push_str(header.join("|").trim_end());
        out.push('\n');
    }

    for week in &layout.weeks {
        let rows = week
            .iter()
            .map(|c| c.visible.len() + usize::from(c.overflow_count > 0))
            .max()
            .unwrap_or(0);

        let dates: Vec<String> = week
            .iter()
            .map(|c| {
                let marker = if c.is_today { "*" } else if c.in_month { "" } else { "." };
                format!("{:<CELL_WIDTH$}", format!("{}{marker}", c.date.format("%d")))
            })
            .collect();
        out.push_str(dates.join("|").trim_end());
        out.push('\n');

        for row in 0..rows {
            let line: Vec<String> = week
                .iter()
                .map(|c| {
                    let text = match c.visible.get(row) {
                        Some(event) => truncate(&event.title, CELL_WIDTH),
                        None if row == c.visible.len() && c.overflow_count > 0 => {
                            format!("+{} more", c.overflow_count)
                        }
                        None => String::new(),
                    };
                    format!("{text:<CELL_WIDTH$}")
                })
                .collect();
            out.push_str(line.join("|").trim_end());
            out.push('\n');
        }
        out.push_str(&"-".repeat((CELL_WIDTH + 1) * 7 - 1));
        out.push('\n');
    }
    out
}

fn render_day(column: &DayColumn<'_>) -> String {
    let mut out = format!(
        "{}{}\n",
        column.date.format("%a %Y-%m-%d"),
        if column.is_today { " (today)" } else { "" }
    );
    if column.blocks.is_empty() {
        out.push_str("  no events\n");
    }
    for block in &column.blocks {
        let mut line = format!(
            "  {} - {}  [{}/{}]  {}",
            block.start.to_12h(),
            block.end.to_12h(),
            block.column_index + 1,
            block.column_count,
            block.event.title
        );
        if let Some(location) = &block.event.location {
            line.push_str(&format!(" @ {location}"));
        }
        if block.clamped {
            line.push_str(" (end adjusted)");
        }
        out.push_str(&line);
        out.push('\n');
    }
    for skipped in &column.skipped {
        out.push_str(&format!("  ! skipped {}: {}\n", skipped.event_id, skipped.reason));
    }
    out
}

fn render_week(layout: &WeekLayout<'_>) -> String {
    layout
        .days
        .iter()
        .map(render_day)
        .collect::<Vec<_>>()
        .join("\n")
}
