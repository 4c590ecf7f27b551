use clap::Args;
use icefang_core::{dashboard, Database, EventStore, StatusFilter, TaskFilter, TaskStore};

use super::{print_json, Context};

#[derive(Args)]
pub struct DashboardArgs {
    /// Items per list (default: `dashboard.upcoming_limit` from config)
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long)]
    json: bool,
}

pub fn run(args: DashboardArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = ctx.today();
    let limit = args.limit.unwrap_or(ctx.config.dashboard.upcoming_limit);

    let events = db.list_events(&ctx.owner, None)?;
    let tasks = db.list_tasks(
        &ctx.owner,
        &TaskFilter {
            category: None,
            status: StatusFilter::Ongoing,
        },
    )?;
    let board = dashboard(&tasks, &events, today, limit);

    if args.json {
        print_json(&board)?;
        return Ok(());
    }

    println!("Upcoming events");
    if board.upcoming_events.is_empty() {
        println!("  none");
    }
    for event in &board.upcoming_events {
        println!("  {} {}  {}", event.date, event.start_time, event.title);
    }
    println!("Open tasks");
    if board.upcoming_tasks.is_empty() {
        println!("  none");
    }
    for task in &board.upcoming_tasks {
        let due = task.due_date.as_deref().unwrap_or("no due date");
        println!("  [{}] {}  ({due})", task.priority.as_str(), task.title);
    }
    Ok(())
}
