//! Event management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use icefang_core::calendar::Category;
use icefang_core::{Database, DateRange, EventDraft, EventPatch, EventStore};

use super::{parse_date, print_json, Context};

#[derive(Subcommand)]
pub enum EventAction {
    /// Create a new event
    Create {
        /// Event title
        title: String,
        /// Day (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM, default: one hour after start)
        #[arg(long)]
        end: Option<String>,
        /// Category: work, personal, fitness or other
        #[arg(long, default_value = "other")]
        category: Category,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List events, newest first
    List {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Get event details
    Get {
        /// Event ID
        id: String,
    },
    /// Update an event
    Update {
        /// Event ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long, conflicts_with = "clear_end")]
        end: Option<String>,
        /// Remove the end time so the one-hour default applies
        #[arg(long)]
        clear_end: bool,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
}

// Days are stored as YYYY-MM-DD text, so open bounds stay within four-digit years.
fn earliest() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
}

fn latest() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or_default()
}

pub fn run(action: EventAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        EventAction::Create {
            title,
            date,
            start,
            end,
            category,
            location,
            description,
        } => {
            let draft = EventDraft {
                title,
                date,
                start_time: start,
                end_time: end,
                category,
                location,
                description,
            };
            let event = db.create_event(&ctx.owner, draft)?;
            eprintln!("Event created: {}", event.id);
            print_json(&event)?;
        }
        EventAction::List { from, to } => {
            let range = match (from, to) {
                (None, None) => None,
                (from, to) => {
                    let from = from.as_deref().map(parse_date).transpose()?;
                    let to = to.as_deref().map(parse_date).transpose()?;
                    Some(DateRange::new(
                        from.unwrap_or(earliest()),
                        to.unwrap_or(latest()),
                    ))
                }
            };
            let events = db.list_events(&ctx.owner, range)?;
            print_json(&events)?;
        }
        EventAction::Get { id } => {
            let event = db
                .get_event(&id, &ctx.owner)?
                .ok_or(format!("Event not found: {id}"))?;
            print_json(&event)?;
        }
        EventAction::Update {
            id,
            title,
            date,
            start,
            end,
            clear_end,
            category,
            location,
            description,
        } => {
            let patch = EventPatch {
                title,
                date,
                start_time: start,
                end_time: end,
                clear_end_time: clear_end,
                category,
                location,
                description,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            let event = db.update_event(&id, &ctx.owner, &patch)?;
            eprintln!("Event updated: {}", event.id);
            print_json(&event)?;
        }
        EventAction::Delete { id } => {
            db.delete_event(&id, &ctx.owner)?;
            println!("Event deleted: {id}");
        }
    }
    Ok(())
}
