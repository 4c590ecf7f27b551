//! Task management commands for CLI.

use clap::Subcommand;
use icefang_core::calendar::Category;
use icefang_core::{Database, Priority, StatusFilter, TaskDraft, TaskFilter, TaskPatch, TaskStore};

use super::{print_json, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Category: work, personal, fitness or other
        #[arg(long, default_value = "other")]
        category: Category,
        /// Due day (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks, newest first
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<Category>,
        /// Filter by status: all, completed or ongoing
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Mark a completed task open again
    Reopen {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

fn set_completed(db: &Database, ctx: &Context, id: &str, completed: bool) -> Result<(), Box<dyn std::error::Error>> {
    let patch = TaskPatch {
        completed: Some(completed),
        ..Default::default()
    };
    let task = db.update_task(id, &ctx.owner, &patch)?;
    print_json(&task)?;
    Ok(())
}

pub fn run(action: TaskAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Create {
            title,
            description,
            priority,
            category,
            due,
        } => {
            let draft = TaskDraft {
                title,
                description,
                priority,
                category,
                due_date: due,
            };
            let task = db.create_task(&ctx.owner, draft)?;
            eprintln!("Task created: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::List { category, status } => {
            let tasks = db.list_tasks(&ctx.owner, &TaskFilter { category, status })?;
            print_json(&tasks)?;
        }
        TaskAction::Get { id } => {
            let task = db
                .get_task(&id, &ctx.owner)?
                .ok_or(format!("Task not found: {id}"))?;
            print_json(&task)?;
        }
        TaskAction::Update {
            id,
            title,
            description,
            priority,
            category,
            due,
            clear_due,
        } => {
            let patch = TaskPatch {
                title,
                description,
                priority,
                category,
                due_date: due,
                clear_due_date: clear_due,
                completed: None,
            };
            if patch == TaskPatch::default() {
                return Err("nothing to update".into());
            }
            let task = db.update_task(&id, &ctx.owner, &patch)?;
            eprintln!("Task updated: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::Complete { id } => set_completed(&db, ctx, &id, true)?,
        TaskAction::Reopen { id } => set_completed(&db, ctx, &id, false)?,
        TaskAction::Delete { id } => {
            db.delete_task(&id, &ctx.owner)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
