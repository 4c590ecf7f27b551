//! SQLite-based storage for events and tasks.
//!
//! Provides persistent storage for:
//! - Calendar events, scoped by owner
//! - Tasks, scoped by owner

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

use super::data_dir;
use super::store::{DateRange, EventStore, TaskStore};
use crate::calendar::{format_day, Category, Event, EventDraft, EventPatch};
use crate::error::{CoreError, DatabaseError, Result};
use crate::task::{Priority, StatusFilter, Task, TaskDraft, TaskFilter, TaskPatch};

const EVENT_COLUMNS: &str = "id, owner_id, title, date, start_time, end_time, category, location, description, created_at, updated_at";
const TASK_COLUMNS: &str = "id, owner_id, title, description, priority, category, completed, due_date, completed_at, created_at, updated_at";

/// Parse datetime from RFC3339 string with fallback to the epoch
fn parse_datetime(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn parse_priority(s: &str) -> Priority {
    s.parse().unwrap_or_default()
}

fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        date: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        category: Category::from(row.get::<_, String>(6)?),
        location: row.get(7)?,
        description: row.get(8)?,
        created_at: parse_datetime(&row.get::<_, String>(9)?),
        updated_at: parse_datetime(&row.get::<_, String>(10)?),
    })
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        priority: parse_priority(&row.get::<_, String>(4)?),
        category: Category::from(row.get::<_, String>(5)?),
        completed: row.get(6)?,
        due_date: row.get(7)?,
        completed_at: row
            .get::<_, Option<String>>(8)?
            .as_deref()
            .map(parse_datetime),
        created_at: parse_datetime(&row.get::<_, String>(9)?),
        updated_at: parse_datetime(&row.get::<_, String>(10)?),
    })
}

/// SQLite database for events and tasks.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/icefang.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("icefang.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS events (
                    id          TEXT PRIMARY KEY,
                    owner_id    TEXT NOT NULL,
                    title       TEXT NOT NULL,
                    date        TEXT NOT NULL,
                    start_time  TEXT NOT NULL,
                    end_time    TEXT,
                    category    TEXT NOT NULL DEFAULT 'other',
                    location    TEXT,
                    description TEXT,
                    created_at  TEXT NOT NULL,
                    updated_at  TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS tasks (
                    id           TEXT PRIMARY KEY,
                    owner_id     TEXT NOT NULL,
                    title        TEXT NOT NULL,
                    description  TEXT,
                    priority     TEXT NOT NULL DEFAULT 'medium',
                    category     TEXT NOT NULL DEFAULT 'other',
                    completed    INTEGER NOT NULL DEFAULT 0,
                    due_date     TEXT,
                    completed_at TEXT,
                    created_at   TEXT NOT NULL,
                    updated_at   TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_events_owner_date ON events(owner_id, date);
                CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks(owner_id, completed);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }
}

impl EventStore for Database {
    fn list_events(&self, owner_id: &str, range: Option<DateRange>) -> Result<Vec<Event>> {
        let (from, to) = match range {
            Some(r) => (Some(format_day(r.from)), Some(format_day(r.to))),
            None => (None, None),
        };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE owner_id = ?1
               AND (?2 IS NULL OR date >= ?2)
               AND (?3 IS NULL OR date <= ?3)
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let events = stmt
            .query_map(params![owner_id, from, to], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    fn get_event(&self, id: &str, owner_id: &str) -> Result<Option<Event>> {
        let event = self
            .conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1 AND owner_id = ?2"),
                params![id, owner_id],
                row_to_event,
            )
            .optional()?;
        Ok(event)
    }

    fn create_event(&self, owner_id: &str, draft: EventDraft) -> Result<Event> {
        draft.validate()?;
        let event = draft.into_event(&Uuid::new_v4().to_string(), owner_id, Utc::now());
        self.conn.execute(
            &format!(
                "INSERT INTO events ({EVENT_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            params![
                event.id,
                event.owner_id,
                event.title,
                event.date,
                event.start_time,
                event.end_time,
                event.category.as_str(),
                event.location,
                event.description,
                event.created_at.to_rfc3339(),
                event.updated_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(event_id = %event.id, owner_id, "event created");
        Ok(event)
    }

    fn update_event(&self, id: &str, owner_id: &str, patch: &EventPatch) -> Result<Event> {
        let mut event = self.get_event(id, owner_id)?.ok_or_else(|| CoreError::NotFound {
            kind: "Event",
            id: id.to_string(),
        })?;
        patch.apply(&mut event, Utc::now())?;
        self.conn.execute(
            "UPDATE events
             SET title = ?3, date = ?4, start_time = ?5, end_time = ?6, category = ?7,
                 location = ?8, description = ?9, updated_at = ?10
             WHERE id = ?1 AND owner_id = ?2",
            params![
                event.id,
                event.owner_id,
                event.title,
                event.date,
                event.start_time,
                event.end_time,
                event.category.as_str(),
                event.location,
                event.description,
                event.updated_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(event_id = %event.id, owner_id, "event updated");
        Ok(event)
    }

    fn delete_event(&self, id: &str, owner_id: &str) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM events WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if deleted == 0 {
            return Err(CoreError::NotFound {
                kind: "Event",
                id: id.to_string(),
            });
        }
        tracing::debug!(event_id = id, owner_id, "event deleted");
        Ok(())
    }
}

impl TaskStore for Database {
    fn list_tasks(&self, owner_id: &str, filter: &TaskFilter) -> Result<Vec<Task>> {
        let category = filter.category.map(Category::as_str);
        let completed = match filter.status {
            StatusFilter::All => None,
            StatusFilter::Completed => Some(true),
            StatusFilter::Ongoing => Some(false),
        };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE owner_id = ?1
               AND (?2 IS NULL OR category = ?2)
               AND (?3 IS NULL OR completed = ?3)
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let tasks = stmt
            .query_map(params![owner_id, category, completed], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn get_task(&self, id: &str, owner_id: &str) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND owner_id = ?2"),
                params![id, owner_id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    fn create_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task> {
        draft.validate()?;
        let task = draft.into_task(&Uuid::new_v4().to_string(), owner_id, Utc::now());
        self.conn.execute(
            &format!(
                "INSERT INTO tasks ({TASK_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            params![
                task.id,
                task.owner_id,
                task.title,
                task.description,
                task.priority.as_str(),
                task.category.as_str(),
                task.completed,
                task.due_date,
                task.completed_at.map(|t| t.to_rfc3339()),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(task_id = %task.id, owner_id, "task created");
        Ok(task)
    }

    fn update_task(&self, id: &str, owner_id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.get_task(id, owner_id)?.ok_or_else(|| CoreError::NotFound {
            kind: "Task",
            id: id.to_string(),
        })?;
        patch.apply(&mut task, Utc::now())?;
        self.conn.execute(
            "UPDATE tasks
             SET title = ?3, description = ?4, priority = ?5, category = ?6, completed = ?7,
                 due_date = ?8, completed_at = ?9, updated_at = ?10
             WHERE id = ?1 AND owner_id = ?2",
            params![
                task.id,
                task.owner_id,
                task.title,
                task.description,
                task.priority.as_str(),
                task.category.as_str(),
                task.completed,
                task.due_date,
                task.completed_at.map(|t| t.to_rfc3339()),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(task_id = %task.id, owner_id, "task updated");
        Ok(task)
    }

    fn delete_task(&self, id: &str, owner_id: &str) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if deleted == 0 {
            return Err(CoreError::NotFound {
                kind: "Task",
                id: id.to_string(),
            });
        }
        tracing::debug!(task_id = id, owner_id, "task deleted");
        Ok(())
    }
}
