//! Owner-scoped persistence contracts for events and tasks.
//!
//! Every operation takes the owner id; a record owned by someone else is
//! indistinguishable from a missing one.

use chrono::NaiveDate;

use crate::calendar::{Event, EventDraft, EventPatch};
use crate::error::Result;
use crate::task::{Task, TaskDraft, TaskFilter, TaskPatch};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }
}

pub trait EventStore {
    /// Events of `owner_id`, newest-created first, optionally limited to
    /// days in `range`.
    fn list_events(&self, owner_id: &str, range: Option<DateRange>) -> Result<Vec<Event>>;

    fn get_event(&self, id: &str, owner_id: &str) -> Result<Option<Event>>;

    fn create_event(&self, owner_id: &str, draft: EventDraft) -> Result<Event>;

    fn update_event(&self, id: &str, owner_id: &str, patch: &EventPatch) -> Result<Event>;

    fn delete_event(&self, id: &str, owner_id: &str) -> Result<()>;
}

pub trait TaskStore {
    /// Tasks of `owner_id` matching `filter`, newest-created first.
    fn list_tasks(&self, owner_id: &str, filter: &TaskFilter) -> Result<Vec<Task>>;

    fn get_task(&self, id: &str, owner_id: &str) -> Result<Option<Task>>;

    fn create_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task>;

    fn update_task(&self, id: &str, owner_id: &str, patch: &TaskPatch) -> Result<Task>;

    fn delete_task(&self, id: &str, owner_id: &str) -> Result<()>;
}
