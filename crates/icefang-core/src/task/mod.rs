//! Task records, drafts, patches and list filtering.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_day, Category};
use crate::error::ValidationError;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("expected low, medium or high, got '{other}'"),
            }),
        }
    }
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub category: Category,
    pub completed: bool,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Due day, if set and well-formed.
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_day)
    }

    /// Local calendar day the task was completed on.
    pub fn completed_day(&self) -> Option<NaiveDate> {
        self.completed_at.map(|at| at.with_timezone(&Local).date_naive())
    }

    /// Flip completion, keeping `completed_at` in step.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if completed && !self.completed {
            self.completed_at = Some(now);
        } else if !completed {
            self.completed_at = None;
        }
        self.completed = completed;
        self.updated_at = now;
    }
}

fn check_due_date(due: Option<&str>) -> Result<(), ValidationError> {
    match due {
        Some(d) if parse_day(d).is_none() => Err(ValidationError::InvalidValue {
            field: "due_date".into(),
            message: format!("'{d}' is not a valid YYYY-MM-DD day"),
        }),
        _ => Ok(()),
    }
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        check_due_date(self.due_date.as_deref())
    }

    pub fn into_task(self, id: &str, owner_id: &str, now: DateTime<Utc>) -> Task {
        Task {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            title: self.title,
            description: self.description,
            priority: self.priority,
            category: self.category,
            completed: false,
            due_date: self.due_date,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a task. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<String>,
    /// Drop the due date so the task becomes undated.
    #[serde(default)]
    pub clear_due_date: bool,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if let Some(t) = &self.title {
            if t.trim().is_empty() {
                return Err(ValidationError::MissingField("title"));
            }
        }
        check_due_date(self.due_date.as_deref())?;

        if let Some(t) = &self.title {
            task.title = t.clone();
        }
        if let Some(d) = &self.description {
            task.description = Some(d.clone());
        }
        if let Some(p) = self.priority {
            task.priority = p;
        }
        if let Some(c) = self.category {
            task.category = c;
        }
        if self.clear_due_date {
            task.due_date = None;
        }
        if let Some(d) = &self.due_date {
            task.due_date = Some(d.clone());
        }
        if let Some(c) = self.completed {
            task.set_completed(c, now);
        }
        task.updated_at = now;
        Ok(())
    }
}

/// Completion status filter for task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Ongoing,
}

impl std::str::FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "ongoing" => Ok(StatusFilter::Ongoing),
            other => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("expected all, completed or ongoing, got '{other}'"),
            }),
        }
    }
}

/// Task list filter. The default matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<Category>,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let category_ok = self.category.map_or(true, |c| c == task.category);
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Ongoing => !task.completed,
        };
        category_ok && status_ok
    }
}
