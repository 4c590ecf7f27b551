//! Calendar event records and their resolution into timed intervals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::time::{parse_day, TimeOfDay};
use crate::error::{TimeField, ValidationError};

/// Duration assumed for events without an explicit end time.
pub const DEFAULT_EVENT_MINUTES: u16 = 60;

/// Default colour for events whose category has no dedicated treatment.
pub const DEFAULT_CATEGORY_COLOR: &str = "#067fc3";

/// Category of an event or task.
///
/// Parsing is case-insensitive and never fails: anything unrecognised
/// becomes [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Personal,
    Fitness,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Fitness => "fitness",
            Category::Other => "other",
        }
    }

    /// Display colour used by calendar blocks and task badges.
    pub fn color(self) -> &'static str {
        match self {
            Category::Work => "#ea580c",
            Category::Personal => "#9333ea",
            Category::Fitness => "#059669",
            Category::Other => DEFAULT_CATEGORY_COLOR,
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Category::Work,
            "personal" => Category::Personal,
            "fitness" => Category::Fitness,
            _ => Category::Other,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar event as stored and exchanged.
///
/// Dates and times keep their wire form; [`TimedEvent::resolve`] turns them
/// into checked values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "userId")]
    pub owner_id: String,
    #[serde(alias = "name")]
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    #[serde(alias = "startTime")]
    pub start_time: String,
    /// `HH:MM`; absent means one hour after the start
    #[serde(default, alias = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Calendar day of the event.
    pub fn day(&self) -> Result<NaiveDate, ValidationError> {
        parse_day(&self.date).ok_or_else(|| ValidationError::InvalidDate {
            event_id: self.id.clone(),
            value: self.date.clone(),
        })
    }

    pub fn start(&self) -> Result<TimeOfDay, ValidationError> {
        parse_time(&self.id, TimeField::Start, &self.start_time)
    }

    /// Stated end time, if any.
    pub fn end(&self) -> Result<Option<TimeOfDay>, ValidationError> {
        self.end_time
            .as_deref()
            .map(|s| parse_time(&self.id, TimeField::End, s))
            .transpose()
    }

    /// Full check of date, times and range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        TimedEvent::resolve(self).map(|_| ())
    }
}

fn parse_time(event_id: &str, field: TimeField, value: &str) -> Result<TimeOfDay, ValidationError> {
    TimeOfDay::parse(value).ok_or_else(|| ValidationError::InvalidTime {
        event_id: event_id.to_string(),
        field,
        value: value.to_string(),
    })
}

/// An event with its day and effective interval resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent<'a> {
    pub event: &'a Event,
    pub day: NaiveDate,
    pub start: TimeOfDay,
    /// Stated end, or start + 1h capped at `24:00`.
    pub end: TimeOfDay,
    /// True when an inverted range was replaced by start + 1h.
    pub clamped: bool,
}

impl<'a> TimedEvent<'a> {
    /// Resolve strictly: malformed fields and inverted ranges are errors.
    pub fn resolve(event: &'a Event) -> Result<Self, ValidationError> {
        let day = event.day()?;
        let start = event.start()?;
        let end = match event.end()? {
            Some(end) if end < start => {
                return Err(ValidationError::InvalidRange {
                    event_id: event.id.clone(),
                    start: event.start_time.clone(),
                    end: end.to_string(),
                })
            }
            Some(end) => end,
            None => start.saturating_add_minutes(DEFAULT_EVENT_MINUTES),
        };
        Ok(Self {
            event,
            day,
            start,
            end,
            clamped: false,
        })
    }

    /// Resolve for display: an inverted range is clamped to start + 1h
    /// instead of failing. Malformed fields still fail.
    pub fn resolve_or_clamp(event: &'a Event) -> Result<Self, ValidationError> {
        match Self::resolve(event) {
            Err(err @ ValidationError::InvalidRange { .. }) => {
                tracing::warn!(event_id = %event.id, "{err}; clamping to one hour");
                let start = event.start()?;
                Ok(Self {
                    event,
                    day: event.day()?,
                    start,
                    end: start.saturating_add_minutes(DEFAULT_EVENT_MINUTES),
                    clamped: true,
                })
            }
            other => other,
        }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Half-open interval overlap; touching events do not overlap.
    pub fn overlaps(&self, other: &TimedEvent<'_>) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Fields supplied when creating an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventDraft {
    /// Reject drafts the store must never persist.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        self.clone().into_event("<new>", "", Utc::now()).validate()
    }

    /// Materialise the draft as an event with the given identity.
    pub fn into_event(self, id: &str, owner_id: &str, now: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            category: self.category,
            location: self.location,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of an event. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Drop the stated end time so the one-hour default applies again.
    #[serde(default)]
    pub clear_end_time: bool,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    /// Apply the patch and validate the result. The event is left untouched
    /// on error.
    pub fn apply(&self, event: &mut Event, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let mut next = event.clone();
        if let Some(t) = &self.title {
            if t.trim().is_empty() {
                return Err(ValidationError::MissingField("title"));
            }
            next.title = t.clone();
        }
        if let Some(d) = &self.date {
            next.date = d.clone();
        }
        if let Some(s) = &self.start_time {
            next.start_time = s.clone();
        }
        if self.clear_end_time {
            next.end_time = None;
        }
        if let Some(e) = &self.end_time {
            next.end_time = Some(e.clone());
        }
        if let Some(c) = self.category {
            next.category = c;
        }
        if let Some(l) = &self.location {
            next.location = Some(l.clone());
        }
        if let Some(d) = &self.description {
            next.description = Some(d.clone());
        }
        next.validate()?;
        next.updated_at = now;
        *event = next;
        Ok(())
    }
}
