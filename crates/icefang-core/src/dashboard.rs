//! Upcoming events and open tasks for the landing view.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{Event, TimeOfDay};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard<'a> {
    pub upcoming_events: Vec<&'a Event>,
    pub upcoming_tasks: Vec<&'a Task>,
}

/// The next `limit` events on or after `today` by (date, start), and the
/// next `limit` open tasks by due date with undated tasks last.
///
/// Events whose date or start time does not parse are left out.
pub fn dashboard<'a>(tasks: &'a [Task], events: &'a [Event], today: NaiveDate, limit: usize) -> Dashboard<'a> {
    let mut upcoming: Vec<(NaiveDate, TimeOfDay, &Event)> = events
        .iter()
        .filter_map(|e| match (e.day(), e.start()) {
            (Ok(day), Ok(start)) => Some((day, start, e)),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(event_id = %e.id, "dashboard skipping event: {err}");
                None
            }
        })
        .filter(|(day, _, _)| *day >= today)
        .collect();
    upcoming.sort_by_key(|&(day, start, _)| (day, start));

    let mut open: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    // None sorts after every Some
    open.sort_by_key(|t| (t.due_day().is_none(), t.due_day()));

    Dashboard {
        upcoming_events: upcoming.into_iter().take(limit).map(|(_, _, e)| e).collect(),
        upcoming_tasks: open.into_iter().take(limit).collect(),
    }
}
