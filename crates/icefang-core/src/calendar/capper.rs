//! Month-cell capping: show a few events per day and count the rest.

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::time::TimeOfDay;

/// Default number of events shown in a month-view day cell.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Order applied to a day's events before capping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapOrder {
    /// Keep the order events arrived in from the store.
    #[default]
    Arrival,
    /// Stable sort by start time; unparseable times go last.
    StartTime,
}

/// Visible subset of a day cell plus the number of hidden events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capped<T> {
    pub visible: Vec<T>,
    pub overflow_count: usize,
}

/// Keep the first `max` items in the order received.
pub fn cap_visible<T: Clone>(day_events: &[T], max: usize) -> Capped<T> {
    let shown = day_events.len().min(max);
    Capped {
        visible: day_events[..shown].to_vec(),
        overflow_count: day_events.len() - shown,
    }
}

/// Apply `order` and then cap.
pub fn cap_ordered<'a>(day_events: &[&'a Event], max: usize, order: CapOrder) -> Capped<&'a Event> {
    match order {
        CapOrder::Arrival => cap_visible(day_events, max),
        CapOrder::StartTime => {
            let mut sorted = day_events.to_vec();
            sorted.sort_by_key(|e| {
                TimeOfDay::parse(&e.start_time).map_or(u32::MAX, |t| u32::from(t.minutes()))
            });
            cap_visible(&sorted, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::tests::event;

    #[test]
    fn five_events_three_visible() {
        let items: Vec<u32> = (0..5).collect();
        let capped = cap_visible(&items, 3);
        assert_eq!(capped.visible, vec![0, 1, 2]);
        assert_eq!(capped.overflow_count, 2);
    }

    #[test]
    fn fewer_than_max_has_no_overflow() {
        let capped = cap_visible(&["a", "b"], 3);
        assert_eq!(capped.visible.len(), 2);
        assert_eq!(capped.overflow_count, 0);
    }

    #[test]
    fn zero_max_hides_everything() {
        let capped = cap_visible(&[1, 2], 0);
        assert!(capped.visible.is_empty());
        assert_eq!(capped.overflow_count, 2);
    }

    #[test]
    fn start_time_order_is_opt_in() {
        let events = vec![
            event("late", "2025-10-13", "18:00", None),
            event("broken", "2025-10-13", "noon", None),
            event("early", "2025-10-13", "07:00", None),
            event("mid", "2025-10-13", "12:00", None),
        ];
        let refs: Vec<&Event> = events.iter().collect();

        let arrival = cap_ordered(&refs, 3, CapOrder::Arrival);
        let ids: Vec<_> = arrival.visible.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["late", "broken", "early"]);

        let sorted = cap_ordered(&refs, 3, CapOrder::StartTime);
        let ids: Vec<_> = sorted.visible.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["early", "mid", "late"]);
        assert_eq!(sorted.overflow_count, 1);
    }
}
