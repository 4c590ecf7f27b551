//! Grouping of a day's timed events into runs of overlapping events.

use super::event::TimedEvent;
use super::time::TimeOfDay;

/// A maximal run of start-sorted events where every member starts before
/// the latest end seen so far in the run.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapGroup<'a> {
    pub members: Vec<TimedEvent<'a>>,
    /// Max effective end over the members.
    pub running_end: TimeOfDay,
}

impl<'a> OverlapGroup<'a> {
    fn start_with(first: TimedEvent<'a>) -> Self {
        Self {
            running_end: first.end,
            members: vec![first],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Split a day's events into overlap groups.
///
/// Events are stably sorted by start time, so ties keep their input order.
/// Groups come out in chronological order and together contain every input
/// event exactly once. Transitive overlaps (A overlaps B, B overlaps C, A
/// and C disjoint) land in one group.
pub fn group_overlaps<'a>(day_events: &[TimedEvent<'a>]) -> Vec<OverlapGroup<'a>> {
    let mut sorted = day_events.to_vec();
    sorted.sort_by_key(|e| e.start);

    let mut groups = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return groups;
    };

    let mut current = OverlapGroup::start_with(first);
    for event in iter {
        if event.start < current.running_end {
            current.running_end = current.running_end.max(event.end);
            current.members.push(event);
        } else {
            groups.push(std::mem::replace(&mut current, OverlapGroup::start_with(event)));
        }
    }
    groups.push(current);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::tests::event;
    use crate::calendar::event::Event;

    fn timed(events: &[Event]) -> Vec<TimedEvent<'_>> {
        events.iter().map(|e| TimedEvent::resolve(e).unwrap()).collect()
    }

    fn ids(group: &OverlapGroup<'_>) -> Vec<String> {
        group.members.iter().map(|m| m.event.id.clone()).collect()
    }

    #[test]
    fn two_overlapping_then_one_free() {
        let events = vec![
            event("a", "2025-10-13", "08:00", Some("09:00")),
            event("b", "2025-10-13", "08:30", Some("09:30")),
            event("c", "2025-10-13", "10:00", Some("11:00")),
        ];
        let groups = group_overlaps(&timed(&events));
        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0]), ["a", "b"]);
        assert_eq!(groups[0].running_end.to_string(), "09:30");
        assert_eq!(ids(&groups[1]), ["c"]);
    }

    #[test]
    fn touching_events_do_not_group() {
        let events = vec![
            event("a", "2025-10-13", "08:00", Some("09:00")),
            event("b", "2025-10-13", "09:00", Some("10:00")),
        ];
        assert_eq!(group_overlaps(&timed(&events)).len(), 2);
    }

    #[test]
    fn running_end_spans_past_a_short_neighbour() {
        // b ends before c starts, but a is still running
        let events = vec![
            event("a", "2025-10-13", "08:00", Some("12:00")),
            event("b", "2025-10-13", "08:15", Some("08:45")),
            event("c", "2025-10-13", "11:00", Some("11:30")),
        ];
        let groups = group_overlaps(&timed(&events));
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), ["a", "b", "c"]);
    }

    #[test]
    fn sorts_by_start_and_keeps_ties_stable() {
        let events = vec![
            event("late", "2025-10-13", "14:00", None),
            event("tie1", "2025-10-13", "09:00", None),
            event("tie2", "2025-10-13", "09:00", None),
        ];
        let groups = group_overlaps(&timed(&events));
        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0]), ["tie1", "tie2"]);
        assert_eq!(ids(&groups[1]), ["late"]);
    }

    #[test]
    fn empty_day_has_no_groups() {
        assert!(group_overlaps(&[]).is_empty());
    }
}
