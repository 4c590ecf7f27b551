//! Property and worked-example tests for the calendar layout pipeline.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use proptest::prelude::*;

use icefang_core::calendar::{
    assign_columns, cap_visible, group_overlaps, month_grid_days, partition_by_day, Event,
    EventDraft, LayoutEngine, LayoutOptions, PackingMode, TimedEvent, WeekStart,
};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
}

fn noon(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(12, 0, 0).unwrap()
}

fn hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn make_event(id: usize, date: NaiveDate, start: u16, end: Option<u16>) -> Event {
    EventDraft {
        title: format!("event {id}"),
        date: date.format("%Y-%m-%d").to_string(),
        start_time: hhmm(start),
        end_time: end.map(hhmm),
        ..Default::default()
    }
    .into_event(&format!("e{id}"), "owner", DateTime::<Utc>::UNIX_EPOCH)
}

/// (day offset from base, start minute, optional duration)
fn raw_event(day_span: i64) -> impl Strategy<Value = (i64, u16, Option<u16>)> {
    (
        -day_span..=day_span,
        0u16..1380,
        prop::option::of(0u16..240),
    )
}

fn build(raw: &[(i64, u16, Option<u16>)]) -> Vec<Event> {
    raw.iter()
        .enumerate()
        .map(|(i, &(offset, start, duration))| {
            let day = base_day() + Duration::days(offset);
            let end = duration.map(|d| (start + d).min(23 * 60 + 59));
            make_event(i, day, start, end)
        })
        .collect()
}

fn timed(events: &[Event]) -> Vec<TimedEvent<'_>> {
    events
        .iter()
        .map(|e| TimedEvent::resolve(e).expect("generated events are well-formed"))
        .collect()
}

proptest! {
    #[test]
    fn partition_places_each_in_range_event_once(raw in prop::collection::vec(raw_event(60), 0..40)) {
        let events = build(&raw);
        let days = month_grid_days(base_day(), WeekStart::Sunday);
        let buckets = partition_by_day(&events, &days);

        prop_assert_eq!(buckets.len(), days.len());
        for event in &events {
            let day = event.day().unwrap();
            let hits: usize = buckets
                .values()
                .map(|b| b.iter().filter(|e| e.id == event.id).count())
                .sum();
            let expected = usize::from(days.contains(&day));
            prop_assert_eq!(hits, expected, "event {} on {}", event.id, day);
        }
        for (day, bucket) in &buckets {
            prop_assert!(bucket.iter().all(|e| e.day().unwrap() == *day));
        }
    }

    #[test]
    fn capping_keeps_a_prefix_and_counts_the_rest(len in 0usize..20, max in 0usize..8) {
        let items: Vec<usize> = (0..len).collect();
        let capped = cap_visible(&items, max);
        prop_assert_eq!(capped.visible.len(), len.min(max));
        prop_assert_eq!(capped.visible.len() + capped.overflow_count, len);
        prop_assert_eq!(&capped.visible[..], &items[..capped.visible.len()]);
    }

    #[test]
    fn groups_are_chained_and_disjoint(raw in prop::collection::vec(raw_event(0), 0..25)) {
        let events = build(&raw);
        let timed = timed(&events);
        let groups = group_overlaps(&timed);

        let total: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, timed.len());

        let mut previous_end = None;
        for group in &groups {
            let first = &group.members[0];
            if let Some(end) = previous_end {
                prop_assert!(first.start >= end);
            }
            let mut running = first.end;
            for member in &group.members[1..] {
                prop_assert!(member.start < running);
                running = running.max(member.end);
            }
            prop_assert_eq!(running, group.running_end);
            previous_end = Some(group.running_end);
        }
    }

    #[test]
    fn group_width_columns_cover_the_slot(raw in prop::collection::vec(raw_event(0), 1..25)) {
        let events = build(&raw);
        let timed = timed(&events);
        for group in group_overlaps(&timed) {
            let slots = assign_columns(&group, PackingMode::GroupWidth);
            prop_assert_eq!(slots.len(), group.len());
            let width: f64 = slots.iter().map(|s| s.width_fraction).sum();
            prop_assert!((width - 1.0).abs() < 1e-9);

            let mut indices: Vec<_> = slots.iter().map(|s| s.column_index).collect();
            indices.sort_unstable();
            prop_assert_eq!(indices, (0..group.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn chromatic_columns_never_collide(raw in prop::collection::vec(raw_event(0), 1..25)) {
        let events = build(&raw);
        let timed = timed(&events);
        for group in group_overlaps(&timed) {
            let slots = assign_columns(&group, PackingMode::Chromatic);
            prop_assert!(slots.iter().all(|s| s.column_count <= group.len()));
            for (i, a) in group.members.iter().enumerate() {
                for (j, b) in group.members.iter().enumerate().skip(i + 1) {
                    if a.overlaps(b) {
                        prop_assert_ne!(slots[i].column_index, slots[j].column_index);
                    }
                }
            }
        }
    }

    #[test]
    fn layouts_are_idempotent(raw in prop::collection::vec(raw_event(20), 0..30), chromatic in any::<bool>()) {
        let events = build(&raw);
        let engine = LayoutEngine::new(LayoutOptions {
            packing: if chromatic { PackingMode::Chromatic } else { PackingMode::GroupWidth },
            ..LayoutOptions::default()
        });
        let now = noon(base_day());
        prop_assert_eq!(engine.week(&events, base_day(), now), engine.week(&events, base_day(), now));
        prop_assert_eq!(engine.month(&events, base_day(), now), engine.month(&events, base_day(), now));
    }
}

#[test]
fn example_overlap_groups() {
    let day = base_day();
    let events = vec![
        make_event(1, day, 8 * 60, Some(9 * 60)),
        make_event(2, day, 8 * 60 + 30, Some(9 * 60 + 30)),
        make_event(3, day, 10 * 60, Some(11 * 60)),
    ];
    let column = LayoutEngine::default().day(&events, day, noon(day));

    let counts: Vec<_> = column.blocks.iter().map(|b| (b.event.id.as_str(), b.column_count)).collect();
    assert_eq!(counts, [("e1", 2), ("e2", 2), ("e3", 1)]);
    assert_eq!(column.blocks[1].left_fraction, 0.5);
}

#[test]
fn example_month_cell_overflow() {
    let day = base_day();
    let events: Vec<_> = (0..5).map(|i| make_event(i, day, 9 * 60, None)).collect();
    let month = LayoutEngine::default().month(&events, day, noon(day));

    let cell = month.cells().find(|c| c.date == day).unwrap();
    assert_eq!(cell.visible.len(), 3);
    assert_eq!(cell.overflow_count, 2);
    let ids: Vec<_> = cell.visible.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e0", "e1", "e2"]);
}

#[test]
fn example_default_end_height() {
    let day = base_day();
    let events = vec![make_event(1, day, 9 * 60, None)];
    let column = LayoutEngine::default().day(&events, day, noon(day));

    let block = &column.blocks[0];
    assert_eq!(block.end.to_string(), "10:00");
    assert_eq!(block.top, 720.0);
    assert_eq!(block.height, 80.0);
}
