//! Vertical placement of events on an hour grid.

use serde::{Deserialize, Serialize};

use super::event::TimedEvent;
use super::time::TimeOfDay;

pub const DEFAULT_PIXELS_PER_HOUR: f64 = 80.0;
pub const DEFAULT_MIN_BLOCK_HEIGHT: f64 = 20.0;

/// Pixel offset and height of a block in a day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub top: f64,
    pub height: f64,
}

/// Map an event's effective interval to pixels.
///
/// Height is floored at `min_height` so zero-length events stay clickable.
pub fn to_pixel_geometry(
    event: &TimedEvent<'_>,
    pixels_per_hour: f64,
    min_height: f64,
) -> BlockGeometry {
    let top = minutes_to_pixels(event.start.minutes(), pixels_per_hour);
    let height = minutes_to_pixels(event.duration_minutes(), pixels_per_hour);
    BlockGeometry {
        top,
        height: height.max(min_height),
    }
}

/// Offset of the current-time indicator line.
pub fn now_line_offset(now: TimeOfDay, pixels_per_hour: f64) -> f64 {
    minutes_to_pixels(now.minutes(), pixels_per_hour)
}

fn minutes_to_pixels(minutes: u16, pixels_per_hour: f64) -> f64 {
    f64::from(minutes) / 60.0 * pixels_per_hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::tests::event;

    #[test]
    fn one_hour_default_at_80_pixels() {
        let ev = event("a", "2025-10-13", "09:00", None);
        let timed = TimedEvent::resolve(&ev).unwrap();
        let geo = to_pixel_geometry(&timed, 80.0, DEFAULT_MIN_BLOCK_HEIGHT);
        assert_eq!(geo.top, 720.0);
        assert_eq!(geo.height, 80.0);
    }

    #[test]
    fn minutes_map_fractionally() {
        let ev = event("a", "2025-10-13", "08:30", Some("08:45"));
        let timed = TimedEvent::resolve(&ev).unwrap();
        let geo = to_pixel_geometry(&timed, 80.0, 0.0);
        assert_eq!(geo.top, 680.0);
        assert_eq!(geo.height, 20.0);
    }

    #[test]
    fn zero_length_event_gets_min_height() {
        let ev = event("a", "2025-10-13", "10:00", Some("10:00"));
        let timed = TimedEvent::resolve(&ev).unwrap();
        let geo = to_pixel_geometry(&timed, 80.0, 12.0);
        assert_eq!(geo.height, 12.0);
    }

    #[test]
    fn now_line() {
        let noon = TimeOfDay::parse("12:00").unwrap();
        assert_eq!(now_line_offset(noon, 80.0), 960.0);
    }
}
