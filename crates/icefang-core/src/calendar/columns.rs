//! Side-by-side column placement of overlapping events.

use serde::{Deserialize, Serialize};

use super::overlap::OverlapGroup;
use super::time::TimeOfDay;

/// How columns are assigned inside an overlap group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// One column per member; every member is `1 / group size` wide.
    #[default]
    GroupWidth,
    /// Greedy interval colouring: reuse a column once its occupant ended.
    Chromatic,
}

/// Horizontal slot of one event in its day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSlot {
    pub column_index: usize,
    pub column_count: usize,
    pub left_fraction: f64,
    pub width_fraction: f64,
}

impl ColumnSlot {
    fn new(column_index: usize, column_count: usize) -> Self {
        let count = column_count as f64;
        Self {
            column_index,
            column_count,
            left_fraction: column_index as f64 / count,
            width_fraction: 1.0 / count,
        }
    }
}

/// Slots for a group's members, in member order.
pub fn assign_columns(group: &OverlapGroup<'_>, mode: PackingMode) -> Vec<ColumnSlot> {
    match mode {
        PackingMode::GroupWidth => {
            let count = group.len();
            (0..count).map(|i| ColumnSlot::new(i, count)).collect()
        }
        PackingMode::Chromatic => chromatic(group),
    }
}

fn chromatic(group: &OverlapGroup<'_>) -> Vec<ColumnSlot> {
    // end time of the last event placed in each column
    let mut column_ends: Vec<TimeOfDay> = Vec::new();
    let mut indices = Vec::with_capacity(group.len());

    for member in &group.members {
        let free = column_ends.iter().position(|end| *end <= member.start);
        let index = match free {
            Some(i) => {
                column_ends[i] = member.end;
                i
            }
            None => {
                column_ends.push(member.end);
                column_ends.len() - 1
            }
        };
        indices.push(index);
    }

    let count = column_ends.len();
    indices.into_iter().map(|i| ColumnSlot::new(i, count)).collect()
}
