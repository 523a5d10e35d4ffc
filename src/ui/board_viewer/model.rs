use crate::board::BoardSnapshot;
use crate::config::ViewMode;
use crate::task::{Lane, TaskRecord};

/// Rows visible in the current view: one lane in board view, every filtered
/// task in list view.
pub fn visible_rows(snapshot: &BoardSnapshot, view: ViewMode, lane: Lane) -> &[TaskRecord] {
    match view {
        ViewMode::Board => snapshot.grouped.lane(lane),
        ViewMode::List => &snapshot.list,
    }
}

pub fn selected_task(
    snapshot: &BoardSnapshot,
    view: ViewMode,
    lane: Lane,
    row: usize,
) -> Option<&TaskRecord> {
    visible_rows(snapshot, view, lane).get(row)
}

pub fn clamp_row(row: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        row.min(len - 1)
    }
}

pub fn move_row(row: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = row as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

/// Step across lanes, stopping at the outer lanes.
pub fn step_lane(lane: Lane, delta: isize) -> Lane {
    let last = Lane::ALL.len() as isize - 1;
    let next = (lane.position() as isize + delta).clamp(0, last) as usize;
    Lane::ALL[next]
}

/// Keep the selection on `id` when it is still visible, else clamp.
pub fn select_by_id(rows: &[TaskRecord], previous_id: Option<u32>, row: usize) -> usize {
    if let Some(id) = previous_id {
        if let Some(pos) = rows.iter().position(|task| task.id == id) {
            return pos;
        }
    }
    clamp_row(row, rows.len())
}

pub fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}
