//! In-memory task store and the drag-and-drop transition rule.
//!
//! The store is the only mutable copy of the board. Its single mutation is a
//! status reassignment, driven by dropping a dragged card on a lane.

use serde::Serialize;

use crate::board::BoardSnapshot;
use crate::error::Result;
use crate::seed;
use crate::task::{Lane, TaskRecord, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<TaskRecord>,
}

impl TaskStore {
    /// Build a store from records. Ids must be unique.
    pub fn new(tasks: Vec<TaskRecord>) -> Result<Self> {
        seed::ensure_unique_ids(&tasks)?;
        Ok(Self { tasks })
    }

    /// Store holding the built-in twelve-tender seed.
    pub fn seeded() -> Self {
        Self {
            tasks: seed::initial_tasks(),
        }
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn snapshot(&self, search: &str) -> BoardSnapshot {
        BoardSnapshot::derive(&self.tasks, search)
    }

    /// Reassign one task's status in place. Returns the previous status, or
    /// `None` when no task has that id.
    pub fn set_status(&mut self, id: u32, status: TaskStatus) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        let previous = task.status;
        task.status = status;
        tracing::info!(task = id, from = %previous, to = %status, "task status changed");
        Some(previous)
    }
}

/// A card picked up from a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DragState {
    pub task_id: u32,
    pub from: Lane,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    NoDragInFlight,
    SameLane { task_id: u32, lane: Lane },
    UnknownLane { task_id: u32, lane: String },
    TaskMissing { task_id: u32 },
    Moved { task_id: u32, from: Lane, to: Lane },
}

impl DropOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }

    pub fn message(&self) -> String {
        match self {
            DropOutcome::NoDragInFlight => "nothing to drop".to_string(),
            DropOutcome::SameLane { task_id, lane } => {
                format!("task {task_id} already in {}", lane.title())
            }
            DropOutcome::UnknownLane { task_id, lane } => {
                format!("task {task_id} not moved: unknown lane '{lane}'")
            }
            DropOutcome::TaskMissing { task_id } => {
                format!("task {task_id} not moved: no such task")
            }
            DropOutcome::Moved { task_id, from, to } => {
                format!("task {task_id} moved from {} to {}", from.title(), to.title())
            }
        }
    }
}

/// Tracks the single drag that may be in flight.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    current: Option<DragState>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a card. A new drag replaces any previous one.
    pub fn start(&mut self, task_id: u32, from: Lane) {
        tracing::debug!(task = task_id, lane = %from, "drag started");
        self.current = Some(DragState { task_id, from });
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn in_flight(&self) -> Option<DragState> {
        self.current
    }

    /// Drop on a lane given by its identifier.
    pub fn drop_on(&mut self, store: &mut TaskStore, target: &str) -> DropOutcome {
        let Some(drag) = self.current.take() else {
            return DropOutcome::NoDragInFlight;
        };
        match Lane::from_id(target) {
            Some(lane) => apply_drop(store, drag, lane),
            None => {
                tracing::warn!(task = drag.task_id, lane = target, "drop on unknown lane rejected");
                DropOutcome::UnknownLane {
                    task_id: drag.task_id,
                    lane: target.to_string(),
                }
            }
        }
    }

    pub fn drop_on_lane(&mut self, store: &mut TaskStore, target: Lane) -> DropOutcome {
        match self.current.take() {
            Some(drag) => apply_drop(store, drag, target),
            None => DropOutcome::NoDragInFlight,
        }
    }
}

fn apply_drop(store: &mut TaskStore, drag: DragState, target: Lane) -> DropOutcome {
    if drag.from == target {
        return DropOutcome::SameLane {
            task_id: drag.task_id,
            lane: target,
        };
    }
    match store.set_status(drag.task_id, target.status()) {
        Some(_) => DropOutcome::Moved {
            task_id: drag.task_id,
            from: drag.from,
            to: target,
        },
        None => DropOutcome::TaskMissing {
            task_id: drag.task_id,
        },
    }
}
