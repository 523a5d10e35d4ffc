//! Task records for the tender board.
//!
//! Status, priority and lane are closed enums. Their string forms exist only
//! at the edges (seed files, JSON output, lane ids typed on the command line)
//! and anything outside the known set is rejected there.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Workflow status of a tender task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::NotStarted,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Sort key used by the list view.
    pub fn list_rank(self) -> usize {
        match self {
            TaskStatus::ToDo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::NotStarted => 2,
            TaskStatus::Completed => 3,
        }
    }

    pub fn lane(self) -> Lane {
        match self {
            TaskStatus::ToDo => Lane::ToDo,
            TaskStatus::InProgress => Lane::InProgress,
            TaskStatus::NotStarted => Lane::NotStarted,
            TaskStatus::Completed => Lane::Completed,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Only two levels exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board column. Each lane maps to exactly one status and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lane {
    ToDo,
    InProgress,
    NotStarted,
    Completed,
}

impl Lane {
    /// Board order, left to right.
    pub const ALL: [Lane; 4] = [Lane::ToDo, Lane::InProgress, Lane::NotStarted, Lane::Completed];

    pub fn id(self) -> &'static str {
        match self {
            Lane::ToDo => "to-do",
            Lane::InProgress => "in-progress",
            Lane::NotStarted => "not-started",
            Lane::Completed => "completed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Lane::ToDo => "To - Do List",
            Lane::InProgress => "In Progress",
            Lane::NotStarted => "Not Started",
            Lane::Completed => "Completed",
        }
    }

    pub fn status(self) -> TaskStatus {
        match self {
            Lane::ToDo => TaskStatus::ToDo,
            Lane::InProgress => TaskStatus::InProgress,
            Lane::NotStarted => TaskStatus::NotStarted,
            Lane::Completed => TaskStatus::Completed,
        }
    }

    /// Resolve a lane identifier. Unknown identifiers resolve to nothing.
    pub fn from_id(id: &str) -> Option<Lane> {
        Lane::ALL.into_iter().find(|lane| lane.id() == id)
    }

    pub fn position(self) -> usize {
        match self {
            Lane::ToDo => 0,
            Lane::InProgress => 1,
            Lane::NotStarted => 2,
            Lane::Completed => 3,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub assignee: String,
    /// Display text such as "22 Dec 24". Never parsed.
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Baseline comment count. Comments added in a detail session are not
    /// counted here.
    pub comments: u32,
    pub attachments: u32,
}

impl TaskRecord {
    pub fn lane(&self) -> Lane {
        self.status.lane()
    }
}
