//! Pure derivations over the task list.
//!
//! Search filtering runs first; grouping (board view) and ordering (list
//! view) both consume the same filtered vector.

use serde::Serialize;

use crate::task::{Lane, TaskRecord, TaskStatus};

/// Tasks partitioned by lane, each lane in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedTasks {
    #[serde(rename = "to-do")]
    pub to_do: Vec<TaskRecord>,
    #[serde(rename = "in-progress")]
    pub in_progress: Vec<TaskRecord>,
    #[serde(rename = "not-started")]
    pub not_started: Vec<TaskRecord>,
    pub completed: Vec<TaskRecord>,
}

impl GroupedTasks {
    pub fn lane(&self, lane: Lane) -> &[TaskRecord] {
        match lane {
            Lane::ToDo => &self.to_do,
            Lane::InProgress => &self.in_progress,
            Lane::NotStarted => &self.not_started,
            Lane::Completed => &self.completed,
        }
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut Vec<TaskRecord> {
        match lane {
            Lane::ToDo => &mut self.to_do,
            Lane::InProgress => &mut self.in_progress,
            Lane::NotStarted => &mut self.not_started,
            Lane::Completed => &mut self.completed,
        }
    }

    pub fn counts(&self) -> [usize; 4] {
        Lane::ALL.map(|lane| self.lane(lane).len())
    }

    pub fn total(&self) -> usize {
        self.counts().iter().sum()
    }
}

pub fn group_by_status(tasks: &[TaskRecord]) -> GroupedTasks {
    let mut grouped = GroupedTasks::default();
    for task in tasks {
        grouped.lane_mut(task.lane()).push(task.clone());
    }
    grouped
}

fn normalize_text(value: &str) -> String {
    value.to_lowercase()
}

pub fn matches_search(task: &TaskRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = normalize_text(term);
    normalize_text(&task.title).contains(&term) || normalize_text(&task.description).contains(&term)
}

pub fn filter_by_search_term(tasks: &[TaskRecord], term: &str) -> Vec<TaskRecord> {
    tasks
        .iter()
        .filter(|task| matches_search(task, term))
        .cloned()
        .collect()
}

/// Stable sort by status rank: To Do, In Progress, Not Started, Completed.
pub fn sort_for_list_view(tasks: &[TaskRecord]) -> Vec<TaskRecord> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.status.list_rank());
    sorted
}

/// Everything both views need for one search term.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub search: String,
    pub filtered: Vec<TaskRecord>,
    pub grouped: GroupedTasks,
    pub list: Vec<TaskRecord>,
}

impl BoardSnapshot {
    pub fn derive(tasks: &[TaskRecord], search: &str) -> Self {
        let filtered = filter_by_search_term(tasks, search);
        let grouped = group_by_status(&filtered);
        let list = sort_for_list_view(&filtered);
        Self {
            search: search.to_string(),
            filtered,
            grouped,
            list,
        }
    }

    pub fn lane_count(&self, lane: Lane) -> usize {
        self.grouped.lane(lane).len()
    }

    pub fn status_counts(&self) -> Vec<(TaskStatus, usize)> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| (status, self.lane_count(status.lane())))
            .collect()
    }
}
