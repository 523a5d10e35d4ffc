//! Task detail session with its local comment thread.
//!
//! A `TaskDetail` is created each time a task is opened and dropped when the
//! viewer navigates away. Comments live only inside it; the store and the
//! task's baseline comment count are never touched.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::store::TaskStore;
use crate::task::TaskRecord;

pub const COMMENT_AUTHOR: &str = "Current User";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
pub const NOT_FOUND_MESSAGE: &str = "Task not found.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: u64,
    pub text: String,
    pub author: String,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct TaskDetail {
    task: TaskRecord,
    comments: Vec<Comment>,
    input: String,
    last_comment_id: u64,
    timestamp_format: String,
}

impl TaskDetail {
    /// Open the detail view for `id`. `None` means the task does not exist.
    pub fn open(store: &TaskStore, id: u32) -> Option<Self> {
        Self::open_with_format(store, id, DEFAULT_TIMESTAMP_FORMAT)
    }

    pub fn open_with_format(store: &TaskStore, id: u32, timestamp_format: &str) -> Option<Self> {
        let task = store.get(id)?.clone();
        Some(Self {
            task,
            comments: Vec::new(),
            input: String::new(),
            last_comment_id: 0,
            timestamp_format: timestamp_format.to_string(),
        })
    }

    pub fn task(&self) -> &TaskRecord {
        &self.task
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn push_input(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Baseline count plus comments added in this session.
    pub fn comment_count(&self) -> usize {
        self.task.comments as usize + self.comments.len()
    }

    /// Submit the current input as a comment.
    pub fn submit(&mut self) -> Option<&Comment> {
        self.submit_at(Local::now())
    }

    /// Submit with an explicit clock reading. Blank input is ignored and left
    /// in place; otherwise the input is appended and cleared.
    pub fn submit_at(&mut self, now: DateTime<Local>) -> Option<&Comment> {
        if self.input.trim().is_empty() {
            return None;
        }
        let id = self.next_comment_id(now);
        let text = std::mem::take(&mut self.input);
        let timestamp = self.format_timestamp(now);
        tracing::debug!(task = self.task.id, comment = id, "comment added");
        self.comments.push(Comment {
            id,
            text,
            author: COMMENT_AUTHOR.to_string(),
            timestamp,
        });
        self.comments.last()
    }

    fn next_comment_id(&mut self, now: DateTime<Local>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = if millis > self.last_comment_id {
            millis
        } else {
            self.last_comment_id + 1
        };
        self.last_comment_id = id;
        id
    }

    fn format_timestamp(&self, now: DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.timestamp_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
        }
        out
    }
}
