//! Initial board contents.
//!
//! The built-in seed is twelve tenders, three per lane. A JSON seed file can
//! replace it; the file is read once and never written back.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::task::{Priority, TaskRecord, TaskStatus};

const SEED_TITLE: &str = "Construction Tender 1";
const SEED_DESCRIPTION: &str = "Description goes in here about the tender";
const SEED_ASSIGNEE: &str = "John Doe";
const SEED_DUE_DATE: &str = "22 Dec 24";
const SEED_COMMENTS: u32 = 12;
const SEED_ATTACHMENTS: u32 = 3;

/// The fixed twelve-record seed: ids 1-12, Low/High/Low per lane.
pub fn initial_tasks() -> Vec<TaskRecord> {
    let mut tasks = Vec::with_capacity(12);
    let mut id = 1;
    for status in TaskStatus::ALL {
        for priority in [Priority::Low, Priority::High, Priority::Low] {
            tasks.push(TaskRecord {
                id,
                title: SEED_TITLE.to_string(),
                description: SEED_DESCRIPTION.to_string(),
                assignee: SEED_ASSIGNEE.to_string(),
                due_date: SEED_DUE_DATE.to_string(),
                priority,
                status,
                comments: SEED_COMMENTS,
                attachments: SEED_ATTACHMENTS,
            });
            id += 1;
        }
    }
    tasks
}

/// Load records from a JSON array on disk.
pub fn load_seed_file(path: &Path) -> Result<Vec<TaskRecord>> {
    let content = std::fs::read_to_string(path)?;
    let tasks: Vec<TaskRecord> =
        serde_json::from_str(&content).map_err(|err| Error::InvalidSeed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    ensure_unique_ids(&tasks)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "loaded seed file");
    Ok(tasks)
}

pub fn ensure_unique_ids(tasks: &[TaskRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(Error::DuplicateTaskId(task.id));
        }
    }
    Ok(())
}
