//! tender-board command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::board::BoardSnapshot;
use crate::config::{Config, ViewMode};
use crate::detail::{Comment, TaskDetail};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::seed;
use crate::store::{DragTracker, DropOutcome, TaskStore};
use crate::task::{Lane, TaskRecord, TaskStatus};

pub struct ContextOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<PathBuf>,
}

pub struct UiOptions {
    pub list: bool,
    pub search: Option<String>,
    pub context: ContextOptions,
}

pub struct BoardOptions {
    pub search: Option<String>,
    pub context: ContextOptions,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub search: Option<String>,
    pub context: ContextOptions,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: u32,
    pub comments: Vec<String>,
    pub context: ContextOptions,
    pub json: bool,
    pub quiet: bool,
}

pub struct MoveOptions {
    pub id: u32,
    pub lane: String,
    pub context: ContextOptions,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct LaneOutput<'a> {
    id: &'static str,
    title: &'static str,
    status: TaskStatus,
    count: usize,
    tasks: &'a [TaskRecord],
}

#[derive(Serialize)]
struct BoardOutput<'a> {
    search: &'a str,
    total: usize,
    lanes: Vec<LaneOutput<'a>>,
}

#[derive(Serialize)]
struct TaskListOutput<'a> {
    search: &'a str,
    total: usize,
    tasks: &'a [TaskRecord],
}

#[derive(Serialize)]
struct TaskDetailOutput<'a> {
    task: &'a TaskRecord,
    comment_count: usize,
    comments: &'a [Comment],
}

#[derive(Serialize)]
struct MoveOutput<'a> {
    #[serde(flatten)]
    outcome: &'a DropOutcome,
    task: &'a TaskRecord,
    counts: Vec<LaneCount>,
}

#[derive(Serialize)]
struct LaneCount {
    lane: Lane,
    count: usize,
}

#[derive(Serialize)]
struct LaneInfo {
    id: &'static str,
    title: &'static str,
    status: TaskStatus,
}

struct BoardContext {
    config: Config,
    store: TaskStore,
}

fn load_context(options: ContextOptions) -> Result<BoardContext> {
    let cwd = std::env::current_dir()?;
    let config = Config::discover(options.config.as_deref(), &cwd)?;
    let seed_path = options.seed.or_else(|| config.board.seed.clone());
    let store = match seed_path {
        Some(path) => TaskStore::new(seed::load_seed_file(&path)?)?,
        None => TaskStore::seeded(),
    };
    Ok(BoardContext { config, store })
}

pub fn run_ui(options: UiOptions) -> Result<()> {
    let ctx = load_context(options.context)?;
    let view = if options.list {
        ViewMode::List
    } else {
        ctx.config.board.default_view
    };
    crate::ui::board_viewer::run(
        ctx.store,
        view,
        options.search.unwrap_or_default(),
        ctx.config.comments.timestamp_format,
    )
}

pub fn run_board(options: BoardOptions) -> Result<()> {
    let ctx = load_context(options.context)?;
    let search = options.search.unwrap_or_default();
    let snapshot = ctx.store.snapshot(&search);

    let output = BoardOutput {
        search: &search,
        total: snapshot.filtered.len(),
        lanes: Lane::ALL
            .into_iter()
            .map(|lane| LaneOutput {
                id: lane.id(),
                title: lane.title(),
                status: lane.status(),
                count: snapshot.lane_count(lane),
                tasks: snapshot.grouped.lane(lane),
            })
            .collect(),
    };

    let mut human = HumanOutput::new("Tender Tasks");
    push_search_summary(&mut human, &snapshot);
    for lane in Lane::ALL {
        human.push_summary(lane.title(), snapshot.lane_count(lane).to_string());
    }
    for lane in Lane::ALL {
        for task in snapshot.grouped.lane(lane) {
            human.push_detail(format!("{} {}", lane.id(), format_task_line(task)));
        }
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "board",
        &output,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.context)?;
    let search = options.search.unwrap_or_default();
    let snapshot = ctx.store.snapshot(&search);

    let output = TaskListOutput {
        search: &search,
        total: snapshot.list.len(),
        tasks: &snapshot.list,
    };

    let mut human = HumanOutput::new("Tender Tasks");
    push_search_summary(&mut human, &snapshot);
    for task in &snapshot.list {
        human.push_detail(format!("[{}] {}", task.status, format_task_line(task)));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = load_context(options.context)?;
    let mut detail = TaskDetail::open_with_format(
        &ctx.store,
        options.id,
        &ctx.config.comments.timestamp_format,
    )
    .ok_or(Error::TaskNotFound(options.id))?;

    for text in options.comments {
        detail.set_input(text);
        detail.submit();
    }

    let task = detail.task();
    let output = TaskDetailOutput {
        task,
        comment_count: detail.comment_count(),
        comments: detail.comments(),
    };

    let mut human = HumanOutput::new(format!("Task {}: {}", task.id, task.title));
    human.push_summary("Description", task.description.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Priority", task.priority.to_string());
    human.push_summary("Due date", task.due_date.clone());
    human.push_summary("Assignee", task.assignee.clone());
    human.push_summary("Attachments", format!("{} files attached", task.attachments));
    human.push_summary("Comments", detail.comment_count().to_string());
    for comment in detail.comments() {
        human.push_detail(format!(
            "[{}] {}: {}",
            comment.timestamp, comment.author, comment.text
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        &output,
        Some(&human),
    )
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let mut ctx = load_context(options.context)?;
    let from = ctx
        .store
        .get(options.id)
        .map(|task| task.lane())
        .ok_or(Error::TaskNotFound(options.id))?;

    let mut drag = DragTracker::new();
    drag.start(options.id, from);
    let outcome = drag.drop_on(&mut ctx.store, &options.lane);
    if let DropOutcome::UnknownLane { lane, .. } = &outcome {
        return Err(Error::UnknownLane(lane.clone()));
    }

    let task = ctx
        .store
        .get(options.id)
        .ok_or(Error::TaskNotFound(options.id))?;
    let snapshot = ctx.store.snapshot("");
    let output = MoveOutput {
        outcome: &outcome,
        task,
        counts: Lane::ALL
            .into_iter()
            .map(|lane| LaneCount {
                lane,
                count: snapshot.lane_count(lane),
            })
            .collect(),
    };

    let header = if outcome.changed() {
        "Task moved"
    } else {
        "Task not moved"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("Result", outcome.message());
    human.push_summary("Status", task.status.to_string());
    for lane in Lane::ALL {
        human.push_summary(lane.title(), snapshot.lane_count(lane).to_string());
    }
    if outcome.changed() {
        human.push_warning("board changes live in memory only and are gone on exit");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "move",
        &output,
        Some(&human),
    )
}

pub fn run_lanes(json: bool, quiet: bool) -> Result<()> {
    let lanes: Vec<LaneInfo> = Lane::ALL
        .into_iter()
        .map(|lane| LaneInfo {
            id: lane.id(),
            title: lane.title(),
            status: lane.status(),
        })
        .collect();

    let mut human = HumanOutput::new("Lanes");
    for lane in &lanes {
        human.push_detail(format!("{} ({}) -> {}", lane.id, lane.title, lane.status));
    }

    emit_success(OutputOptions { json, quiet }, "lanes", &lanes, Some(&human))
}

fn push_search_summary(human: &mut HumanOutput, snapshot: &BoardSnapshot) {
    if !snapshot.search.is_empty() {
        human.push_summary("Search", snapshot.search.clone());
    }
    human.push_summary("Total", snapshot.filtered.len().to_string());
}

fn format_task_line(task: &TaskRecord) -> String {
    format!(
        "#{} [{}] {} ({}, due {}, {} comments, {} attachments)",
        task.id,
        task.priority,
        task.title,
        task.assignee,
        task.due_date,
        task.comments,
        task.attachments
    )
}
