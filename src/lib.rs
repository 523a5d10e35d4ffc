//! tender-board - Tender Tasks Library
//!
//! This library provides the core functionality for the tender-board CLI,
//! a Kanban board for tracking construction tenders.
//!
//! # Core Concepts
//!
//! - **Task records**: Tenders with a status, priority and baseline counts
//! - **Lanes**: One board column per status, identified by a lane id
//! - **Snapshots**: Search-filtered board and list projections
//! - **Drag and drop**: Status changes by dropping a card on another lane
//! - **Detail sessions**: Per-view comment threads that are never persisted
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.tender-board.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task record, status, priority and lane types
//! - `seed`: Built-in seed data and seed file loading
//! - `board`: Grouping, search filtering and list ordering
//! - `store`: In-memory task store and drag tracking
//! - `detail`: Task detail sessions with local comments
//! - `output`: Human and JSON output envelopes
//! - `ui`: Interactive terminal board viewer

pub mod board;
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod output;
pub mod seed;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
