//! Command-line interface for tender-board
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in `board`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod board;

/// tender-board - Tender Tasks
///
/// A terminal Kanban board for tracking tenders through To Do, In Progress,
/// Not Started and Completed. Board state lives in memory and resets on exit.
#[derive(Parser, Debug)]
#[command(name = "tender-board")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a configuration file
    #[arg(long, global = true, env = "TENDER_BOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON file with task records to use instead of the built-in seed
    #[arg(long, global = true, env = "TENDER_BOARD_SEED")]
    pub seed: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive board
    Ui {
        /// Start in list view
        #[arg(long)]
        list: bool,

        /// Initial search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the four lanes with their cards
    Board {
        /// Only show tasks whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print tasks in list view order
    List {
        /// Only show tasks whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one task with its comment thread
    Show {
        /// Task id
        id: u32,

        /// Add a comment to this viewing session (repeatable)
        #[arg(short, long = "comment")]
        comments: Vec<String>,
    },

    /// Drag a task onto another lane and print the resulting board
    Move {
        /// Task id
        id: u32,

        /// Target lane: to-do, in-progress, not-started, completed
        lane: String,
    },

    /// List lane identifiers and their statuses
    Lanes,
}

impl Commands {
    /// Subcommand name as typed, used in output envelopes.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Ui { .. } => "ui",
            Commands::Board { .. } => "board",
            Commands::List { .. } => "list",
            Commands::Show { .. } => "show",
            Commands::Move { .. } => "move",
            Commands::Lanes => "lanes",
        }
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let context = board::ContextOptions {
            config: self.config,
            seed: self.seed,
        };
        match self.command {
            Commands::Ui { list, search } => board::run_ui(board::UiOptions {
                list,
                search,
                context,
            }),
            Commands::Board { search } => board::run_board(board::BoardOptions {
                search,
                context,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List { search } => board::run_list(board::ListOptions {
                search,
                context,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Show { id, comments } => board::run_show(board::ShowOptions {
                id,
                comments,
                context,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Move { id, lane } => board::run_move(board::MoveOptions {
                id,
                lane,
                context,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Lanes => board::run_lanes(self.json, self.quiet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_name_ignores_global_flag_values() {
        let cli = Cli::try_parse_from([
            "tender-board",
            "--seed",
            "tenders.json",
            "--config=board.toml",
            "show",
            "1",
        ])
        .expect("parse");
        assert_eq!(cli.command.name(), "show");
        assert_eq!(cli.seed, Some(PathBuf::from("tenders.json")));
    }
}
