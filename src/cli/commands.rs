//! CLI command definitions

use crate::domain::SortOrder;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "stickyboard")]
#[command(about = "Sticky notes on a 2D board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new board
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Board width
        #[arg(long, default_value_t = 960.0)]
        width: f64,

        /// Board height
        #[arg(long, default_value_t = 640.0)]
        height: f64,
    },

    /// Create a note
    Add {
        /// Note text
        content: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },

    /// List notes in board order
    List,

    /// Replace a note's text
    Edit {
        /// Note id or unique prefix
        id: String,

        /// New text
        content: String,
    },

    /// Move a note (clamped to the board)
    Move {
        /// Note id or unique prefix
        id: String,

        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Delete a note
    Delete {
        /// Note id or unique prefix
        id: String,
    },

    /// Sort by creation time and cascade positions
    Sort {
        /// asc (oldest first) or desc (newest first)
        #[arg(default_value = "asc", value_parser = SortOrder::from_str)]
        order: SortOrder,
    },

    /// Append a quote to a note
    Quote {
        /// Note id or unique prefix
        id: String,
    },

    /// Export all notes as JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "stickies-export.json")]
        output: PathBuf,
    },

    /// Remove every note
    Clear,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Interactive event loop reading commands from stdin
    Session,
}
