//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod session;

pub use commands::{Cli, Commands};
pub use output::{format_config, format_note_list};
pub use session::{parse_command, run_session, SessionCommand};
