//! Interactive and scripted shell driving the booking and symptom wizards.

pub mod commands;
pub mod core;
mod help;
pub mod io;
pub mod output;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, CommandResult, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
