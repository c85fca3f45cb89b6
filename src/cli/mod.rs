// CLI module
// Command-line interface, argument parsing, command dispatch and the console menu

mod args;
mod commands;
mod menu;

pub use args::{CliArgs, Command};
pub use commands::{load_reader, load_store, run};
pub use menu::run_menu;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or --help),
/// clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
