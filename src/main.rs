//! orrery CLI - seasonal orbit diagram renderer
//!
//! Command-line interface for rendering and querying orbit diagrams.

use std::process::ExitCode;

use orrery::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
