//! # Tableside Floor Entry Point
//!
//! Loads the floor configuration and layout, then prints the floor plan.
//!
//! ```text
//! tableside-floor [CONFIG.toml]
//!
//!   no argument → platform config dir (floor.toml), then defaults
//!   RUST_LOG    → log filter (default: info,tableside=debug)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match tableside_floor::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tableside-floor: {}", e);
            ExitCode::FAILURE
        }
    }
}
