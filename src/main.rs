//
// main.rs
// Toolsuite-rs
//
// Entry point: installs logging, then hands argument parsing and dispatching to the CLI layer.
//
// Thales Matheus Mendonça Santos - November 2025

use toolsuite::{cli, logging, DispatchError};

fn main() -> anyhow::Result<()> {
    logging::init();

    match cli::run() {
        Ok(_) => Ok(()),
        // Clap renders usage errors itself and picks the exit status.
        Err(DispatchError::ArgumentParse(err)) => err.exit(),
        Err(err) => Err(err.into()),
    }
}
