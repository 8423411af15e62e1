//! # Bikeshare Application Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialize env_logger (RUST_LOG)
//!   ├─> Parse CLI arguments (clap), load settings
//!   │
//!   ├─> If `stats` subcommand: analyse one selection and exit
//!   └─> Otherwise: interactive prompt loop on stdin/stdout
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::{Context as _, Result};
use clap::Parser as _;

fn main() -> Result<()> {
    // Set RUST_LOG=debug to see detailed logs
    env_logger::init();

    let cli = cli::Cli::parse();
    let settings = bikeshare::config::load_settings(&cli.config)
        .context("Failed to load settings")?
        .with_data_dir(cli.data_dir);
    log::debug!("Using data directory {}", settings.data_dir.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(command) => cli::run_command(&settings, command, &mut out),
        None => {
            let stdin = std::io::stdin();
            cli::run_interactive(&settings, &mut stdin.lock(), &mut out)
        }
    }
}
