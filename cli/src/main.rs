mod build;
mod cli;
mod error;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            draft,
            config,
            dir,
            name,
            version,
            date,
            yes,
            keep,
        } => build::execute(build::BuildOptions {
            draft,
            config,
            dir,
            name,
            version,
            date,
            yes,
            keep,
        }),
    };

    if let Err(err) = result {
        ui::error_message(&err.user_message());
        // Configuration problems exit with 1; runtime failures with 2
        process::exit(if err.is_configuration() { 1 } else { 2 });
    }
}
