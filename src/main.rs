//! goji - create and view JIRA issues from the terminal.

mod cli;
mod commands;

use std::error::Error;

use clap::Parser;
use tracing::error;

use cli::{Cli, Commands};
use goji::api::JiraClient;
use goji::config::CredentialStore;
use goji::error::Result;
use goji::logging;

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {e}");
    }

    if let Err(e) = run(cli.command) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("Hint: {action}");
        }

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    let store = CredentialStore::new()?;

    match command {
        Commands::Init { no_verify } => {
            commands::init::run(&store, &JiraClient::new()?, !no_verify)?;
        }
        Commands::Create(args) => {
            commands::issue::create(&store, &JiraClient::new()?, args)?;
        }
        Commands::Show { key } => {
            commands::issue::show(&store, &JiraClient::new()?, &key)?;
        }
        Commands::Config { action } => {
            commands::config::run(&store, action)?;
        }
    }

    Ok(())
}
