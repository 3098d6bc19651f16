//! Configuration inspection commands.

use goji::config::CredentialStore;
use goji::error::Result;
use goji::logging;

use super::load_credentials;
use crate::cli::ConfigCommands;

pub fn run(store: &CredentialStore, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Path => {
            println!("Config: {}", store.path().display());
            if let Some(dir) = logging::log_directory() {
                println!("Logs:   {}", dir.display());
            }
        }
        ConfigCommands::Show => {
            let credentials = load_credentials(store)?;
            println!("server_url:      {}", credentials.server_url);
            println!("username:        {}", credentials.identity);
            println!("api_token:       {}", credentials.api_token);
            println!(
                "default_project: {}",
                credentials.default_project.as_deref().unwrap_or("-")
            );
            println!(
                "team_name:       {}",
                credentials.team_name.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}
