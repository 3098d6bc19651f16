//! Command implementations for the goji CLI.

pub mod config;
pub mod init;
pub mod issue;
mod prompt;

use goji::config::{CredentialStore, Credentials};
use goji::error::{AppError, Result};

/// Load saved credentials, failing if setup has not been run.
fn load_credentials(store: &CredentialStore) -> Result<Credentials> {
    store.load()?.ok_or(AppError::NotConfigured)
}
