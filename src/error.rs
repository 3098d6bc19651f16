//! Centralized error types for goji.
//!
//! Library layers return their own `thiserror` enums; this module gathers
//! them into one type for the command-line front end, along with the
//! messages and hints shown to the user.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Terminal IO errors while prompting.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No credentials have been saved yet.
    #[error("goji is not configured")]
    NotConfigured,

    /// No project key was given and no default project is configured.
    #[error("no project specified and no default project configured")]
    NoProject,
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoHomeDir => {
                    "Could not find your home directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDir { path, .. } => format!(
                    "Could not create configuration directory {}. Check file permissions.",
                    path.display()
                ),
                ConfigError::Read { path, .. } => format!(
                    "Could not read configuration file {}.",
                    path.display()
                ),
                ConfigError::Write { path, .. } => format!(
                    "Could not save configuration to {}. Check file permissions.",
                    path.display()
                ),
                ConfigError::Parse { path, .. } => format!(
                    "Configuration file {} is invalid.",
                    path.display()
                ),
                ConfigError::Serialize(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::Invalid(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::MissingCredential(field) => {
                    format!("Your configuration has no {}.", field)
                }
                ApiError::Validation(field) => format!("The issue {} is required.", field),
                ApiError::EmptyIssueKey => "Please provide an issue key.".to_string(),
                ApiError::InvalidHeader(_) => {
                    "Your username or API token contains characters JIRA cannot accept."
                        .to_string()
                }
                ApiError::Encode(_) => "Could not encode the request. Internal error.".to_string(),
                ApiError::Transport(t) if t.is_timeout() => {
                    "JIRA did not respond in time.".to_string()
                }
                ApiError::Transport(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::Remote { status, detail } => {
                    let summary = match status.as_u16() {
                        401 => "Authentication failed. Please check your email and API token.",
                        403 => "Access denied. You don't have permission for this action.",
                        404 => "Not found.",
                        429 => "Too many requests. Please wait a moment and try again.",
                        500..=599 => "JIRA server error. Please try again later.",
                        _ => "JIRA rejected the request.",
                    };
                    let message = detail.message();
                    if message.is_empty() {
                        summary.to_string()
                    } else {
                        format!("{} {}", summary, message)
                    }
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from JIRA. Please check the server URL.".to_string()
                }
            },
            AppError::Io(_) => "Could not read your input.".to_string(),
            AppError::NotConfigured => "goji has not been set up yet.".to_string(),
            AppError::NoProject => {
                "No project given. Pass --project or set a default project.".to_string()
            }
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::NotConfigured
            | AppError::NoProject
            | AppError::Config(ConfigError::Parse { .. })
            | AppError::Config(ConfigError::Invalid(_))
            | AppError::Api(ApiError::MissingCredential(_)) => {
                Some("Run 'goji init' to set up your connection.")
            }
            AppError::Api(e) if e.is_unauthorized() => Some(
                "Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens",
            ),
            AppError::Api(ApiError::Transport(_)) | AppError::Api(ApiError::InvalidResponse(_)) => {
                Some("Check your internet connection and JIRA URL.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
