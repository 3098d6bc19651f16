//! The persisted JIRA connection record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Placeholder printed wherever a token would otherwise be formatted.
const REDACTED: &str = "********";

/// A JIRA API token.
///
/// Formatting with `{}` or `{:?}` never reveals the token; the raw value is
/// only reachable through [`ApiToken::expose`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token for building an authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", REDACTED)
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// A credentials field that must be present before talking to JIRA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// The JIRA instance URL.
    ServerUrl,
    /// The username or email used for basic auth.
    Identity,
    /// The API token.
    Token,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialField::ServerUrl => "server URL",
            CredentialField::Identity => "username",
            CredentialField::Token => "API token",
        };
        f.write_str(name)
    }
}

/// Connection details for a JIRA instance.
///
/// Field order here is the order written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The JIRA instance URL (e.g. "https://company.atlassian.net").
    pub server_url: String,

    /// The account email or username used for basic auth.
    #[serde(rename = "username", alias = "email")]
    pub identity: String,

    /// The API token paired with `identity`.
    pub api_token: ApiToken,

    /// Project key used when a command does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,

    /// The user's team, kept for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

impl Credentials {
    /// Create credentials without a default project or team.
    pub fn new(
        server_url: impl Into<String>,
        identity: impl Into<String>,
        api_token: impl Into<ApiToken>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            identity: identity.into(),
            api_token: api_token.into(),
            default_project: None,
            team_name: None,
        }
    }

    /// Return the first required field that is empty, if any.
    ///
    /// Fields are checked in the order server URL, identity, token.
    pub fn missing_field(&self) -> Option<CredentialField> {
        if self.server_url.trim().is_empty() {
            Some(CredentialField::ServerUrl)
        } else if self.identity.trim().is_empty() {
            Some(CredentialField::Identity)
        } else if self.api_token.is_empty() {
            Some(CredentialField::Token)
        } else {
            None
        }
    }

    /// Validate values entered during setup.
    ///
    /// Checks that all required fields are present and that the server URL
    /// is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if let Some(field) = self.missing_field() {
            return Err(ConfigError::Invalid(format!("{} cannot be empty", field)));
        }

        let host = self
            .server_url
            .strip_prefix("https://")
            .or_else(|| self.server_url.strip_prefix("http://"))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "server URL '{}' must start with http:// or https://",
                    self.server_url
                ))
            })?;

        if host.trim_matches('/').is_empty() {
            return Err(ConfigError::Invalid(format!(
                "server URL '{}' has no host",
                self.server_url
            )));
        }

        Ok(())
    }
}
