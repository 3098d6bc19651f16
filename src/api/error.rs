//! API error types for the JIRA client.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use super::request::DraftField;
use super::transport::TransportError;
use super::types::ErrorResponse;
use crate::config::CredentialField;

/// Errors that can occur when talking to the JIRA API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required credentials field is empty. Raised before any request.
    #[error("Missing {0} in configuration")]
    MissingCredential(CredentialField),

    /// A required issue field is empty. Raised before serialization.
    #[error("{0} is required")]
    Validation(DraftField),

    /// An issue key argument was empty.
    #[error("Issue key cannot be empty")]
    EmptyIssueKey,

    /// The authorization header could not be built from the credentials.
    #[error("Invalid credentials: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request never got a response.
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    /// JIRA answered with an unexpected status.
    #[error("JIRA returned HTTP {status}: {detail}")]
    Remote {
        status: StatusCode,
        detail: RemoteDetail,
    },

    /// JIRA answered with the expected status but an unreadable body.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The HTTP status of a remote rejection, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check whether JIRA rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// What JIRA said when it rejected a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteDetail {
    /// A decoded JIRA error body.
    Structured(ErrorResponse),
    /// The body text, when it was not a JIRA error body.
    Raw(String),
}

impl RemoteDetail {
    /// Interpret an error response body.
    ///
    /// Bodies that decode as an [`ErrorResponse`] with at least one message
    /// are structured; anything else is kept verbatim.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) if !parsed.is_empty() => RemoteDetail::Structured(parsed),
            _ => RemoteDetail::Raw(body.to_string()),
        }
    }

    /// The detail as a single line of text.
    pub fn message(&self) -> String {
        match self {
            RemoteDetail::Structured(resp) => resp.messages().join(", "),
            RemoteDetail::Raw(body) => body.trim().to_string(),
        }
    }
}

impl fmt::Display for RemoteDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message();
        if message.is_empty() {
            f.write_str("(empty response)")
        } else {
            f.write_str(&message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_error_messages() {
        let detail = RemoteDetail::from_body(r#"{"errorMessages":["summary is required"]}"#);
        assert!(matches!(detail, RemoteDetail::Structured(_)));
        assert_eq!(detail.message(), "summary is required");
    }

    #[test]
    fn test_detail_from_field_errors() {
        let detail = RemoteDetail::from_body(r#"{"errors":{"project":"project is required"}}"#);
        assert_eq!(detail.message(), "project: project is required");
    }

    #[test]
    fn test_detail_from_html_body() {
        let detail = RemoteDetail::from_body("<html>Bad Gateway</html>");
        assert_eq!(detail, RemoteDetail::Raw("<html>Bad Gateway</html>".to_string()));
    }

    #[test]
    fn test_detail_from_empty_json_is_raw() {
        let detail = RemoteDetail::from_body("{}");
        assert_eq!(detail, RemoteDetail::Raw("{}".to_string()));
    }

    #[test]
    fn test_empty_detail_display() {
        assert_eq!(RemoteDetail::Raw(String::new()).to_string(), "(empty response)");
    }

    #[test]
    fn test_remote_error_display() {
        let err = ApiError::Remote {
            status: StatusCode::BAD_REQUEST,
            detail: RemoteDetail::from_body(r#"{"errorMessages":["nope"]}"#),
        };
        assert_eq!(err.to_string(), "JIRA returned HTTP 400 Bad Request: nope");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::Remote {
            status: StatusCode::UNAUTHORIZED,
            detail: RemoteDetail::Raw(String::new()),
        };
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_missing_credential_display() {
        let err = ApiError::MissingCredential(CredentialField::Token);
        assert_eq!(err.to_string(), "Missing API token in configuration");
    }
}
