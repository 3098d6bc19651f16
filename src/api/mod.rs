//! JIRA API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST API.

mod auth;
mod client;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

pub use auth::Auth;
pub use client::{JiraClient, REQUEST_TIMEOUT};
pub use error::{ApiError, RemoteDetail};
pub use request::{build_create_request, DraftField, IssueDraft};
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{CreatedIssue, CurrentUser, ErrorResponse, Issue};
