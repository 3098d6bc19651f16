//! Request bodies for creating issues.
//!
//! An [`IssueDraft`] holds what the user typed; [`build_create_request`]
//! turns it into the body JIRA expects. Unset optional fields are left out
//! of the JSON entirely rather than sent as `null`.

use std::fmt;

use serde::Serialize;

use super::error::{ApiError, Result};
use super::types::AtlassianDoc;

/// A required draft field, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    ProjectKey,
    IssueType,
    Summary,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::ProjectKey => "project key",
            DraftField::IssueType => "issue type",
            DraftField::Summary => "summary",
        };
        f.write_str(name)
    }
}

/// User-supplied values for a new issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    /// Key of the target project (e.g. "PROJ").
    pub project_key: String,
    /// Issue type name (e.g. "Task", "Bug").
    pub issue_type: String,
    pub summary: String,
    /// Plain text; sent as an Atlassian document.
    pub description: Option<String>,
    /// Priority name (e.g. "High").
    pub priority: Option<String>,
    /// Account ID of the assignee.
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
    /// Component names.
    pub components: Option<Vec<String>>,
}

impl IssueDraft {
    /// Create a draft with only the required fields set.
    pub fn new(
        project_key: impl Into<String>,
        issue_type: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            issue_type: issue_type.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body of `POST /rest/api/3/issue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIssueRequest {
    pub fields: CreateIssueFields,
}

/// The `fields` object of a create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIssueFields {
    pub project: KeyRef,
    pub issuetype: NameRef,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<AtlassianDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NameRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<AccountRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<NameRef>>,
}

/// Reference to an entity by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRef {
    pub key: String,
}

/// Reference to an entity by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRef {
    pub name: String,
}

/// Reference to a user by account ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    pub account_id: String,
}

fn name_ref(name: &str) -> NameRef {
    NameRef {
        name: name.to_string(),
    }
}

/// Convert a draft into a create-issue request body.
///
/// # Errors
///
/// Returns `ApiError::Validation` naming the first of project key, issue
/// type or summary that is empty or whitespace.
pub fn build_create_request(draft: &IssueDraft) -> Result<CreateIssueRequest> {
    let required = [
        (DraftField::ProjectKey, &draft.project_key),
        (DraftField::IssueType, &draft.issue_type),
        (DraftField::Summary, &draft.summary),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ApiError::Validation(*field));
    }

    let fields = CreateIssueFields {
        project: KeyRef {
            key: draft.project_key.trim().to_string(),
        },
        issuetype: name_ref(draft.issue_type.trim()),
        summary: draft.summary.trim().to_string(),
        description: draft
            .description
            .as_deref()
            .map(AtlassianDoc::from_plain_text),
        priority: draft.priority.as_deref().map(name_ref),
        assignee: draft.assignee.as_ref().map(|id| AccountRef {
            account_id: id.clone(),
        }),
        labels: draft.labels.clone(),
        components: draft
            .components
            .as_ref()
            .map(|names| names.iter().map(|name| name_ref(name)).collect()),
    };

    Ok(CreateIssueRequest { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn draft() -> IssueDraft {
        IssueDraft::new("PROJ", "Task", "Write docs")
    }

    fn to_json(draft: &IssueDraft) -> Value {
        serde_json::to_value(build_create_request(draft).unwrap()).unwrap()
    }

    #[test]
    fn test_minimal_request_shape() {
        assert_eq!(
            to_json(&draft()),
            json!({
                "fields": {
                    "project": {"key": "PROJ"},
                    "issuetype": {"name": "Task"},
                    "summary": "Write docs"
                }
            })
        );
    }

    #[test]
    fn test_unset_description_key_absent() {
        let value = to_json(&draft());
        let fields = value["fields"].as_object().unwrap();

        assert!(!fields.contains_key("description"));
        assert!(!fields.contains_key("priority"));
        assert!(!fields.contains_key("assignee"));
        assert!(!fields.contains_key("labels"));
        assert!(!fields.contains_key("components"));
    }

    #[test]
    fn test_description_sent_as_document() {
        let value = to_json(&draft().with_description("Hello"));

        assert_eq!(
            value["fields"]["description"],
            json!({
                "type": "doc",
                "version": 1,
                "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Hello"}]}
                ]
            })
        );
    }

    #[test]
    fn test_empty_description_still_present() {
        let value = to_json(&draft().with_description(""));
        let fields = value["fields"].as_object().unwrap();

        assert!(fields.contains_key("description"));
        assert_eq!(fields["description"]["content"], json!([]));
    }

    #[test]
    fn test_all_optional_fields() {
        let mut d = draft();
        d.priority = Some("High".to_string());
        d.assignee = Some("5b10ac8d82e05b22cc7d4ef5".to_string());
        d.labels = Some(vec!["docs".to_string(), "q3".to_string()]);
        d.components = Some(vec!["Backend".to_string()]);

        let value = to_json(&d);
        let fields = &value["fields"];

        assert_eq!(fields["priority"], json!({"name": "High"}));
        assert_eq!(
            fields["assignee"],
            json!({"accountId": "5b10ac8d82e05b22cc7d4ef5"})
        );
        assert_eq!(fields["labels"], json!(["docs", "q3"]));
        assert_eq!(fields["components"], json!([{"name": "Backend"}]));
    }

    #[test]
    fn test_empty_label_list_kept() {
        let mut d = draft();
        d.labels = Some(Vec::new());

        let value = to_json(&d);
        assert_eq!(value["fields"]["labels"], json!([]));
    }

    #[test]
    fn test_empty_project_key_rejected() {
        let mut d = draft();
        d.project_key = String::new();

        let err = build_create_request(&d).unwrap_err();
        assert!(matches!(err, ApiError::Validation(DraftField::ProjectKey)));
    }

    #[test]
    fn test_empty_issue_type_rejected() {
        let mut d = draft();
        d.issue_type = "   ".to_string();

        let err = build_create_request(&d).unwrap_err();
        assert!(matches!(err, ApiError::Validation(DraftField::IssueType)));
    }

    #[test]
    fn test_empty_summary_rejected() {
        let mut d = draft();
        d.summary = String::new();

        let err = build_create_request(&d).unwrap_err();
        assert!(matches!(err, ApiError::Validation(DraftField::Summary)));
        assert_eq!(err.to_string(), "summary is required");
    }

    #[test]
    fn test_first_missing_field_reported() {
        let err = build_create_request(&IssueDraft::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(DraftField::ProjectKey)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let d = draft().with_description("a\n\nb");
        assert_eq!(
            build_create_request(&d).unwrap(),
            build_create_request(&d).unwrap()
        );
    }
}
