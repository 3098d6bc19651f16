//! JIRA REST API v3 response types.
//!
//! These are read-only snapshots of remote data. Request bodies live in
//! [`super::request`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of a successful `POST /rest/api/3/issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// The new issue's ID.
    pub id: String,
    /// The new issue's key (e.g. "PROJ-1").
    pub key: String,
    /// REST URL of the new issue.
    #[serde(rename = "self")]
    pub self_url: String,
}

/// The authenticated user, returned by `GET /rest/api/3/myself`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub account_id: String,
    pub display_name: String,
    /// May be empty when the user hides their email.
    #[serde(default)]
    pub email_address: String,
}

/// Error body returned by JIRA when it rejects a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// General error messages, in the order JIRA sent them.
    #[serde(default)]
    pub error_messages: Vec<String>,
    /// Per-field error messages.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    /// Check whether the response carries no messages at all.
    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty() && self.errors.is_empty()
    }

    /// All messages, general ones first, then `field: message` pairs.
    pub fn messages(&self) -> Vec<String> {
        self.error_messages
            .iter()
            .cloned()
            .chain(
                self.errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message)),
            )
            .collect()
    }
}

/// A JIRA issue, as returned by `GET /rest/api/3/issue/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub fields: IssueFields,
}

impl Issue {
    /// Get the issue type name, or an empty string if not returned.
    pub fn issue_type(&self) -> &str {
        self.fields
            .issuetype
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }

    /// Get the status name, or an empty string if not returned.
    pub fn status(&self) -> &str {
        self.fields
            .status
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or_default()
    }

    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Get the priority name, or "None" if not set.
    pub fn priority_name(&self) -> &str {
        self.fields
            .priority
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("None")
    }

    /// Get the description as plain text.
    ///
    /// Handles both Atlassian Document Format and plain string descriptions.
    pub fn description_text(&self) -> String {
        match &self.fields.description {
            Some(Value::String(text)) => text.clone(),
            Some(value @ Value::Object(_)) => serde_json::from_value::<AtlassianDoc>(value.clone())
                .map(|doc| doc.to_plain_text())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
///
/// Everything except the summary is optional so that partial field
/// selections still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    /// Usually an Atlassian Document Format object.
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub issuetype: Option<IssueType>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub display_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
}

/// An Atlassian Document Format (ADF) document.
///
/// The v3 API takes and returns rich text fields such as descriptions in
/// this format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlassianDoc {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default = "default_doc_version")]
    pub version: u32,
    #[serde(default)]
    pub content: Vec<Value>,
}

fn default_doc_version() -> u32 {
    1
}

impl AtlassianDoc {
    /// Build a document from plain text.
    ///
    /// Blank lines separate paragraphs; single newlines become hard breaks.
    /// Empty text yields a document with no content.
    pub fn from_plain_text(text: &str) -> Self {
        let text = text.replace("\r\n", "\n");
        let content = text
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(paragraph)
            .collect();

        Self {
            doc_type: "doc".to_string(),
            version: 1,
            content,
        }
    }

    /// Flatten the document into plain text.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            collect_text(node, &mut out);
        }
        out.trim().to_string()
    }
}

/// A paragraph node; lines inside it are joined with hard breaks.
fn paragraph(block: &str) -> Value {
    let mut nodes = Vec::new();
    for line in block.lines().filter(|line| !line.is_empty()) {
        if !nodes.is_empty() {
            nodes.push(json!({"type": "hardBreak"}));
        }
        nodes.push(json!({"type": "text", "text": line}));
    }
    json!({"type": "paragraph", "content": nodes})
}

fn collect_text(node: &Value, out: &mut String) {
    let children = |out: &mut String| {
        if let Some(items) = node.get("content").and_then(Value::as_array) {
            for item in items {
                collect_text(item, out);
            }
        }
    };

    match node.get("type").and_then(Value::as_str) {
        Some("text") => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        Some("hardBreak") => out.push('\n'),
        Some("mention") => {
            if let Some(text) = node.pointer("/attrs/text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        Some("listItem") => {
            out.push_str("- ");
            children(out);
        }
        Some("paragraph") | Some("heading") | Some("codeBlock") | Some("blockquote") => {
            children(out);
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        Some(_) => children(out),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_issue_json() -> Value {
        json!({
            "id": "10001",
            "key": "PROJ-1",
            "self": "https://x/rest/api/3/issue/10001",
            "fields": {
                "summary": "Fix login",
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Steps"}]}
                    ]
                },
                "issuetype": {"id": "1", "name": "Bug"},
                "project": {"id": "100", "key": "PROJ", "name": "Project"},
                "status": {"id": "3", "name": "In Progress"},
                "priority": {"id": "2", "name": "High"},
                "assignee": {"accountId": "abc", "displayName": "Ada"},
                "reporter": null,
                "created": "2024-01-01T10:00:00.000+0000",
                "updated": "2024-01-02T10:00:00.000+0000",
                "labels": ["auth"],
                "components": [{"id": "7", "name": "Backend"}]
            }
        })
    }

    #[test]
    fn test_parse_full_issue() {
        let issue: Issue = serde_json::from_value(full_issue_json()).unwrap();

        assert_eq!(issue.key, "PROJ-1");
        assert_eq!(issue.self_url, "https://x/rest/api/3/issue/10001");
        assert_eq!(issue.issue_type(), "Bug");
        assert_eq!(issue.status(), "In Progress");
        assert_eq!(issue.priority_name(), "High");
        assert_eq!(issue.assignee_name(), "Ada");
        assert!(issue.fields.reporter.is_none());
        assert_eq!(issue.fields.project.as_ref().unwrap().key, "PROJ");
        assert_eq!(issue.fields.labels, vec!["auth"]);
        assert_eq!(issue.fields.components[0].name, "Backend");
        assert_eq!(issue.description_text(), "Steps");
        assert_eq!(issue.to_string(), "PROJ-1: Fix login");
    }

    #[test]
    fn test_parse_minimal_issue() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "1",
            "key": "A-1",
            "self": "https://x",
            "fields": {"summary": "s"}
        }))
        .unwrap();

        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.priority_name(), "None");
        assert_eq!(issue.status(), "");
        assert_eq!(issue.description_text(), "");
    }

    #[test]
    fn test_plain_string_description() {
        let mut value = full_issue_json();
        value["fields"]["description"] = json!("legacy text");
        let issue: Issue = serde_json::from_value(value).unwrap();

        assert_eq!(issue.description_text(), "legacy text");
    }

    #[test]
    fn test_parse_created_issue() {
        let created: CreatedIssue = serde_json::from_str(
            r#"{"id":"10001","key":"PROJ-1","self":"https://x/rest/api/3/issue/10001"}"#,
        )
        .unwrap();

        assert_eq!(created.id, "10001");
        assert_eq!(created.key, "PROJ-1");
        assert_eq!(created.self_url, "https://x/rest/api/3/issue/10001");
    }

    #[test]
    fn test_error_response_messages() {
        let resp: ErrorResponse = serde_json::from_str(
            r#"{"errorMessages":["first"],"errors":{"summary":"required","project":"bad"}}"#,
        )
        .unwrap();

        assert_eq!(
            resp.messages(),
            vec!["first", "project: bad", "summary: required"]
        );
    }

    #[test]
    fn test_error_response_empty() {
        let resp: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.is_empty());
    }

    #[test]
    fn test_doc_from_plain_text_paragraphs() {
        let doc = AtlassianDoc::from_plain_text("line one\nline two\n\nsecond");

        assert_eq!(doc.doc_type, "doc");
        assert_eq!(doc.version, 1);
        assert_eq!(doc.content.len(), 2);
        assert_eq!(
            doc.content[0],
            json!({"type": "paragraph", "content": [
                {"type": "text", "text": "line one"},
                {"type": "hardBreak"},
                {"type": "text", "text": "line two"}
            ]})
        );
        assert_eq!(doc.to_plain_text(), "line one\nline two\nsecond");
    }

    #[test]
    fn test_doc_from_empty_text() {
        let doc = AtlassianDoc::from_plain_text("");
        assert!(doc.content.is_empty());
        assert_eq!(doc.to_plain_text(), "");
    }

    #[test]
    fn test_doc_lists_and_mentions() {
        let doc: AtlassianDoc = serde_json::from_value(json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "one"}]}
                    ]},
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [
                            {"type": "mention", "attrs": {"text": "@ada"}}
                        ]}
                    ]}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(doc.to_plain_text(), "- one\n- @ada");
    }
}
