//! Issue commands.

use std::fmt::Write as _;

use goji::api::{Issue, JiraClient, Transport};
use goji::config::CredentialStore;
use goji::error::Result;

use super::load_credentials;
use crate::cli::CreateArgs;

/// Create an issue and print its key and browse link.
pub fn create<T: Transport>(store: &CredentialStore, client: &JiraClient<T>, args: CreateArgs) -> Result<()> {
    let credentials = load_credentials(store)?;
    let draft = args.into_draft(credentials.default_project.as_deref())?;

    let created = client.create_issue(&credentials, &draft)?;

    println!("Created {}", created.key);
    println!("{}", browse_url(&credentials.server_url, &created.key));
    Ok(())
}

/// Fetch an issue and print a summary of it.
pub fn show<T: Transport>(store: &CredentialStore, client: &JiraClient<T>, key: &str) -> Result<()> {
    let credentials = load_credentials(store)?;
    let issue = client.get_issue(&credentials, key)?;

    print!("{}", format_issue(&issue));
    println!("{}", browse_url(&credentials.server_url, &issue.key));
    Ok(())
}

/// The web page for an issue.
fn browse_url(server_url: &str, key: &str) -> String {
    format!("{}/browse/{}", server_url.trim().trim_end_matches('/'), key)
}

fn format_issue(issue: &Issue) -> String {
    let fields = &issue.fields;
    let mut out = String::new();

    let _ = writeln!(out, "{}", issue);
    let _ = writeln!(out, "Type:       {}", issue.issue_type());
    let _ = writeln!(out, "Status:     {}", issue.status());
    let _ = writeln!(out, "Priority:   {}", issue.priority_name());
    let _ = writeln!(out, "Assignee:   {}", issue.assignee_name());
    if let Some(reporter) = &fields.reporter {
        let _ = writeln!(out, "Reporter:   {}", reporter.display_name);
    }
    if !fields.labels.is_empty() {
        let _ = writeln!(out, "Labels:     {}", fields.labels.join(", "));
    }
    if !fields.components.is_empty() {
        let names: Vec<&str> = fields.components.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(out, "Components: {}", names.join(", "));
    }
    if let Some(created) = &fields.created {
        let _ = writeln!(out, "Created:    {}", created);
    }
    if let Some(updated) = &fields.updated {
        let _ = writeln!(out, "Updated:    {}", updated);
    }

    let description = issue.description_text();
    if !description.is_empty() {
        let _ = writeln!(out, "\n{}\n", description);
    }

    out
}
