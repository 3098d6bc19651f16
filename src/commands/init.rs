//! Interactive connection setup.

use std::io::{self, BufRead, Write};

use tracing::info;

use goji::api::{JiraClient, Transport};
use goji::config::{ApiToken, CredentialStore, Credentials};
use goji::error::Result;

use super::prompt::{ask, confirm};

/// Prompt for credentials, optionally check them against JIRA, and save.
pub fn run<T: Transport>(store: &CredentialStore, client: &JiraClient<T>, verify: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    // An unreadable file is about to be replaced, so it only loses its defaults.
    let existing = store.load().ok().flatten();

    if existing.is_some() {
        let question = format!(
            "Configuration already exists at {}. Overwrite?",
            store.path().display()
        );
        if !confirm(&mut input, &mut output, &question)? {
            writeln!(output, "Aborted.")?;
            return Ok(());
        }
    }

    writeln!(output, "goji configuration")?;
    writeln!(output, "==================\n")?;

    let credentials = collect_credentials(&mut input, &mut output, existing.as_ref())?;
    credentials.validate()?;

    if verify {
        let user = client.current_user(&credentials)?;
        writeln!(output, "\nAuthenticated as {}", user.display_name)?;
    }

    store.save(&credentials)?;
    info!(path = %store.path().display(), "Saved configuration");

    writeln!(output, "Configuration saved to {}", store.path().display())?;
    Ok(())
}

/// Ask for each credentials field, offering existing values as defaults.
fn collect_credentials<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    existing: Option<&Credentials>,
) -> io::Result<Credentials> {
    let server_url = with_default(
        ask(
            input,
            output,
            "JIRA URL (e.g., https://company.atlassian.net)",
            existing.map(|c| c.server_url.as_str()),
        )?,
        existing.map(|c| c.server_url.clone()),
    );

    let identity = with_default(
        ask(input, output, "Email", existing.map(|c| c.identity.as_str()))?,
        existing.map(|c| c.identity.clone()),
    );

    writeln!(
        output,
        "Create an API token at https://id.atlassian.com/manage-profile/security/api-tokens"
    )?;
    let api_token = match ask(
        input,
        output,
        "API token",
        existing.map(|_| "leave empty to keep current"),
    )? {
        token if token.is_empty() => existing
            .map(|c| c.api_token.clone())
            .unwrap_or_default(),
        token => ApiToken::new(token),
    };

    let default_project = optional(with_default(
        ask(
            input,
            output,
            "Default project key (optional)",
            existing.and_then(|c| c.default_project.as_deref()),
        )?,
        existing.and_then(|c| c.default_project.clone()),
    ));

    let team_name = optional(with_default(
        ask(
            input,
            output,
            "Team name (optional)",
            existing.and_then(|c| c.team_name.as_deref()),
        )?,
        existing.and_then(|c| c.team_name.clone()),
    ));

    Ok(Credentials {
        server_url,
        identity,
        api_token,
        default_project,
        team_name,
    })
}

fn with_default(answer: String, default: Option<String>) -> String {
    if answer.is_empty() {
        default.unwrap_or_default()
    } else {
        answer
    }
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
