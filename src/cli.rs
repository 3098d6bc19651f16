use clap::{Args, Parser, Subcommand};

use goji::api::IssueDraft;
use goji::error::AppError;

#[derive(Parser)]
#[command(name = "goji")]
#[command(about = "Create and view JIRA issues from the terminal", version)]
#[command(after_help = "EXAMPLES:
    goji init                              Set up your JIRA connection
    goji create -s \"Fix login bug\"         Create a task in the default project
    goji create -p OPS -t Bug -s \"Crash\"   Create a bug in project OPS
    goji show PROJ-123                     Show issue details")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the underlying cause of errors
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up the JIRA connection interactively
    #[command(after_help = "EXAMPLES:
    goji init
    goji init --no-verify")]
    Init {
        /// Save without checking the credentials against JIRA
        #[arg(long)]
        no_verify: bool,
    },
    /// Create a new issue
    #[command(after_help = "EXAMPLES:
    goji create -s \"Write release notes\"
    goji create -p PROJ -t Story -s \"Login page\" -d \"As a user...\"
    goji create -s \"Flaky test\" --label ci --label flaky --priority High")]
    Create(CreateArgs),
    /// Show issue details
    #[command(after_help = "EXAMPLES:
    goji show PROJ-123")]
    Show {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// Inspect the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print where configuration and logs are stored
    Path,
    /// Print the stored configuration with the token hidden
    Show,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Issue summary
    #[arg(long, short)]
    pub summary: String,

    /// Project key (uses default if not specified)
    #[arg(long, short)]
    pub project: Option<String>,

    /// Issue type name
    #[arg(long = "type", short = 't', default_value = "Task")]
    pub issue_type: String,

    /// Issue description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Priority name (e.g., High)
    #[arg(long)]
    pub priority: Option<String>,

    /// Assignee account ID
    #[arg(long)]
    pub assignee: Option<String>,

    /// Label to add (repeatable)
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Component name (repeatable)
    #[arg(long = "component")]
    pub components: Vec<String>,
}

impl CreateArgs {
    /// Turn the arguments into a draft, falling back to `default_project`.
    ///
    /// Repeatable flags that were never given stay unset.
    pub fn into_draft(self, default_project: Option<&str>) -> Result<IssueDraft, AppError> {
        let project_key = self
            .project
            .or_else(|| default_project.map(String::from))
            .ok_or(AppError::NoProject)?;

        Ok(IssueDraft {
            project_key,
            issue_type: self.issue_type,
            summary: self.summary,
            description: self.description,
            priority: self.priority,
            assignee: self.assignee,
            labels: non_empty(self.labels),
            components: non_empty(self.components),
        })
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CreateArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Create(args) => args,
            _ => panic!("Expected create command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_defaults() {
        let args = parse(&["goji", "create", "-s", "Hello"]);
        let draft = args.into_draft(Some("PROJ")).unwrap();

        assert_eq!(draft.project_key, "PROJ");
        assert_eq!(draft.issue_type, "Task");
        assert_eq!(draft.summary, "Hello");
        assert_eq!(draft.description, None);
        assert_eq!(draft.labels, None);
        assert_eq!(draft.components, None);
    }

    #[test]
    fn test_create_explicit_project_wins() {
        let args = parse(&["goji", "create", "-s", "Hello", "-p", "OPS", "-t", "Bug"]);
        let draft = args.into_draft(Some("PROJ")).unwrap();

        assert_eq!(draft.project_key, "OPS");
        assert_eq!(draft.issue_type, "Bug");
    }

    #[test]
    fn test_create_repeatable_flags() {
        let args = parse(&[
            "goji", "create", "-s", "x", "--label", "a", "--label", "b", "--component", "API",
        ]);
        let draft = args.into_draft(Some("PROJ")).unwrap();

        assert_eq!(draft.labels, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(draft.components, Some(vec!["API".to_string()]));
    }

    #[test]
    fn test_create_without_any_project() {
        let args = parse(&["goji", "create", "-s", "Hello"]);
        assert!(matches!(args.into_draft(None), Err(AppError::NoProject)));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["goji", "show", "PROJ-1", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
