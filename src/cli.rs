//! CLI interface for Progression.
//!
//! Sets the progress marker in a GitHub repository's README:
//!
//! - `progression update <repo> --status <key> --visibility <public|private>`
//! - `progression statuses` lists the status keys and their labels.
//!
//! The repository is `owner/name`, or a bare `name` with `--owner` or
//! `default-owner` from the config.

mod format;
mod update;

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use progression::config::Config;
use progression::model::{StatusValue, Visibility};

/// Progression: keep a README's progress line current.
#[derive(Debug, Parser)]
#[command(name = "progression", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Log phase transitions and gh calls to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Examples:
  progression update octo/widgets --status ready_soon --visibility public
  progression update widgets --owner octo --status finished --visibility private
  progression update octo/widgets --status under_dev --visibility public --dry-run

The token comes from --token, PROGRESSION_TOKEN, GH_TOKEN or GITHUB_TOKEN.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite the README's progress line and commit it.
    ///
    /// Checks the repository exists and has the expected visibility
    /// before touching anything. The commit is conditioned on the README
    /// version just fetched, so a concurrent edit makes it fail instead
    /// of being overwritten.
    Update {
        /// Repository: `owner/name`, or `name` with an owner from `--owner` or config.
        repo: String,

        /// The status to set.
        #[arg(long, short, value_enum)]
        status: StatusArg,

        /// The visibility the repository is expected to have.
        #[arg(long, value_enum)]
        visibility: VisibilityArg,

        /// Owner for a bare repository name.
        #[arg(long)]
        owner: Option<String>,

        /// GitHub token. Prefer an environment variable.
        #[arg(long)]
        token: Option<String>,

        /// Print the rewritten README instead of committing it.
        #[arg(long)]
        dry_run: bool,

        /// Print the outcome as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// List status keys and the labels they write.
    Statuses,
}

/// CLI-facing status, mapped to the domain `StatusValue`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// 🔴 Under Development
    #[value(name = "under_dev")]
    UnderDev,
    /// 🟠 Soon Ready
    #[value(name = "ready_soon")]
    ReadySoon,
    /// 🟢 Ended
    #[value(name = "finished")]
    Finished,
    /// 🔘 Updating
    #[value(name = "under_update")]
    UnderUpdate,
}

impl StatusArg {
    fn to_domain(self) -> StatusValue {
        match self {
            Self::UnderDev => StatusValue::UnderDev,
            Self::ReadySoon => StatusValue::ReadySoon,
            Self::Finished => StatusValue::Finished,
            Self::UnderUpdate => StatusValue::UnderUpdate,
        }
    }
}

/// CLI-facing visibility, mapped to the domain `Visibility`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VisibilityArg {
    Public,
    Private,
}

impl VisibilityArg {
    fn to_domain(self) -> Visibility {
        match self {
            Self::Public => Visibility::Public,
            Self::Private => Visibility::Private,
        }
    }
}

/// Run a parsed command, returning an error message on failure.
pub fn run(config: &Config, cli: Cli) -> Result<ExitCode, String> {
    match cli.command {
        Command::Update {
            repo,
            status,
            visibility,
            owner,
            token,
            dry_run,
            json,
        } => update::cmd_update(
            config,
            &update::UpdateArgs {
                repo,
                status: status.to_domain(),
                visibility: visibility.to_domain(),
                owner,
                token,
                dry_run,
                json,
            },
        ),
        Command::Statuses => {
            update::cmd_statuses();
            Ok(ExitCode::SUCCESS)
        }
    }
}
