//! Update commands: update, statuses.

use std::process::ExitCode;

use progression::config::Config;
use progression::credentials::{self, CredentialProvider};
use progression::gateway::GhGateway;
use progression::model::{RepoRef, StatusValue, UpdateRequest, Visibility};
use progression::update::Updater;

use super::format::{
    describe_preview, exit_code, format_statuses, format_summary, outcome_json, render_outcome,
};

/// Parsed arguments for `progression update`.
pub(super) struct UpdateArgs {
    pub repo: String,
    pub status: StatusValue,
    pub visibility: Visibility,
    pub owner: Option<String>,
    pub token: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

pub(super) fn cmd_update(config: &Config, args: &UpdateArgs) -> Result<ExitCode, String> {
    let owner = args.owner.as_deref().or(config.default_owner.as_deref());
    let repo = RepoRef::parse(&args.repo, owner)?;
    let token = credentials::resolve(args.token.as_deref())
        .token()
        .map_err(|e| e.to_string())?;

    let request = UpdateRequest::new(repo, token, args.status, args.visibility);
    eprintln!("{}\n", format_summary(&request));

    let gateway = config
        .gh_program
        .as_ref()
        .map_or_else(GhGateway::new, GhGateway::with_program);
    let updater = Updater::new(gateway);

    if args.dry_run {
        return match updater.preview(&request) {
            Ok(preview) => {
                eprintln!("{}", describe_preview(&preview));
                print!("{}", preview.proposed);
                Ok(ExitCode::SUCCESS)
            }
            Err(outcome) => {
                if args.json {
                    println!("{}", outcome_json(&outcome)?);
                } else {
                    eprintln!("{}", render_outcome(&outcome, request.repo()));
                }
                Ok(ExitCode::from(exit_code(&outcome)))
            }
        };
    }

    let outcome = updater.submit(&request);
    if args.json {
        println!("{}", outcome_json(&outcome)?);
        return Ok(ExitCode::from(exit_code(&outcome)));
    }

    let rendered = render_outcome(&outcome, request.repo());
    if outcome.is_success() {
        println!("{rendered}");
    } else {
        eprintln!("{rendered}");
    }
    Ok(ExitCode::from(exit_code(&outcome)))
}

pub(super) fn cmd_statuses() {
    println!("{}", format_statuses());
}
