//! Update orchestration: one status update, start to finish.
//!
//! An [`UpdateAttempt`] walks a fixed sequence of phases:
//!
//! ```text
//! Idle → Checking → VisibilityValidating → Fetching → Rewriting → Committing → Done
//!             ╰────────────────┴───────────────┴─────────────────────┴──────→ Failed
//! ```
//!
//! Every failure is terminal. The README write is the last step and is
//! conditioned on the version tag fetched in the same attempt, so a failed
//! attempt leaves the remote untouched. Retrying means starting a new attempt.

use crate::gateway::{FileWrite, GatewayError, RepositoryGateway};
use crate::model::{ReadmeDocument, RepoHandle, UpdateOutcome, UpdateRequest};
use crate::status_line::{self, StatusLineEdit};

/// Commit message for a status change to `label`.
pub fn commit_message(label: &str) -> String {
    format!("📝 Progression updated: {label}")
}

/// Where an attempt is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Checking,
    VisibilityValidating,
    Fetching,
    Rewriting,
    Committing,
    Done,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Attempt state, carrying what each phase has learned so far.
#[derive(Debug)]
enum State {
    Idle,
    Checking,
    VisibilityValidating {
        handle: RepoHandle,
    },
    Fetching {
        handle: RepoHandle,
    },
    Rewriting {
        handle: RepoHandle,
        readme: ReadmeDocument,
    },
    Committing {
        handle: RepoHandle,
        readme: ReadmeDocument,
        edit: StatusLineEdit,
    },
    Done(UpdateOutcome),
    Failed {
        at: Phase,
        outcome: UpdateOutcome,
    },
}

impl State {
    fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Checking => Phase::Checking,
            Self::VisibilityValidating { .. } => Phase::VisibilityValidating,
            Self::Fetching { .. } => Phase::Fetching,
            Self::Rewriting { .. } => Phase::Rewriting,
            Self::Committing { .. } => Phase::Committing,
            Self::Done(_) => Phase::Done,
            Self::Failed { .. } => Phase::Failed,
        }
    }
}

/// A single-use run of one [`UpdateRequest`] against a gateway.
pub struct UpdateAttempt<'a, G: ?Sized> {
    gateway: &'a G,
    request: &'a UpdateRequest,
    state: State,
}

impl<'a, G: RepositoryGateway + ?Sized> UpdateAttempt<'a, G> {
    pub fn new(gateway: &'a G, request: &'a UpdateRequest) -> Self {
        Self {
            gateway,
            request,
            state: State::Idle,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The phase the attempt failed in, once it has.
    pub fn failed_at(&self) -> Option<Phase> {
        match self.state {
            State::Failed { at, .. } => Some(at),
            _ => None,
        }
    }

    /// The terminal outcome, once reached.
    pub fn outcome(&self) -> Option<&UpdateOutcome> {
        match &self.state {
            State::Done(outcome) | State::Failed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// The rewritten README, once the attempt has reached `Committing`.
    pub fn proposed(&self) -> Option<(&ReadmeDocument, &StatusLineEdit)> {
        match &self.state {
            State::Committing { readme, edit, .. } => Some((readme, edit)),
            _ => None,
        }
    }

    /// Advance one phase. Does nothing once terminal.
    pub fn step(&mut self) -> Phase {
        let from = self.phase();
        if from.is_terminal() {
            return from;
        }

        let state = std::mem::replace(&mut self.state, State::Idle);
        self.state = match self.advance(state) {
            Ok(next) => next,
            Err(outcome) => State::Failed { at: from, outcome },
        };

        let to = self.phase();
        tracing::debug!(repo = %self.request.repo(), ?from, ?to, "update phase");
        to
    }

    /// Drive the attempt to a terminal phase and return its outcome.
    pub fn run(mut self) -> UpdateOutcome {
        while !self.step().is_terminal() {}
        match self.state {
            State::Done(outcome) | State::Failed { outcome, .. } => outcome,
            other => UpdateOutcome::UnexpectedError {
                detail: format!("attempt stopped in {:?}", other.phase()),
            },
        }
    }

    fn advance(&self, state: State) -> Result<State, UpdateOutcome> {
        let gateway = self.gateway;
        let request = self.request;
        let token = request.credentials();

        match state {
            State::Idle => Ok(State::Checking),

            State::Checking => {
                let handle = gateway
                    .check_access(request.repo(), token)
                    .map_err(outcome_for)?;
                Ok(State::VisibilityValidating { handle })
            }

            State::VisibilityValidating { handle } => {
                let actual = gateway.visibility(&handle, token).map_err(outcome_for)?;
                let expected = request.expected_visibility();
                if actual != expected {
                    return Err(UpdateOutcome::VisibilityMismatch { expected, actual });
                }
                Ok(State::Fetching { handle })
            }

            State::Fetching { handle } => {
                let readme = gateway.readme(&handle, token).map_err(outcome_for)?;
                Ok(State::Rewriting { handle, readme })
            }

            State::Rewriting { handle, readme } => {
                let edit = status_line::rewrite(&readme.content, request.status().label());
                tracing::debug!(
                    path = %readme.path,
                    rewritten = edit.rewritten,
                    appended = edit.appended,
                    "status line rewritten"
                );
                Ok(State::Committing {
                    handle,
                    readme,
                    edit,
                })
            }

            State::Committing {
                handle,
                readme,
                edit,
            } => {
                let label = request.status().label();
                let write = FileWrite {
                    path: readme.path,
                    content: edit.content,
                    version_tag: readme.version_tag,
                    message: commit_message(label),
                };
                gateway
                    .write_file(&handle, token, &write)
                    .map_err(outcome_for)?;
                Ok(State::Done(UpdateOutcome::Success {
                    label: label.to_string(),
                }))
            }

            terminal @ (State::Done(_) | State::Failed { .. }) => Ok(terminal),
        }
    }
}

/// The README change an update would commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub path: String,
    pub current: String,
    pub proposed: String,
    pub rewritten: usize,
    pub appended: bool,
}

/// Runs update attempts against a gateway.
pub struct Updater<G> {
    gateway: G,
}

impl<G: RepositoryGateway> Updater<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run one full update attempt.
    pub fn submit(&self, request: &UpdateRequest) -> UpdateOutcome {
        let outcome = UpdateAttempt::new(&self.gateway, request).run();
        match &outcome {
            UpdateOutcome::Success { label } => {
                tracing::info!(repo = %request.repo(), %label, "status updated");
            }
            other => tracing::warn!(repo = %request.repo(), outcome = ?other, "update failed"),
        }
        outcome
    }

    /// Run every phase up to the commit, and return what would be written.
    pub fn preview(&self, request: &UpdateRequest) -> Result<Preview, UpdateOutcome> {
        let mut attempt = UpdateAttempt::new(&self.gateway, request);
        loop {
            let phase = attempt.step();
            if phase == Phase::Committing {
                break;
            }
            if phase.is_terminal() {
                return Err(attempt.run());
            }
        }

        match attempt.proposed() {
            Some((readme, edit)) => Ok(Preview {
                path: readme.path.clone(),
                current: readme.content.clone(),
                proposed: edit.content.clone(),
                rewritten: edit.rewritten,
                appended: edit.appended,
            }),
            None => Err(UpdateOutcome::UnexpectedError {
                detail: "no rewritten README to preview".into(),
            }),
        }
    }
}

/// Map a gateway failure into the closed outcome set.
fn outcome_for(err: GatewayError) -> UpdateOutcome {
    match err {
        GatewayError::NotFound(_) => UpdateOutcome::NotFound,
        GatewayError::Forbidden(_) => UpdateOutcome::Forbidden,
        err @ GatewayError::Api { .. } => UpdateOutcome::ApiError {
            detail: err.to_string(),
        },
        GatewayError::Unexpected(detail) => UpdateOutcome::UnexpectedError { detail },
    }
}
