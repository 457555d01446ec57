//! Repository gateway: the remote capabilities an update needs.
//!
//! The orchestrator talks to GitHub only through [`RepositoryGateway`].
//! [`GhGateway`] is the production implementation; tests drive the
//! orchestrator with an in-memory fake.

mod gh;

pub use gh::GhGateway;

use crate::model::{ReadmeDocument, RepoHandle, RepoRef, Token, Visibility};

/// Errors a gateway call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// GitHub answered with a non-success status.
    #[error("GitHub API error{}: {detail}", http_suffix(.status))]
    Api { status: Option<u16>, detail: String },

    /// The call never produced a usable answer.
    #[error("{0}")]
    Unexpected(String),
}

#[allow(clippy::ref_option)]
fn http_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// A conditional README write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub path: String,
    pub content: String,

    /// The version tag the write is conditioned on. A remote that has moved
    /// past it rejects the write.
    pub version_tag: String,

    pub message: String,
}

/// Remote repository access, one blocking round trip per call.
pub trait RepositoryGateway {
    /// Confirm the repository exists and `token` can read it.
    fn check_access(&self, repo: &RepoRef, token: &Token) -> Result<RepoHandle, GatewayError>;

    /// Fetch the repository's current visibility.
    fn visibility(&self, handle: &RepoHandle, token: &Token) -> Result<Visibility, GatewayError>;

    /// Fetch the README with its current version tag.
    fn readme(&self, handle: &RepoHandle, token: &Token) -> Result<ReadmeDocument, GatewayError>;

    /// Write a file, conditioned on `write.version_tag`.
    fn write_file(
        &self,
        handle: &RepoHandle,
        token: &Token,
        write: &FileWrite,
    ) -> Result<(), GatewayError>;
}
