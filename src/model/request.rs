//! Update requests and the credentials they carry.

use std::fmt;

use super::{RepoRef, StatusValue, Visibility};

/// An opaque GitHub access token.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for handing to the transport.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// One user action: set `status` on `repo`, expecting it to be `expected_visibility`.
///
/// Fields are private; a request is immutable once built.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    repo: RepoRef,
    credentials: Token,
    status: StatusValue,
    expected_visibility: Visibility,
}

impl UpdateRequest {
    pub fn new(
        repo: RepoRef,
        credentials: Token,
        status: StatusValue,
        expected_visibility: Visibility,
    ) -> Self {
        Self {
            repo,
            credentials,
            status,
            expected_visibility,
        }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn credentials(&self) -> &Token {
        &self.credentials
    }

    pub fn status(&self) -> StatusValue {
        self.status
    }

    pub fn expected_visibility(&self) -> Visibility {
        self.expected_visibility
    }
}
