//! The terminal result of one update attempt.

use serde::Serialize;

use super::Visibility;

/// How an update attempt ended.
///
/// Either the README write committed (`Success`) or nothing was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum UpdateOutcome {
    /// The status line now reads `label`.
    Success { label: String },

    /// The repository's visibility is not what the caller declared.
    VisibilityMismatch {
        expected: Visibility,
        actual: Visibility,
    },

    /// The repository (or its README) does not exist or is hidden from the token.
    NotFound,

    /// The token was rejected or lacks permission.
    Forbidden,

    /// GitHub answered with an error, including a rejected conditional write.
    ApiError { detail: String },

    /// Anything else: the transport failed or returned something unreadable.
    UnexpectedError { detail: String },
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
