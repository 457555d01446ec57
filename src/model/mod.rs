//! Core data model for Progression.
//!
//! These types describe one status update: what is asked for, what the
//! remote holds, and how the attempt ended.

mod outcome;
mod repository;
mod request;
mod status;

pub use outcome::UpdateOutcome;
pub use repository::{ReadmeDocument, RepoHandle, RepoRef, Visibility};
pub use request::{Token, UpdateRequest};
pub use status::StatusValue;
