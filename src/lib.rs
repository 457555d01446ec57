//! Progression: set the progress marker in a GitHub repository's README.
//!
//! The pieces, leaves first:
//!
//! - [`status_line`]: pure text rewrite of the README's `progress:` line.
//! - [`gateway`]: remote repository access behind [`gateway::RepositoryGateway`].
//! - [`update`]: the attempt state machine tying the two together.
//! - [`credentials`] and [`config`]: where tokens and defaults come from.
//!
//! The `progression` binary is one presentation shell over [`update::Updater`];
//! anything that can build an [`model::UpdateRequest`] can drive it the same way.

pub mod config;
pub mod credentials;
pub mod gateway;
pub mod model;
pub mod status_line;
pub mod update;
