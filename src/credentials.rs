//! Credential resolution for GitHub access.
//!
//! The token is resolved through a chain, first hit wins:
//!
//! 1. `--token <token>`: explicit per-command value
//! 2. `PROGRESSION_TOKEN`: tool-specific env var
//! 3. `GH_TOKEN`, then `GITHUB_TOKEN`: the variables `gh` and Actions already use
//!
//! Tokens are never written to disk. How a user stores theirs (keychain,
//! password manager, shell profile) is up to them.

use std::env;

use crate::model::Token;

/// Environment variables consulted, in order.
pub const TOKEN_VARS: [&str; 3] = ["PROGRESSION_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(
        "no GitHub token: pass --token, or set one of PROGRESSION_TOKEN, GH_TOKEN, GITHUB_TOKEN"
    )]
    Missing,
}

/// Something that can hand out a GitHub token.
pub trait CredentialProvider {
    fn token(&self) -> Result<Token, CredentialError>;
}

/// A token supplied directly.
#[derive(Debug, Clone)]
pub struct StaticToken(pub Token);

impl CredentialProvider for StaticToken {
    fn token(&self) -> Result<Token, CredentialError> {
        Ok(self.0.clone())
    }
}

/// A token read from the first non-empty variable in a list.
#[derive(Debug, Clone)]
pub struct EnvToken {
    vars: Vec<String>,
}

impl EnvToken {
    pub fn new<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(TOKEN_VARS)
    }
}

impl CredentialProvider for EnvToken {
    fn token(&self) -> Result<Token, CredentialError> {
        self.vars
            .iter()
            .find_map(|var| {
                env::var(var)
                    .ok()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            })
            .map(Token::new)
            .ok_or(CredentialError::Missing)
    }
}

/// Providers tried in order; the first success wins.
pub struct Chain(Vec<Box<dyn CredentialProvider>>);

impl Chain {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self(providers)
    }
}

impl CredentialProvider for Chain {
    fn token(&self) -> Result<Token, CredentialError> {
        self.0
            .iter()
            .find_map(|p| p.token().ok())
            .ok_or(CredentialError::Missing)
    }
}

/// The default resolution chain: explicit token, then environment.
pub fn resolve(explicit: Option<&str>) -> Chain {
    let mut providers: Vec<Box<dyn CredentialProvider>> = Vec::new();
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        providers.push(Box::new(StaticToken(Token::new(token))));
    }
    providers.push(Box::new(EnvToken::default()));
    Chain::new(providers)
}
