//! Repository-side types: references, handles, visibility, and the README.

use std::fmt;

use serde::Serialize;

/// Whether a repository is publicly or privately accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Visibility from GitHub's `private` flag.
    pub fn from_private(private: bool) -> Self {
        if private { Self::Private } else { Self::Public }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// An `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse a repository reference.
    ///
    /// `owner/name` is split on the first `/`. A bare `name` takes
    /// `default_owner`, which is then required.
    pub fn parse(text: &str, default_owner: Option<&str>) -> Result<Self, String> {
        let text = text.trim();
        let (owner, name) = match text.split_once('/') {
            Some((owner, name)) => (owner.trim(), name.trim()),
            None => {
                let owner = default_owner.map(str::trim).unwrap_or_default();
                if owner.is_empty() {
                    return Err(format!(
                        "no owner for repository '{text}': use owner/name, pass --owner, \
                         or set default-owner in the config"
                    ));
                }
                (owner, text)
            }
        };

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(format!("invalid repository reference '{text}'"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A repository that has passed the access check.
///
/// Only a gateway hands these out, so holding one means the repository
/// existed and was readable with the request's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    pub repo: RepoRef,
    pub default_branch: Option<String>,
}

/// A README as fetched from the remote, with the version tag a conditional
/// write must present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    pub path: String,
    pub content: String,
    pub version_tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_owner_and_name() {
        let r = RepoRef::parse("octo/widgets", None).unwrap();
        assert_eq!(r.owner, "octo");
        assert_eq!(r.name, "widgets");
    }

    #[test]
    fn explicit_owner_in_text_beats_default() {
        let r = RepoRef::parse("octo/widgets", Some("someone-else")).unwrap();
        assert_eq!(r.owner, "octo");
    }

    #[test]
    fn bare_name_uses_default_owner() {
        let r = RepoRef::parse("widgets", Some("octo")).unwrap();
        assert_eq!(r.to_string(), "octo/widgets");
    }

    #[test]
    fn bare_name_without_owner_fails() {
        assert!(RepoRef::parse("widgets", None).is_err());
        assert!(RepoRef::parse("widgets", Some("  ")).is_err());
    }

    #[test]
    fn empty_segments_rejected() {
        assert!(RepoRef::parse("/widgets", None).is_err());
        assert!(RepoRef::parse("octo/", None).is_err());
        assert!(RepoRef::parse("a/b/c", None).is_err());
    }

    #[test]
    fn visibility_display() {
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!(Visibility::Private.to_string(), "private");
    }

    #[test]
    fn visibility_from_private_flag() {
        assert_eq!(Visibility::from_private(true), Visibility::Private);
        assert_eq!(Visibility::from_private(false), Visibility::Public);
    }
}
