//! GitHub gateway built on `gh api`.
//!
//! Every call shells out to the `gh` CLI with the request's token in
//! `GH_TOKEN`, so nothing is read from or written to gh's own auth store.
//! Failures are classified by the HTTP status gh reports on stderr.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::model::{ReadmeDocument, RepoHandle, RepoRef, Token, Visibility};

use super::{FileWrite, GatewayError, RepositoryGateway};

static HTTP_STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HTTP (\d{3})").expect("HTTP status pattern is valid"));

/// Gateway that drives the `gh` CLI.
#[derive(Debug, Clone)]
pub struct GhGateway {
    program: PathBuf,
}

impl Default for GhGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl GhGateway {
    /// Uses `gh` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("gh"),
        }
    }

    /// Uses a specific `gh` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `gh api <args>` and return stdout on success.
    fn api(&self, token: &Token, args: &[&str], body: Option<&str>) -> Result<String, GatewayError> {
        tracing::debug!(args = ?args, "gh api");

        let mut command = Command::new(&self.program);
        command
            .arg("api")
            .args(args)
            .env("GH_TOKEN", token.expose())
            .env("GH_PROMPT_DISABLED", "1")
            .stdin(if body.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| GatewayError::Unexpected(format!("failed to run gh: {e}")))?;

        // Stdin is dropped (closed) at the end of this block.
        let written = match (body, child.stdin.take()) {
            (Some(body), Some(mut stdin)) => stdin.write_all(body.as_bytes()),
            _ => Ok(()),
        };

        // Always reap the child, even when feeding it failed.
        let output = child
            .wait_with_output()
            .map_err(|e| GatewayError::Unexpected(format!("failed to wait for gh: {e}")))?;

        written.map_err(|e| GatewayError::Unexpected(format!("failed to write to gh: {e}")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = classify(&stderr);
            tracing::debug!(error = %err, "gh api failed");
            Err(err)
        }
    }

    fn fetch_repo(&self, repo: &RepoRef, token: &Token) -> Result<GhRepo, GatewayError> {
        let endpoint = format!("repos/{}/{}", repo.owner, repo.name);
        let json = self.api(token, &[endpoint.as_str()], None)?;
        parse_json(&json)
    }
}

impl RepositoryGateway for GhGateway {
    fn check_access(&self, repo: &RepoRef, token: &Token) -> Result<RepoHandle, GatewayError> {
        let found = self.fetch_repo(repo, token)?;
        Ok(RepoHandle {
            repo: repo.clone(),
            default_branch: found.default_branch,
        })
    }

    fn visibility(&self, handle: &RepoHandle, token: &Token) -> Result<Visibility, GatewayError> {
        let found = self.fetch_repo(&handle.repo, token)?;
        Ok(Visibility::from_private(found.private))
    }

    fn readme(&self, handle: &RepoHandle, token: &Token) -> Result<ReadmeDocument, GatewayError> {
        let endpoint = format!("repos/{}/{}/readme", handle.repo.owner, handle.repo.name);
        let json = self.api(token, &[endpoint.as_str()], None)?;
        let file: GhContent = parse_json(&json)?;
        Ok(ReadmeDocument {
            content: decode_content(&file.content)?,
            path: file.path,
            version_tag: file.sha,
        })
    }

    fn write_file(
        &self,
        handle: &RepoHandle,
        token: &Token,
        write: &FileWrite,
    ) -> Result<(), GatewayError> {
        let endpoint = format!(
            "repos/{}/{}/contents/{}",
            handle.repo.owner, handle.repo.name, write.path
        );
        let body = write_body(write, handle.default_branch.as_deref());
        self.api(
            token,
            &["--method", "PUT", endpoint.as_str(), "--input", "-"],
            Some(&body),
        )?;
        Ok(())
    }
}

// ── gh JSON shapes ──

/// JSON shape returned by `gh api repos/{owner}/{repo}`.
#[derive(Debug, Deserialize)]
struct GhRepo {
    private: bool,
    #[serde(default)]
    default_branch: Option<String>,
}

/// JSON shape returned by the contents and readme endpoints.
#[derive(Debug, Deserialize)]
struct GhContent {
    path: String,
    sha: String,
    content: String,
}

// ── Helpers ──

fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, GatewayError> {
    serde_json::from_str(json)
        .map_err(|e| GatewayError::Unexpected(format!("unreadable response from GitHub: {e}")))
}

/// Map gh's stderr to a gateway error.
///
/// gh reports API failures as e.g. `gh: Not Found (HTTP 404)`.
fn classify(stderr: &str) -> GatewayError {
    let detail = stderr.trim().trim_start_matches("gh:").trim().to_string();
    let status = HTTP_STATUS
        .captures(stderr)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u16>().ok());

    match status {
        Some(404) => GatewayError::NotFound(detail),
        Some(401 | 403) => GatewayError::Forbidden(detail),
        Some(status) => GatewayError::Api {
            status: Some(status),
            detail,
        },
        None if detail.is_empty() => GatewayError::Unexpected("gh failed without output".into()),
        None => GatewayError::Api {
            status: None,
            detail,
        },
    }
}

/// Decode GitHub's base64 file content. GitHub wraps it at 60 columns.
fn decode_content(encoded: &str) -> Result<String, GatewayError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| GatewayError::Unexpected(format!("README is not valid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| GatewayError::Unexpected(format!("README is not valid UTF-8: {e}")))
}

/// Request body for `PUT /repos/{owner}/{repo}/contents/{path}`.
fn write_body(write: &FileWrite, branch: Option<&str>) -> String {
    let mut body = serde_json::json!({
        "message": write.message,
        "content": STANDARD.encode(write.content.as_bytes()),
        "sha": write.version_tag,
    });
    if let Some(branch) = branch {
        body["branch"] = serde_json::Value::from(branch);
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_not_found() {
        let err = classify("gh: Not Found (HTTP 404)\n");
        assert!(matches!(err, GatewayError::NotFound(ref d) if d == "Not Found (HTTP 404)"));
    }

    #[test]
    fn classify_forbidden_and_unauthorized() {
        assert!(matches!(
            classify("gh: Resource not accessible (HTTP 403)"),
            GatewayError::Forbidden(_)
        ));
        assert!(matches!(
            classify("gh: Bad credentials (HTTP 401)"),
            GatewayError::Forbidden(_)
        ));
    }

    #[test]
    fn classify_conflict_is_api_error() {
        let err = classify("gh: README.md does not match abc123 (HTTP 409)");
        assert!(matches!(
            err,
            GatewayError::Api {
                status: Some(409),
                ..
            }
        ));
    }

    #[test]
    fn classify_without_status() {
        assert!(matches!(
            classify("error connecting to api.github.com"),
            GatewayError::Api { status: None, .. }
        ));
        assert!(matches!(classify("  \n"), GatewayError::Unexpected(_)));
    }

    #[test]
    fn decode_wrapped_content() {
        // "# Hello\nProgress: x\n" split across lines as GitHub returns it.
        let encoded = "IyBIZWxsbwpQcm9n\ncmVzczogeAo=\n";
        assert_eq!(decode_content(encoded).unwrap(), "# Hello\nProgress: x\n");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_content("!!!not base64!!!"),
            Err(GatewayError::Unexpected(_))
        ));
    }

    #[test]
    fn decode_rejects_non_utf8() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert!(matches!(
            decode_content(&encoded),
            Err(GatewayError::Unexpected(ref d)) if d.contains("UTF-8")
        ));
    }

    #[test]
    fn write_body_carries_sha_and_encoded_content() {
        let write = FileWrite {
            path: "README.md".into(),
            content: "Progress: 🟢 Ended\n".into(),
            version_tag: "abc123".into(),
            message: "📝 Progression updated: 🟢 Ended".into(),
        };
        let body: serde_json::Value =
            serde_json::from_str(&write_body(&write, Some("main"))).unwrap();

        assert_eq!(body["sha"], "abc123");
        assert_eq!(body["branch"], "main");
        assert_eq!(body["message"], "📝 Progression updated: 🟢 Ended");
        let content = body["content"].as_str().unwrap();
        assert_eq!(decode_content(content).unwrap(), write.content);
    }

    #[test]
    fn write_body_without_branch() {
        let write = FileWrite {
            path: "README.md".into(),
            content: String::new(),
            version_tag: "abc".into(),
            message: "m".into(),
        };
        let body: serde_json::Value = serde_json::from_str(&write_body(&write, None)).unwrap();
        assert!(body.get("branch").is_none());
    }

    #[test]
    fn parse_repo_visibility() {
        let repo: GhRepo =
            parse_json(r#"{"full_name":"octo/widgets","private":true,"default_branch":"main"}"#)
                .unwrap();
        assert!(repo.private);
        assert_eq!(repo.default_branch.as_deref(), Some("main"));
    }

    #[test]
    fn parse_bad_json_is_unexpected() {
        assert!(matches!(
            parse_json::<GhRepo>("not json"),
            Err(GatewayError::Unexpected(_))
        ));
    }

    #[test]
    fn missing_program_is_unexpected() {
        let gateway = GhGateway::with_program("/nonexistent/definitely-not-gh");
        let repo = RepoRef::parse("octo/widgets", None).unwrap();
        let err = gateway.check_access(&repo, &Token::new("t")).unwrap_err();
        assert!(matches!(err, GatewayError::Unexpected(ref d) if d.contains("failed to run gh")));
    }

    #[cfg(unix)]
    #[test]
    fn write_to_exited_gh_is_reported_after_reaping() {
        // `true` exits without reading stdin, so a body larger than the pipe
        // buffer cannot be delivered.
        let gateway = GhGateway::with_program("true");
        let handle = RepoHandle {
            repo: RepoRef::parse("octo/widgets", None).unwrap(),
            default_branch: None,
        };
        let write = FileWrite {
            path: "README.md".into(),
            content: "x".repeat(1 << 20),
            version_tag: "abc".into(),
            message: "m".into(),
        };

        let err = gateway
            .write_file(&handle, &Token::new("t"), &write)
            .unwrap_err();

        assert!(
            matches!(err, GatewayError::Unexpected(ref d) if d.contains("failed to write to gh"))
        );
    }
}
