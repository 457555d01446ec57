//! Output formatting for CLI display.

use std::fmt;

use progression::model::{RepoRef, StatusValue, UpdateOutcome, UpdateRequest, Visibility};
use progression::update::Preview;

/// How loudly an outcome should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Severity {
    Information,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Information => "info",
            Self::Warning => "warning",
            Self::Critical => "error",
        })
    }
}

/// An outcome ready to show to a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Rendered {
    pub title: &'static str,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Progression : {}\n{}",
            self.severity, self.title, self.message
        )
    }
}

/// Render an update outcome for display.
pub(super) fn render_outcome(outcome: &UpdateOutcome, repo: &RepoRef) -> Rendered {
    match outcome {
        UpdateOutcome::Success { label } => Rendered {
            title: "Information",
            message: format!("✅ Progression updated to '{label}' in '{repo}'"),
            severity: Severity::Information,
        },
        UpdateOutcome::VisibilityMismatch { expected, actual } => Rendered {
            title: "Visibility Mismatch",
            message: format!(
                "❌ The repository '{repo}' is {actual}, but you selected '{}'.",
                capitalize(*expected)
            ),
            severity: Severity::Critical,
        },
        UpdateOutcome::NotFound => Rendered {
            title: "Repository Error",
            message: format!("❌ Repository '{repo}' or its README not found, or no access (404)"),
            severity: Severity::Warning,
        },
        UpdateOutcome::Forbidden => Rendered {
            title: "Access Denied",
            message: "⚠️ Access forbidden (403). Check your token.".to_string(),
            severity: Severity::Critical,
        },
        UpdateOutcome::ApiError { detail } => Rendered {
            title: "GitHub API Error",
            message: format!("📛 GitHub API error:\n\n{detail}"),
            severity: Severity::Critical,
        },
        UpdateOutcome::UnexpectedError { detail } => Rendered {
            title: "Internal Error",
            message: format!("🛑 An internal error occurred:\n\n{detail}"),
            severity: Severity::Critical,
        },
    }
}

/// Process exit code for an outcome.
pub(super) fn exit_code(outcome: &UpdateOutcome) -> u8 {
    match outcome {
        UpdateOutcome::Success { .. } => 0,
        UpdateOutcome::VisibilityMismatch { .. } => 2,
        UpdateOutcome::NotFound => 3,
        UpdateOutcome::Forbidden => 4,
        UpdateOutcome::ApiError { .. } => 5,
        UpdateOutcome::UnexpectedError { .. } => 6,
    }
}

/// An outcome as pretty-printed JSON, tagged by `outcome`.
pub(super) fn outcome_json(outcome: &UpdateOutcome) -> Result<String, String> {
    serde_json::to_string_pretty(outcome).map_err(|e| format!("failed to serialize outcome: {e}"))
}

/// The pre-flight summary shown before an update runs.
pub(super) fn format_summary(request: &UpdateRequest) -> String {
    let status = request.status();
    let visibility = match request.expected_visibility() {
        Visibility::Public => "🌐 Public",
        Visibility::Private => "🔒 Private",
    };
    format!(
        "↪ User: {}\n↪ Status: {} ({})\n↪ Repository: {}\n↪ Visibility: {visibility}",
        request.repo().owner,
        status.label(),
        status.description(),
        request.repo().name,
    )
}

/// One line per status value: key and label.
pub(super) fn format_statuses() -> String {
    StatusValue::ALL
        .iter()
        .map(|s| format!("{:<14}{}", s.key(), s.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What a dry run would do to the README.
pub(super) fn describe_preview(preview: &Preview) -> String {
    if preview.appended {
        format!("{}: no status line found, one would be appended", preview.path)
    } else if preview.rewritten == 0 {
        format!("{}: status line already up to date", preview.path)
    } else {
        let noun = if preview.rewritten == 1 { "line" } else { "lines" };
        format!(
            "{}: {} status {noun} would be rewritten",
            preview.path, preview.rewritten
        )
    }
}

fn capitalize(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "Public",
        Visibility::Private => "Private",
    }
}
