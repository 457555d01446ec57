//! Status-line codec: find a README's `progress:` line and rewrite its value.
//!
//! A status line is any line shaped like
//!
//! ```text
//! <markup>progress <ws> : <ws> <value> <markup>
//! ```
//!
//! where `<markup>` is any run of ` `, `>`, `<`, `-`, `*` or backticks, and the
//! word `progress` matches in any case. Every such line in the document is
//! rewritten: the markup and the `progress:` label are kept verbatim and only
//! the value changes. A document without one gets a fresh line appended.
//!
//! Known limitation: the trailing markup class is matched greedily from the
//! end of the line, so a value that itself ends in markup characters (e.g.
//! `Done -`) is read back as value `Done` plus suffix ` -`.
//!
//! Pure text in, text out. No I/O.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Prefix written when a document has no status line yet.
pub const APPENDED_PREFIX: &str = "\n\nProgress : ";

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?imR)^([ ><\-*`]*progress[ \t]*:[ \t]*)(.*?)([ ><\-*`]*)$(\r?\n)?")
        .expect("status line pattern is valid")
});

/// What a rewrite did to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLineEdit {
    /// The resulting document text.
    pub content: String,

    /// Status lines whose value was replaced.
    pub rewritten: usize,

    /// Status lines that already carried the label and were left alone.
    pub unchanged: usize,

    /// Whether a new status line was appended because none existed.
    pub appended: bool,
}

impl StatusLineEdit {
    /// Whether the document text differs from the input.
    pub fn changed(&self) -> bool {
        self.rewritten > 0 || self.appended
    }
}

/// Replace the value of every status line in `document` with `label`,
/// or append `Progress : <label>` when there is none.
pub fn locate_and_replace(document: &str, label: &str) -> String {
    rewrite(document, label).content
}

/// Like [`locate_and_replace`], but also reports what changed.
pub fn rewrite(document: &str, label: &str) -> StatusLineEdit {
    let mut content = String::with_capacity(document.len() + label.len() + 16);
    let mut last = 0;
    let mut rewritten = 0;
    let mut unchanged = 0;

    for caps in STATUS_LINE.captures_iter(document) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        content.push_str(&document[last..whole.start()]);
        last = whole.end();

        if carries_label(&caps, label) {
            content.push_str(whole.as_str());
            unchanged += 1;
        } else {
            push_rewritten(&mut content, &caps, label);
            rewritten += 1;
        }
    }

    if rewritten == 0 && unchanged == 0 {
        return StatusLineEdit {
            content: format!("{document}{APPENDED_PREFIX}{label}"),
            rewritten,
            unchanged,
            appended: true,
        };
    }

    content.push_str(&document[last..]);
    StatusLineEdit {
        content,
        rewritten,
        unchanged,
        appended: false,
    }
}

/// A line already shows `label` if its value is the label, or if the label
/// ends in markup that the pattern peeled off into the suffix.
fn carries_label(caps: &Captures<'_>, label: &str) -> bool {
    let value = group(caps, 2);
    let suffix = group(caps, 3);
    value == label || (!suffix.is_empty() && label.strip_prefix(value) == Some(suffix))
}

fn push_rewritten(out: &mut String, caps: &Captures<'_>, label: &str) {
    out.push_str(group(caps, 1));
    out.push_str(label);
    out.push_str(group(caps, 3));
    match caps.get(4) {
        Some(terminator) => out.push_str(terminator.as_str()),
        None => out.push('\n'),
    }
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW: &str = "🟢 New";

    #[test]
    fn keeps_markup_and_replaces_value() {
        assert_eq!(
            locate_and_replace("> Progress: 🔴 Old <", NEW),
            "> Progress: 🟢 New <\n"
        );
    }

    #[test]
    fn matches_any_case() {
        assert_eq!(locate_and_replace("PROGRESS: X\n", "y"), "PROGRESS: y\n");
        assert_eq!(locate_and_replace("progress: x\n", "y"), "progress: y\n");
    }

    #[test]
    fn whitespace_around_colon_is_kept() {
        assert_eq!(
            locate_and_replace("Progress :   old\n", "new"),
            "Progress :   new\n"
        );
    }

    #[test]
    fn markup_prefixes() {
        let doc = "- Progress: a\n* progress: b\n`Progress: c`\n>> Progress:d\n";
        assert_eq!(
            locate_and_replace(doc, "z"),
            "- Progress: z\n* progress: z\n`Progress: z`\n>> Progress:z\n"
        );
    }

    #[test]
    fn finds_line_in_the_middle_of_a_document() {
        let doc = "# Widgets\n\nA thing.\n\nProgress: 🔴 Old\n\n## Usage\n\nRun it.\n";
        let out = locate_and_replace(doc, NEW);
        assert_eq!(
            out,
            "# Widgets\n\nA thing.\n\nProgress: 🟢 New\n\n## Usage\n\nRun it.\n"
        );
    }

    #[test]
    fn other_lines_are_untouched() {
        let doc = "line one\nProgress: old\nline three  \n\ttabbed\n";
        let out = locate_and_replace(doc, "new");
        let before: Vec<&str> = doc.lines().collect();
        let after: Vec<&str> = out.lines().collect();
        assert_eq!(before.len(), after.len());
        for (i, (b, a)) in before.iter().zip(&after).enumerate() {
            if i == 1 {
                assert_eq!(*a, "Progress: new");
            } else {
                assert_eq!(b, a);
            }
        }
    }

    #[test]
    fn rewrites_every_status_line() {
        let doc = "> Progress: 🔴 Old\n\nsome text\n\n- progress : 🟠 Older -\n";
        let edit = rewrite(doc, NEW);
        assert_eq!(
            edit.content,
            "> Progress: 🟢 New\n\nsome text\n\n- progress : 🟢 New -\n"
        );
        assert_eq!(edit.rewritten, 2);
        assert!(!edit.appended);
    }

    #[test]
    fn appends_when_missing() {
        let doc = "# Widgets\n\nNo status here.\n";
        let edit = rewrite(doc, NEW);
        assert_eq!(edit.content, format!("{doc}\n\nProgress : {NEW}"));
        assert!(edit.appended);
        assert!(edit.changed());
    }

    #[test]
    fn appends_to_empty_document() {
        assert_eq!(locate_and_replace("", "x"), "\n\nProgress : x");
    }

    #[test]
    fn progress_must_start_the_line() {
        let doc = "Work in progress: lots\n";
        assert_eq!(
            locate_and_replace(doc, "x"),
            format!("{doc}\n\nProgress : x")
        );
    }

    #[test]
    fn idempotent_on_existing_line() {
        for doc in [
            "> Progress: 🔴 Old <",
            "Progress: old\nrest\n",
            "a\n- progress: b -\nc\n> Progress: d\n",
            "Progress:\n",
        ] {
            let once = locate_and_replace(doc, NEW);
            let twice = locate_and_replace(&once, NEW);
            assert_eq!(once, twice, "not idempotent for {doc:?}");
        }
    }

    #[test]
    fn idempotent_after_append() {
        let once = locate_and_replace("# Title", NEW);
        let twice = locate_and_replace(&once, NEW);
        assert_eq!(once, twice);
    }

    #[test]
    fn line_with_label_is_left_alone() {
        let edit = rewrite("Progress: 🟢 New", NEW);
        assert_eq!(edit.content, "Progress: 🟢 New");
        assert_eq!(edit.unchanged, 1);
        assert!(!edit.changed());
    }

    #[test]
    fn label_ending_in_markup_is_stable_without_original_suffix() {
        let once = locate_and_replace("Progress: old\n", "Done -");
        assert_eq!(once, "Progress: Done -\n");
        assert_eq!(locate_and_replace(&once, "Done -"), once);
    }

    #[test]
    fn keeps_crlf_line_endings() {
        let doc = "Title\r\nProgress: old\r\nmore\r\n";
        assert_eq!(
            locate_and_replace(doc, "new"),
            "Title\r\nProgress: new\r\nmore\r\n"
        );
    }

    #[test]
    fn colon_whitespace_does_not_span_lines() {
        let doc = "Progress:\nnext line\n";
        assert_eq!(locate_and_replace(doc, "x"), "Progress:x\nnext line\n");
    }

    #[test]
    fn deterministic() {
        let doc = "Progress: a\n";
        assert_eq!(locate_and_replace(doc, "b"), locate_and_replace(doc, "b"));
    }
}
