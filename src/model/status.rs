//! Status values: the fixed set of progress markers a README can carry.

use std::fmt;

/// A progress marker written into a README's status line.
///
/// The label for each value is fixed; see [`StatusValue::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusValue {
    UnderDev,
    ReadySoon,
    Finished,
    UnderUpdate,
}

impl StatusValue {
    /// Every status value, in display order.
    pub const ALL: [Self; 4] = [
        Self::UnderDev,
        Self::ReadySoon,
        Self::Finished,
        Self::UnderUpdate,
    ];

    /// The key used on the command line and in config (e.g. `under_dev`).
    pub fn key(self) -> &'static str {
        match self {
            Self::UnderDev => "under_dev",
            Self::ReadySoon => "ready_soon",
            Self::Finished => "finished",
            Self::UnderUpdate => "under_update",
        }
    }

    /// The text written into the README.
    pub fn label(self) -> &'static str {
        match self {
            Self::UnderDev => "🔴 Under Development",
            Self::ReadySoon => "🟠 Soon Ready",
            Self::Finished => "🟢 Ended",
            Self::UnderUpdate => "🔘 Updating",
        }
    }

    /// Short human description, used in summaries.
    pub fn description(self) -> &'static str {
        match self {
            Self::UnderDev => "in development",
            Self::ReadySoon => "almost ready",
            Self::Finished => "completed",
            Self::UnderUpdate => "updating",
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = StatusValue::ALL.iter().map(|v| v.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), StatusValue::ALL.len());
    }

    #[test]
    fn display_is_label() {
        assert_eq!(StatusValue::UnderDev.to_string(), "🔴 Under Development");
    }
}
