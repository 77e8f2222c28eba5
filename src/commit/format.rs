//! Story commit message format.

use std::sync::LazyLock;

use regex::Regex;

/// Human-readable form of the required format.
pub const EXPECTED_FORMAT: &str = "feat: [US-XXX] - Title";

/// `feat: [US-<digits>] - <title>`, matched against one line.
static STORY_COMMIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^feat: \[US-[0-9]+\] - .+$").unwrap());

/// Result of checking a commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCheck {
    Valid,
    Mismatch { first_line: String },
}

impl FormatCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, FormatCheck::Valid)
    }
}

/// Check the first line of `message` against the story commit format.
pub fn check_message(message: &str) -> FormatCheck {
    let first_line = message.lines().next().unwrap_or("");
    if STORY_COMMIT_RE.is_match(first_line) {
        FormatCheck::Valid
    } else {
        FormatCheck::Mismatch {
            first_line: first_line.to_string(),
        }
    }
}

/// Multi-line advisory shown for a mismatching message.
pub fn mismatch_warning(first_line: &str) -> String {
    format!(
        "⚠️  Commit message does not follow Ralph format\n   Expected: \"{}\"\n   Got: {}\n   (This is just a warning, not blocking)",
        EXPECTED_FORMAT, first_line
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_messages() {
        assert!(check_message("feat: [US-1] - Add login").is_valid());
        assert!(check_message("feat: [US-042] - Persist session tokens").is_valid());
        assert!(check_message("feat: [US-7] - x").is_valid());
    }

    #[test]
    fn test_body_after_first_line_is_ignored() {
        let msg = "feat: [US-12] - Add search\n\nIndexes titles and descriptions.";
        assert!(check_message(msg).is_valid());
    }

    #[test]
    fn test_invalid_messages() {
        for msg in [
            "fix: [US-1] - Wrong type",
            "feat: [US-] - Missing number",
            "feat: [US-1a] - Letters",
            "feat: [US-1] -",
            "feat: [US-1] - ",
            "feat:[US-1] - No space",
            "Feat: [US-1] - Capitalised",
            " feat: [US-1] - Leading space",
            "feat: [US-١] - Non-ASCII digit",
            "",
        ] {
            assert!(!check_message(msg).is_valid(), "accepted {:?}", msg);
        }
    }

    #[test]
    fn test_mismatch_reports_first_line() {
        let check = check_message("wip\nfeat: [US-1] - Later line");
        assert_eq!(
            check,
            FormatCheck::Mismatch {
                first_line: "wip".to_string()
            }
        );
    }

    #[test]
    fn test_mismatch_warning_text() {
        let warning = mismatch_warning("wip");
        let lines: Vec<&str> = warning.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains(EXPECTED_FORMAT));
        assert_eq!(lines[2], "   Got: wip");
        assert!(lines[3].contains("not blocking"));
    }
}
