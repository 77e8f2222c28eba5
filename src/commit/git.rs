//! Commit history access via the git CLI.

use std::path::Path;
use std::process::Command;

use crate::error::GitError;

/// Read the full message of the most recent commit in `repo`.
///
/// Surrounding whitespace is trimmed.
pub fn latest_commit_message(repo: &Path) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(["log", "-1", "--pretty=%B"])
        .current_dir(repo)
        .output()
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_failure(&stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Map git's stderr onto the failure modes callers care about.
fn classify_failure(stderr: &str) -> GitError {
    let lower = stderr.to_lowercase();
    if lower.contains("not a git repository") {
        GitError::NotARepository
    } else if lower.contains("does not have any commits") || lower.contains("bad default revision")
    {
        GitError::NoCommits
    } else {
        GitError::Operation(stderr.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_a_repository() {
        let err = classify_failure(
            "fatal: not a git repository (or any of the parent directories): .git\n",
        );
        assert!(matches!(err, GitError::NotARepository));
    }

    #[test]
    fn test_classify_no_commits() {
        let err = classify_failure(
            "fatal: your current branch 'main' does not have any commits yet\n",
        );
        assert!(matches!(err, GitError::NoCommits));

        let err = classify_failure("fatal: bad default revision 'HEAD'\n");
        assert!(matches!(err, GitError::NoCommits));
    }

    #[test]
    fn test_classify_other() {
        match classify_failure("fatal: something else broke\n") {
            GitError::Operation(msg) => assert_eq!(msg, "fatal: something else broke"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
