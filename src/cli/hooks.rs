//! Git post-commit hook installation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;

/// Comment line marking our section inside a hook script.
const SECTION_HEADER: &str = "# ralph-hooks commit format check (auto-installed, advisory)";

/// Command line our section runs.
const SECTION_COMMAND: &str = "ralph-hooks commit-check || true";

/// Post-commit hook script content.
const POST_COMMIT_HOOK: &str = r#"#!/bin/sh
# ralph-hooks commit format check (auto-installed, advisory)
ralph-hooks commit-check || true
"#;

/// Whether `line` is one we wrote.
fn is_section_line(line: &str) -> bool {
    let line = line.trim();
    line == SECTION_HEADER || line == SECTION_COMMAND
}

fn has_section(content: &str) -> bool {
    content.lines().any(|line| line.trim() == SECTION_HEADER)
}

/// Check if git is initialized in the project.
pub fn has_git(project_root: &Path) -> bool {
    project_root.join(".git").exists()
}

fn post_commit_path(project_root: &Path) -> PathBuf {
    project_root.join(".git").join("hooks").join("post-commit")
}

/// Check if our post-commit hook is installed.
pub fn hook_installed(project_root: &Path) -> bool {
    fs::read_to_string(post_commit_path(project_root))
        .map(|content| has_section(&content))
        .unwrap_or(false)
}

/// Install the post-commit hook. Returns false when there is no git repo.
pub fn install_hook(project_root: &Path) -> Result<bool, Error> {
    if !has_git(project_root) {
        return Ok(false);
    }

    let path = post_commit_path(project_root);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let content = if path.exists() {
        let existing = fs::read_to_string(&path)?;
        if has_section(&existing) {
            return Ok(true);
        }
        // Keep the foreign hook; our section goes after it without a second shebang.
        let section = POST_COMMIT_HOOK.trim_start_matches("#!/bin/sh\n");
        format!("{}\n\n{}", existing.trim_end(), section)
    } else {
        POST_COMMIT_HOOK.to_string()
    };

    fs::write(&path, content)?;
    make_executable(&path)?;
    info!(path = %path.display(), "Installed post-commit hook");

    Ok(true)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}

/// Remove our lines from the post-commit hook. Returns true if anything changed.
pub fn uninstall_hook(project_root: &Path) -> Result<bool, Error> {
    let path = post_commit_path(project_root);
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(&path)?;
    if !has_section(&content) {
        return Ok(false);
    }

    let cleaned = remove_section(&content);
    if cleaned.trim().is_empty() || cleaned.trim() == "#!/bin/sh" {
        fs::remove_file(&path)?;
    } else {
        fs::write(&path, format!("{}\n", cleaned.trim_end()))?;
    }
    info!(path = %path.display(), "Removed post-commit hook");

    Ok(true)
}

fn remove_section(content: &str) -> String {
    content
        .lines()
        .filter(|line| !is_section_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        temp
    }

    #[test]
    fn test_no_git_is_skipped() {
        let temp = TempDir::new().unwrap();
        assert!(!install_hook(temp.path()).unwrap());
        assert!(!post_commit_path(temp.path()).exists());
    }

    #[test]
    fn test_install_fresh_hook() {
        let temp = git_project();
        assert!(install_hook(temp.path()).unwrap());

        let content = fs::read_to_string(post_commit_path(temp.path())).unwrap();
        assert!(content.starts_with("#!/bin/sh"));
        assert!(content.contains("ralph-hooks commit-check || true"));
        assert!(hook_installed(temp.path()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(post_commit_path(temp.path()))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_install_twice_is_idempotent() {
        let temp = git_project();
        install_hook(temp.path()).unwrap();
        install_hook(temp.path()).unwrap();

        let content = fs::read_to_string(post_commit_path(temp.path())).unwrap();
        assert_eq!(content.matches("commit-check").count(), 1);
    }

    #[test]
    fn test_install_preserves_existing_hook() {
        let temp = git_project();
        let path = post_commit_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "#!/bin/sh\necho committed\n").unwrap();

        install_hook(temp.path()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("echo committed"));
        assert!(content.contains("ralph-hooks commit-check"));
        assert_eq!(content.matches("#!/bin/sh").count(), 1);
    }

    #[test]
    fn test_uninstall_restores_foreign_hook() {
        let temp = git_project();
        let path = post_commit_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "#!/bin/sh\necho committed\n").unwrap();

        install_hook(temp.path()).unwrap();
        assert!(uninstall_hook(temp.path()).unwrap());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "#!/bin/sh\necho committed\n");
    }

    #[test]
    fn test_uninstall_keeps_foreign_lines_mentioning_tool() {
        let temp = git_project();
        let path = post_commit_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let foreign = "#!/bin/sh\necho \"see ralph-hooks for commit rules\"\n";
        fs::write(&path, foreign).unwrap();

        assert!(!hook_installed(temp.path()));
        install_hook(temp.path()).unwrap();
        assert!(uninstall_hook(temp.path()).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), foreign);
    }

    #[test]
    fn test_uninstall_removes_own_hook() {
        let temp = git_project();
        install_hook(temp.path()).unwrap();

        assert!(uninstall_hook(temp.path()).unwrap());
        assert!(!post_commit_path(temp.path()).exists());
        assert!(!uninstall_hook(temp.path()).unwrap());
    }
}
