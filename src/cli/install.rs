//! `install` / `uninstall`: wire the hooks into a project.

use std::path::Path;

use tracing::info;

use crate::cli::{hooks, settings};
use crate::config::Config;
use crate::error::Error;

/// Install the git hook and agent settings entries enabled in `config`.
pub fn run(project_root: &Path, config: &Config) -> Result<(), Error> {
    if config.hooks.git_post_commit {
        if hooks::hook_installed(project_root) {
            println!("Git post-commit hook already installed.");
        } else if hooks::install_hook(project_root)? {
            println!("Git post-commit hook installed.");
        } else {
            info!(root = %project_root.display(), "No .git directory, skipping post-commit hook");
            println!("No git repository found, skipped post-commit hook.");
        }
    }

    if config.hooks.claude_settings {
        let path = settings::settings_path(project_root);
        if settings::merge_settings(&path)? {
            info!(path = %path.display(), "Registered PostToolUse hooks");
            println!("Registered hooks in {}.", path.display());
        } else {
            println!("Hooks already registered in {}.", path.display());
        }
    }

    Ok(())
}

/// Remove everything `run` may have installed, regardless of config.
pub fn uninstall(project_root: &Path) -> Result<(), Error> {
    if hooks::uninstall_hook(project_root)? {
        println!("Git post-commit hook removed.");
    }

    let path = settings::settings_path(project_root);
    if settings::remove_from_settings(&path)? {
        println!("Removed hooks from {}.", path.display());
    }

    Ok(())
}
