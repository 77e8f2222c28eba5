//! Configuration for ralph-hooks.
//!
//! Looked up in `.ralph/config.toml` under the project root, then in
//! `~/.ralph/config.toml`. Missing files fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Environment variable the agent sets to the file it just wrote.
pub const FILE_PATH_ENV: &str = "CLAUDE_TOOL_FILE_PATH";

/// Hook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub prd: PrdConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

/// Document validator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrdConfig {
    /// Final path segment the validator applies to.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

/// What `install` wires up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Install `.git/hooks/post-commit`.
    #[serde(default = "default_true")]
    pub git_post_commit: bool,

    /// Register PostToolUse hooks in `.claude/settings.json`.
    #[serde(default = "default_true")]
    pub claude_settings: bool,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_file_name() -> String {
    "prd.json".to_string()
}

impl Default for PrdConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            git_post_commit: true,
            claude_settings: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prd: PrdConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl Config {
    /// Project config path.
    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(".ralph").join("config.toml")
    }

    /// Global config path (~/.ralph/config.toml).
    pub fn global_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ralph")
            .join("config.toml")
    }

    /// Load the project config, else the global one, else defaults.
    pub fn load(project_root: &Path) -> Result<Self, Error> {
        let project = Self::project_path(project_root);
        if project.exists() {
            return Self::load_from(&project);
        }
        let global = Self::global_path();
        if global.exists() {
            return Self::load_from(&global);
        }
        Ok(Self::default())
    }

    /// Parse a config file.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Resolve the validator input once: environment first, then argument.
///
/// An empty environment value counts as unset.
pub fn resolve_input_path(env_value: Option<String>, arg: Option<PathBuf>) -> Option<PathBuf> {
    env_value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or(arg)
        .filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.prd.file_name, "prd.json");
        assert!(config.hooks.git_post_commit);
        assert!(config.hooks.claude_settings);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[hooks]\ngit_post_commit = false\n").unwrap();
        assert!(!config.hooks.git_post_commit);
        assert!(config.hooks.claude_settings);
        assert_eq!(config.prd.file_name, "prd.json");
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        let path = Config::project_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "log_level = \"debug\"\n[prd]\nfile_name = \"plan.json\"\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.prd.file_name, "plan.json");
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = [").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_env_takes_precedence() {
        let resolved = resolve_input_path(
            Some("/env/prd.json".to_string()),
            Some(PathBuf::from("/arg/prd.json")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/env/prd.json")));
    }

    #[test]
    fn test_empty_env_falls_back_to_arg() {
        let resolved = resolve_input_path(Some(String::new()), Some(PathBuf::from("prd.json")));
        assert_eq!(resolved, Some(PathBuf::from("prd.json")));
    }

    #[test]
    fn test_no_input() {
        assert_eq!(resolve_input_path(None, None), None);
        assert_eq!(resolve_input_path(None, Some(PathBuf::new())), None);
    }
}
