//! CLI commands for ralph-hooks.

pub mod commit_check;
pub mod hooks;
pub mod install;
pub mod settings;
pub mod validate_prd;
