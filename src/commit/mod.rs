//! Commit message format check.

pub mod format;
pub mod git;

pub use format::{check_message, mismatch_warning, FormatCheck, EXPECTED_FORMAT};
pub use git::latest_commit_message;
