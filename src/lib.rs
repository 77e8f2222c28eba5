//! ralph-hooks library.
//!
//! Commit-message and prd.json validation hooks for story-driven agent
//! workflows.

pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod prd;

pub use error::{Error, GitError};
