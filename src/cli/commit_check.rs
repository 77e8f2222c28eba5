//! `commit-check`: advisory check of the latest commit message.

use std::path::Path;

use tracing::debug;

use crate::commit::{self, FormatCheck};
use crate::error::Error;

/// Run the commit check in `repo`. Never fails the caller.
pub fn run(repo: &Path) -> Result<(), Error> {
    let message = match commit::latest_commit_message(repo) {
        Ok(message) => message,
        Err(e) => {
            // No repository or no commits yet: nothing to check.
            debug!(error = %e, "Skipping commit check");
            return Ok(());
        }
    };

    match commit::check_message(&message) {
        FormatCheck::Valid => println!("✓ Commit message format valid"),
        FormatCheck::Mismatch { first_line } => {
            debug!(first_line = %first_line, "Commit message mismatch");
            eprintln!("{}", commit::mismatch_warning(&first_line));
        }
    }

    Ok(())
}
