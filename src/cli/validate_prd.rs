//! `validate-prd`: shape check for the project requirements document.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::prd::{self, Verdict};

/// Validate the document at `path` and return the process exit code.
pub fn run(path: Option<&Path>, config: &Config) -> i32 {
    let file_name = config.prd.file_name.as_str();
    let verdict = prd::validate_file(path, file_name);

    match &verdict {
        Verdict::NotApplicable => {}
        Verdict::Valid(summary) => {
            info!(
                stories = summary.stories,
                passing = summary.passing,
                "Document valid"
            );
            println!("✓ {} validation passed", file_name);
        }
        Verdict::Invalid(e) => eprintln!("{}", e.message(file_name)),
        Verdict::Unreadable(e) => eprintln!("{}", unreadable_message(e)),
    }

    verdict.exit_code()
}

/// Diagnostic for a document that could not be read or parsed.
fn unreadable_message(err: &Error) -> String {
    match err {
        Error::FileNotFound(path) => format!("ERROR: File not found: {}", path.display()),
        Error::InvalidJson { file_name, source } => {
            format!("ERROR: Invalid JSON format in {}\n   {}", file_name, source)
        }
        other => format!("ERROR: Validation failed: {}", other),
    }
}
