//! prd.json document validation.
//!
//! [`validate_file`] does the I/O and returns a [`Verdict`]; the shape checks
//! themselves live in [`validate`] and work on an already-parsed value.

pub mod validate;

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::Error;

pub use validate::{validate_document, Expected, Location, Summary, ValidationError, ViolationKind};

/// Outcome of one validator run.
#[derive(Debug)]
pub enum Verdict {
    Valid(Summary),
    /// No path given, or the path names some other file.
    NotApplicable,
    Invalid(ValidationError),
    /// The file could not be read or parsed.
    Unreadable(Error),
}

impl Verdict {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Valid(_) | Verdict::NotApplicable => 0,
            Verdict::Invalid(_) | Verdict::Unreadable(_) => 1,
        }
    }
}

/// Whether `path` names the document this validator applies to.
pub fn is_target(path: &Path, file_name: &str) -> bool {
    path.file_name().is_some_and(|name| name == file_name)
}

/// Read, parse and validate the document at `path`.
pub fn validate_file(path: Option<&Path>, file_name: &str) -> Verdict {
    let Some(path) = path.filter(|p| is_target(p, file_name)) else {
        debug!(?path, "Not a {} path, skipping", file_name);
        return Verdict::NotApplicable;
    };

    let doc = match read_document(path, file_name) {
        Ok(doc) => doc,
        Err(e) => return Verdict::Unreadable(e),
    };

    match validate_document(&doc) {
        Ok(summary) => Verdict::Valid(summary),
        Err(e) => Verdict::Invalid(e),
    }
}

/// Read a document from disk and parse it as JSON.
pub fn read_document(path: &Path, file_name: &str) -> Result<Value, Error> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    serde_json::from_str(&content).map_err(|source| Error::InvalidJson {
        file_name: file_name.to_string(),
        source,
    })
}
