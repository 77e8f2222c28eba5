//! Fail-fast shape checks for a parsed prd document.
//!
//! Checks run in a fixed order and stop at the first violation. A field counts
//! as missing when it is absent, `null`, `false`, `0` or `""`, which is how
//! the agent tooling that writes these files treats them.

use serde_json::Value;

/// Required top-level fields, in check order.
const DOCUMENT_FIELDS: [&str; 3] = ["project", "branchName", "userStories"];

/// Required story text fields checked after `id`, in order.
const STORY_FIELDS: [&str; 3] = ["title", "description", "acceptanceCriteria"];

/// Where a violation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Document,
    /// 1-based position in `userStories`, plus the story id once known.
    Story { number: usize, id: Option<String> },
}

/// JSON type a field is required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Boolean,
    Number,
    String,
}

/// What is wrong with the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    NotArray,
    Empty,
    WrongType(Expected),
}

/// First violation found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub location: Location,
    pub kind: ViolationKind,
}

impl ValidationError {
    fn document(field: &'static str, kind: ViolationKind) -> Self {
        Self {
            field,
            location: Location::Document,
            kind,
        }
    }

    fn story(number: usize, id: Option<String>, field: &'static str, kind: ViolationKind) -> Self {
        Self {
            field,
            location: Location::Story { number, id },
            kind,
        }
    }

    /// Render the diagnostic line, naming the document by `file_name`.
    pub fn message(&self, file_name: &str) -> String {
        let subject = match &self.location {
            Location::Document => file_name.to_string(),
            Location::Story { number, id: None } => format!("Story {}", number),
            Location::Story {
                number,
                id: Some(id),
            } => format!("Story {} ({})", number, id),
        };

        let problem = match self.kind {
            ViolationKind::Missing => format!("missing required field: {}", self.field),
            ViolationKind::NotArray => format!("{} must be an array", self.field),
            ViolationKind::Empty => "must have at least one acceptance criterion".to_string(),
            ViolationKind::WrongType(Expected::Boolean) => {
                format!("{} must be a boolean (true/false)", self.field)
            }
            ViolationKind::WrongType(Expected::Number) => format!("{} must be a number", self.field),
            ViolationKind::WrongType(Expected::String) => format!("{} must be a string", self.field),
        };

        format!("ERROR: {} {}", subject, problem)
    }
}

/// Counts from a document that passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub stories: usize,
    pub passing: usize,
}

/// Validate a parsed document.
pub fn validate_document(doc: &Value) -> Result<Summary, ValidationError> {
    for field in DOCUMENT_FIELDS {
        if !is_present(doc.get(field)) {
            return Err(ValidationError::document(field, ViolationKind::Missing));
        }
    }

    let stories = doc
        .get("userStories")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::document("userStories", ViolationKind::NotArray))?;

    let mut summary = Summary::default();
    for (idx, story) in stories.iter().enumerate() {
        validate_story(idx + 1, story)?;
        summary.stories += 1;
        if story.get("passes").and_then(Value::as_bool) == Some(true) {
            summary.passing += 1;
        }
    }

    Ok(summary)
}

/// Validate one story; `number` is its 1-based position.
fn validate_story(number: usize, story: &Value) -> Result<(), ValidationError> {
    let id = match story.get("id") {
        Some(value) if is_present(Some(value)) => display_id(value),
        _ => {
            return Err(ValidationError::story(
                number,
                None,
                "id",
                ViolationKind::Missing,
            ))
        }
    };
    let fail = |field: &'static str, kind: ViolationKind| {
        ValidationError::story(number, Some(id.clone()), field, kind)
    };

    for field in STORY_FIELDS {
        if !is_present(story.get(field)) {
            return Err(fail(field, ViolationKind::Missing));
        }
    }

    let criteria = story
        .get("acceptanceCriteria")
        .and_then(Value::as_array)
        .ok_or_else(|| fail("acceptanceCriteria", ViolationKind::NotArray))?;
    if criteria.is_empty() {
        return Err(fail("acceptanceCriteria", ViolationKind::Empty));
    }

    if !story.get("passes").is_some_and(Value::is_boolean) {
        return Err(fail("passes", ViolationKind::WrongType(Expected::Boolean)));
    }

    if !story.get("priority").is_some_and(Value::is_number) {
        return Err(fail("priority", ViolationKind::WrongType(Expected::Number)));
    }

    // Any `notes` key counts, including an explicit null.
    if let Some(notes) = story.get("notes") {
        if !notes.is_string() {
            return Err(fail("notes", ViolationKind::WrongType(Expected::String)));
        }
    }

    Ok(())
}

/// Truthiness of a JSON field.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Story id as shown in diagnostics: strings bare, anything else as JSON.
fn display_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
