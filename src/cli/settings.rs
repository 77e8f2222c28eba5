//! Agent settings merge.
//!
//! Registers the hooks as `PostToolUse` commands in `.claude/settings.json`:
//!
//! ```json
//! { "hooks": { "PostToolUse": [
//!     { "matcher": "Bash", "hooks": [{ "type": "command", "command": "ralph-hooks commit-check" }] }
//! ] } }
//! ```

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::Error;

/// (matcher, command) pairs we register.
const ENTRIES: [(&str, &str); 2] = [
    ("Bash", "ralph-hooks commit-check"),
    ("Write|Edit", "ralph-hooks validate-prd"),
];

/// Settings file path for a project.
pub fn settings_path(project_root: &Path) -> PathBuf {
    project_root.join(".claude").join("settings.json")
}

/// Backup path written before modifying an existing settings file.
pub fn backup_path(settings: &Path) -> PathBuf {
    settings.with_extension("json.bak")
}

fn hook_entry(matcher: &str, command: &str) -> Value {
    json!({
        "matcher": matcher,
        "hooks": [{ "type": "command", "command": command }]
    })
}

fn is_ours(hook: &Value) -> bool {
    hook.get("command")
        .and_then(Value::as_str)
        .is_some_and(|cmd| ENTRIES.iter().any(|(_, ours)| *ours == cmd))
}

fn entry_has_command(entry: &Value, command: &str) -> bool {
    entry
        .get("hooks")
        .and_then(Value::as_array)
        .is_some_and(|hooks| {
            hooks
                .iter()
                .any(|h| h.get("command").and_then(Value::as_str) == Some(command))
        })
}

/// Fetch `key` from `obj` as a mutable object, creating it if absent.
fn object_entry<'a>(
    obj: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, Error> {
    obj.entry(key)
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| Error::other(format!("settings field '{}' is not an object", key)))
}

fn load(path: &Path) -> Result<Value, Error> {
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(json!({}));
    }
    Ok(serde_json::from_str(&content)?)
}

/// Merge our PostToolUse entries into the settings file, creating it if needed.
///
/// Returns false when every entry was already present.
pub fn merge_settings(path: &Path) -> Result<bool, Error> {
    let mut settings = if path.exists() {
        load(path)?
    } else {
        json!({})
    };

    let root = settings
        .as_object_mut()
        .ok_or_else(|| Error::other(format!("{} is not a JSON object", path.display())))?;
    let post_tool_use = object_entry(root, "hooks")?
        .entry("PostToolUse")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .ok_or_else(|| Error::other("settings field 'hooks.PostToolUse' is not an array"))?;

    let mut added = false;
    for (matcher, command) in ENTRIES {
        if !post_tool_use.iter().any(|e| entry_has_command(e, command)) {
            post_tool_use.push(hook_entry(matcher, command));
            added = true;
        }
    }

    if !added {
        return Ok(false);
    }

    if path.exists() {
        std::fs::copy(path, backup_path(path))?;
    } else if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    std::fs::write(path, serde_json::to_string_pretty(&settings)?)?;
    Ok(true)
}

/// Remove our PostToolUse entries. Returns true if the file changed.
pub fn remove_from_settings(path: &Path) -> Result<bool, Error> {
    if !path.exists() {
        return Ok(false);
    }

    let mut settings = load(path)?;
    let Some(hooks) = settings.get_mut("hooks").and_then(Value::as_object_mut) else {
        return Ok(false);
    };
    let Some(post_tool_use) = hooks.get_mut("PostToolUse").and_then(Value::as_array_mut) else {
        return Ok(false);
    };

    let mut changed = false;
    post_tool_use.retain_mut(|entry| {
        let Some(inner) = entry.get_mut("hooks").and_then(Value::as_array_mut) else {
            return true;
        };
        let before = inner.len();
        inner.retain(|h| !is_ours(h));
        if inner.len() != before {
            changed = true;
        }
        !inner.is_empty()
    });

    if !changed {
        return Ok(false);
    }

    if post_tool_use.is_empty() {
        hooks.remove("PostToolUse");
    }
    if hooks.is_empty() {
        if let Some(root) = settings.as_object_mut() {
            root.remove("hooks");
        }
    }

    std::fs::write(path, serde_json::to_string_pretty(&settings)?)?;
    Ok(true)
}
