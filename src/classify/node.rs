//! Node package descriptor inspection

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInspection {
    pub uses_react: bool,
    /// Leading numeric token of `engines.node`, if any
    pub runtime_version: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level value is not an object")]
    NotAnObject,
}

pub fn inspect(content: &str) -> Result<NodeInspection, PackageError> {
    let package: Value = serde_json::from_str(content)?;
    if !package.is_object() {
        return Err(PackageError::NotAnObject);
    }

    let declares_react = |section: &str| {
        package
            .get(section)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key("react"))
    };

    let runtime_version = package
        .get("engines")
        .and_then(|e| e.get("node"))
        .and_then(Value::as_str)
        .and_then(major_version_token);

    Ok(NodeInspection {
        uses_react: declares_react("dependencies") || declares_react("devDependencies"),
        runtime_version,
    })
}

/// First digit run in a version constraint (`">=16.0.0"` → `"16"`).
pub fn major_version_token(constraint: &str) -> Option<String> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS
        .get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
        .find(constraint)
        .map(|m| m.as_str().to_string())
}
