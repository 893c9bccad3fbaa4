//! `meta.json` parsing for project templates

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::Result;

/// How much experience a template expects from its reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// Contents of a template's `meta.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectMeta {
    pub level: Level,

    pub summary: String,

    /// Package name -> version constraint
    pub dependencies: BTreeMap<String, String>,

    pub ready_to_run: bool,

    pub supports_mobile: bool,

    #[serde(rename = "rootComponent")]
    pub root_component: Option<String>,

    #[serde(rename = "onAppStart")]
    pub on_app_start: Option<String>,

    #[serde(rename = "onSessionStart")]
    pub on_session_start: Option<String>,

    #[serde(rename = "defaultAttachments")]
    pub default_attachments: Option<String>,

    pub theme: Option<String>,
}

/// Values used for keys a `meta.json` leaves out
fn defaults() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("dependencies".to_string(), Value::Object(Map::new()));
    for hook in [
        "rootComponent",
        "onAppStart",
        "onSessionStart",
        "defaultAttachments",
        "theme",
    ] {
        map.insert(hook.to_string(), Value::Null);
    }
    map
}

impl ProjectMeta {
    /// Parse `meta.json` text.
    ///
    /// The file is merged over the defaults one top-level key at a time; any
    /// key present in the file wins, even if its value is `null`.
    pub fn parse(text: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(text)?;
        let merged = match parsed {
            Value::Object(file) => {
                let mut merged = defaults();
                merged.extend(file);
                Value::Object(merged)
            }
            // Not an object; let deserialization report the type error
            other => other,
        };
        Ok(serde_json::from_value(merged)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_minimal_meta_uses_defaults() {
        let meta = ProjectMeta::parse(
            r#"{"level": "beginner", "summary": "x", "ready_to_run": true, "supports_mobile": false}"#,
        )
        .unwrap();

        assert_eq!(meta.level, Level::Beginner);
        assert_eq!(meta.summary, "x");
        assert!(meta.ready_to_run);
        assert!(!meta.supports_mobile);
        assert!(meta.dependencies.is_empty());
        assert_eq!(meta.root_component, None);
        assert_eq!(meta.on_app_start, None);
        assert_eq!(meta.on_session_start, None);
        assert_eq!(meta.default_attachments, None);
        assert_eq!(meta.theme, None);
    }

    #[test]
    fn test_full_meta() {
        let meta = ProjectMeta::parse(
            r#"{
                "level": "advanced",
                "summary": "Track your crypto portfolio",
                "dependencies": {"pandas": ">=2.0", "plotly": ">=5.0,<6"},
                "ready_to_run": false,
                "supports_mobile": true,
                "rootComponent": "AppRoot",
                "onAppStart": "on_app_start",
                "onSessionStart": "on_session_start",
                "defaultAttachments": "default_attachments",
                "theme": "theme"
            }"#,
        )
        .unwrap();

        assert_eq!(meta.level, Level::Advanced);
        assert_eq!(meta.dependencies["plotly"], ">=5.0,<6");
        assert_eq!(meta.root_component.as_deref(), Some("AppRoot"));
        assert_eq!(meta.theme.as_deref(), Some("theme"));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let err = ProjectMeta::parse(r#"{"level": "beginner", "summary": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unknown_level_fails() {
        let err = ProjectMeta::parse(
            r#"{"level": "expert", "summary": "x", "ready_to_run": true, "supports_mobile": false}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_merge_is_shallow() {
        // An explicit null replaces the default object rather than merging into it
        let err = ProjectMeta::parse(
            r#"{"level": "beginner", "summary": "x", "ready_to_run": true, "supports_mobile": false, "dependencies": null}"#,
        )
        .unwrap_err();
        assert!(err.is_malformed_content());
    }

    #[test]
    fn test_invalid_json_and_non_object() {
        assert!(matches!(ProjectMeta::parse("{not json"), Err(Error::Json(_))));
        assert!(matches!(ProjectMeta::parse("[1, 2]"), Err(Error::Json(_))));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Intermediate.to_string(), "intermediate");
    }
}
