//! Configuration types for snipkit
//!
//! Defines `Settings` (`.snipkit/config.toml`) and its sections.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings (.snipkit/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub snippets: SnippetSettings,

    #[serde(default)]
    pub templates: TemplateSettings,
}

impl Settings {
    /// Snippets root, with relative paths resolved against `project_dir`
    pub fn snippets_root(&self, project_dir: &Path) -> PathBuf {
        if self.snippets.root.is_absolute() {
            self.snippets.root.clone()
        } else {
            project_dir.join(&self.snippets.root)
        }
    }

    /// Whether listings include the `Empty` template; a command-line choice wins
    pub fn include_empty(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.templates.include_empty)
    }
}

/// Where snippets are loaded from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnippetSettings {
    /// Directory holding one subdirectory per snippet group
    #[serde(default = "default_snippets_root")]
    pub root: PathBuf,
}

impl Default for SnippetSettings {
    fn default() -> Self {
        Self {
            root: default_snippets_root(),
        }
    }
}

/// Template listing behavior
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplateSettings {
    /// Include the `Empty` template in listings and checks
    #[serde(default)]
    pub include_empty: bool,
}

fn default_snippets_root() -> PathBuf {
    PathBuf::from("snippets")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.snippets.root, PathBuf::from("snippets"));
        assert!(!settings.templates.include_empty);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("[templates]\ninclude_empty = true\n").unwrap();
        assert!(settings.templates.include_empty);
        assert_eq!(settings.snippets.root, PathBuf::from("snippets"));
    }

    #[test]
    fn test_include_empty_flag_overrides_config() {
        let mut settings = Settings::default();
        assert!(!settings.include_empty(None));
        assert!(settings.include_empty(Some(true)));

        settings.templates.include_empty = true;
        assert!(settings.include_empty(None));
        assert!(!settings.include_empty(Some(false)));
    }

    #[test]
    fn test_snippets_root_resolution() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.snippets_root(Path::new("/work/site")),
            PathBuf::from("/work/site/snippets")
        );

        settings.snippets.root = PathBuf::from("/srv/snippets");
        assert_eq!(
            settings.snippets_root(Path::new("/work/site")),
            PathBuf::from("/srv/snippets")
        );
    }
}
