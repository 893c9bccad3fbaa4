//! Reading and writing `.snipkit/config.toml`

use super::types::Settings;
use snipkit_core::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.toml";
pub const SNIPKIT_DIR: &str = ".snipkit";

const DEFAULT_CONFIG: &str = r#"# snipkit configuration

[snippets]
root = "snippets"       # Relative to this project directory

[templates]
include_empty = false   # List and check the Empty template too
"#;

/// Location of the config file for `project_dir`
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(SNIPKIT_DIR).join(CONFIG_FILENAME)
}

/// Load the project's settings.
///
/// A project without a config file uses the defaults. A config file that
/// exists but cannot be read or parsed is an [`Error::Config`].
pub fn load_settings(project_dir: &Path) -> Result<Settings> {
    let path = config_path(project_dir);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(Error::config(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| Error::config(format!("invalid {}: {e}", path.display())))?;
    debug!(
        "Loaded {} (snippets root {:?})",
        path.display(),
        settings.snippets.root
    );
    Ok(settings)
}

/// Write the commented default config unless one exists already.
///
/// Returns the config path either way.
pub fn write_default_config(project_dir: &Path) -> Result<PathBuf> {
    let path = config_path(project_dir);
    fs::create_dir_all(project_dir.join(SNIPKIT_DIR))
        .map_err(|e| Error::config(format!("cannot create {SNIPKIT_DIR}: {e}")))?;

    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            info!("Keeping existing config {}", path.display());
            return Ok(path);
        }
        Err(e) => {
            return Err(Error::config(format!(
                "cannot create {}: {e}",
                path.display()
            )))
        }
    };

    file.write_all(DEFAULT_CONFIG.as_bytes())?;
    info!("Wrote default config {}", path.display());
    Ok(path)
}
