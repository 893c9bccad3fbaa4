//! A single snippet file: text with optional named sections, or an opaque binary

use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::error::{Error, Result};
use crate::section::{self, SectionScan};

/// File extensions whose contents are loaded as text
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "py", "json"];

/// Annotation that hides deliberately unresolvable example imports from type
/// checkers. Never shown to users, so it is removed when a Python file loads.
const HIDDEN_TYPE_IGNORE: &str = "  # type: ignore (hidden from user)";

/// One file found under a snippet group
///
/// Snippets are immutable once loaded. Callers that need an altered copy
/// should `clone()` and work on the clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Top-level directory the file was found under
    pub group: String,

    /// File name, including extension
    pub name: String,

    /// Full path on disk
    pub file_path: PathBuf,

    /// Text contents, or `None` for binary files
    pub raw_code: Option<String>,
}

impl Snippet {
    /// Load a snippet from disk.
    ///
    /// Text files are read fully; any other file is recorded as binary without
    /// reading it.
    pub fn from_path(
        group: impl Into<String>,
        name: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let file_path = file_path.into();

        if !fs::metadata(&file_path)?.is_file() {
            return Err(Error::not_a_file(file_path));
        }

        let extension = extension_of(&file_path);
        let raw_code = if TEXT_EXTENSIONS.contains(&extension.as_str()) {
            let mut text = fs::read_to_string(&file_path)?;
            if extension == "py" {
                text = text.replace(HIDDEN_TYPE_IGNORE, "");
            }
            Some(text)
        } else {
            None
        };

        let snippet = Self {
            group: group.into(),
            name: name.into(),
            file_path,
            raw_code,
        };
        trace!(
            "Loaded snippet {} ({})",
            snippet.display_name(),
            if snippet.is_binary() { "binary" } else { "text" }
        );
        Ok(snippet)
    }

    /// `group/name`, used in diagnostics
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }

    pub fn is_binary(&self) -> bool {
        self.raw_code.is_none()
    }

    pub fn is_text(&self) -> bool {
        self.raw_code.is_some()
    }

    /// Lowercased file extension without the dot, empty if there is none
    pub fn extension(&self) -> String {
        extension_of(&self.file_path)
    }

    /// The text contents, or a contract error for binary snippets
    pub fn text(&self) -> Result<&str> {
        self.raw_code.as_deref().ok_or_else(|| Error::BinarySnippet {
            snippet: self.display_name(),
        })
    }

    /// Extract the body of the named section, excluding its marker lines.
    ///
    /// Fails with [`Error::SectionNotFound`] if the section never opens and
    /// with [`Error::SectionNotClosed`] if it opens but never closes.
    pub fn get_section(&self, section_name: &str) -> Result<String> {
        match section::scan_section(self.text()?, section_name) {
            SectionScan::Found(body) => Ok(body),
            SectionScan::Missing => Err(Error::SectionNotFound {
                snippet: self.display_name(),
                section: section_name.to_string(),
            }),
            SectionScan::Unclosed { line } => Err(Error::SectionNotClosed {
                snippet: self.display_name(),
                section: section_name.to_string(),
                line,
            }),
        }
    }

    /// Full contents with every section marker line removed
    pub fn stripped_code(&self) -> Result<String> {
        Ok(section::strip_markers(self.text()?))
    }

    /// Names of the sections this snippet declares
    pub fn section_names(&self) -> Result<Vec<String>> {
        Ok(section::section_names(self.text()?))
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}
