//! Error types for snippet discovery and template assembly

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snippet path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Lookup Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Snippet group not found: {group}")]
    GroupNotFound { group: String },

    #[error("Snippet not found: {group}/{name}")]
    SnippetNotFound { group: String, name: String },

    #[error("Section '{section}' not found in {snippet}")]
    SectionNotFound { snippet: String, section: String },

    // ─────────────────────────────────────────────────────────────
    // Content Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Section '{section}' in {snippet} opened at line {line} is never closed")]
    SectionNotClosed {
        snippet: String,
        section: String,
        line: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // Contract Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Snippet {snippet} is binary and has no text content")]
    BinarySnippet { snippet: String },

    #[error("Invalid project template '{template}': {problem}")]
    InvalidTemplate {
        template: String,
        problem: TemplateProblem,
    },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// What is wrong with a project template directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateProblem {
    #[error("README.md not found")]
    MissingReadme,

    #[error("thumbnail not found")]
    MissingThumbnail,

    #[error("meta.json not found")]
    MissingMeta,

    #[error("root_init.py not found")]
    MissingRootInit,

    #[error("no page snippets found")]
    NoPages,

    #[error("duplicate README.md: {0}")]
    DuplicateReadme(PathBuf),

    #[error("duplicate thumbnail: {0}")]
    DuplicateThumbnail(PathBuf),

    #[error("duplicate meta.json: {0}")]
    DuplicateMeta(PathBuf),

    #[error("duplicate root_init.py: {0}")]
    DuplicateRootInit(PathBuf),

    #[error("expected a text file: {0}")]
    NotText(PathBuf),

    #[error("unrecognized snippet file: {0}")]
    UnrecognizedFile(PathBuf),
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn group_not_found(group: impl Into<String>) -> Self {
        Self::GroupNotFound {
            group: group.into(),
        }
    }

    pub fn snippet_not_found(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self::SnippetNotFound {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn invalid_template(template: impl Into<String>, problem: TemplateProblem) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            problem,
        }
    }

    /// Check if this is a key-style lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::GroupNotFound { .. }
                | Error::SnippetNotFound { .. }
                | Error::SectionNotFound { .. }
        )
    }

    /// Check if this error is an authoring/contract violation
    ///
    /// These are meant to fail a build or test run, never to be recovered from.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::BinarySnippet { .. } | Error::InvalidTemplate { .. }
        )
    }

    /// Check if this error comes from malformed file content
    pub fn is_malformed_content(&self) -> bool {
        matches!(self, Error::SectionNotClosed { .. } | Error::Json(_))
    }

    /// The template problem, if this is a template assembly failure
    pub fn template_problem(&self) -> Option<&TemplateProblem> {
        match self {
            Error::InvalidTemplate { problem, .. } => Some(problem),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
