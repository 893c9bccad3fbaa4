//! # snipkit-core - Snippet Extraction & Template Assembly
//!
//! Loads a directory of example snippets, extracts marker-delimited sections
//! from them, and assembles project template groups into structured
//! [`ProjectTemplate`]s.
//!
//! ## Public API
//!
//! ### Snippets (`snippet`, `section`)
//! - [`Snippet`] - One file; text with optional named sections, or binary
//! - [`Snippet::get_section()`] - Body of one `# <name>` ... `# </name>` section
//! - [`Snippet::stripped_code()`] - Contents with all marker lines removed
//!
//! ### Discovery & Lookup (`discovery`, `manager`)
//! - [`discover_snippet_paths()`] - Walk a snippets root into `group -> name -> path`
//! - [`SnippetManager`] - Lazily built, build-once snippet index
//! - [`NameCollision`] - Same-name files in one group (later one wins)
//!
//! ### Templates (`template`, `meta`, `catalog`, `check`)
//! - [`ProjectTemplate`] - A classified and validated template group
//! - [`classify_file()`] / [`FileRole`] - Role of a file within a template
//! - [`ProjectMeta`] - `meta.json` merged over its defaults
//! - [`TemplateCatalog`] - Memoized listing of all templates
//! - [`check_templates()`] - Authoring checks beyond structural validity
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with not-found / contract / malformed classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use snipkit_core::prelude::*;
//! ```

pub mod catalog;
pub mod check;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod manager;
pub mod meta;
pub mod prelude;
pub mod section;
pub mod snippet;
pub mod template;

// Re-export commonly used types at crate root for convenience
pub use catalog::TemplateCatalog;
pub use check::{check_templates, readme_title, IssueKind, TemplateIssue};
pub use discovery::{discover_snippet_paths, DiscoveredPaths, NameCollision};
pub use error::{Error, Result, ResultExt, TemplateProblem};
pub use manager::{SnippetIndex, SnippetManager};
pub use meta::{Level, ProjectMeta};
pub use section::{Marker, SectionScan};
pub use snippet::{Snippet, TEXT_EXTENSIONS};
pub use template::{
    classify_file, FileRole, ProjectTemplate, EMPTY_TEMPLATE_NAME, TEMPLATE_GROUP_PREFIX,
};
