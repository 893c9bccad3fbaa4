//! Memoized project template listing on top of a [`SnippetManager`]

use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::manager::SnippetManager;
use crate::template::{ProjectTemplate, EMPTY_TEMPLATE_NAME};

/// Every project template in a snippet corpus
///
/// Results are computed at most once per `include_empty` value and kept for
/// the life of the catalog.
#[derive(Debug)]
pub struct TemplateCatalog {
    manager: SnippetManager,
    with_empty: OnceLock<Vec<ProjectTemplate>>,
    without_empty: OnceLock<Vec<ProjectTemplate>>,
}

impl TemplateCatalog {
    pub fn new(manager: SnippetManager) -> Self {
        Self {
            manager,
            with_empty: OnceLock::new(),
            without_empty: OnceLock::new(),
        }
    }

    pub fn manager(&self) -> &SnippetManager {
        &self.manager
    }

    /// All project templates, in group-name order.
    ///
    /// The `Empty` template is only included when `include_empty` is set.
    /// Any malformed template group fails the whole call.
    pub fn get_project_templates(&self, include_empty: bool) -> Result<&[ProjectTemplate]> {
        let cell = if include_empty {
            &self.with_empty
        } else {
            &self.without_empty
        };

        if let Some(templates) = cell.get() {
            return Ok(templates);
        }

        let templates = self.assemble(include_empty)?;
        info!(
            "Loaded {} project templates (include_empty: {})",
            templates.len(),
            include_empty
        );
        Ok(cell.get_or_init(|| templates))
    }

    /// Look up one template by display name
    pub fn get_project_template(
        &self,
        name: &str,
        include_empty: bool,
    ) -> Result<Option<&ProjectTemplate>> {
        Ok(self
            .get_project_templates(include_empty)?
            .iter()
            .find(|t| t.name == name))
    }

    fn assemble(&self, include_empty: bool) -> Result<Vec<ProjectTemplate>> {
        let mut templates = Vec::new();

        for group in self.manager.get_all_snippet_groups()? {
            let Some(name) = ProjectTemplate::name_from_group(group) else {
                continue;
            };

            if !include_empty && name == EMPTY_TEMPLATE_NAME {
                debug!("Skipping {:?} template", EMPTY_TEMPLATE_NAME);
                continue;
            }

            let snippets = self.manager.get_all_snippets_in_group(group)?;
            templates.push(ProjectTemplate::from_snippet_group(name, snippets)?);
        }

        Ok(templates)
    }
}
