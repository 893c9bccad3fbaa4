//! Command implementations for the `snipkit` binary
//!
//! Every command writes to a caller-supplied writer, so the binary passes
//! stdout and tests pass a `Vec<u8>`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use snipkit_core::prelude::*;
use snipkit_core::{check_templates, ProjectTemplate, Snippet, TemplateCatalog, TemplateIssue};

/// Print every snippet group name, one per line
pub fn groups(catalog: &TemplateCatalog, out: &mut impl Write) -> Result<()> {
    for group in catalog.manager().get_all_snippet_groups()? {
        writeln!(out, "{group}")?;
    }
    Ok(())
}

/// Print each snippet of a group with its kind and declared sections
pub fn list(catalog: &TemplateCatalog, group: &str, out: &mut impl Write) -> Result<()> {
    for snippet in catalog.manager().get_all_snippets_in_group(group)? {
        writeln!(out, "{}", describe_snippet(snippet)?)?;
    }
    Ok(())
}

fn describe_snippet(snippet: &Snippet) -> Result<String> {
    if snippet.is_binary() {
        return Ok(format!("{}\tbinary", snippet.name));
    }
    let sections = snippet.section_names()?;
    if sections.is_empty() {
        Ok(format!("{}\ttext", snippet.name))
    } else {
        Ok(format!("{}\ttext\t[{}]", snippet.name, sections.join(", ")))
    }
}

/// Print a snippet with all section markers removed
pub fn show(catalog: &TemplateCatalog, group: &str, name: &str, out: &mut impl Write) -> Result<()> {
    let code = catalog.manager().get_snippet(group, name)?.stripped_code()?;
    write_text(out, &code)
}

/// Print one named section of a snippet
pub fn section(
    catalog: &TemplateCatalog,
    group: &str,
    name: &str,
    section: &str,
    out: &mut impl Write,
) -> Result<()> {
    let body = catalog
        .manager()
        .get_snippet(group, name)?
        .get_section(section)
        .with_context(|| format!("Extracting section {section:?} from {group}/{name}"))?;
    write_text(out, &body)
}

fn write_text(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

/// Machine-readable template summary for `templates --json`
#[derive(Debug, Serialize)]
pub struct TemplateSummary<'a> {
    pub name: &'a str,
    pub level: snipkit_core::Level,
    pub summary: &'a str,
    pub ready_to_run: bool,
    pub supports_mobile: bool,
    pub dependencies: &'a BTreeMap<String, String>,
    pub thumbnail: &'a str,
    pub pages: Vec<&'a str>,
    pub components: Vec<&'a str>,
    pub assets: Vec<&'a str>,
    pub other_python_files: Vec<&'a str>,
}

impl<'a> From<&'a ProjectTemplate> for TemplateSummary<'a> {
    fn from(template: &'a ProjectTemplate) -> Self {
        Self {
            name: &template.name,
            level: template.level,
            summary: &template.summary,
            ready_to_run: template.ready_to_run,
            supports_mobile: template.supports_mobile,
            dependencies: &template.dependencies,
            thumbnail: &template.thumbnail.name,
            pages: snippet_names(&template.page_snippets),
            components: snippet_names(&template.component_snippets),
            assets: snippet_names(&template.asset_snippets),
            other_python_files: snippet_names(&template.other_python_files),
        }
    }
}

fn snippet_names(snippets: &[Snippet]) -> Vec<&str> {
    snippets.iter().map(|s| s.name.as_str()).collect()
}

/// Print every project template, as text or as one JSON object per line
pub fn templates(
    catalog: &TemplateCatalog,
    include_empty: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    for template in catalog.get_project_templates(include_empty)? {
        if json {
            let line = serde_json::to_string(&TemplateSummary::from(template))?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(
                out,
                "{}\t{}\t{} pages\t{}",
                template.name,
                template.level,
                template.page_snippets.len(),
                template.summary
            )?;
        }
    }
    Ok(())
}

/// Outcome of `check`
#[derive(Debug, Default)]
pub struct CheckReport {
    pub templates_checked: usize,
    pub issues: Vec<TemplateIssue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Assemble every template and run the authoring checks.
///
/// A template that fails to assemble is returned as an error; issues from
/// templates that do assemble are printed and collected in the report.
pub fn check(
    catalog: &TemplateCatalog,
    include_empty: bool,
    out: &mut impl Write,
) -> Result<CheckReport> {
    let templates = catalog.get_project_templates(include_empty)?;
    let issues = check_templates(catalog.manager(), templates)?;

    for issue in &issues {
        warn!("Template issue: {}", issue);
        writeln!(out, "{issue}")?;
    }
    writeln!(
        out,
        "Checked {} templates: {} issues",
        templates.len(),
        issues.len()
    )?;

    Ok(CheckReport {
        templates_checked: templates.len(),
        issues,
    })
}
