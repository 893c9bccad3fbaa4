//! Authoring checks for project templates that assemble but are still wrong
//!
//! Assembly already rejects structurally broken groups. These checks cover the
//! remaining conventions a build or test run should enforce.

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::manager::SnippetManager;
use crate::template::{ProjectTemplate, TEMPLATE_GROUP_PREFIX};

/// Kind of authoring problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// README opens with a top-level heading; callers prepend their own title
    ReadmeHasTitle { line: String },
    /// Two files in the group share a name, so one is missing from the index
    NameCollision {
        name: String,
        kept: PathBuf,
        dropped: PathBuf,
    },
}

/// A problem found in one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateIssue {
    pub template: String,
    pub kind: IssueKind,
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::ReadmeHasTitle { line } => write!(
                f,
                "{}: README.md must not start with a top-level heading ({line:?})",
                self.template
            ),
            IssueKind::NameCollision {
                name,
                kept,
                dropped,
            } => write!(
                f,
                "{}: duplicate file name {name:?}: {} hides {}",
                self.template,
                kept.display(),
                dropped.display()
            ),
        }
    }
}

/// The top-level heading a README opens with, if any
pub fn readme_title(markdown: &str) -> Option<&str> {
    let first = markdown.lines().map(str::trim_end).find(|l| !l.trim().is_empty())?;
    (first == "#" || first.starts_with("# ")).then_some(first)
}

/// Run every check over assembled templates
pub fn check_templates(
    manager: &SnippetManager,
    templates: &[ProjectTemplate],
) -> Result<Vec<TemplateIssue>> {
    let collisions = manager.name_collisions()?;
    let mut issues = Vec::new();

    for template in templates {
        if let Some(line) = readme_title(&template.description_markdown) {
            issues.push(TemplateIssue {
                template: template.name.clone(),
                kind: IssueKind::ReadmeHasTitle {
                    line: line.to_string(),
                },
            });
        }

        let group = format!("{TEMPLATE_GROUP_PREFIX}{}", template.name);
        for collision in collisions.iter().filter(|c| c.group == group) {
            issues.push(TemplateIssue {
                template: template.name.clone(),
                kind: IssueKind::NameCollision {
                    name: collision.name.clone(),
                    kept: collision.kept.clone(),
                    dropped: collision.dropped.clone(),
                },
            });
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_title_detection() {
        assert_eq!(readme_title("# My App\n\nText"), Some("# My App"));
        assert_eq!(readme_title("\n\n# Late title"), Some("# Late title"));
        assert_eq!(readme_title("#"), Some("#"));
        assert_eq!(readme_title("Intro text\n# Later heading"), None);
        assert_eq!(readme_title("## Subheading first"), None);
        assert_eq!(readme_title("#hashtag"), None);
        assert_eq!(readme_title(""), None);
    }

    #[test]
    fn test_issue_display() {
        let issue = TemplateIssue {
            template: "Foo".to_string(),
            kind: IssueKind::ReadmeHasTitle {
                line: "# Foo".to_string(),
            },
        };
        assert_eq!(
            issue.to_string(),
            "Foo: README.md must not start with a top-level heading (\"# Foo\")"
        );
    }
}
