//! Project template assembly
//!
//! A project template is a snippet group named `project-template-<Name>`. Its
//! files are classified by name and location into a [`ProjectTemplate`]:
//!
//! ```text
//! project-template-Crypto Dashboard/
//!   README.md          description (must not start with a `# ` heading)
//!   thumbnail.svg      or thumbnail.png
//!   meta.json          level, summary, dependencies, flags, hooks
//!   crypto_dashboard/
//!     root_init.py     marks the template root
//!     components/      component snippets
//!     pages/           page snippets (at least one)
//!     assets/          asset snippets
//! ```
//!
//! Assembly fails fast: either the whole group is valid or an
//! [`Error::InvalidTemplate`] names the first problem.

use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::{debug, trace};

use crate::error::{Error, Result, TemplateProblem};
use crate::meta::{Level, ProjectMeta};
use crate::snippet::Snippet;

/// Group name prefix that marks a project template
pub const TEMPLATE_GROUP_PREFIX: &str = "project-template-";

/// Template left out unless explicitly requested
pub const EMPTY_TEMPLATE_NAME: &str = "Empty";

/// Image extensions treated as assets wherever they appear
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg", "svg", "webp"];

/// What a file in a template group is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Readme,
    Thumbnail,
    Meta,
    Asset,
    RootInit,
    /// A Python file placed by the second pass (component, page or other)
    Python,
    Unrecognized,
}

/// Classify one file by its name, immediate parent directory and extension.
///
/// Checks run in a fixed order, so `thumbnail.png` is the thumbnail even
/// though it is also an image.
pub fn classify_file(file_name: &str, parent_dir_name: Option<&str>, extension: &str) -> FileRole {
    match (file_name, parent_dir_name, extension) {
        ("README.md", _, _) => FileRole::Readme,
        // svg is current; png is still accepted for templates not yet migrated
        ("thumbnail.svg" | "thumbnail.png", _, _) => FileRole::Thumbnail,
        ("meta.json", _, _) => FileRole::Meta,
        (_, Some("assets"), _) => FileRole::Asset,
        (_, _, ext) if IMAGE_EXTENSIONS.contains(&ext) => FileRole::Asset,
        ("root_init.py", _, _) => FileRole::RootInit,
        (_, _, "py") => FileRole::Python,
        _ => FileRole::Unrecognized,
    }
}

fn role_of(snippet: &Snippet) -> FileRole {
    let parent = snippet
        .file_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());
    classify_file(&snippet.name, parent, &snippet.extension())
}

/// One assembled example project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    /// Display name (the group name without its prefix)
    pub name: String,
    pub level: Level,
    pub summary: String,
    /// README contents
    pub description_markdown: String,
    pub thumbnail: Snippet,
    /// Package name -> version constraint
    pub dependencies: BTreeMap<String, String>,
    pub ready_to_run: bool,
    pub supports_mobile: bool,

    pub asset_snippets: Vec<Snippet>,
    pub component_snippets: Vec<Snippet>,
    pub page_snippets: Vec<Snippet>,
    pub other_python_files: Vec<Snippet>,
    pub root_init_snippet: Snippet,

    pub root_component: Option<String>,
    pub on_app_start: Option<String>,
    pub on_session_start: Option<String>,
    pub default_attachments: Option<String>,
    pub theme: Option<String>,
}

/// Pieces collected during the first pass
#[derive(Default)]
struct Collected<'a> {
    readme: Option<&'a Snippet>,
    thumbnail: Option<&'a Snippet>,
    meta: Option<ProjectMeta>,
    root_init: Option<&'a Snippet>,
    assets: Vec<&'a Snippet>,
    python_files: Vec<&'a Snippet>,
}

impl ProjectTemplate {
    /// Template name for a group, if the group is a project template
    pub fn name_from_group(group: &str) -> Option<&str> {
        group.strip_prefix(TEMPLATE_GROUP_PREFIX)
    }

    /// Classify and validate every snippet of one group.
    pub fn from_snippet_group<'a, I>(name: &str, snippets: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Snippet>,
    {
        let fail = |problem: TemplateProblem| Error::invalid_template(name, problem);

        // First pass: roles that depend only on the file itself
        let mut found = Collected::default();
        for snippet in snippets {
            let role = role_of(snippet);
            trace!("{}: {:?}", snippet.display_name(), role);
            match role {
                FileRole::Readme => {
                    require_text(snippet).map_err(fail)?;
                    if found.readme.replace(snippet).is_some() {
                        return Err(fail(TemplateProblem::DuplicateReadme(
                            snippet.file_path.clone(),
                        )));
                    }
                }
                FileRole::Thumbnail => {
                    if found.thumbnail.replace(snippet).is_some() {
                        return Err(fail(TemplateProblem::DuplicateThumbnail(
                            snippet.file_path.clone(),
                        )));
                    }
                }
                FileRole::Meta => {
                    if found.meta.is_some() {
                        return Err(fail(TemplateProblem::DuplicateMeta(
                            snippet.file_path.clone(),
                        )));
                    }
                    require_text(snippet).map_err(fail)?;
                    let meta = ProjectMeta::parse(snippet.text()?)?;
                    found.meta = Some(meta);
                }
                FileRole::Asset => found.assets.push(snippet),
                FileRole::RootInit => {
                    require_text(snippet).map_err(fail)?;
                    if found.root_init.replace(snippet).is_some() {
                        return Err(fail(TemplateProblem::DuplicateRootInit(
                            snippet.file_path.clone(),
                        )));
                    }
                }
                FileRole::Python => found.python_files.push(snippet),
                FileRole::Unrecognized => {
                    return Err(fail(TemplateProblem::UnrecognizedFile(
                        snippet.file_path.clone(),
                    )));
                }
            }
        }

        let readme = found.readme.ok_or_else(|| fail(TemplateProblem::MissingReadme))?;
        let thumbnail = found
            .thumbnail
            .ok_or_else(|| fail(TemplateProblem::MissingThumbnail))?;
        let meta = found.meta.ok_or_else(|| fail(TemplateProblem::MissingMeta))?;
        let root_init = found
            .root_init
            .ok_or_else(|| fail(TemplateProblem::MissingRootInit))?;

        // Second pass: Python files are placed relative to the template root,
        // which is only known once root_init.py has been seen
        let template_root = root_init.file_path.parent().unwrap_or(Path::new(""));
        let mut components = Vec::new();
        let mut pages = Vec::new();
        let mut others = Vec::new();
        for snippet in found.python_files {
            match first_segment(&snippet.file_path, template_root) {
                Some("components") => {
                    if snippet.name != "__init__.py" {
                        components.push(snippet.clone());
                    }
                }
                Some("pages") => {
                    require_text(snippet).map_err(fail)?;
                    pages.push(snippet.clone());
                }
                _ => others.push(snippet.clone()),
            }
        }

        if pages.is_empty() {
            return Err(fail(TemplateProblem::NoPages));
        }

        debug!(
            "Assembled template {:?}: {} pages, {} components, {} assets, {} other files",
            name,
            pages.len(),
            components.len(),
            found.assets.len(),
            others.len()
        );

        Ok(Self {
            name: name.to_string(),
            level: meta.level,
            summary: meta.summary,
            description_markdown: readme.text()?.to_string(),
            thumbnail: thumbnail.clone(),
            dependencies: meta.dependencies,
            ready_to_run: meta.ready_to_run,
            supports_mobile: meta.supports_mobile,
            asset_snippets: found.assets.into_iter().cloned().collect(),
            component_snippets: components,
            page_snippets: pages,
            other_python_files: others,
            root_init_snippet: root_init.clone(),
            root_component: meta.root_component,
            on_app_start: meta.on_app_start,
            on_session_start: meta.on_session_start,
            default_attachments: meta.default_attachments,
            theme: meta.theme,
        })
    }
}

fn require_text(snippet: &Snippet) -> std::result::Result<(), TemplateProblem> {
    if snippet.is_text() {
        Ok(())
    } else {
        Err(TemplateProblem::NotText(snippet.file_path.clone()))
    }
}

/// First directory below `root` on the way to `path`
///
/// `None` for files directly in `root` and for files outside it.
fn first_segment<'p>(path: &'p Path, root: &Path) -> Option<&'p str> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = components.next()?;
    // A file directly in the root has no directory segment
    components.next()?;
    match first {
        Component::Normal(segment) => segment.to_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const META: &str =
        r#"{"level": "beginner", "summary": "A demo", "ready_to_run": true, "supports_mobile": false}"#;

    /// In-memory snippet at `/snippets/<group>/<relative>`
    fn snippet(relative: &str, raw_code: Option<&str>) -> Snippet {
        let file_path = PathBuf::from("/snippets/project-template-Demo").join(relative);
        Snippet {
            group: "project-template-Demo".to_string(),
            name: file_path.file_name().unwrap().to_str().unwrap().to_string(),
            file_path,
            raw_code: raw_code.map(str::to_string),
        }
    }

    fn valid_group() -> Vec<Snippet> {
        vec![
            snippet("README.md", Some("A small demo.")),
            snippet("thumbnail.svg", None),
            snippet("meta.json", Some(META)),
            snippet("demo/root_init.py", Some("import rio")),
            snippet("demo/pages/home_page.py", Some("home")),
            snippet("demo/components/navbar.py", Some("navbar")),
            snippet("demo/components/__init__.py", Some("")),
            snippet("demo/assets/data.csv", None),
            snippet("demo/data/models.py", Some("models")),
            snippet("demo/logo.webp", None),
        ]
    }

    fn problem_of(snippets: &[Snippet]) -> TemplateProblem {
        ProjectTemplate::from_snippet_group("Demo", snippets)
            .unwrap_err()
            .template_problem()
            .cloned()
            .expect("template problem")
    }

    fn names(snippets: &[Snippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_classify_file() {
        assert_eq!(classify_file("README.md", None, "md"), FileRole::Readme);
        assert_eq!(classify_file("thumbnail.svg", None, "svg"), FileRole::Thumbnail);
        assert_eq!(classify_file("thumbnail.png", Some("assets"), "png"), FileRole::Thumbnail);
        assert_eq!(classify_file("meta.json", None, "json"), FileRole::Meta);
        assert_eq!(classify_file("data.csv", Some("assets"), "csv"), FileRole::Asset);
        assert_eq!(classify_file("helper.py", Some("assets"), "py"), FileRole::Asset);
        assert_eq!(classify_file("photo.jpeg", Some("pages"), "jpeg"), FileRole::Asset);
        assert_eq!(classify_file("root_init.py", Some("demo"), "py"), FileRole::RootInit);
        assert_eq!(classify_file("home.py", Some("pages"), "py"), FileRole::Python);
        assert_eq!(classify_file("notes.txt", Some("demo"), "txt"), FileRole::Unrecognized);
        assert_eq!(classify_file("other.json", None, "json"), FileRole::Unrecognized);
    }

    #[test]
    fn test_name_from_group() {
        assert_eq!(
            ProjectTemplate::name_from_group("project-template-Crypto Dashboard"),
            Some("Crypto Dashboard")
        );
        assert_eq!(ProjectTemplate::name_from_group("not-a-template"), None);
    }

    #[test]
    fn test_assembles_valid_group() {
        let group = valid_group();
        let template = ProjectTemplate::from_snippet_group("Demo", &group).unwrap();

        assert_eq!(template.name, "Demo");
        assert_eq!(template.level, Level::Beginner);
        assert_eq!(template.summary, "A demo");
        assert_eq!(template.description_markdown, "A small demo.");
        assert_eq!(template.thumbnail.name, "thumbnail.svg");
        assert_eq!(template.root_init_snippet.name, "root_init.py");
        assert_eq!(names(&template.page_snippets), vec!["home_page.py"]);
        assert_eq!(names(&template.component_snippets), vec!["navbar.py"]);
        assert_eq!(names(&template.asset_snippets), vec!["data.csv", "logo.webp"]);
        assert_eq!(names(&template.other_python_files), vec!["models.py"]);
        assert!(template.dependencies.is_empty());
        assert_eq!(template.root_component, None);
    }

    #[test]
    fn test_other_python_file_is_not_component_or_page() {
        let group = valid_group();
        let template = ProjectTemplate::from_snippet_group("Demo", &group).unwrap();
        let is_models = |s: &Snippet| s.name == "models.py";

        assert!(template.other_python_files.iter().any(is_models));
        assert!(!template.component_snippets.iter().any(is_models));
        assert!(!template.page_snippets.iter().any(is_models));
    }

    #[test]
    fn test_python_next_to_root_init_is_other() {
        let mut group = valid_group();
        group.push(snippet("demo/app_state.py", Some("state")));
        let template = ProjectTemplate::from_snippet_group("Demo", &group).unwrap();
        assert!(names(&template.other_python_files).contains(&"app_state.py"));
    }

    #[test]
    fn test_pages_outside_template_root_are_other() {
        let mut group = valid_group();
        group.push(snippet("pages/stray.py", Some("stray")));
        let template = ProjectTemplate::from_snippet_group("Demo", &group).unwrap();
        assert!(names(&template.other_python_files).contains(&"stray.py"));
        assert_eq!(names(&template.page_snippets), vec!["home_page.py"]);
    }

    #[test]
    fn test_missing_required_files() {
        let without = |name: &str| -> Vec<Snippet> {
            valid_group().into_iter().filter(|s| s.name != name).collect()
        };

        assert_eq!(problem_of(&without("README.md")), TemplateProblem::MissingReadme);
        assert_eq!(problem_of(&without("thumbnail.svg")), TemplateProblem::MissingThumbnail);
        assert_eq!(problem_of(&without("meta.json")), TemplateProblem::MissingMeta);
        assert_eq!(problem_of(&without("root_init.py")), TemplateProblem::MissingRootInit);
        assert_eq!(problem_of(&without("home_page.py")), TemplateProblem::NoPages);
    }

    #[test]
    fn test_svg_and_png_thumbnails_are_duplicates() {
        let mut group = valid_group();
        group.push(snippet("thumbnail.png", None));
        assert!(matches!(
            problem_of(&group),
            TemplateProblem::DuplicateThumbnail(_)
        ));
    }

    #[test]
    fn test_duplicate_readme_and_root_init() {
        let mut group = valid_group();
        group.push(snippet("docs/README.md", Some("again")));
        assert!(matches!(problem_of(&group), TemplateProblem::DuplicateReadme(_)));

        let mut group = valid_group();
        group.push(snippet("other/root_init.py", Some("again")));
        assert!(matches!(problem_of(&group), TemplateProblem::DuplicateRootInit(_)));
    }

    #[test]
    fn test_unrecognized_file_fails() {
        let mut group = valid_group();
        group.push(snippet("demo/notes.txt", Some("todo")));
        assert_eq!(
            problem_of(&group),
            TemplateProblem::UnrecognizedFile(PathBuf::from(
                "/snippets/project-template-Demo/demo/notes.txt"
            ))
        );
    }

    #[test]
    fn test_binary_readme_is_rejected() {
        let mut group = valid_group();
        group.retain(|s| s.name != "README.md");
        group.push(snippet("README.md", None));
        assert!(matches!(problem_of(&group), TemplateProblem::NotText(_)));
    }

    #[test]
    fn test_bad_meta_json_propagates() {
        let mut group = valid_group();
        group.retain(|s| s.name != "meta.json");
        group.push(snippet("meta.json", Some("{")));
        let err = ProjectTemplate::from_snippet_group("Demo", &group).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_first_segment() {
        let root = Path::new("/t/demo");
        assert_eq!(first_segment(Path::new("/t/demo/pages/a.py"), root), Some("pages"));
        assert_eq!(first_segment(Path::new("/t/demo/a.py"), root), None);
        assert_eq!(first_segment(Path::new("/t/other/pages/a.py"), root), None);
    }
}
