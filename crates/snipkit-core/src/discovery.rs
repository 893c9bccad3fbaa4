//! Snippet file discovery
//!
//! Walks a snippets root where every immediate subdirectory is a group, and
//! indexes every file inside a group by its file name. Subdirectories within a
//! group only organize files; they do not show up in the index key.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::error::Result;

/// Directories to skip during search
const SKIP_DIRECTORIES: &[&str] = &["__pycache__"];

/// Two files in one group sharing a file name
///
/// The index keeps only one of them: the one visited later in the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub group: String,
    pub name: String,
    /// Path that stays in the index
    pub kept: PathBuf,
    /// Path that was overwritten
    pub dropped: PathBuf,
}

/// Result of snippet discovery
#[derive(Debug, Default)]
pub struct DiscoveredPaths {
    /// `group -> (file name -> path)`
    pub groups: BTreeMap<String, BTreeMap<String, PathBuf>>,
    /// Name collisions found while indexing
    pub collisions: Vec<NameCollision>,
}

/// Discover every snippet file under `root`.
///
/// Entries of each directory are visited in file-name order, depth first, so
/// the walk (and which path wins a name collision) is the same on every
/// platform. Filesystem errors propagate.
pub fn discover_snippet_paths(root: &Path) -> Result<DiscoveredPaths> {
    let mut result = DiscoveredPaths::default();

    for group_dir in sorted_entries(root)? {
        if !group_dir.is_dir() {
            trace!("Ignoring non-directory in snippets root: {:?}", group_dir);
            continue;
        }

        let group = file_name_of(&group_dir);
        let mut files = BTreeMap::new();
        walk_group(&group, &group_dir, &mut files, &mut result.collisions)?;
        debug!("Discovered {} snippets in group {:?}", files.len(), group);
        result.groups.insert(group, files);
    }

    Ok(result)
}

/// Recursive helper that records every file below `dir`
fn walk_group(
    group: &str,
    dir: &Path,
    files: &mut BTreeMap<String, PathBuf>,
    collisions: &mut Vec<NameCollision>,
) -> Result<()> {
    for path in sorted_entries(dir)? {
        let name = file_name_of(&path);

        if path.is_dir() {
            if SKIP_DIRECTORIES.contains(&name.as_str()) {
                trace!("Skipping excluded directory: {:?}", path);
                continue;
            }
            walk_group(group, &path, files, collisions)?;
            continue;
        }

        if let Some(previous) = files.insert(name.clone(), path.clone()) {
            warn!(
                "Snippet name collision in group {:?}: {:?} replaces {:?}",
                group, path, previous
            );
            collisions.push(NameCollision {
                group: group.to_string(),
                name,
                kept: path,
                dropped: previous,
            });
        }
    }

    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

/// File name as an index key; invalid UTF-8 is replaced rather than skipped
fn file_name_of(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
