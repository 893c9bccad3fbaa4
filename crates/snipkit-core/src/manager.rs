//! Lazily built, cached index of every snippet under a root directory

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::discovery::{discover_snippet_paths, NameCollision};
use crate::error::{Error, Result};
use crate::snippet::Snippet;

/// Every loaded snippet, grouped as `group -> (name -> Snippet)`
#[derive(Debug, Default)]
pub struct SnippetIndex {
    groups: BTreeMap<String, BTreeMap<String, Snippet>>,
    collisions: Vec<NameCollision>,
}

impl SnippetIndex {
    /// Discover and load every snippet under `root`
    pub fn build(root: &Path) -> Result<Self> {
        let discovered = discover_snippet_paths(root)?;

        let mut groups = BTreeMap::new();
        for (group, paths) in discovered.groups {
            let mut snippets = BTreeMap::new();
            for (name, path) in paths {
                let snippet = Snippet::from_path(group.as_str(), name.as_str(), path)?;
                snippets.insert(name, snippet);
            }
            groups.insert(group, snippets);
        }

        Ok(Self {
            groups,
            collisions: discovered.collisions,
        })
    }

    pub fn groups(&self) -> &BTreeMap<String, BTreeMap<String, Snippet>> {
        &self.groups
    }

    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    pub fn snippet_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }
}

/// Serves snippet lookups from a build-once cache
///
/// Nothing is read from disk until the first query. The index is then kept
/// for the life of the manager and never refreshed.
#[derive(Debug)]
pub struct SnippetManager {
    root: PathBuf,
    cache: OnceLock<SnippetIndex>,
}

impl SnippetManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The snippet index, built on first call.
    ///
    /// Every later call returns the same instance. A failed build leaves the
    /// cache empty so the next call retries.
    pub fn snippet_cache(&self) -> Result<&SnippetIndex> {
        if let Some(index) = self.cache.get() {
            return Ok(index);
        }

        let index = SnippetIndex::build(&self.root)?;
        debug!(
            "Built snippet index for {:?}: {} groups, {} snippets",
            self.root,
            index.groups.len(),
            index.snippet_count()
        );

        // A concurrent first call may have stored its index already; either is fine.
        Ok(self.cache.get_or_init(|| index))
    }

    /// Look up one snippet
    pub fn get_snippet(&self, group: &str, name: &str) -> Result<&Snippet> {
        self.group(group)?
            .get(name)
            .ok_or_else(|| Error::snippet_not_found(group, name))
    }

    /// Names of every indexed group
    pub fn get_all_snippet_groups(&self) -> Result<BTreeSet<&str>> {
        Ok(self
            .snippet_cache()?
            .groups
            .keys()
            .map(String::as_str)
            .collect())
    }

    /// Every snippet in a group, ordered by file name
    pub fn get_all_snippets_in_group(&self, group: &str) -> Result<Vec<&Snippet>> {
        Ok(self.group(group)?.values().collect())
    }

    /// Files dropped from the index because another file in the group had
    /// the same name
    pub fn name_collisions(&self) -> Result<&[NameCollision]> {
        Ok(self.snippet_cache()?.collisions())
    }

    fn group(&self, group: &str) -> Result<&BTreeMap<String, Snippet>> {
        self.snippet_cache()?
            .groups
            .get(group)
            .ok_or_else(|| Error::group_not_found(group))
    }
}
