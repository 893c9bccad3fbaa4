//! Section marker parsing
//!
//! Text snippets may carve themselves into named sections with comment markers:
//!
//! ```text
//! import foo
//!
//!   # <setup>
//! app = foo.App()
//!   # </setup>
//! ```
//!
//! `# <name>` opens a section and `# </name>` closes it. Leading whitespace is
//! ignored. Marker lines never appear in extracted or stripped output.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a whole section marker line, capturing the optional `/` and the name.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*# <(/?)([\w-]+)>\s*$").expect("Invalid section marker regex")
});

/// A recognized section marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    Open(&'a str),
    Close(&'a str),
}

impl<'a> Marker<'a> {
    /// Parse a single line as a marker, if it is one
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = MARKER_REGEX.captures(line)?;
        let name = caps.get(2)?.as_str();
        if caps.get(1).is_some_and(|m| !m.as_str().is_empty()) {
            Some(Marker::Close(name))
        } else {
            Some(Marker::Open(name))
        }
    }
}

/// Outcome of scanning text for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionScan {
    /// The section body, marker lines excluded
    Found(String),
    /// No opening marker for the section exists
    Missing,
    /// The section was opened (at this 1-based line) and never closed
    Unclosed { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    /// Collecting; holds the line number of the opening marker
    Inside(usize),
}

/// Extract the body of section `name` from `text`.
///
/// Any opening marker resets the collected lines, so text before a nested or
/// re-opened section is discarded and only the most recent opening counts.
/// Closing markers of other sections are dropped without ending collection.
pub fn scan_section(text: &str, name: &str) -> SectionScan {
    let mut state = ScanState::Outside;
    let mut collected: Vec<&str> = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        match (state, Marker::parse(line)) {
            (_, Some(Marker::Open(opened))) if opened == name => {
                collected.clear();
                state = ScanState::Inside(idx + 1);
            }
            (_, Some(Marker::Open(_))) => collected.clear(),
            (ScanState::Inside(_), Some(Marker::Close(closed))) if closed == name => {
                return SectionScan::Found(collected.join("\n"));
            }
            (_, Some(Marker::Close(_))) => {}
            (ScanState::Inside(_), None) => collected.push(line),
            (ScanState::Outside, None) => {}
        }
    }

    match state {
        ScanState::Outside => SectionScan::Missing,
        ScanState::Inside(line) => SectionScan::Unclosed { line },
    }
}

/// Remove every marker line from `text`, keeping all other lines as-is
pub fn strip_markers(text: &str) -> String {
    text.split('\n')
        .filter(|line| Marker::parse(line).is_none())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Names of all opened sections, in order of first appearance
pub fn section_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if let Some(Marker::Open(name)) = Marker::parse(line) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
