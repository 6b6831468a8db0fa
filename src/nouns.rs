//! Proper noun list loading and lookup.
//!
//! Proper nouns are supplied as a plain text file, one entry per line. Blank
//! lines and lines starting with `#` are skipped. Entries keep the casing they
//! have in the file; that casing is what gets written into converted headings.

use indexmap::IndexSet;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A set of proper nouns whose exact casing must be preserved.
///
/// Entries containing a space or a dot (`VS Code`, `Vue.js`) are matched as
/// whole phrases before word-level processing; all other entries are matched
/// word by word. Both lookups are case-insensitive. The set is immutable once
/// built and safe to share across threads by reference.
#[derive(Debug, Clone, Default)]
pub struct ProperNouns {
    entries: IndexSet<String>,
    /// Lowercased single-word entry mapped to its canonical casing.
    single: HashMap<String, String>,
    /// Multi-word and dotted entries, longest first.
    multi: Vec<String>,
}

impl ProperNouns {
    /// Builds a set from the contents of a proper noun list.
    pub fn from_lines(content: &str) -> Self {
        let mut entries = IndexSet::new();
        for line in content.lines() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            entries.insert(entry.to_string());
        }

        let mut single = HashMap::new();
        let mut multi = Vec::new();
        for entry in &entries {
            if entry.contains(' ') || entry.contains('.') {
                multi.push(entry.clone());
            } else {
                // Entries differing only in case collapse to the first one.
                single
                    .entry(entry.to_lowercase())
                    .or_insert_with(|| entry.clone());
            }
        }
        // Longest first, so overlapping phrases resolve to the longest match.
        // The sort is stable; equal lengths keep file order.
        multi.sort_by(|a: &String, b: &String| b.len().cmp(&a.len()));

        Self {
            entries,
            single,
            multi,
        }
    }

    /// Loads a set from a file.
    pub fn from_file(path: &Path) -> Result<Self, NounsError> {
        let content = std::fs::read_to_string(path).map_err(|source| NounsError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_lines(&content))
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `entry` was loaded, compared with its exact casing.
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    /// Looks up the canonical casing for a single word, case-insensitively.
    pub fn single_word(&self, word: &str) -> Option<&str> {
        self.single.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Multi-word and dotted entries, sorted longest first.
    pub fn multi_word(&self) -> &[String] {
        &self.multi
    }
}

/// Error reading a proper noun list from disk.
#[derive(Debug)]
pub struct NounsError {
    path: PathBuf,
    source: std::io::Error,
}

impl NounsError {
    /// The path that failed to load.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file simply does not exist. Callers may treat this case as
    /// recoverable and fall back to an empty set.
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

impl std::fmt::Display for NounsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to read proper noun list {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for NounsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
