//! Heading word extraction.
//!
//! Compares heading words against an English dictionary to surface candidate
//! proper nouns. Only heading spans are scanned, so words inside code blocks
//! and body text never show up.

use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::segment::{HeadingLine, SpanKind, segment, split_line_ending};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());

/// A set of known English words, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Builds a dictionary from newline-separated words.
    ///
    /// Entries are trimmed and lowercased; empty lines are skipped.
    pub fn from_lines(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Reads a dictionary file, one word per line.
    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let text = fs::read_to_string(path).map_err(|source| DictionaryError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_lines(&text))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

/// A heading word that is absent from the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWord {
    /// The word as it appears in the heading.
    pub word: String,
    /// The heading it was found in, markers included.
    pub heading: String,
}

/// Scans a document's headings for words not in the dictionary.
///
/// Words are purely alphabetic runs; digits and punctuation split them.
/// Each distinct spelling is reported once per document, at its first
/// occurrence, in document order.
pub fn unknown_heading_words(document: &str, dictionary: &Dictionary) -> Vec<UnknownWord> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for span in segment(document) {
        if !matches!(span.kind, SpanKind::Heading { .. }) {
            continue;
        }
        let (content, _) = split_line_ending(span.text);
        let Some(heading) = HeadingLine::parse(content) else {
            continue;
        };
        let display = format!("{} {}", "#".repeat(heading.level as usize), heading.text);
        for found_word in WORD_RE.find_iter(heading.text) {
            let word = found_word.as_str();
            if dictionary.contains(word) || !seen.insert(word.to_string()) {
                continue;
            }
            found.push(UnknownWord {
                word: word.to_string(),
                heading: display.clone(),
            });
        }
    }
    found
}

/// One word's dictionary membership, as reported by `--analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAnalysis {
    pub word: String,
    pub is_english: bool,
}

/// Checks each given word against the dictionary, preserving input order.
///
/// Unlike [`unknown_heading_words`] this takes words directly rather than
/// scanning a document, so callers can look up candidate proper nouns without
/// building a document around them.
pub fn analyze_words(words: &[String], dictionary: &Dictionary) -> Vec<WordAnalysis> {
    words
        .iter()
        .map(|word| WordAnalysis {
            word: word.clone(),
            is_english: dictionary.contains(word),
        })
        .collect()
}

/// Failure to read a dictionary file.
#[derive(Debug)]
pub struct DictionaryError {
    path: PathBuf,
    source: std::io::Error,
}

impl DictionaryError {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to read dictionary {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for DictionaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
