// SPDX-FileCopyrightText: 2026 Headcase contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Configuration file support.
//!
//! A `.headcase.toml` next to (or above) the documents names the word list
//! files and which markdown files to process when none are given on the
//! command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".headcase.toml";

/// Settings read from `.headcase.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path to the proper-noun list, relative to the configuration file.
    pub proper_nouns: Option<PathBuf>,

    /// Path to the English dictionary used by word extraction, relative to
    /// the configuration file.
    pub dictionary: Option<PathBuf>,

    /// Glob patterns selecting files to process when no paths are given.
    pub include: Vec<String>,

    /// Glob patterns removing files from the include matches.
    pub exclude: Vec<String>,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Finds the nearest `.headcase.toml`, checking `start_dir` and then each
    /// ancestor directory up to the filesystem root.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::from_file(&candidate)?;
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }

    /// Resolves a configured path against the directory containing the
    /// configuration file. An absolute `value` is kept as is.
    pub fn resolve(config_path: &Path, value: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) => dir.join(value),
            None => value.to_path_buf(),
        }
    }

    /// Expands the include patterns under `base_dir` into a sorted, deduped
    /// file list, dropping anything an exclude pattern matches.
    ///
    /// With no include patterns the result is empty; callers fall back to
    /// explicit paths or stdin in that case.
    pub fn collect_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        if self.include.is_empty() {
            return Ok(Vec::new());
        }

        let excludes = self
            .exclude
            .iter()
            .map(|pattern| {
                let full = base_dir.join(pattern);
                glob::Pattern::new(&full.to_string_lossy()).map_err(|source| {
                    ConfigError::Pattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut files = Vec::new();
        for pattern in &self.include {
            let full = base_dir.join(pattern);
            let matches =
                glob::glob(&full.to_string_lossy()).map_err(|source| ConfigError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            for entry in matches {
                let path = entry.map_err(ConfigError::Walk)?;
                let excluded = excludes
                    .iter()
                    .any(|exclude| exclude.matches(&path.to_string_lossy()));
                if path.is_file() && !excluded {
                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}

/// Failure to load a configuration file or expand its patterns.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// An include or exclude entry is not a valid glob pattern.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    /// A matched path could not be examined.
    Walk(glob::GlobError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            ConfigError::Pattern { pattern, source } => {
                write!(f, "invalid glob pattern {pattern:?}: {source}")
            }
            ConfigError::Walk(source) => {
                write!(f, "failed to match files: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Pattern { source, .. } => Some(source),
            ConfigError::Walk(source) => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.proper_nouns.is_none());
        assert!(config.dictionary.is_none());
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_parse_empty_toml() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
proper_nouns = "proper_nouns.txt"
dictionary = "words/en_words.txt"
include = ["docs/**/*.md", "README.md"]
exclude = ["docs/drafts/**"]
"#,
        )
        .unwrap();
        assert_eq!(config.proper_nouns, Some(PathBuf::from("proper_nouns.txt")));
        assert_eq!(config.dictionary, Some(PathBuf::from("words/en_words.txt")));
        assert_eq!(config.include, vec!["docs/**/*.md", "README.md"]);
        assert_eq!(config.exclude, vec!["docs/drafts/**"]);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(Config::from_toml("proper_nouns = 5").is_err());
    }

    #[test]
    fn test_from_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "include = \"not an array\"").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(".headcase.toml"));
    }

    #[test]
    fn test_resolve_relative_path() {
        let config_path = Path::new("/project/.headcase.toml");
        let resolved = Config::resolve(config_path, Path::new("words/nouns.txt"));
        assert_eq!(resolved, PathBuf::from("/project/words/nouns.txt"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let config_path = Path::new("/project/.headcase.toml");
        let resolved = Config::resolve(config_path, Path::new("/etc/nouns.txt"));
        assert_eq!(resolved, PathBuf::from("/etc/nouns.txt"));
    }

    #[test]
    fn test_discover_none_without_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::discover(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_in_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, r#"proper_nouns = "nouns.txt""#).unwrap();

        let (path, config) = Config::discover(dir.path()).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert_eq!(config.proper_nouns, Some(PathBuf::from("nouns.txt")));
    }

    #[test]
    fn test_discover_walks_up_to_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs").join("guides");
        std::fs::create_dir_all(&nested).unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, r#"dictionary = "en.txt""#).unwrap();

        let (path, config) = Config::discover(&nested).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert_eq!(config.dictionary, Some(PathBuf::from("en.txt")));
    }

    #[test]
    fn test_discover_nearest_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"dictionary = "outer.txt""#).unwrap();
        std::fs::write(nested.join(CONFIG_FILE_NAME), r#"dictionary = "inner.txt""#).unwrap();

        let (path, config) = Config::discover(&nested).unwrap().unwrap();
        assert_eq!(path, nested.join(CONFIG_FILE_NAME));
        assert_eq!(config.dictionary, Some(PathBuf::from("inner.txt")));
    }

    #[test]
    fn test_collect_files_matches_includes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# Readme").unwrap();
        std::fs::write(dir.path().join("CHANGELOG.md"), "# Changes").unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        let config = Config::from_toml(r#"include = ["*.md"]"#).unwrap();
        let files = config.collect_files(dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("README.md")));
        assert!(files.iter().any(|p| p.ends_with("CHANGELOG.md")));
    }

    #[test]
    fn test_collect_files_applies_excludes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("drafts")).unwrap();
        std::fs::write(dir.path().join("guide.md"), "# Guide").unwrap();
        std::fs::write(dir.path().join("drafts").join("wip.md"), "# WIP").unwrap();

        let config = Config::from_toml(
            r#"
include = ["**/*.md"]
exclude = ["drafts/**"]
"#,
        )
        .unwrap();
        let files = config.collect_files(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("guide.md"));
    }

    #[test]
    fn test_collect_files_dedupes_overlapping_includes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide.md"), "# Guide").unwrap();

        let config = Config::from_toml(r#"include = ["*.md", "guide.*"]"#).unwrap();
        let files = config.collect_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_files_empty_include() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# Readme").unwrap();

        let files = Config::default().collect_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_files_bad_exclude_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml(
            r#"
include = ["*.md"]
exclude = ["[broken"]
"#,
        )
        .unwrap();
        let err = config.collect_files(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }));
    }
}
