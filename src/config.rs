// File: src/config.rs
use crate::core::lexicon::Lexicon;
use crate::error::Result;
use crate::persistence::load_snapshot;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming a lexicon file to use instead of the bundled one.
pub const LEXICON_PATH_ENV: &str = "SENTIMENT_LEXICON_PATH";

/// File extension that marks a compiled lexicon snapshot.
pub const SNAPSHOT_EXTENSION: &str = "bin";

/// Where the engine gets its lexicon from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexiconSource {
    #[default]
    Bundled,
    /// Tab-separated text lexicon.
    Text(PathBuf),
    /// Snapshot written by `persistence::save_snapshot`.
    Snapshot(PathBuf),
}

impl LexiconSource {
    /// Picks the format from the file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_snapshot = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION));
        if is_snapshot {
            LexiconSource::Snapshot(path)
        } else {
            LexiconSource::Text(path)
        }
    }

    pub fn load(&self) -> Result<Lexicon> {
        match self {
            LexiconSource::Bundled => Lexicon::bundled(),
            LexiconSource::Text(path) => Lexicon::from_path(path),
            LexiconSource::Snapshot(path) => load_snapshot(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LexiconSource::Bundled => "bundled".to_string(),
            LexiconSource::Text(path) | LexiconSource::Snapshot(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub lexicon: LexiconSource,
}

impl EngineConfig {
    /// Reads `SENTIMENT_LEXICON_PATH`; unset or blank means the bundled lexicon.
    pub fn from_env() -> Self {
        Self::from_var(std::env::var_os(LEXICON_PATH_ENV))
    }

    fn from_var(value: Option<OsString>) -> Self {
        let lexicon = match value {
            Some(raw) if !raw.to_string_lossy().trim().is_empty() => LexiconSource::from_path(raw),
            _ => LexiconSource::Bundled,
        };
        Self { lexicon }
    }

    pub fn with_lexicon_path(mut self, path: &Path) -> Self {
        self.lexicon = LexiconSource::from_path(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_variable_means_bundled() {
        assert_eq!(EngineConfig::from_var(None).lexicon, LexiconSource::Bundled);
        assert_eq!(
            EngineConfig::from_var(Some(OsString::from("  "))).lexicon,
            LexiconSource::Bundled
        );
    }

    #[test]
    fn extension_selects_the_format() {
        let config = EngineConfig::from_var(Some(OsString::from("/tmp/lex.BIN")));
        assert_eq!(config.lexicon, LexiconSource::Snapshot(PathBuf::from("/tmp/lex.BIN")));

        let config = EngineConfig::default().with_lexicon_path(Path::new("vader_lexicon.txt"));
        assert_eq!(config.lexicon, LexiconSource::Text(PathBuf::from("vader_lexicon.txt")));
    }

    #[test]
    fn bundled_source_loads() {
        let lexicon = LexiconSource::Bundled.load().unwrap();
        assert!(!lexicon.is_empty());
        assert_eq!(LexiconSource::Bundled.describe(), "bundled");
    }
}
