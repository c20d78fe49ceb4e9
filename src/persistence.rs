// File: src/persistence.rs
use crate::core::lexicon::Lexicon;
use crate::error::{EngineError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error, ErrorKind};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Bumped whenever the snapshot layout changes.
const SNAPSHOT_VERSION: u32 = 1;

/// What actually goes to disk: the lexicon plus a format version.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableLexicon {
    version: u32,
    lexicon: Lexicon,
}

/// Writes a compiled lexicon next to `path` and renames it into place, so a
/// reader never sees a half-written snapshot.
pub fn save_snapshot(lexicon: &Lexicon, path: &Path) -> std::result::Result<(), Error> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let state = SerializableLexicon {
        version: SNAPSHOT_VERSION,
        lexicon: lexicon.clone(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let writer = BufWriter::new(&temp_file);
        bincode::serialize_into(writer, &state).map_err(|e| Error::new(ErrorKind::Other, e))?;
    }

    temp_file.persist(path)?;
    debug!(path = %path.display(), words = lexicon.len(), "lexicon snapshot written");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Lexicon> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| EngineError::unavailable(&origin, e))?;
    let reader = BufReader::new(file);
    let state: SerializableLexicon =
        bincode::deserialize_from(reader).map_err(|e| EngineError::unavailable(&origin, e))?;

    if state.version != SNAPSHOT_VERSION {
        let mismatch = bincode::ErrorKind::Custom(format!(
            "snapshot version {} (expected {})",
            state.version, SNAPSHOT_VERSION
        ));
        return Err(EngineError::unavailable(&origin, Box::new(mismatch) as bincode::Error));
    }

    let lexicon = state.lexicon.ensure_usable(&origin)?;
    debug!(origin = %origin, words = lexicon.len(), "lexicon snapshot loaded");
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadFailure;

    #[test]
    fn snapshot_preserves_words_and_idioms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lexicon.bin");
        let lexicon = Lexicon::bundled().unwrap();

        save_snapshot(&lexicon, &path).unwrap();
        let restored = load_snapshot(&path).unwrap();

        assert_eq!(restored.len(), lexicon.len());
        assert_eq!(restored.lookup("love"), Some(3.2));
        assert_eq!(restored.idiom("yeah right"), Some(-2.0));
    }

    #[test]
    fn garbage_snapshot_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.bin");
        fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xff\xff").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(
            err,
            EngineError::LexiconUnavailable { cause: LoadFailure::Snapshot(_), .. }
        ));
    }

    #[test]
    fn missing_snapshot_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::LexiconUnavailable { cause: LoadFailure::Io(_), .. }
        ));
    }
}
