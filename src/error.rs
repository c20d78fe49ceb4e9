// File: src/error.rs
use thiserror::Error;

/// The only error the engine surfaces to its callers.
///
/// Anything that goes wrong while scoring a row is absorbed by the batch
/// layer; this is strictly an initialisation failure and means no scoring
/// can happen with this configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("lexicon unavailable ({origin}): {cause}")]
    LexiconUnavailable {
        /// Where the lexicon was being loaded from (a path or "bundled").
        origin: String,
        #[source]
        cause: LoadFailure,
    },
}

impl EngineError {
    pub(crate) fn unavailable(origin: impl Into<String>, cause: impl Into<LoadFailure>) -> Self {
        EngineError::LexiconUnavailable {
            origin: origin.into(),
            cause: cause.into(),
        }
    }
}

/// Why a lexicon or modifier resource could not be used.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("could not read resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot could not be decoded: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("resource contains no usable entries")]
    Empty,

    #[error("'{word}' appears in more than one modifier set")]
    OverlappingModifiers { word: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
