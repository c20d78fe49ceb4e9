// src/lib.rs

pub mod batch;
pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod persistence;

pub use crate::batch::{BatchAggregator, BatchReport, Cell, RowResult, SummaryCounts};
pub use crate::config::{EngineConfig, LexiconSource};
pub use crate::core::classifier::{classify, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use crate::core::engine::SentimentEngine;
pub use crate::core::lexicon::Lexicon;
pub use crate::core::modifiers::ModifierSets;
pub use crate::core::types::{AnalysisOutput, Label, PolarityScores, SentimentResult};
pub use crate::error::{EngineError, LoadFailure};
