// src/core/mod.rs

pub mod classifier;
pub mod engine;
pub mod lexicon;
pub mod modifiers;
pub mod scorer;
pub mod tokenizer;
pub mod trie;
pub mod types;
