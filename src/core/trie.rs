// --- File: src/core/trie.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- PhraseTrie: multi-word phrases keyed word by word ---

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PhraseNode<V> {
    children: HashMap<String, usize>,
    value: Option<V>,
}

impl<V> PhraseNode<V> {
    fn new() -> Self {
        Self { children: HashMap::new(), value: None }
    }
}

/// A trie over normalized words, used to find idioms and booster phrases
/// such as "kiss of death" or "kind of" in a token stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseTrie<V> {
    nodes: Vec<PhraseNode<V>>,
    longest: usize,
    len: usize,
}

impl<V> Default for PhraseTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PhraseTrie<V> {
    pub fn new() -> Self {
        Self { nodes: vec![PhraseNode::new()], longest: 0, len: 0 }
    }

    /// Number of phrases stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Word count of the longest stored phrase.
    pub fn longest(&self) -> usize {
        self.longest
    }

    /// Inserts a phrase, splitting it on whitespace. Re-inserting a phrase
    /// replaces its value. Blank phrases are ignored.
    /// O(k) complexity where k is the number of words.
    pub fn insert(&mut self, phrase: &str, value: V) {
        let mut node_idx = 0;
        let mut depth = 0;
        for word in phrase.split_whitespace() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(word) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(PhraseNode::new());
                self.nodes[node_idx].children.insert(word.to_string(), new_node_id);
                new_node_id
            };
            node_idx = next_idx;
            depth += 1;
        }
        if depth == 0 {
            return;
        }
        if self.nodes[node_idx].value.replace(value).is_none() {
            self.len += 1;
        }
        self.longest = self.longest.max(depth);
    }

    /// Exact lookup of a whole phrase.
    pub fn get(&self, phrase: &str) -> Option<&V> {
        let mut node_idx = 0;
        for word in phrase.split_whitespace() {
            node_idx = *self.nodes[node_idx].children.get(word)?;
        }
        if node_idx == 0 {
            return None;
        }
        self.nodes[node_idx].value.as_ref()
    }

    /// Finds the longest phrase that starts at the beginning of `words`,
    /// returning how many words it spans together with its value.
    pub fn longest_prefix_match<S: AsRef<str>>(&self, words: &[S]) -> Option<(usize, &V)> {
        let mut node_idx = 0;
        let mut best = None;
        for (depth, word) in words.iter().enumerate() {
            match self.nodes[node_idx].children.get(word.as_ref()) {
                Some(&next_idx) => node_idx = next_idx,
                None => break,
            }
            if let Some(value) = &self.nodes[node_idx].value {
                best = Some((depth + 1, value));
            }
        }
        best
    }

    /// Finds the longest phrase of at least two words that ends exactly at
    /// the end of `words`.
    pub fn longest_suffix_match<S: AsRef<str>>(&self, words: &[S]) -> Option<(usize, &V)> {
        let max = self.longest.min(words.len());
        (2..=max).rev().find_map(|span| {
            let tail = &words[words.len() - span..];
            match self.longest_prefix_match(tail) {
                Some((matched, value)) if matched == span => Some((span, value)),
                _ => None,
            }
        })
    }
}
