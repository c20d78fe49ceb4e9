// File: src/core/tokenizer.rs
use crate::core::types::{Token, TokenKind};

fn is_emphasis(c: char) -> bool {
    c == '!' || c == '?'
}

/// Splits text into word tokens and `!`/`?` emphasis runs.
///
/// Surrounding punctuation is stripped from each whitespace-separated chunk
/// unless that would leave two characters or fewer: this keeps emoticons
/// such as ":)" and "<3" intact. Any `!`/`?` found in the stripped edges
/// becomes an emphasis token, so "(good!!!)" still carries its three marks.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for chunk in text.split_whitespace() {
        let stripped = chunk.trim_matches(|c: char| c.is_ascii_punctuation());
        if stripped.chars().count() <= 2 {
            let core = chunk.trim_matches(is_emphasis);
            if core.is_empty() {
                push(&mut tokens, chunk, TokenKind::Emphasis);
                continue;
            }
            let start = chunk.len() - chunk.trim_start_matches(is_emphasis).len();
            push(&mut tokens, &chunk[..start], TokenKind::Emphasis);
            push(&mut tokens, core, TokenKind::Word);
            push(&mut tokens, &chunk[start + core.len()..], TokenKind::Emphasis);
            continue;
        }

        let start = chunk.len() - chunk.trim_start_matches(|c: char| c.is_ascii_punctuation()).len();
        push_emphasis(&mut tokens, &chunk[..start]);
        push(&mut tokens, stripped, TokenKind::Word);
        push_emphasis(&mut tokens, &chunk[start + stripped.len()..]);
    }

    tokens
}

/// Emits the longest `!`/`?` run inside a stripped edge such as `!!!.` or `?")`.
fn push_emphasis<'a>(tokens: &mut Vec<Token<'a>>, edge: &'a str) {
    let run = edge
        .split(|c: char| !is_emphasis(c))
        .max_by_key(|run| run.len())
        .unwrap_or("");
    push(tokens, run, TokenKind::Emphasis);
}

fn push<'a>(tokens: &mut Vec<Token<'a>>, raw: &'a str, kind: TokenKind) {
    if raw.is_empty() {
        return;
    }
    tokens.push(Token {
        raw,
        normalized: raw.to_lowercase(),
        index: tokens.len(),
        kind,
    });
}
