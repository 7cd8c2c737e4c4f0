//! Clause segmentation for verse text.
//!
//! Text is split into word, punctuation and whitespace tokens, which are then
//! folded into clauses by a two-state machine. A clause closes on punctuation
//! or when one of the break-point predicates fires between a word and the
//! next word. Input that yields a single clause goes through forced
//! segmentation.

use tracing::debug;

use crate::breakpoints::{clause_break, forced_break, BreakKind};
use crate::catalog::{is_clause_punct, starts_with_connective};
use crate::classify::is_head_verb;
use crate::clause::Clause;

/// The kind of a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of non-space, non-punctuation characters
    Word,
    /// A single clause punctuation character
    Punct,
    /// A run of whitespace
    Space,
}

/// A raw token borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

fn char_kind(c: char) -> TokenKind {
    if c.is_whitespace() {
        TokenKind::Space
    } else if is_clause_punct(c) {
        TokenKind::Punct
    } else {
        TokenKind::Word
    }
}

/// Split text into word, punctuation and whitespace tokens.
///
/// Every punctuation character is its own token; whitespace and word
/// characters are grouped into runs. Concatenating the tokens gives back the
/// input.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenKind> = None;

    for (i, c) in text.char_indices() {
        let kind = char_kind(c);
        match current {
            Some(prev) if prev == kind && kind != TokenKind::Punct => {}
            Some(prev) => {
                tokens.push(Token { text: &text[start..i], kind: prev });
                start = i;
                current = Some(kind);
            }
            None => {
                start = i;
                current = Some(kind);
            }
        }
    }

    if let Some(kind) = current {
        tokens.push(Token { text: &text[start..], kind });
    }

    tokens
}

/// Why the current clause is closed after a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    Punctuation,
    BreakPoint(BreakKind),
}

/// Decide whether a clause closes after `token`, given the next
/// non-whitespace token
pub fn flush_reason(token: &Token<'_>, next: Option<&Token<'_>>) -> Option<FlushReason> {
    match token.kind {
        TokenKind::Space => None,
        TokenKind::Punct => Some(FlushReason::Punctuation),
        TokenKind::Word => next
            .and_then(|n| clause_break(token.text, n.text))
            .map(FlushReason::BreakPoint),
    }
}

/// The clause being built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseBuffer {
    text: String,
    words: Vec<String>,
    head_verb: Option<String>,
}

impl ClauseBuffer {
    fn push(&mut self, token: &Token<'_>) {
        self.text.push_str(token.text);
        if token.kind == TokenKind::Space {
            return;
        }
        self.words.push(token.text.to_string());
        if is_head_verb(token.text) {
            self.head_verb = Some(token.text.to_string());
        }
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn into_clause(self) -> Clause {
        Clause::new(self.text, self.words, self.head_verb)
    }
}

/// Segmenter state between tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmenterState {
    /// No clause is open
    Flushed,
    /// Tokens are being collected into a clause
    Accumulating(ClauseBuffer),
}

/// Absorb one token. Returns the next state and the clause closed by this
/// token, if any.
pub fn transition(
    state: SegmenterState,
    token: &Token<'_>,
    next: Option<&Token<'_>>,
) -> (SegmenterState, Option<Clause>) {
    let mut buffer = match state {
        SegmenterState::Flushed => ClauseBuffer::default(),
        SegmenterState::Accumulating(buffer) => buffer,
    };
    buffer.push(token);

    match flush_reason(token, next) {
        Some(_) if buffer.is_blank() => (SegmenterState::Flushed, None),
        Some(_) => (SegmenterState::Flushed, Some(buffer.into_clause())),
        None => (SegmenterState::Accumulating(buffer), None),
    }
}

/// Split text into clauses, falling back to forced segmentation when only
/// one clause is found
pub fn segment(text: &str) -> Vec<Clause> {
    let tokens = tokenize(text);
    let mut clauses = Vec::new();
    let mut state = SegmenterState::Flushed;

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens[i + 1..].iter().find(|t| t.kind != TokenKind::Space);
        let (next_state, closed) = transition(state, token, next);
        state = next_state;
        clauses.extend(closed);
    }

    if let SegmenterState::Accumulating(buffer) = state {
        if !buffer.is_blank() {
            clauses.push(buffer.into_clause());
        }
    }

    if clauses.len() == 1 {
        if let Some(single) = clauses.pop() {
            return force_segmentation(single);
        }
    }

    clauses
}

/// Re-split a lone clause on connectives, or failing that on the forced
/// break-point pairs. Returns the clause unchanged if neither produces more
/// than one segment.
pub fn force_segmentation(clause: Clause) -> Vec<Clause> {
    let segments = split_on_connectives(&clause.text)
        .unwrap_or_else(|| split_on_break_points(&clause.text));

    if segments.len() < 2 {
        return vec![clause];
    }

    debug!(segments = segments.len(), "forced segmentation split clause");
    segments.iter().map(|s| Clause::from_text(s)).collect()
}

/// Split before every word that begins with a connective. `None` if there is
/// no such word.
fn split_on_connectives(text: &str) -> Option<Vec<String>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if !words.iter().any(|w| starts_with_connective(w)) {
        return None;
    }

    let mut segments = Vec::new();
    let mut current = String::new();

    for word in words {
        if starts_with_connective(word) && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        segments.push(current);
    }

    Some(segments)
}

/// Split after every word where the forced predicate fires
fn split_on_break_points(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut segments = Vec::new();
    let mut current = String::new();

    for (i, word) in words.iter().enumerate() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);

        if let Some(next) = words.get(i + 1) {
            if forced_break(word, next).is_some() {
                segments.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
