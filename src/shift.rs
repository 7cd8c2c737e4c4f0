//! Semantic shift detection between adjacent clauses.
//!
//! For every clause after the first, a similarity score and a handful of
//! change signals decide whether a line break goes in front of it. The score
//! is a weighted blend of lexical, keyword and structural similarity; the
//! signals are type change, a new head verb, and subject or action change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    contains_any, ends_with_any, ACTION_KEYWORDS, COMMAND_ACTIONS, CONDITION_KEYWORDS,
    EXPLICIT_SUBJECTS, GIVING_ACTIONS, RESULT_KEYWORDS, STATE_ACTIONS, SUBJECT_KEYWORDS,
    SUBJECT_MARKERS,
};
use crate::clause::Clause;

/// Below this similarity a break is inserted
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Words shorter than this are ignored by lexical overlap
const MEANINGFUL_WORD_LEN: usize = 4;

const LEXICAL_WEIGHT: f64 = 0.3;
const KEYWORD_WEIGHT: f64 = 0.4;
const STRUCTURAL_WEIGHT: f64 = 0.3;

/// Semantic keyword buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Keyword {
    Subject,
    Action,
    Result,
    Condition,
}

/// Subject signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubjectSignal {
    ExplicitSubject,
    SubjectMarker,
}

/// Action signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionSignal {
    Giving,
    Command,
    State,
}

/// Every signal computed for one clause pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftSignals {
    pub similarity: f64,
    pub type_change: bool,
    pub new_head_verb: bool,
    pub is_connective: bool,
    pub subject_change: bool,
    pub action_change: bool,
}

impl ShiftSignals {
    /// Compute the signals between `prev` and `current`
    pub fn between(prev: &Clause, current: &Clause) -> Self {
        ShiftSignals {
            similarity: semantic_similarity(prev, current),
            type_change: prev.semantic_type != current.semantic_type,
            new_head_verb: match (&prev.head_verb, &current.head_verb) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(p), Some(c)) => p != c,
            },
            is_connective: current.is_connective(),
            subject_change: disjoint_signals(
                &subject_signals(&prev.text),
                &subject_signals(&current.text),
            ),
            action_change: disjoint_signals(
                &action_signals(&prev.text),
                &action_signals(&current.text),
            ),
        }
    }

    /// A connective clause never breaks; otherwise any signal breaks
    pub fn is_break(&self) -> bool {
        !self.is_connective
            && (self.similarity < SIMILARITY_THRESHOLD
                || self.type_change
                || self.new_head_verb
                || self.subject_change
                || self.action_change)
    }
}

/// Indices of clauses that start a new line
pub fn detect_breaks(clauses: &[Clause]) -> BTreeSet<usize> {
    (1..clauses.len())
        .filter(|&i| ShiftSignals::between(&clauses[i - 1], &clauses[i]).is_break())
        .collect()
}

/// Weighted similarity between two clauses, in `[0, 1]`
pub fn semantic_similarity(a: &Clause, b: &Clause) -> f64 {
    LEXICAL_WEIGHT * lexical_overlap(a, b)
        + KEYWORD_WEIGHT * keyword_overlap(&semantic_keywords(&a.text), &semantic_keywords(&b.text))
        + STRUCTURAL_WEIGHT * structural_similarity(a, b)
}

/// Shared meaningful words over the larger meaningful word count
pub fn lexical_overlap(a: &Clause, b: &Clause) -> f64 {
    fn meaningful(c: &Clause) -> Vec<&str> {
        c.words
            .iter()
            .map(String::as_str)
            .filter(|w| w.chars().count() >= MEANINGFUL_WORD_LEN)
            .collect()
    }
    let words_a = meaningful(a);
    let words_b = meaningful(b);

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let common = words_a.iter().filter(|w| words_b.contains(w)).count();
    common as f64 / words_a.len().max(words_b.len()) as f64
}

/// Keyword buckets present in a text
pub fn semantic_keywords(text: &str) -> BTreeSet<Keyword> {
    let mut keywords = BTreeSet::new();
    if contains_any(text, SUBJECT_KEYWORDS) {
        keywords.insert(Keyword::Subject);
    }
    if contains_any(text, ACTION_KEYWORDS) {
        keywords.insert(Keyword::Action);
    }
    if contains_any(text, RESULT_KEYWORDS) {
        keywords.insert(Keyword::Result);
    }
    if contains_any(text, CONDITION_KEYWORDS) {
        keywords.insert(Keyword::Condition);
    }
    keywords
}

/// 1.0 when neither side has keywords, 0.0 when only one does
pub fn keyword_overlap(a: &BTreeSet<Keyword>, b: &BTreeSet<Keyword>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => a.intersection(b).count() as f64 / a.len().max(b.len()) as f64,
    }
}

/// Head-verb presence, length ratio and clause type agreement
pub fn structural_similarity(a: &Clause, b: &Clause) -> f64 {
    let mut similarity = 0.0;

    if a.head_verb.is_some() == b.head_verb.is_some() {
        similarity += 0.3;
    }

    let (len_a, len_b) = (a.char_len(), b.char_len());
    let longer = len_a.max(len_b);
    let ratio = if longer == 0 {
        1.0
    } else {
        len_a.min(len_b) as f64 / longer as f64
    };
    similarity += ratio * 0.2;

    if a.semantic_type == b.semantic_type {
        similarity += 0.5;
    }

    similarity
}

pub fn subject_signals(text: &str) -> BTreeSet<SubjectSignal> {
    let mut signals = BTreeSet::new();
    if contains_any(text, EXPLICIT_SUBJECTS) {
        signals.insert(SubjectSignal::ExplicitSubject);
    }
    if ends_with_any(text.trim(), SUBJECT_MARKERS) {
        signals.insert(SubjectSignal::SubjectMarker);
    }
    signals
}

pub fn action_signals(text: &str) -> BTreeSet<ActionSignal> {
    let mut signals = BTreeSet::new();
    if contains_any(text, GIVING_ACTIONS) {
        signals.insert(ActionSignal::Giving);
    }
    if contains_any(text, COMMAND_ACTIONS) {
        signals.insert(ActionSignal::Command);
    }
    if contains_any(text, STATE_ACTIONS) {
        signals.insert(ActionSignal::State);
    }
    signals
}

/// True only when both sides have signals and none are shared
fn disjoint_signals<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> bool {
    !a.is_empty() && !b.is_empty() && a.is_disjoint(b)
}
