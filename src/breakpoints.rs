//! Break-point predicates.
//!
//! Each predicate looks at a word and the word after it and decides whether
//! a new clause starts between them. All of them share a length guard: short
//! particles and endings are never break points.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    BreakRule, ACTION_START_RULES, COMMAND_START_RULES, FORCED_BREAK_RULES, MIN_BREAK_WORD_LEN,
    RESULT_START_RULES, SUBJECT_START_RULES,
};

/// Why a clause was closed without punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    Subject,
    Action,
    Result,
    Command,
    /// One of the extra pairs used by forced segmentation
    Forced,
}

/// Both words must be at least `MIN_BREAK_WORD_LEN` characters
fn passes_length_guard(current: &str, next: &str) -> bool {
    current.chars().count() >= MIN_BREAK_WORD_LEN && next.chars().count() >= MIN_BREAK_WORD_LEN
}

fn any_rule(rules: &[BreakRule], current: &str, next: &str) -> bool {
    passes_length_guard(current, next) && rules.iter().any(|r| r.matches(current, next))
}

/// A new subject or divine title starts with the next word
pub fn is_new_subject_start(current: &str, next: &str) -> bool {
    any_rule(SUBJECT_START_RULES, current, next)
}

/// A new action starts with the next word
pub fn is_new_action_start(current: &str, next: &str) -> bool {
    any_rule(ACTION_START_RULES, current, next)
}

/// A result connective follows an imperative
pub fn is_new_result_start(current: &str, next: &str) -> bool {
    any_rule(RESULT_START_RULES, current, next)
}

/// A command follows a condition
pub fn is_new_command_start(current: &str, next: &str) -> bool {
    any_rule(COMMAND_START_RULES, current, next)
}

/// Test the four shared predicates in order
pub fn clause_break(current: &str, next: &str) -> Option<BreakKind> {
    if is_new_subject_start(current, next) {
        Some(BreakKind::Subject)
    } else if is_new_action_start(current, next) {
        Some(BreakKind::Action)
    } else if is_new_result_start(current, next) {
        Some(BreakKind::Result)
    } else if is_new_command_start(current, next) {
        Some(BreakKind::Command)
    } else {
        None
    }
}

/// The forced-segmentation predicate: the shared predicates plus the extra pairs
pub fn forced_break(current: &str, next: &str) -> Option<BreakKind> {
    clause_break(current, next).or_else(|| {
        any_rule(FORCED_BREAK_RULES, current, next).then_some(BreakKind::Forced)
    })
}
