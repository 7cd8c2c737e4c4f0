//! Head-verb and clause-type classification.

use crate::catalog::{
    contains_any, ends_with_any, COMMAND_ENDINGS, CONDITION_ENDINGS, COPULAS, HEAD_VERBS,
    QUESTION_ENDINGS, RESULT_ENDINGS,
};
use crate::clause::ClauseType;

/// Check whether a whole token is a known predicate form
pub fn is_head_verb(word: &str) -> bool {
    HEAD_VERBS.contains(word)
}

/// Classify a clause from its text and head verb.
///
/// The first matching rule wins, in this order: condition, command, result,
/// statement, question. Ending checks see the text with surrounding
/// whitespace trimmed, so trailing punctuation hides an ending; the copula
/// check looks anywhere in the text.
pub fn classify_clause(text: &str, head_verb: Option<&str>) -> ClauseType {
    let core = text.trim();

    if ends_with_any(core, CONDITION_ENDINGS) {
        return ClauseType::Condition;
    }
    if ends_with_any(core, COMMAND_ENDINGS) {
        return ClauseType::Command;
    }
    if ends_with_any(core, RESULT_ENDINGS) {
        return ClauseType::Result;
    }
    if head_verb.is_some() || contains_any(text, COPULAS) {
        return ClauseType::Statement;
    }
    if ends_with_any(core, QUESTION_ENDINGS) {
        return ClauseType::Question;
    }

    ClauseType::Unknown
}
