//! Clause representation for verse text.
//!
//! A Clause is a maximal run of text treated as one semantic unit when
//! deciding where lines break.

use serde::{Deserialize, Serialize};

use crate::catalog::starts_with_connective;
use crate::classify::{classify_clause, is_head_verb};
use crate::segmenter::{tokenize, TokenKind};

/// Coarse grammatical role of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseType {
    /// Ends with an "if / when" marker
    Condition,
    /// Ends with an imperative
    Command,
    /// Ends with a "therefore / so" connective
    Result,
    /// Carries a head verb or a copula
    Statement,
    /// Ends with an interrogative word
    Question,
    #[default]
    Unknown,
}

impl ClauseType {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Condition => "CONDITION",
            ClauseType::Command => "COMMAND",
            ClauseType::Result => "RESULT",
            ClauseType::Statement => "STATEMENT",
            ClauseType::Question => "QUESTION",
            ClauseType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ClauseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clause produced by the segmenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// The exact text consumed, separators and punctuation included
    pub text: String,

    /// Non-whitespace tokens in source order
    pub words: Vec<String>,

    /// The last head-verb token seen while building the clause
    pub head_verb: Option<String>,

    /// Assigned once from `text` and `head_verb`
    pub semantic_type: ClauseType,
}

impl Clause {
    /// Build a clause from its parts, classifying it
    pub fn new(text: String, words: Vec<String>, head_verb: Option<String>) -> Self {
        let semantic_type = classify_clause(&text, head_verb.as_deref());
        Clause {
            text,
            words,
            head_verb,
            semantic_type,
        }
    }

    /// Build a clause from raw text, tokenizing it the same way the segmenter does
    pub fn from_text(text: &str) -> Self {
        let words: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Space)
            .map(|t| t.text.to_string())
            .collect();
        let head_verb = words.iter().rev().find(|w| is_head_verb(w)).cloned();
        Clause::new(text.to_string(), words, head_verb)
    }

    /// The text with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if this clause begins with a connective
    pub fn is_connective(&self) -> bool {
        starts_with_connective(self.text.trim_start())
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.trimmed(), self.semantic_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let clause = Clause::from_text("지혜를 구하라");
        assert_eq!(clause.words, vec!["지혜를", "구하라"]);
        assert_eq!(clause.head_verb.as_deref(), Some("구하라"));
        assert_eq!(clause.semantic_type, ClauseType::Command);
    }

    #[test]
    fn test_last_head_verb_wins() {
        let clause = Clause::from_text("하시고 하라");
        assert_eq!(clause.head_verb.as_deref(), Some("하라"));
    }

    #[test]
    fn test_connective_ignores_leading_space() {
        let clause = Clause::from_text(" 그리하면 주시리라");
        assert!(clause.is_connective());
    }

    #[test]
    fn test_clause_type_serde() {
        let json = serde_json::to_string(&ClauseType::Condition).unwrap();
        assert_eq!(json, "\"CONDITION\"");
    }

    #[test]
    fn test_clause_display() {
        let clause = Clause::from_text("지혜를 구하라");
        assert_eq!(format!("{}", clause), "지혜를 구하라/COMMAND");
    }
}
