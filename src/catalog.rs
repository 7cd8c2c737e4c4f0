//! Word catalogs and break rule tables.
//!
//! Every tuned word list used by the line-breaking pipeline lives here so the
//! classifiers, the segmenter, the shift detector and the composer all read
//! the same data. The lists are tuned to a fixed corpus of Korean verses
//! rather than to Korean grammar in general.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Minimum length (in characters) of both words around a break point
pub const MIN_BREAK_WORD_LEN: usize = 4;

/// Punctuation that closes a clause (ASCII and full-width forms)
pub const CLAUSE_PUNCTUATION: &[char] = &[
    ',', '.', '!', '?', ';', ':', '，', '。', '！', '？', '；', '：',
];

/// Clause-initial connectives. A clause starting with one of these is glued
/// to the preceding line.
pub static CONNECTIVES: &[&str] = &[
    "그리하면", "그러면", "그러므로", "그러나", "하지만", "그리고", "따라서", "이에",
    "이제", "곧", "다시", "그런데", "그런즉", "한편", "또한", "또는",
];

/// Honorific-suffixed verb forms
static HONORIFIC_VERBS: &[&str] = &[
    "하시고", "하시며", "하시니", "하시어", "하시면", "하시는", "하신", "하시리라",
    "하시니라", "하시리", "하시어서",
];

/// Plain dictionary-form verbs
static PLAIN_VERBS: &[&str] = &[
    "하다", "되다", "있다", "없다", "이다", "아니다", "주다", "받다", "구하다", "보라",
    "오라", "가라",
];

/// Imperative-mood forms
static IMPERATIVE_VERBS: &[&str] = &[
    "하라", "구하라", "보라", "오라", "가라", "일어나라", "들으라", "보시라",
];

/// Connective-mood forms (and / because / if / while)
static CONNECTIVE_VERBS: &[&str] = &["하며", "하고", "하니", "하여", "하면", "하는", "한", "함"];

/// All head-verb forms, for whole-token lookup
pub static HEAD_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HONORIFIC_VERBS
        .iter()
        .chain(PLAIN_VERBS)
        .chain(IMPERATIVE_VERBS)
        .chain(CONNECTIVE_VERBS)
        .copied()
        .collect()
});

/// Conditional endings ("if / when")
pub static CONDITION_ENDINGS: &[&str] = &["만약", "만일", "만", "거든", "면", "으면", "한다면"];

/// Imperative endings
pub static COMMAND_ENDINGS: &[&str] = &[
    "하라", "구하라", "보라", "오라", "가라", "일어나라", "들으라",
];

/// Resultative connective endings ("therefore / so / thus")
pub static RESULT_ENDINGS: &[&str] = &[
    "그리하면", "그러면", "그러므로", "따라서", "이에", "이제", "그리하여",
];

/// Copula and existential forms, matched anywhere in a clause
pub static COPULAS: &[&str] = &["하다", "되다", "있다", "없다", "이다", "아니다"];

/// Interrogative endings
pub static QUESTION_ENDINGS: &[&str] = &["누구", "무엇", "어디", "언제", "어떻게", "왜", "어느"];

/// Keyword buckets compared by the similarity score
pub static SUBJECT_KEYWORDS: &[&str] = &[
    "하나님", "예수", "주", "그분", "너희", "우리", "그들", "이것", "저것",
];
pub static ACTION_KEYWORDS: &[&str] = &["주다", "받다", "구하다", "하시고", "하시며", "하시니"];
pub static RESULT_KEYWORDS: &[&str] = &["리라", "니라", "이다", "이라", "되리라", "하시리라"];
pub static CONDITION_KEYWORDS: &[&str] = &["만약", "만일", "거든", "면", "으면"];

/// Explicit subjects for subject-change detection
pub static EXPLICIT_SUBJECTS: &[&str] = &[
    "하나님", "예수", "주", "그분", "너희", "우리", "그들", "이것", "저것", "너", "나", "그",
    "그녀",
];

/// Subject-marking particles, matched at the end of a clause
pub static SUBJECT_MARKERS: &[&str] = &["은", "는", "이", "가"];

/// Giving / honorific action forms
pub static GIVING_ACTIONS: &[&str] = &[
    "주다", "받다", "구하다", "하시고", "하시며", "하시니", "하시어", "하시면", "하시는",
    "하신", "하시리라", "하시니라",
];

/// Command action forms
pub static COMMAND_ACTIONS: &[&str] = &[
    "보라", "오라", "가라", "하라", "구하라", "들으라", "보시라",
];

/// State action forms
pub static STATE_ACTIONS: &[&str] = &["있다", "없다", "이다", "아니다", "되다", "하다"];

/// A break rule: the current word ends with one of `endings` and the next
/// word starts with one of `next_starts`. An empty `next_starts` accepts any
/// next word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakRule {
    pub endings: &'static [&'static str],
    pub next_starts: &'static [&'static str],
}

impl BreakRule {
    /// Check the rule against a word pair (the length guard is applied by the caller)
    pub fn matches(&self, current: &str, next: &str) -> bool {
        ends_with_any(current, self.endings)
            && (self.next_starts.is_empty() || starts_with_any(next, self.next_starts))
    }
}

/// New subject: locative/topic ending followed by a pronoun, or an honorific
/// subject marker followed by a divine title
pub static SUBJECT_START_RULES: &[BreakRule] = &[
    BreakRule {
        endings: &["중에", "전의", "후에"],
        next_starts: &["너희", "너의", "그들의", "우리의"],
    },
    BreakRule {
        endings: &["께", "께서"],
        next_starts: &["하나님", "여호와", "주", "예수"],
    },
];

/// New action after a giving / honorific connective
pub static ACTION_START_RULES: &[BreakRule] = &[BreakRule {
    endings: &["주시고", "하시고", "하며"],
    next_starts: &["꾸짖지", "말씀하신", "되게"],
}];

/// Result connective after an imperative
pub static RESULT_START_RULES: &[BreakRule] = &[BreakRule {
    endings: &["구하라", "하라"],
    next_starts: &["그리하면", "그러면", "그러므로"],
}];

/// Command after a condition
pub static COMMAND_START_RULES: &[BreakRule] = &[BreakRule {
    endings: &["부족하거든", "하시는"],
    next_starts: &["하나님께", "구하라"],
}];

/// Extra pairs recognised only by forced segmentation, kept verbatim
pub static FORCED_BREAK_RULES: &[BreakRule] = &[
    BreakRule { endings: &["중에", "전의", "후에", "께서"], next_starts: &[] },
    BreakRule { endings: &["주시고", "하시고", "하며"], next_starts: &["꾸짖지", "말씀하신", "되게"] },
    BreakRule { endings: &["하시는"], next_starts: &["하나님께", "구하라"] },
    BreakRule { endings: &["구하라"], next_starts: &["그리하면", "그러면"] },
    BreakRule { endings: &["하시고"], next_starts: &["그", "너의", "너로"] },
    BreakRule { endings: &["부족하거든"], next_starts: &["모든", "하나님께"] },
    BreakRule { endings: &["주리니"], next_starts: &["너의", "그들의"] },
    BreakRule { endings: &["지혜가"], next_starts: &["부족하거든", "모든"] },
    BreakRule { endings: &["주시고"], next_starts: &["꾸짖지", "말씀하신"] },
    BreakRule { endings: &["하시고"], next_starts: &["그", "말씀하신"] },
];

/// Check whether a character closes a clause
pub fn is_clause_punct(c: char) -> bool {
    CLAUSE_PUNCTUATION.contains(&c)
}

pub fn ends_with_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.ends_with(p))
}

pub fn starts_with_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.starts_with(p))
}

pub fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// Check whether text begins with a connective
pub fn starts_with_connective(text: &str) -> bool {
    starts_with_any(text, CONNECTIVES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connective_catalog_size() {
        assert_eq!(CONNECTIVES.len(), 16);
        assert_eq!(FORCED_BREAK_RULES.len(), 10);
    }

    #[test]
    fn test_head_verb_set() {
        assert!(HEAD_VERBS.contains("하시리라"));
        assert!(HEAD_VERBS.contains("일어나라"));
        assert!(HEAD_VERBS.contains("함"));
        assert!(!HEAD_VERBS.contains("평탄하리라"));
    }

    #[test]
    fn test_break_rule_wildcard() {
        let rule = FORCED_BREAK_RULES[0];
        assert!(rule.matches("하나님께서", "아무말이나"));
        assert!(!rule.matches("하나님께", "아무말이나"));
    }

    #[test]
    fn test_break_rule_prefix() {
        let rule = RESULT_START_RULES[0];
        assert!(rule.matches("지혜를구하라", "그리하면"));
        assert!(!rule.matches("지혜를구하라", "평탄하리라"));
    }

    #[test]
    fn test_starts_with_connective() {
        assert!(starts_with_connective("그리하면 주시리라"));
        assert!(!starts_with_connective(" 그리하면"));
    }
}
