//! # verse-card
//!
//! Meaning-aware line breaking for Korean scripture verse cards.
//!
//! A verse is split into clauses with punctuation and keyword heuristics,
//! adjacent clauses are compared to decide where the meaning shifts, and the
//! clauses are packed into short lines that follow the reading rhythm rather
//! than a fixed character count.
//!
//! ## Quick Start
//!
//! ```rust
//! use verse_card::VerseFormatter;
//!
//! let mut formatter = VerseFormatter::new();
//! let card = formatter.format(
//!     "너희 중에 누구든지 지혜가 부족하거든 모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라",
//!     15,
//! );
//!
//! for line in card.lines() {
//!     println!("{}", line);
//! }
//! ```
//!
//! ## Drawing Verses
//!
//! Verses can be drawn in a shuffled order that is remembered between runs:
//!
//! ```rust
//! use verse_card::{MemoryStore, ShuffleDeck, Verse, VerseStore};
//!
//! let verses = VerseStore::new(vec![Verse {
//!     content: "태초에 하나님이 천지를 창조하시니라".to_string(),
//!     reference: "창세기 1:1".to_string(),
//! }]);
//! let mut deck = ShuffleDeck::new(MemoryStore::default());
//! let verse = verses.next_verse(&mut deck).unwrap();
//! assert_eq!(verse.reference, "창세기 1:1");
//! ```

pub mod breakpoints;
pub mod catalog;
pub mod classify;
pub mod clause;
pub mod composer;
pub mod config;
pub mod error;
pub mod fallback;
pub mod formatter;
pub mod segmenter;
pub mod shift;
pub mod shuffle;
pub mod verse;

// Re-export main types for convenience
pub use breakpoints::BreakKind;
pub use classify::{classify_clause, is_head_verb};
pub use clause::{Clause, ClauseType};
pub use composer::{compose, refine};
pub use config::Config;
pub use error::{Error, Result};
pub use fallback::wrap_by_length;
pub use formatter::{
    format_verse, layout_verse, normalize_input, strip_line_break_markup, to_line_break_markup,
    CacheKey, FormatCache, FormatStats, Layout, NoCache, SharedCache, VerseFormatter,
    CARD_MAX_LENGTH, DEFAULT_MAX_LENGTH,
};
pub use segmenter::segment;
pub use shift::detect_breaks;
pub use shuffle::{JsonFileStore, KeyValueStore, MemoryStore, OsRandom, RandomSource, ShuffleDeck};
pub use verse::{Verse, VerseStore};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let text = "너희 중에 누구든지 지혜가 부족하거든 모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라";

        let clauses = segment(text);
        assert_eq!(clauses.len(), 2);

        let breaks = detect_breaks(&clauses);
        assert!(breaks.contains(&1));

        let lines = compose(&clauses, &breaks, 15);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "하나님께 구하라");

        assert_eq!(refine(&lines), format_verse(text, 15));
    }

    #[test]
    fn test_pipeline_stages_agree_with_formatter() {
        let text = "하나님께서 너희에게 지혜를 구하라. 그리하면 너의 길이 평탄하리라.";
        let mut formatter = VerseFormatter::new();
        assert_eq!(formatter.format(text, 15), format_verse(text, 15));
    }
}
