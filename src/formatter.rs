//! Verse formatting for cards.
//!
//! This module ties the pipeline together: markup stripping and
//! normalization, clause segmentation, shift detection, line composition and
//! rhythm refinement. Results are memoized through a [`FormatCache`] owned by
//! the caller.

use std::collections::{BTreeSet, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::clause::Clause;
use crate::composer::{compose, refine};
use crate::fallback::wrap_by_length;
use crate::segmenter::segment;
use crate::shift::detect_breaks;

/// Default maximum line length in characters
pub const DEFAULT_MAX_LENGTH: usize = 15;

/// Line length used when rendering a card
pub const CARD_MAX_LENGTH: usize = 25;

/// `<br>`, `<br/>`, `<BR />` and friends
static LINE_BREAK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid regex"));

/// Remove every line-break tag, including ones that only appear once an
/// inner tag has been removed
pub fn strip_line_break_markup(text: &str) -> String {
    let mut stripped = text.to_string();
    while LINE_BREAK_TAG.is_match(&stripped) {
        stripped = LINE_BREAK_TAG.replace_all(&stripped, "").into_owned();
    }
    stripped
}

/// Normalize raw input: strip markup, NFC-normalize, collapse whitespace and trim
pub fn normalize_input(text: &str) -> String {
    let stripped = strip_line_break_markup(text);
    let normalized: String = stripped.nfc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert formatted output into markup for display
pub fn to_line_break_markup(formatted: &str) -> String {
    formatted.replace('\n', "<br>")
}

/// Run the full pipeline without a cache
pub fn format_verse(text: &str, max_length: usize) -> String {
    layout_verse(text, max_length).render()
}

/// Every stage of one pipeline run over a verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub clauses: Vec<Clause>,
    /// Indices of clauses that start a new line
    pub breaks: BTreeSet<usize>,
    /// Composed lines before rhythm refinement
    pub lines: Vec<String>,
}

impl Layout {
    /// Refine the composed lines into the final newline-separated card
    pub fn render(&self) -> String {
        refine(&self.lines)
    }
}

/// Run the pipeline without a cache and keep the intermediate stages
pub fn layout_verse(text: &str, max_length: usize) -> Layout {
    build_layout(&normalize_input(text), max_length, &mut FormatStats::default())
}

fn build_layout(clean: &str, max_length: usize, stats: &mut FormatStats) -> Layout {
    debug!(text = clean, max_length, "formatting verse");

    stats.segmentations += 1;
    let clauses = segment(clean);
    debug!(clauses = clauses.len(), "segmented clauses");

    let breaks = detect_breaks(&clauses);
    debug!(?breaks, "semantic breaks");

    let lines = compose(&clauses, &breaks, max_length);
    debug!(?lines, "composed lines");

    Layout {
        clauses,
        breaks,
        lines,
    }
}

/// Cache key: normalized text and line length
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub max_length: usize,
}

/// Storage for formatted results
pub trait FormatCache {
    fn get(&self, key: &CacheKey) -> Option<String>;
    fn insert(&mut self, key: CacheKey, value: String);
}

impl FormatCache for HashMap<CacheKey, String> {
    fn get(&self, key: &CacheKey) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn insert(&mut self, key: CacheKey, value: String) {
        HashMap::insert(self, key, value);
    }
}

/// A cache that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl FormatCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<String> {
        None
    }

    fn insert(&mut self, _key: CacheKey, _value: String) {}
}

/// A cache that can be shared between formatters on different threads.
///
/// Lookup and insert take the lock separately; two threads missing on the
/// same key both compute the same value.
#[derive(Debug, Clone, Default)]
pub struct SharedCache {
    inner: Arc<Mutex<HashMap<CacheKey, String>>>,
}

impl SharedCache {
    pub fn new() -> Self {
        SharedCache::default()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FormatCache for SharedCache {
    fn get(&self, key: &CacheKey) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn insert(&mut self, key: CacheKey, value: String) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }
}

/// Counters for cache behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatStats {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Number of times the segmenter ran
    pub segmentations: usize,
}

/// The memoizing verse formatter
pub struct VerseFormatter<C: FormatCache = HashMap<CacheKey, String>> {
    cache: C,
    stats: FormatStats,
}

impl VerseFormatter {
    /// Create a formatter with a fresh in-memory cache
    pub fn new() -> Self {
        VerseFormatter::with_cache(HashMap::new())
    }
}

impl Default for VerseFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FormatCache> VerseFormatter<C> {
    /// Create a formatter backed by the given cache
    pub fn with_cache(cache: C) -> Self {
        VerseFormatter {
            cache,
            stats: FormatStats::default(),
        }
    }

    /// Format a verse into newline-separated lines of roughly `max_length`
    /// characters
    pub fn format(&mut self, text: &str, max_length: usize) -> String {
        let key = CacheKey {
            text: normalize_input(text),
            max_length,
        };

        if let Some(cached) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            return cached;
        }

        self.stats.cache_misses += 1;
        let result = build_layout(&key.text, max_length, &mut self.stats).render();
        debug!(result = result.as_str(), "refined");
        self.cache.insert(key, result.clone());
        result
    }

    /// Format with `DEFAULT_MAX_LENGTH`
    pub fn format_default(&mut self, text: &str) -> String {
        self.format(text, DEFAULT_MAX_LENGTH)
    }

    /// Format, falling back to plain length wrapping if the pipeline panics
    pub fn format_or_fallback(&mut self, text: &str, max_length: usize) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| self.format(text, max_length))) {
            Ok(formatted) => formatted,
            Err(_) => {
                warn!("verse formatting failed, wrapping by length");
                wrap_by_length(text, max_length)
            }
        }
    }

    pub fn stats(&self) -> FormatStats {
        self.stats
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_variants() {
        assert_eq!(strip_line_break_markup("가<br>나<BR/>다<br />라"), "가나다라");
        assert_eq!(strip_line_break_markup("<b<br>r>"), "");
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  주는<br>  나의\n목자  "), "주는 나의 목자");
    }

    #[test]
    fn test_normalize_composes_jamo() {
        // decomposed 한 (U+1112 U+1161 U+11AB)
        let decomposed = "\u{1112}\u{1161}\u{11AB}";
        assert_eq!(normalize_input(decomposed), "한");
    }

    #[test]
    fn test_to_line_break_markup() {
        assert_eq!(to_line_break_markup("가\n나"), "가<br>나");
    }

    #[test]
    fn test_cache_hit_skips_segmentation() {
        let mut formatter = VerseFormatter::new();
        let first = formatter.format("지혜를 구하라 그리하면 얻으리라", 15);
        let second = formatter.format("지혜를 구하라 그리하면 얻으리라", 15);

        assert_eq!(first, second);
        assert_eq!(
            formatter.stats(),
            FormatStats { cache_hits: 1, cache_misses: 1, segmentations: 1 }
        );
    }

    #[test]
    fn test_cache_key_uses_max_length() {
        let mut formatter = VerseFormatter::new();
        formatter.format("주는 나의 목자시니", 15);
        formatter.format("주는 나의 목자시니", 25);
        assert_eq!(formatter.stats().segmentations, 2);
    }

    #[test]
    fn test_no_cache_always_segments() {
        let mut formatter = VerseFormatter::with_cache(NoCache);
        formatter.format("주는 나의 목자시니", 15);
        formatter.format("주는 나의 목자시니", 15);
        assert_eq!(formatter.stats().segmentations, 2);
    }

    #[test]
    fn test_shared_cache_between_formatters() {
        let cache = SharedCache::new();
        let mut a = VerseFormatter::with_cache(cache.clone());
        let mut b = VerseFormatter::with_cache(cache.clone());

        a.format("주는 나의 목자시니", 15);
        b.format("주는 나의 목자시니", 15);

        assert_eq!(cache.len(), 1);
        assert_eq!(b.stats().cache_hits, 1);
    }

    #[test]
    fn test_format_or_fallback_matches_format() {
        let mut formatter = VerseFormatter::new();
        let text = "하나님께서 너희에게 지혜를 구하라. 그리하면 너의 길이 평탄하리라.";
        assert_eq!(formatter.format_or_fallback(text, 15), format_verse(text, 15));
    }

    #[test]
    fn test_layout_renders_to_format() {
        let text = "너희 중에 누구든지 지혜가 부족하거든 모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라";
        let layout = layout_verse(text, 15);
        assert_eq!(layout.clauses.len(), 2);
        assert_eq!(layout.breaks, BTreeSet::from([1]));
        assert_eq!(layout.render(), format_verse(text, 15));

        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["breaks"], serde_json::json!([1]));
        assert_eq!(json["clauses"][1]["semantic_type"], "COMMAND");
    }

    #[test]
    fn test_segmentation_counted_per_segment_call() {
        let mut stats = FormatStats::default();
        build_layout("주는 나의 목자시니", 15, &mut stats);
        build_layout("", 15, &mut stats);
        assert_eq!(stats.segmentations, 2);
        assert_eq!(stats.cache_misses, 0);
    }

    #[test]
    fn test_internal_whitespace_shares_cache_entry() {
        let mut formatter = VerseFormatter::new();
        let spaced = formatter.format("주는  나의\n목자시니", 15);
        let single = formatter.format("주는 나의 목자시니", 15);
        assert_eq!(spaced, single);
        assert_eq!(spaced, "주는 나의 목자시니");
        assert_eq!(formatter.stats().cache_hits, 1);
    }

    #[test]
    fn test_empty_input() {
        let mut formatter = VerseFormatter::new();
        assert_eq!(formatter.format_default(""), "");
        assert_eq!(formatter.format_default("  <br> "), "");
    }
}
