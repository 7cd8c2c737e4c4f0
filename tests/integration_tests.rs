//! Integration tests for the verse formatting pipeline
//!
//! These tests drive the public API end to end: segmentation, shift
//! detection, composition, caching and the verse deck.

use std::collections::BTreeSet;

use verse_card::breakpoints::{clause_break, forced_break};
use verse_card::catalog::starts_with_connective;
use verse_card::{
    classify_clause, compose, detect_breaks, format_verse, is_head_verb, normalize_input, refine,
    segment, to_line_break_markup, wrap_by_length, Clause, ClauseType, Config, Error, FormatCache,
    JsonFileStore, MemoryStore, NoCache, SharedCache, ShuffleDeck, VerseFormatter, VerseStore,
    CARD_MAX_LENGTH, DEFAULT_MAX_LENGTH,
};

/// A line may only run past `max_length` when it is a single clause or a
/// connective clause was glued onto it
fn assert_line_lengths(clauses: &[Clause], lines: &[String], max_length: usize) {
    for line in lines {
        if line.chars().count() <= max_length {
            continue;
        }
        let single = clauses.iter().any(|c| c.trimmed() == line);
        let glued = clauses
            .iter()
            .any(|c| c.is_connective() && line.contains(&format!(" {}", c.trimmed())));
        assert!(single || glued, "line {line:?} exceeds {max_length}");
    }
}

const JAMES_1_5: &str =
    "너희 중에 누구든지 지혜가 부족하거든 모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라";

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_head_verb_is_whole_word() {
    assert!(is_head_verb("하시고"));
    assert!(!is_head_verb("하시고서"));
    assert!(!is_head_verb("사랑"));
}

#[test]
fn test_condition_takes_precedence_over_statement() {
    // ends with a conditional marker and contains a copula
    assert_eq!(
        classify_clause("그것이 있다 하거든", None),
        ClauseType::Condition
    );
}

#[test]
fn test_command_clause() {
    assert_eq!(classify_clause("하나님께 구하라", None), ClauseType::Command);
}

#[test]
fn test_trailing_punctuation_hides_ending() {
    assert_eq!(classify_clause("하나님께 구하라.", Some("구하라")), ClauseType::Statement);
    assert_eq!(classify_clause("하나님께 구하라.", None), ClauseType::Unknown);
    assert_eq!(classify_clause("하나님께 구하라 ", None), ClauseType::Command);
}

// =============================================================================
// Break points
// =============================================================================

#[test]
fn test_short_words_never_break() {
    assert_eq!(clause_break("주시고", "하나님께"), None);
    assert_eq!(forced_break("주고", "하나님께서"), None);
}

#[test]
fn test_forced_break_covers_clause_break() {
    assert_eq!(
        forced_break("아니하시는", "하나님께"),
        clause_break("아니하시는", "하나님께")
    );
}

// =============================================================================
// Segmentation and composition
// =============================================================================

#[test]
fn test_james_splits_before_divine_title() {
    let clauses = segment(JAMES_1_5);
    assert_eq!(clauses.len(), 2);
    assert!(clauses[0].trimmed().ends_with("아니하시는"));
    assert_eq!(clauses[1].trimmed(), "하나님께 구하라");
    assert_eq!(clauses[1].semantic_type, ClauseType::Command);
}

#[test]
fn test_james_card() {
    let card = format_verse(JAMES_1_5, DEFAULT_MAX_LENGTH);
    let lines: Vec<&str> = card.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "하나님께 구하라");
}

#[test]
fn test_connective_stays_with_previous_line() {
    let text = "하나님께서 너희에게 지혜를 구하라. 그리하면 너의 길이 평탄하리라.";
    let card = format_verse(text, DEFAULT_MAX_LENGTH);

    assert!(card.contains("구하라. 그리하면"));
    for line in card.lines().skip(1) {
        assert!(!starts_with_connective(line), "line {line:?}");
    }

    let clauses = segment(&normalize_input(text));
    let lines = compose(&clauses, &detect_breaks(&clauses), DEFAULT_MAX_LENGTH);
    assert_line_lengths(&clauses, &lines, DEFAULT_MAX_LENGTH);
}

#[test]
fn test_unspaced_input_is_unchanged() {
    let text = "하나님께서너희에게큰복을내리시고그들을축복하시리라";
    let clauses = segment(text);
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].text, text);
    assert_eq!(format_verse(text, DEFAULT_MAX_LENGTH), text);
}

#[test]
fn test_short_single_clause_is_trimmed_input() {
    assert_eq!(format_verse("  주는 나의 목자시니  ", DEFAULT_MAX_LENGTH), "주는 나의 목자시니");
}

#[test]
fn test_empty_input() {
    assert_eq!(format_verse("", DEFAULT_MAX_LENGTH), "");
    assert_eq!(format_verse("<br><br/>", DEFAULT_MAX_LENGTH), "");
}

#[test]
fn test_stages_compose_to_format() {
    let clean = normalize_input(JAMES_1_5);
    let clauses = segment(&clean);
    let breaks = detect_breaks(&clauses);
    let lines = compose(&clauses, &breaks, CARD_MAX_LENGTH);
    assert_eq!(refine(&lines), format_verse(JAMES_1_5, CARD_MAX_LENGTH));
}

#[test]
fn test_compose_without_breaks_respects_length() {
    let clauses = segment("그가 말하였다. 나는 간다. 너는 온다.");
    let lines = compose(&clauses, &BTreeSet::new(), 8);
    assert_eq!(lines, vec!["그가 말하였다.", "나는 간다.", "너는 온다."]);
    assert_line_lengths(&clauses, &lines, 8);

    let lines = compose(&clauses, &BTreeSet::new(), 5);
    assert_line_lengths(&clauses, &lines, 5);
}

// =============================================================================
// Markup
// =============================================================================

#[test]
fn test_markup_is_ignored() {
    let plain = format_verse(JAMES_1_5, DEFAULT_MAX_LENGTH);
    let marked = format_verse(
        "너희 중에 누구든지 <br>지혜가 부족하거든 <BR/>모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라<br />",
        DEFAULT_MAX_LENGTH,
    );
    assert_eq!(plain, marked);
    assert!(!marked.contains("<br"));
}

#[test]
fn test_html_output() {
    let card = format_verse(JAMES_1_5, DEFAULT_MAX_LENGTH);
    let html = to_line_break_markup(&card);
    assert_eq!(html.matches("<br>").count(), card.lines().count() - 1);
    assert!(!html.contains('\n'));
}

// =============================================================================
// Caching
// =============================================================================

#[test]
fn test_second_call_does_not_segment() {
    let mut formatter = VerseFormatter::new();
    let first = formatter.format(JAMES_1_5, 15);
    let second = formatter.format(JAMES_1_5, 15);

    assert_eq!(first, second);
    assert_eq!(formatter.stats().segmentations, 1);
    assert_eq!(formatter.stats().cache_hits, 1);
}

#[test]
fn test_cache_key_includes_length() {
    let mut formatter = VerseFormatter::new();
    formatter.format(JAMES_1_5, 15);
    formatter.format(JAMES_1_5, 25);
    assert_eq!(formatter.stats().segmentations, 2);
}

#[test]
fn test_markup_variants_share_cache_entry() {
    let mut formatter = VerseFormatter::new();
    formatter.format(JAMES_1_5, 15);
    formatter.format(&format!("{JAMES_1_5}<br>"), 15);
    assert_eq!(formatter.stats().cache_hits, 1);
}

#[test]
fn test_no_cache_always_segments() {
    let mut formatter = VerseFormatter::with_cache(NoCache);
    formatter.format(JAMES_1_5, 15);
    formatter.format(JAMES_1_5, 15);
    assert_eq!(formatter.stats().segmentations, 2);
}

#[test]
fn test_shared_cache_across_threads() {
    let cache = SharedCache::new();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            std::thread::spawn(move || VerseFormatter::with_cache(cache).format(JAMES_1_5, 15))
        })
        .collect();
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(cache.len(), 1);

    let key = verse_card::CacheKey {
        text: normalize_input(JAMES_1_5),
        max_length: 15,
    };
    assert_eq!(cache.get(&key), Some(results[0].clone()));
}

#[test]
fn test_format_or_fallback_matches_format() {
    let mut formatter = VerseFormatter::new();
    assert_eq!(
        formatter.format_or_fallback(JAMES_1_5, 15),
        format_verse(JAMES_1_5, 15)
    );
}

// =============================================================================
// Fallback
// =============================================================================

#[test]
fn test_wrap_by_length() {
    let wrapped = wrap_by_length(JAMES_1_5, 15);
    for line in wrapped.lines() {
        assert!(line.chars().count() <= 15, "line {line:?}");
    }
    assert_eq!(wrapped.replace('\n', " "), JAMES_1_5);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"max_length": 25, "fallback": true}"#).unwrap();

    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.max_length, 25);
    assert!(config.fallback);
    assert!(config.verses_path.is_none());
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_path(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

// =============================================================================
// Verse deck
// =============================================================================

const VERSES: &str = r#"[
    {"content": "여호와는 나의 목자시니<br>내게 부족함이 없으리로다", "reference": "시편 23:1"},
    {"content": "태초에 하나님이 천지를 창조하시니라", "reference": "창세기 1:1"},
    {"content": "하나님이 세상을 이처럼 사랑하사", "reference": "요한복음 3:16"}
]"#;

#[test]
fn test_deck_visits_every_verse_before_repeating() {
    let verses = VerseStore::from_json(VERSES).unwrap();
    let mut deck = ShuffleDeck::new(MemoryStore::default());

    let mut seen: Vec<String> = (0..verses.len())
        .map(|_| verses.next_verse(&mut deck).unwrap().reference.clone())
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_deck_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let verses = VerseStore::from_json(VERSES).unwrap();

    let mut seen = Vec::new();
    for _ in 0..verses.len() {
        let mut deck = ShuffleDeck::new(JsonFileStore::open(&path).unwrap());
        seen.push(verses.next_verse(&mut deck).unwrap().reference.clone());
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_drawn_verse_formats_without_markup() {
    let verses = VerseStore::from_json(VERSES).unwrap();
    for verse in verses.iter() {
        let card = format_verse(&verse.content, CARD_MAX_LENGTH);
        assert!(!card.contains("<br"));
        assert!(!card.is_empty());
    }
}
