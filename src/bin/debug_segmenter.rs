use verse_card::shift::ShiftSignals;
use verse_card::{compose, detect_breaks, normalize_input, refine, segment, DEFAULT_MAX_LENGTH};

fn main() {
    let input = std::env::args().nth(1).unwrap_or_else(|| {
        "너희 중에 누구든지 지혜가 부족하거든 모든 사람에게 후히 주시고 꾸짖지 아니하시는 하나님께 구하라"
            .to_string()
    });
    println!("Input: {}", input);

    let clean = normalize_input(&input);
    let clauses = segment(&clean);

    println!("\nClauses:");
    for (i, clause) in clauses.iter().enumerate() {
        println!(
            "  {}: {:?} - type: {}, head: {:?}, connective: {}",
            i,
            clause.trimmed(),
            clause.semantic_type,
            clause.head_verb,
            clause.is_connective()
        );
    }

    println!("\nSignals:");
    for (i, pair) in clauses.windows(2).enumerate() {
        let signals = ShiftSignals::between(&pair[0], &pair[1]);
        println!("  {} -> {}: {:?} break: {}", i, i + 1, signals, signals.is_break());
    }

    let breaks = detect_breaks(&clauses);
    println!("\nBreaks: {:?}", breaks);

    let lines = compose(&clauses, &breaks, DEFAULT_MAX_LENGTH);
    println!("\nComposed lines:");
    for line in &lines {
        println!("  {:?} ({} chars)", line, line.chars().count());
    }

    println!("\nResult:\n{}", refine(&lines));
}
