//! Command-line interface for verse-card
//!
//! Usage:
//!   versecard [OPTIONS] <TEXT>
//!   echo "여호와는 나의 목자시니" | versecard
//!   versecard --verses verses.json --state state.json
//!
//! Options:
//!   -m, --max-length <N>  Maximum line length (default 15)
//!   -f, --fallback        Wrap by length only
//!   -j, --json            Output clauses, breaks and lines as JSON
//!       --html            Separate lines with <br>
//!   -c, --config <FILE>   Read settings from a JSON file
//!       --verses <FILE>   Draw the next verse from a JSON verse list
//!       --state <FILE>    Shuffle state file used with --verses
//!   -v, --verbose         Log pipeline stages
//!   -h, --help            Show help

use std::env;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing_subscriber::EnvFilter;
use verse_card::{
    layout_verse, to_line_break_markup, wrap_by_length, Config, JsonFileStore, MemoryStore,
    ShuffleDeck, Verse, VerseFormatter, VerseStore,
};

fn print_help() {
    eprintln!(
        r#"versecard - Meaning-aware line breaking for Korean verse cards

USAGE:
    versecard [OPTIONS] [TEXT]
    echo "여호와는 나의 목자시니" | versecard
    versecard --verses verses.json --state state.json

OPTIONS:
    -m, --max-length <N>  Maximum line length in characters (default 15)
    -f, --fallback        Wrap by length only, without semantic breaks
    -j, --json            Output clauses, breaks and lines as JSON
        --html            Separate lines with <br> instead of newlines
    -c, --config <FILE>   Read settings from a JSON file
        --verses <FILE>   Draw the next verse from a JSON verse list
        --state <FILE>    Shuffle state file used with --verses
    -v, --verbose         Log pipeline stages to stderr
    -h, --help            Show this help message

EXAMPLES:
    versecard "하나님께서 너희에게 지혜를 구하라. 그리하면 너의 길이 평탄하리라."
    versecard -m 25 --html "여호와는 나의 목자시니 내게 부족함이 없으리로다"
    versecard --verses verses.json --state ~/.versecard-state.json
"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn next_arg(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => fail(format!("{} requires a value", flag)),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Print the card as JSON. Clauses and breaks are only included when the
/// semantic pipeline produced the lines.
fn print_json(input_text: &str, reference: Option<&str>, config: &Config) {
    let output = if config.fallback {
        let formatted = wrap_by_length(input_text, config.max_length);
        json!({
            "reference": reference,
            "max_length": config.max_length,
            "lines": formatted.lines().collect::<Vec<_>>(),
        })
    } else {
        let layout = layout_verse(input_text, config.max_length);
        let formatted = layout.render();
        json!({
            "reference": reference,
            "max_length": config.max_length,
            "clauses": layout.clauses,
            "breaks": layout.breaks,
            "lines": formatted.lines().collect::<Vec<_>>(),
        })
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("serializing to JSON: {}", e)),
    }
}

/// Draw the next verse, keeping the shuffle state in `state_path` if given
fn draw_verse(verses_path: &Path, state_path: Option<&Path>) -> verse_card::Result<Verse> {
    let verses = VerseStore::from_path(verses_path)?;
    let verse = match state_path {
        Some(path) => {
            let mut deck = ShuffleDeck::new(JsonFileStore::open(path)?);
            verses.next_verse(&mut deck)?.clone()
        }
        None => {
            let mut deck = ShuffleDeck::new(MemoryStore::default());
            verses.next_verse(&mut deck)?.clone()
        }
    };
    Ok(verse)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut max_length: Option<usize> = None;
    let mut fallback = false;
    let mut json_output = false;
    let mut html = false;
    let mut verbose = false;
    let mut verses_path: Option<PathBuf> = None;
    let mut state_path: Option<PathBuf> = None;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-f" | "--fallback" => fallback = true,
            "-j" | "--json" => json_output = true,
            "--html" => html = true,
            "-v" | "--verbose" => verbose = true,
            "-m" | "--max-length" => {
                let value = next_arg(&args, &mut i, "--max-length");
                match value.parse::<usize>() {
                    Ok(n) if n > 0 => max_length = Some(n),
                    _ => fail(format!("invalid max length '{}'", value)),
                }
            }
            "-c" | "--config" => config_path = Some(next_arg(&args, &mut i, "--config").into()),
            "--verses" => verses_path = Some(next_arg(&args, &mut i, "--verses").into()),
            "--state" => state_path = Some(next_arg(&args, &mut i, "--state").into()),
            arg if !arg.starts_with('-') => {
                text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    init_logging(verbose);

    let mut config = match config_path {
        Some(path) => Config::from_path(&path)
            .unwrap_or_else(|e| fail(format!("reading config '{}': {}", path.display(), e))),
        None => Config::default(),
    };
    if let Some(n) = max_length {
        config.max_length = n;
    }
    config.fallback |= fallback;
    config.html |= html;
    if verses_path.is_some() {
        config.verses_path = verses_path;
    }
    if state_path.is_some() {
        config.state_path = state_path;
    }
    if config.state_path.is_some() && config.verses_path.is_none() {
        fail("--state requires --verses");
    }

    // Pick the input: a drawn verse, the argument, or stdin
    let mut reference: Option<String> = None;
    let input_text = if let Some(ref path) = config.verses_path {
        let verse = draw_verse(path, config.state_path.as_deref())
            .unwrap_or_else(|e| fail(format!("drawing verse from '{}': {}", path.display(), e)));
        reference = Some(verse.reference);
        verse.content
    } else if let Some(t) = text {
        t
    } else {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => lines.push(l),
                Err(e) => fail(format!("reading stdin: {}", e)),
            }
        }
        lines.join("\n")
    };

    if input_text.trim().is_empty() {
        eprintln!("Error: No input text provided");
        print_help();
        std::process::exit(1);
    }

    if json_output {
        print_json(&input_text, reference.as_deref(), &config);
        return;
    }

    let formatted = if config.fallback {
        wrap_by_length(&input_text, config.max_length)
    } else {
        VerseFormatter::new().format_or_fallback(&input_text, config.max_length)
    };

    if config.html {
        println!("{}", to_line_break_markup(&formatted));
    } else {
        println!("{}", formatted);
    }
    if let Some(reference) = reference {
        println!("- {}", reference);
    }
}
