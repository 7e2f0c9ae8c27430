//! Index every word of one book of a verse-per-line corpus, then look words up.
//!
//! Each corpus line starts with a verse reference such as `Ge1:1`. Lines whose
//! reference starts with the requested book prefix are split on whitespace,
//! stripped down to letters and apostrophes, lowercased, and collected into a
//! `MatrixBst` keyed by word. The tree is rebalanced once, then queries are
//! read from stdin until `!quit`.
//!
//! ```text
//! cargo run --example word_index -- kjv.txt Ruth [capacity]
//! ```

use matrix_bst::{MatrixBst, DEFAULT_CAPACITY};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

/// A word and the verses it appears in, in first-seen order.
struct WordRefs {
    word: String,
    verses: Vec<String>,
}

impl WordRefs {
    fn key(word: &str) -> Self {
        Self {
            word: word.to_string(),
            verses: Vec::new(),
        }
    }
}

impl fmt::Display for WordRefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word: {}\nVerses: {}", self.word, self.verses.join(", "))
    }
}

fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '\'')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "kjv.txt".to_string());
    let book = args.next().unwrap_or_else(|| "Ruth".to_string()).to_lowercase();
    let capacity: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CAPACITY);

    let mut tree = MatrixBst::with_capacity_and_comparator(capacity, |a: &WordRefs, b: &WordRefs| {
        a.word.cmp(&b.word)
    });

    println!("Indexing book {:?} from {} (capacity {})...", book, path, capacity);
    let start = Instant::now();
    let reader = BufReader::new(File::open(&path)?);
    let mut lines_matched = 0usize;
    let mut words_dropped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if !line.to_lowercase().starts_with(&book) {
            continue;
        }
        lines_matched += 1;

        let mut tokens = line.split_whitespace();
        let Some(verse) = tokens.next() else {
            continue;
        };

        for token in tokens {
            let word = normalize(token);
            if word.is_empty() {
                continue;
            }
            let probe = WordRefs::key(&word);
            match tree.get_mut(&probe) {
                Some(entry) => {
                    if !entry.verses.iter().any(|v| v == verse) {
                        entry.verses.push(verse.to_string());
                    }
                }
                None => {
                    let mut entry = probe;
                    entry.verses.push(verse.to_string());
                    if !tree.add(entry) {
                        log::warn!("tree full, dropping {:?} from {}", word, verse);
                        words_dropped += 1;
                    }
                }
            }
        }
    }

    if lines_matched == 0 {
        println!("Book not found.");
        return Ok(());
    }

    println!(
        "Finished sorting {} words from {} verses in {:.1}ms (height {}).",
        tree.len(),
        lines_matched,
        start.elapsed().as_secs_f64() * 1e3,
        tree.height()
    );
    if words_dropped > 0 {
        println!("{} words did not fit; raise the capacity.", words_dropped);
    }

    println!("Rebalancing tree...");
    tree.rebalance();
    println!(
        "Tree is balanced status (should be true): {} (height {})",
        tree.is_balanced(),
        tree.height()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Enter a word to search (!quit to quit): ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let query = input.trim().to_lowercase();
        if query == "!quit" {
            println!("Quitting...");
            break;
        }

        match tree.get(&WordRefs::key(&query)) {
            Some(entry) => println!("{}", entry),
            None => println!("Word not found."),
        }
    }

    Ok(())
}
