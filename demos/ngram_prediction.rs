//! Loads an n-gram count file and predicts the next word.
//!
//! ```text
//! RUST_LOG=token_trie=debug cargo run --example ngram_prediction -- bigrams.cnt the
//! ```
use std::env;
use std::process;

use token_trie::{LoadOptions, Trie, DEFAULT_MAX_CANDIDATES};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: ngram_prediction <count file> <word>...");
        process::exit(2);
    }

    let (trie, report) = match Trie::<String, u64>::from_files(&args[..1], &LoadOptions::ngram()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    println!(
        "{} n-grams loaded, {} lines skipped",
        trie.len(),
        report.skipped_total()
    );

    let prefix = &args[1..];
    let predictions = trie.predict(prefix, DEFAULT_MAX_CANDIDATES);
    if predictions.is_empty() {
        println!("no prediction after {:?}", prefix);
    }
    for prediction in predictions {
        match prediction.weight() {
            Some(weight) => println!("{} ({})", prediction.token(), weight),
            None => println!("{} ({} continuations)", prediction.token(), prediction.size()),
        }
    }
}
