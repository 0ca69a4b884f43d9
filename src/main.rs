//! Command-line interface for wordtrie-rs
//!
//! Usage:
//!   wordtrie --freq unigram_freq.csv predict th
//!   wordtrie --freq unigram_freq.csv --dict words_alpha.txt correct helko
//!   echo "teh quick brown fox" | wordtrie check

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordtrie::config::WordtrieConfig;
use wordtrie::{corpus, Predictor, SpellCorrector, Trie, TrieBuilder};

#[derive(Parser, Debug)]
#[command(version, about = "Word prediction and spell correction over a frequency trie")]
struct Args {
    /// Word frequency CSV (`word,count` rows)
    #[arg(short, long)]
    freq: Option<PathBuf>,
    /// Dictionary word list; frequency rows not in it are dropped
    #[arg(short, long)]
    dict: Option<PathBuf>,
    /// Config file (defaults to $WORDTRIE_CONFIG or the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output as JSON
    #[arg(short, long)]
    json: bool,
    /// Log at debug level
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict the most likely words starting with PREFIX
    Predict {
        prefix: String,
        /// Number of predictions
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Correct a single misspelled word
    Correct {
        word: String,
        /// Index of the wrong character (guessed when omitted)
        #[arg(short, long)]
        position: Option<usize>,
    },
    /// Correct every word in TEXT (read from stdin when omitted)
    Check { text: Vec<String> },
    /// Report whether WORD is in the dictionary
    Search { word: String },
}

#[derive(Serialize)]
struct SearchResult<'a> {
    word: &'a str,
    found: bool,
}

fn setup_logging(debug: bool) -> Result<()> {
    let directive = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();
    Ok(())
}

fn load_trie(args: &Args, config: &WordtrieConfig) -> Result<Trie> {
    let freq_path = args
        .freq
        .clone()
        .unwrap_or_else(|| config.corpus.frequency_path.clone());
    let dict_path = args.dict.clone().or_else(|| config.corpus.dictionary_path.clone());

    let mut builder = TrieBuilder::new();
    builder.normalize(config.corpus.normalize);
    builder
        .load_frequency_file(&freq_path)
        .with_context(|| format!("failed to load frequency list {}", freq_path.display()))?;

    if let Some(dict_path) = dict_path {
        let dictionary = corpus::load_word_list_file(&dict_path)
            .with_context(|| format!("failed to load dictionary {}", dict_path.display()))?;
        builder.retain_dictionary(&dictionary);
    }

    let trie = builder.build();
    info!(words = trie.len(), nodes = trie.node_count(), "trie ready");
    Ok(trie)
}

/// The form a query word is looked up in
fn query_word(word: &str, normalize: bool) -> String {
    if normalize {
        corpus::normalize_word(word)
    } else {
        word.to_string()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = WordtrieConfig::load(args.config.as_deref())?;
    let trie = load_trie(&args, &config)?;
    let normalize = config.corpus.normalize;

    match &args.command {
        Command::Predict { prefix, top } => {
            let top_n = top.unwrap_or(config.predict.top_n);
            let prefix = query_word(prefix, normalize);
            let completions = Predictor::new(&trie).predict_completions(&prefix, top_n)?;
            if args.json {
                print_json(&completions)?;
            } else {
                for completion in &completions {
                    println!("{}\t{}", completion.word, completion.weight);
                }
            }
        }
        Command::Correct { word, position } => {
            let corrector = SpellCorrector::new(&trie).normalize(normalize);
            let correction = match position {
                Some(pos) => wordtrie::Correction {
                    original: word.clone(),
                    corrected: corrector.correct(&query_word(word, normalize), *pos)?,
                    position: Some(*pos),
                },
                None => corrector.correct_word(word)?,
            };
            if args.json {
                print_json(&correction)?;
            } else {
                println!("{}", correction.corrected);
            }
        }
        Command::Check { text } => {
            let input = if text.is_empty() {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            } else {
                text.join(" ")
            };
            let fixed = SpellCorrector::new(&trie)
                .normalize(normalize)
                .correct_text(&input);
            if args.json {
                print_json(&fixed)?;
            } else {
                println!("{}", fixed.trim_end());
            }
        }
        Command::Search { word } => {
            let found = trie.search(&query_word(word, normalize));
            if args.json {
                print_json(&SearchResult { word, found })?;
            } else {
                println!("{}", found);
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logging(args.debug) {
        eprintln!("Error setting up logging: {}", e);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_word() {
        assert_eq!(query_word(" Hello", true), "hello");
        assert_eq!(query_word("Hello", false), "Hello");
    }
}
