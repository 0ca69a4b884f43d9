//! Loading word-frequency corpora.
//!
//! Two inputs are supported: a `word,count` CSV (the unigram frequency list)
//! and a plain word list with one word per line (the dictionary used to drop
//! junk tokens from the frequency list). Loaders only trim; case folding
//! and NFC are applied by [`normalize_word`], which `TrieBuilder` calls when
//! normalization is enabled.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::node::Weight;

/// Trim, NFC-normalize and lowercase a word
pub fn normalize_word(word: &str) -> String {
    word.trim().nfc().flat_map(char::to_lowercase).collect()
}

/// Read `word,count` rows.
///
/// A first row without a numeric count (a header such as `word,count` or
/// just `word`) is skipped. Rows with an empty word are ignored.
pub fn load_frequency_csv<R: Read>(reader: R) -> Result<Vec<(String, Weight)>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(row as u64 + 1, |pos| pos.line());

        let (word, count) = match (record.get(0), record.get(1)) {
            (Some(word), Some(count)) => (word, count),
            _ if row == 0 => continue,
            _ => return Err(Error::MalformedRow { line }),
        };

        let weight = match count.parse::<Weight>() {
            Ok(weight) => weight,
            Err(_) if row == 0 => continue,
            Err(_) => {
                return Err(Error::InvalidWeight {
                    line,
                    value: count.to_string(),
                })
            }
        };

        if !word.is_empty() {
            pairs.push((word.to_string(), weight));
        }
    }

    Ok(pairs)
}

/// Read a word list, one word per line
pub fn load_word_list<R: BufRead>(reader: R) -> Result<HashSet<String>> {
    let mut words = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }
    Ok(words)
}

/// Read a `word,count` CSV file
pub fn load_frequency_file(path: &Path) -> Result<Vec<(String, Weight)>> {
    let file = File::open(path)?;
    load_frequency_csv(BufReader::new(file))
}

/// Read a word-list file
pub fn load_word_list_file(path: &Path) -> Result<HashSet<String>> {
    let file = File::open(path)?;
    load_word_list(BufReader::new(file))
}

/// Keep only pairs whose word is in `dictionary`, preserving order
pub fn filter_known(
    pairs: Vec<(String, Weight)>,
    dictionary: &HashSet<String>,
) -> Vec<(String, Weight)> {
    pairs
        .into_iter()
        .filter(|(word, _)| dictionary.contains(word))
        .collect()
}
