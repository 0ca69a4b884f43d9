//! Error type shared by the trie, the predictor, the corrector and the
//! corpus loader.
//!
//! Plain lookups (`search`, `locate`, `remove`) never fail; they answer with
//! `bool` or `Option`. Errors are reserved for operations whose caller broke
//! a contract (an index past the end of a word) or asked for a prefix that
//! has to exist, plus I/O while loading a corpus.

use thiserror::Error;

/// Errors produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// The requested prefix has no node in the trie
    #[error("prefix not found: {prefix:?}")]
    NotFound { prefix: String },

    /// A character lookup was attempted on an empty word
    #[error("cannot look up a character in an empty word")]
    EmptyWord,

    /// A character index points past the end of the word
    #[error("position {position} is out of range for a word of {len} characters")]
    PositionOutOfRange { position: usize, len: usize },

    /// A frequency column that is not a non-negative integer
    #[error("invalid weight {value:?} on line {line}")]
    InvalidWeight { line: u64, value: String },

    /// A frequency row without the expected two columns
    #[error("malformed frequency row on line {line}")]
    MalformedRow { line: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
