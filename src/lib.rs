//! # wordtrie-rs
//!
//! A frequency-weighted trie for word prediction and single-error spell
//! correction.
//!
//! Words are stored one character per node, each node carrying a weight.
//! Prediction walks the heaviest children below a prefix; correction swaps
//! one wrong character for the sibling branch that best fits the rest of the
//! word.
//!
//! ## Quick Start
//!
//! ```rust
//! use wordtrie::{Predictor, SpellCorrector, Trie};
//!
//! let trie = Trie::build([("cat", 50), ("car", 80), ("can", 10), ("apple", 100)]);
//!
//! let predictor = Predictor::new(&trie);
//! let words = predictor.predict_words("ca", 2).unwrap();
//! assert_eq!(words, vec!["car", "cat"]);
//!
//! let corrector = SpellCorrector::new(&trie);
//! assert_eq!(corrector.correct("applz", 4).unwrap(), "apple");
//! ```
//!
//! ## Loading a corpus
//!
//! ```rust
//! use wordtrie::TrieBuilder;
//!
//! let mut builder = TrieBuilder::new();
//! builder.load_frequency_csv("word,count\nthe,500\nof,300").unwrap();
//! let trie = builder.build();
//! assert!(trie.search("the"));
//! ```
//!
//! ## Python Bindings
//!
//! Building with the `python` feature produces a Python extension module.

pub mod config;
pub mod corpus;
pub mod corrector;
pub mod error;
pub mod node;
pub mod predictor;
pub mod trie;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use corrector::{Correction, SpellCorrector};
pub use error::{Error, Result};
pub use node::{NodeId, TrieNode, Weight};
pub use predictor::{most_likely_next, Completion, Predictor};
pub use trie::{Trie, TrieBuilder};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let csv = "word,count\nthe,900\nthen,300\nthey,500\nthem,200\nhello,120\n";

        let mut builder = TrieBuilder::new();
        builder.load_frequency_csv(csv).unwrap();
        let trie = builder.build();

        assert_eq!(trie.len(), 5);

        let words = Predictor::new(&trie).predict_words("the", 2).unwrap();
        assert_eq!(words, vec!["they", "then"]);

        let corrector = SpellCorrector::new(&trie);
        assert_eq!(corrector.correct_text("thex hellp"), "they hello");
    }
}
