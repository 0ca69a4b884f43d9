//! Python bindings for wordtrie-rs using PyO3
//!
//! This module provides Python-compatible wrappers around the trie, the
//! predictor and the spell corrector.

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::corrector::SpellCorrector;
use crate::error::Error;
use crate::predictor::{Completion, Predictor};
use crate::trie::{Trie, TrieBuilder};

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::NotFound { .. } => PyKeyError::new_err(err.to_string()),
        Error::Io(_) | Error::Csv(_) => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// A predicted word and its weight
#[pyclass(name = "Completion")]
#[derive(Clone)]
pub struct PyCompletion {
    #[pyo3(get)]
    pub word: String,
    #[pyo3(get)]
    pub weight: u64,
}

impl From<Completion> for PyCompletion {
    fn from(c: Completion) -> Self {
        PyCompletion {
            word: c.word,
            weight: c.weight,
        }
    }
}

#[pymethods]
impl PyCompletion {
    fn __repr__(&self) -> String {
        format!("Completion('{}', weight={})", self.word, self.weight)
    }

    fn __str__(&self) -> String {
        self.word.clone()
    }
}

/// Frequency-weighted word trie
///
/// Example:
///     >>> from wordtrie import WordTrie
///     >>> t = WordTrie([("cat", 50), ("car", 80), ("can", 10)])
///     >>> t.predict("ca", 2)
///     ['car', 'cat']
#[pyclass(name = "WordTrie")]
pub struct PyWordTrie {
    trie: Trie,
}

#[pymethods]
impl PyWordTrie {
    /// Create a trie from an optional list of (word, weight) pairs
    #[new]
    #[pyo3(signature = (pairs=None))]
    fn new(pairs: Option<Vec<(String, u64)>>) -> Self {
        PyWordTrie {
            trie: Trie::build(pairs.unwrap_or_default()),
        }
    }

    /// Load `word,count` rows from a CSV file and add the words
    fn load_frequency_csv(&mut self, path: &str) -> PyResult<usize> {
        let mut builder = TrieBuilder::new();
        let count = builder.load_frequency_file(path).map_err(to_py_err)?;
        self.trie.merge(&builder.build());
        Ok(count)
    }

    /// Insert a word; returns False if it was already present
    fn insert(&mut self, word: &str, weight: u64) -> bool {
        self.trie.insert(word, weight)
    }

    /// Remove a word; returns the word, or None if it was not present
    fn remove(&mut self, word: &str) -> Option<String> {
        self.trie.remove(word)
    }

    /// Check if a word is present
    fn search(&self, word: &str) -> bool {
        self.trie.search(word)
    }

    /// Predict up to `top_n` words starting with `prefix`
    #[pyo3(signature = (prefix, top_n=2))]
    fn predict(&self, prefix: &str, top_n: usize) -> PyResult<Vec<String>> {
        Predictor::new(&self.trie)
            .predict_words(prefix, top_n)
            .map_err(to_py_err)
    }

    /// Like predict, with weights
    #[pyo3(signature = (prefix, top_n=2))]
    fn predict_completions(&self, prefix: &str, top_n: usize) -> PyResult<Vec<PyCompletion>> {
        let completions = Predictor::new(&self.trie)
            .predict_completions(prefix, top_n)
            .map_err(to_py_err)?;
        Ok(completions.into_iter().map(PyCompletion::from).collect())
    }

    /// Correct a word; the wrong character position is guessed when omitted
    #[pyo3(signature = (word, position=None))]
    fn correct(&self, word: &str, position: Option<usize>) -> PyResult<String> {
        let corrector = SpellCorrector::new(&self.trie);
        match position {
            Some(pos) => corrector.correct(word, pos).map_err(to_py_err),
            None => corrector
                .correct_word(word)
                .map(|c| c.corrected)
                .map_err(to_py_err),
        }
    }

    /// Correct every unknown word in a text
    fn correct_text(&self, text: &str) -> String {
        SpellCorrector::new(&self.trie).correct_text(text)
    }

    /// All stored words in lexicographic order
    fn words(&self) -> Vec<String> {
        self.trie.words().map(String::from).collect()
    }

    fn __len__(&self) -> usize {
        self.trie.len()
    }

    fn __contains__(&self, word: &str) -> bool {
        self.trie.search(word)
    }

    fn __repr__(&self) -> String {
        format!("WordTrie(words={})", self.trie.len())
    }
}

/// Create the Python module
#[pymodule]
fn wordtrie(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCompletion>()?;
    m.add_class::<PyWordTrie>()?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
