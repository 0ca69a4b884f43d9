//! Greedy next-character prediction and word completion.
//!
//! Prediction never searches the whole subtree. From a node it takes the
//! heaviest child one level at a time, and completion runs that walk once
//! under each immediate child of the prefix. A heavy word hidden below a
//! light child can therefore be missed.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::{NodeId, Weight};
use crate::trie::Trie;

/// A predicted word together with its weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub word: String,
    pub weight: Weight,
}

/// The child of `node` with the greatest weight.
///
/// When several children share the maximum, the first one in child order
/// wins. Returns `None` for a node without children.
pub fn most_likely_next(trie: &Trie, node: NodeId) -> Option<NodeId> {
    let mut best: Option<NodeId> = None;
    for &child in trie.children(node) {
        match best {
            Some(current) if trie[child].weight() <= trie[current].weight() => {}
            _ => best = Some(child),
        }
    }
    best
}

/// Word predictor over a borrowed trie
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    trie: &'a Trie,
}

impl<'a> Predictor<'a> {
    pub fn new(trie: &'a Trie) -> Self {
        Predictor { trie }
    }

    /// See [`most_likely_next`]
    pub fn most_likely_next(&self, node: NodeId) -> Option<NodeId> {
        most_likely_next(self.trie, node)
    }

    /// Predict up to `top_n` words extending `prefix`, heaviest first.
    ///
    /// Each immediate child of the prefix node contributes at most one
    /// candidate: the first terminal node reached by repeatedly taking the
    /// heaviest child. The lightest candidates are then dropped (the later
    /// one on ties) until `top_n` remain.
    pub fn predict_completions(&self, prefix: &str, top_n: usize) -> Result<Vec<Completion>> {
        let start = self.trie.locate(prefix).ok_or_else(|| Error::NotFound {
            prefix: prefix.to_string(),
        })?;

        let mut candidates: Vec<NodeId> = self
            .trie
            .children(start)
            .iter()
            .filter_map(|&child| self.greedy_word(child))
            .collect();

        while candidates.len() > top_n {
            let lightest = candidates
                .iter()
                .enumerate()
                .min_by_key(|&(i, &id)| (self.trie[id].weight(), Reverse(i)))
                .map(|(i, _)| i);
            match lightest {
                Some(i) => {
                    candidates.remove(i);
                }
                None => break,
            }
        }

        candidates.sort_by_key(|&id| Reverse(self.trie[id].weight()));

        Ok(candidates
            .into_iter()
            .map(|id| Completion {
                word: self.trie[id].prefix().to_string(),
                weight: self.trie[id].weight(),
            })
            .collect())
    }

    /// Like [`predict_completions`](Self::predict_completions), words only
    pub fn predict_words(&self, prefix: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self
            .predict_completions(prefix, top_n)?
            .into_iter()
            .map(|c| c.word)
            .collect())
    }

    /// Follow the heaviest children from `node` until a stored word
    fn greedy_word(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        while !self.trie[current].is_terminal() {
            current = self.most_likely_next(current)?;
        }
        Some(current)
    }
}
