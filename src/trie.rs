//! Frequency-weighted trie over single characters.
//!
//! Nodes are kept in an arena owned by the `Trie` and addressed by `NodeId`.
//! Every node caches its full prefix, so checking whether a walk reached the
//! requested word is a string comparison rather than a climb to the root.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::ops::Index;
use std::path::Path;

use tracing::debug;

use crate::corpus;
use crate::error::Result;
use crate::node::{NodeId, TrieNode, Weight};

/// A trie of words, each carrying a frequency weight
#[derive(Debug, Clone)]
pub struct Trie {
    /// Node arena; slot 0 is the root
    nodes: Vec<TrieNode>,
    /// Slots released by pruning, reused by later insertions
    free: Vec<NodeId>,
    /// Words currently stored
    words: BTreeSet<String>,
}

impl Default for Trie {
    fn default() -> Self {
        Trie {
            nodes: vec![TrieNode::root()],
            free: Vec::new(),
            words: BTreeSet::new(),
        }
    }
}

/// Direct arena access.
///
/// A pruned id reads as an empty vacant slot, and once the slot is reused
/// it reads as an unrelated node. Use [`Trie::node`] when an id may be stale.
impl Index<NodeId> for Trie {
    type Output = TrieNode;

    fn index(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }
}

impl Trie {
    /// Create a new empty Trie
    pub fn new() -> Self {
        Trie::default()
    }

    /// Build a trie from `(word, weight)` pairs.
    ///
    /// A word that appears more than once keeps the weight of its last
    /// occurrence. Intermediate nodes created along the way get a placeholder
    /// weight of `weight / word length`, so partial prefixes can be ranked.
    pub fn build<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Weight)>,
        S: AsRef<str>,
    {
        let mut trie = Trie::new();
        let mut pairs_seen = 0usize;

        for (word, weight) in pairs {
            trie.add(word.as_ref(), weight);
            pairs_seen += 1;
        }

        debug!(
            pairs = pairs_seen,
            words = trie.len(),
            nodes = trie.node_count(),
            "built trie"
        );
        trie
    }

    /// Number of words in the trie
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the trie holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Id of the root node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by id, or `None` if the id was never allocated or has
    /// been pruned.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes
            .get(id.0)
            .filter(|node| id == NodeId::ROOT || node.symbol.is_some())
    }

    /// Children of `id`, in insertion order. Empty for a pruned id.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], |node| node.children.as_slice())
    }

    /// The child of `id` whose symbol is `ch`
    pub fn child(&self, id: NodeId, ch: char) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self[c].symbol == Some(ch))
    }

    /// Walk the trie by one character, starting from the root when
    /// `current` is `None`.
    pub fn walk(&self, ch: char, current: Option<NodeId>) -> Option<NodeId> {
        self.child(current.unwrap_or(NodeId::ROOT), ch)
    }

    /// Follow `word` from the root as far as the trie allows.
    ///
    /// Returns the deepest node reached and how many characters were
    /// consumed to get there.
    pub fn deepest_match(&self, word: &str) -> (NodeId, usize) {
        let mut current = NodeId::ROOT;
        let mut consumed = 0;

        for ch in word.chars() {
            match self.child(current, ch) {
                Some(next) => {
                    current = next;
                    consumed += 1;
                }
                None => break,
            }
        }

        (current, consumed)
    }

    /// Find the node whose prefix is exactly `word`, terminal or not
    pub fn locate(&self, word: &str) -> Option<NodeId> {
        let (node, _) = self.deepest_match(word);
        if self[node].prefix == word {
            Some(node)
        } else {
            None
        }
    }

    /// Check if `word` is stored in the trie
    pub fn search(&self, word: &str) -> bool {
        self.locate(word)
            .map_or(false, |id| self[id].is_terminal)
    }

    /// Weight of a stored word
    pub fn weight_of(&self, word: &str) -> Option<Weight> {
        self.locate(word)
            .filter(|&id| self[id].is_terminal)
            .map(|id| self[id].weight)
    }

    /// Insert a word.
    ///
    /// Inserting a word that is already stored does nothing and returns
    /// `false`; in particular the stored weight is left untouched.
    pub fn insert(&mut self, word: &str, weight: Weight) -> bool {
        if self.search(word) {
            debug!(word, "word already present, insert skipped");
            return false;
        }

        self.add(word, weight);
        debug!(word, weight, "inserted word");
        true
    }

    /// Remove a word, pruning ancestors that no longer lead anywhere.
    ///
    /// Returns the removed word, or `None` if it was not stored.
    pub fn remove(&mut self, word: &str) -> Option<String> {
        let target = self.locate(word)?;
        if !self.nodes[target.0].is_terminal {
            return None;
        }

        self.nodes[target.0].is_terminal = false;
        self.words.remove(word);

        let mut current = target;
        let mut pruned = 0usize;
        while current != NodeId::ROOT {
            let node = &self.nodes[current.0];
            if node.is_terminal || node.can_walk() {
                break;
            }
            let Some(parent) = node.parent else {
                break;
            };

            self.nodes[parent.0].children.retain(|&c| c != current);
            self.release(current);
            pruned += 1;
            current = parent;
        }

        debug!(word, pruned, "removed word");
        Some(word.to_string())
    }

    /// Iterate over stored words in lexicographic order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Map every stored word to its terminal node
    pub fn word_index(&self) -> HashMap<String, NodeId> {
        self.words
            .iter()
            .filter_map(|word| self.locate(word).map(|id| (word.clone(), id)))
            .collect()
    }

    /// Insert every word of `other` with its weight. Words already stored
    /// here keep their own weight.
    pub fn merge(&mut self, other: &Trie) {
        for word in other.words() {
            if let Some(weight) = other.weight_of(word) {
                self.insert(word, weight);
            }
        }
    }

    /// Descend/create along `word` and mark the last node terminal with
    /// `weight`, overwriting any previous weight.
    fn add(&mut self, word: &str, weight: Weight) -> NodeId {
        let placeholder = placeholder_weight(word, weight);
        let mut current = NodeId::ROOT;

        for ch in word.chars() {
            current = match self.child(current, ch) {
                Some(next) => next,
                None => self.create_child(current, ch, placeholder),
            };
        }

        let node = &mut self.nodes[current.0];
        node.is_terminal = true;
        node.weight = weight;
        self.words.insert(word.to_string());
        current
    }

    fn create_child(&mut self, parent: NodeId, symbol: char, weight: Weight) -> NodeId {
        let node = TrieNode::child_of(parent, &self[parent].prefix, symbol, weight);
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.nodes[parent.0].children.push(id);
        id
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.0] = TrieNode::default();
        self.free.push(id);
    }
}

fn placeholder_weight(word: &str, weight: Weight) -> Weight {
    match word.chars().count() as Weight {
        0 => weight,
        len => weight / len,
    }
}

/// Builder for loading a Trie from frequency lists
///
/// Words are queued as given. With normalization on (the default) they are
/// folded through [`corpus::normalize_word`] when filtering and building.
#[derive(Debug)]
pub struct TrieBuilder {
    pairs: Vec<(String, Weight)>,
    normalize: bool,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        TrieBuilder {
            pairs: Vec::new(),
            normalize: true,
        }
    }
}

impl TrieBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        TrieBuilder::default()
    }

    /// Turn case folding and NFC normalization on or off
    pub fn normalize(&mut self, enabled: bool) -> &mut Self {
        self.normalize = enabled;
        self
    }

    /// Queue a single word
    pub fn add(&mut self, word: &str, weight: Weight) -> &mut Self {
        self.pairs.push((word.to_string(), weight));
        self
    }

    /// Load `word,count` rows from CSV text. Returns the number of rows read.
    pub fn load_frequency_csv(&mut self, content: &str) -> Result<usize> {
        let pairs = corpus::load_frequency_csv(content.as_bytes())?;
        let count = pairs.len();
        self.pairs.extend(pairs);
        Ok(count)
    }

    /// Load `word,count` rows from a CSV file
    pub fn load_frequency_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let file = File::open(path.as_ref())?;
        let pairs = corpus::load_frequency_csv(BufReader::new(file))?;
        let count = pairs.len();
        debug!(path = %path.as_ref().display(), rows = count, "loaded frequency file");
        self.pairs.extend(pairs);
        Ok(count)
    }

    /// Drop queued words that are not in `dictionary`
    pub fn retain_dictionary(&mut self, dictionary: &HashSet<String>) -> &mut Self {
        let before = self.pairs.len();
        let pairs = std::mem::take(&mut self.pairs);
        self.pairs = if self.normalize {
            let dictionary: HashSet<String> =
                dictionary.iter().map(|w| corpus::normalize_word(w)).collect();
            corpus::filter_known(normalized(pairs), &dictionary)
        } else {
            corpus::filter_known(pairs, dictionary)
        };
        debug!(before, after = self.pairs.len(), "filtered by dictionary");
        self
    }

    /// Number of queued pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Build and return the Trie
    pub fn build(self) -> Trie {
        if self.normalize {
            Trie::build(normalized(self.pairs))
        } else {
            Trie::build(self.pairs)
        }
    }
}

fn normalized(pairs: Vec<(String, Weight)>) -> Vec<(String, Weight)> {
    pairs
        .into_iter()
        .map(|(word, weight)| (corpus::normalize_word(&word), weight))
        .filter(|(word, _)| !word.is_empty())
        .collect()
}
