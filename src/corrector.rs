//! Single-error spell correction.
//!
//! The corrector assumes exactly one character of a word is wrong and that
//! its position is known (or guessed from where the word leaves the trie).
//! It substitutes that character with the sibling branch best supported by
//! the character that follows, then replays the rest of the word literally.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::corpus;
use crate::error::{Error, Result};
use crate::node::{NodeId, Weight};
use crate::predictor::most_likely_next;
use crate::trie::Trie;

/// Runs of letters (apostrophes included) in free text
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}']+").expect("Invalid regex"));

/// Outcome of correcting one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
    /// Character index that was treated as wrong, `None` for known words
    pub position: Option<usize>,
}

impl Correction {
    /// Whether the corrected word differs from the input
    pub fn changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// Spell corrector over a borrowed trie
///
/// `correct` works on the word exactly as given. `correct_word` and
/// `correct_text` look words up through [`corpus::normalize_word`] unless
/// normalization is turned off, so "Hello" counts as the stored "hello".
#[derive(Debug, Clone, Copy)]
pub struct SpellCorrector<'a> {
    trie: &'a Trie,
    normalize: bool,
}

impl<'a> SpellCorrector<'a> {
    pub fn new(trie: &'a Trie) -> Self {
        SpellCorrector {
            trie,
            normalize: true,
        }
    }

    /// Look words up verbatim instead of case-folded and NFC-normalized
    pub fn normalize(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    /// Correct `word` assuming the character at `error_position` is wrong.
    ///
    /// Fails only when `word` is empty or `error_position` is past its end.
    /// When the trie offers no usable path the word is returned unchanged.
    pub fn correct(&self, word: &str, error_position: usize) -> Result<String> {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return Err(Error::EmptyWord);
        }
        if error_position >= chars.len() {
            return Err(Error::PositionOutOfRange {
                position: error_position,
                len: chars.len(),
            });
        }

        let corrected = if error_position == chars.len() - 1 {
            self.replace_last(&chars)
        } else {
            self.replace_inner(&chars, error_position)
        };

        let corrected = corrected.unwrap_or_else(|| word.to_string());
        trace!(word, error_position, %corrected, "corrected word");
        Ok(corrected)
    }

    /// Guess which character of `word` is wrong.
    ///
    /// Returns `None` when `word` is already stored (or empty). Otherwise the
    /// index of the first character the trie cannot follow, or the last index
    /// when the whole word is a path but not a stored word.
    pub fn guess_error_position(&self, word: &str) -> Option<usize> {
        let len = word.chars().count();
        if len == 0 || self.trie.search(word) {
            return None;
        }

        let (_, consumed) = self.trie.deepest_match(word);
        Some(consumed.min(len - 1))
    }

    /// Correct `word` at its guessed error position.
    ///
    /// A word stored as given, or stored in its normalized form, is kept.
    /// Otherwise the normalized form is corrected and `position` indexes
    /// into it; a word the trie cannot fix comes back as given.
    pub fn correct_word(&self, word: &str) -> Result<Correction> {
        let lookup = if self.normalize {
            corpus::normalize_word(word)
        } else {
            word.to_string()
        };

        let position = if self.trie.search(word) {
            None
        } else {
            self.guess_error_position(&lookup)
        };
        let corrected = match position {
            Some(pos) => self.correct(&lookup, pos)?,
            None => word.to_string(),
        };
        let corrected = if corrected == lookup {
            word.to_string()
        } else {
            corrected
        };

        Ok(Correction {
            original: word.to_string(),
            corrected,
            position,
        })
    }

    /// Correct every unknown word in `text`, leaving everything between
    /// words untouched.
    pub fn correct_text(&self, text: &str) -> String {
        WORD_RE
            .replace_all(text, |caps: &Captures| {
                let word = &caps[0];
                match self.correct_word(word) {
                    Ok(correction) => correction.corrected,
                    Err(_) => word.to_string(),
                }
            })
            .into_owned()
    }

    /// The error sits on the last character: keep the head and take the
    /// heaviest continuation.
    fn replace_last(&self, chars: &[char]) -> Option<String> {
        let head: String = chars[..chars.len() - 1].iter().collect();
        let node = self.trie.locate(&head)?;
        let next = most_likely_next(self.trie, node)?;
        Some(self.trie[next].prefix().to_string())
    }

    fn replace_inner(&self, chars: &[char], error_position: usize) -> Option<String> {
        let mut current = self.trie.root();
        for &ch in &chars[..error_position] {
            current = self.trie.child(current, ch)?;
        }

        let following = chars[error_position + 1];
        let substitute = self
            .best_substitute(current, following)
            .or_else(|| self.trie.child(current, chars[error_position]))?;

        let mut current = substitute;
        for &ch in &chars[error_position + 1..] {
            current = self.trie.child(current, ch)?;
        }

        Some(self.trie[current].prefix().to_string())
    }

    /// Among the children of `node`, the one whose own child `following`
    /// is heaviest. Ties keep the first child.
    fn best_substitute(&self, node: NodeId, following: char) -> Option<NodeId> {
        let mut best: Option<(NodeId, Weight)> = None;

        for &alternate in self.trie.children(node) {
            let Some(next) = self.trie.child(alternate, following) else {
                continue;
            };
            let weight = self.trie[next].weight();
            if best.map_or(true, |(_, best_weight)| weight > best_weight) {
                best = Some((alternate, weight));
            }
        }

        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::TrieBuilder;

    fn fruit() -> Trie {
        Trie::build([("apple", 100), ("apply", 40), ("maple", 30), ("ample", 60)])
    }

    #[test]
    fn test_correct_last_character() {
        let trie = Trie::build([("apple", 100)]);
        let corrector = SpellCorrector::new(&trie);
        assert_eq!(corrector.correct("applz", 4).unwrap(), "apple");
    }

    #[test]
    fn test_correct_last_character_prefers_heaviest() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);
        assert_eq!(corrector.correct("applq", 4).unwrap(), "apple");
    }

    #[test]
    fn test_correct_first_character() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);
        // 'a' is the only root child followed by 'p'
        assert_eq!(corrector.correct("xpple", 0).unwrap(), "apple");
    }

    #[test]
    fn test_correct_middle_character() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);
        assert_eq!(corrector.correct("apxle", 2).unwrap(), "apple");
        assert_eq!(corrector.correct("axple", 1).unwrap(), "apple");
    }

    #[test]
    fn test_substitute_chooses_heaviest_continuation() {
        // Both "b" and "c" are followed by "a"; "ca" is heavier
        let trie = Trie::build([("bat", 10), ("cat", 90)]);
        let corrector = SpellCorrector::new(&trie);
        assert_eq!(corrector.correct("zat", 0).unwrap(), "cat");
    }

    #[test]
    fn test_correct_keeps_original_when_no_substitute() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);
        // No child of "ap" is followed by 'z', and "ap" + 'p' exists, so the
        // original letter is kept and the literal tail fails to match
        assert_eq!(corrector.correct("appzz", 2).unwrap(), "appzz");
    }

    #[test]
    fn test_correct_unmatched_prefix_returns_original() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);
        assert_eq!(corrector.correct("zzzle", 3).unwrap(), "zzzle");
        assert_eq!(corrector.correct("zzzzz", 4).unwrap(), "zzzzz");
    }

    #[test]
    fn test_correct_rejects_bad_input() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);

        assert!(matches!(corrector.correct("", 0), Err(Error::EmptyWord)));
        assert!(matches!(
            corrector.correct("apple", 5),
            Err(Error::PositionOutOfRange { position: 5, len: 5 })
        ));
    }

    #[test]
    fn test_guess_error_position() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);

        assert_eq!(corrector.guess_error_position("apple"), None);
        assert_eq!(corrector.guess_error_position(""), None);
        assert_eq!(corrector.guess_error_position("applz"), Some(4));
        assert_eq!(corrector.guess_error_position("apxle"), Some(2));
        assert_eq!(corrector.guess_error_position("xpple"), Some(0));
        // A path that is not a word points at the last character
        assert_eq!(corrector.guess_error_position("appl"), Some(3));
    }

    #[test]
    fn test_correct_word() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);

        let correction = corrector.correct_word("mople").unwrap();
        assert_eq!(correction.corrected, "maple");
        assert_eq!(correction.position, Some(1));
        assert!(correction.changed());

        let correction = corrector.correct_word("apple").unwrap();
        assert!(!correction.changed());
        assert_eq!(correction.position, None);
    }

    #[test]
    fn test_correct_text() {
        let trie = fruit();
        let corrector = SpellCorrector::new(&trie);

        let fixed = corrector.correct_text("applz, mople!\n  ample");
        assert_eq!(fixed, "apple, maple!\n  ample");
    }

    fn greetings() -> Trie {
        let mut builder = TrieBuilder::new();
        builder
            .load_frequency_csv("hello,120\njello,500\nthe,900\n")
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_correct_word_keeps_capitalized_known_word() {
        let trie = greetings();
        let corrector = SpellCorrector::new(&trie);

        let correction = corrector.correct_word("Hello").unwrap();
        assert_eq!(correction.corrected, "Hello");
        assert_eq!(correction.position, None);
        assert!(!correction.changed());

        // A capitalized misspelling is corrected through its lowercase form
        let correction = corrector.correct_word("Hellz").unwrap();
        assert_eq!(correction.corrected, "hello");
        assert_eq!(correction.position, Some(4));
    }

    #[test]
    fn test_correct_text_keeps_capitalized_words() {
        let trie = greetings();
        let corrector = SpellCorrector::new(&trie);

        let text = "Hello world. The end";
        assert_eq!(corrector.correct_text(text), text);
        assert_eq!(corrector.correct_text("HELLO, the!"), "HELLO, the!");
    }

    #[test]
    fn test_correct_word_without_normalization() {
        let trie = greetings();
        let corrector = SpellCorrector::new(&trie).normalize(false);

        // "H" is not a branch, so the first letter is swapped for the
        // heaviest one followed by 'e'
        let correction = corrector.correct_word("Hello").unwrap();
        assert_eq!(correction.corrected, "jello");
        assert_eq!(correction.position, Some(0));
    }
}
