//! The main trie implementation.
//!
//! This module contains the `Trie` type, which owns the root node and provides
//! the primary API for working with the token trie.

use std::fmt;
use std::io;
use std::iter::FromIterator;

use log::trace;

use crate::key::{Key, KeyMode};
use crate::node::TrieNode;
use crate::predict::{Prediction, Ranking};
use crate::prefix_view::PrefixView;
use crate::token::Token;
use crate::Result;

/// A weighted prefix tree over token sequences.
///
/// Every key is a non-empty sequence of tokens; keys sharing a prefix share the
/// nodes of that prefix. The root always exists, even when no key is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie<T, W> {
    /// The root node of the trie
    pub(crate) root: TrieNode<T, W>,
}

impl<T, W> Trie<T, W> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::Trie;
    ///
    /// let trie = Trie::<char, u32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
        }
    }

    /// Returns the number of keys stored in the trie.
    ///
    /// The count is recomputed from the tree on every call.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::Trie;
    ///
    /// let mut trie = Trie::<char, u32>::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.insert(&['h', 'i'], 42).unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.root.size()
    }

    /// Alias of [`Trie::len`].
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the trie contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Returns the root node.
    pub fn root(&self) -> &TrieNode<T, W> {
        &self.root
    }

    /// Removes every key, leaving an empty root.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
    }
}

impl<T: Token, W> Trie<T, W> {
    /// Retrieves the weight stored for `key`.
    ///
    /// # Errors
    ///
    /// `Error::KeyNotFound` when `key` is not stored, including when it is only
    /// the prefix of longer keys; `Error::EmptyKey` when `key` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::{Error, Trie};
    ///
    /// let mut trie = Trie::<char, u32>::new();
    /// trie.insert(&['c', 'a', 't'], 10).unwrap();
    ///
    /// assert_eq!(trie.get(&['c', 'a', 't']).unwrap(), &10);
    /// assert!(matches!(trie.get(&['c', 'a']), Err(Error::KeyNotFound)));
    /// ```
    pub fn get(&self, key: &[T]) -> Result<&W> {
        self.root.get(key)
    }

    /// Returns `true` if the trie stores a weight for `key`.
    pub fn contains(&self, key: &[T]) -> bool {
        self.root.contains(key)
    }

    /// Inserts a key and its weight, replacing the weight already stored.
    ///
    /// Returns the replaced weight, if any.
    ///
    /// # Errors
    ///
    /// `Error::EmptyKey` when `key` is empty; the trie is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::Trie;
    ///
    /// let mut trie = Trie::<&str, u32>::new();
    /// assert_eq!(trie.insert(&["the", "cat"], 4).unwrap(), None);
    /// assert_eq!(trie.insert(&["the", "cat"], 9).unwrap(), Some(4));
    /// assert_eq!(trie.get(&["the", "cat"]).unwrap(), &9);
    /// ```
    pub fn insert(&mut self, key: &[T], value: W) -> Result<Option<W>> {
        let previous = self.root.insert(key, value)?;
        trace!(
            "{} key of {} tokens",
            if previous.is_some() { "replaced" } else { "inserted" },
            key.len()
        );
        Ok(previous)
    }

    /// Removes `key` and returns its weight.
    ///
    /// Branches left without any key are pruned back toward the root.
    ///
    /// # Errors
    ///
    /// `Error::KeyNotFound` when `key` is not stored; nothing is modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::Trie;
    ///
    /// let mut trie = Trie::<char, u32>::new();
    /// trie.insert(&['o', 'k'], 42).unwrap();
    ///
    /// assert_eq!(trie.remove(&['o', 'k']).unwrap(), 42);
    /// assert!(trie.is_empty());
    /// ```
    pub fn remove(&mut self, key: &[T]) -> Result<W> {
        let removed = self.root.remove(key)?;
        trace!("removed key of {} tokens", key.len());
        Ok(removed)
    }

    /// Returns a view of the subtree reached by `prefix`.
    ///
    /// The prefix does not need to be a stored key itself.
    ///
    /// # Errors
    ///
    /// `Error::KeyNotFound` if a token of `prefix` is missing, `Error::EmptyKey`
    /// if `prefix` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::{Key, Trie};
    ///
    /// let mut trie = Trie::<char, u32>::new();
    /// trie.insert(&['h', 'e', 'l', 'l', 'o'], 1).unwrap();
    /// trie.insert(&['h', 'e', 'l', 'p'], 2).unwrap();
    ///
    /// let view = trie.subtrie(&['h', 'e', 'l']).unwrap();
    /// assert_eq!(view.len(), 2);
    /// assert_eq!(view.suffixes()[1], Key::Joined("p".to_string()));
    /// ```
    pub fn subtrie(&self, prefix: &[T]) -> Result<PrefixView<'_, T, W>> {
        let node = self.root.descend(prefix)?;
        Ok(PrefixView::new(prefix.to_vec(), node))
    }

    /// Enumerates every stored key.
    ///
    /// Character keys are joined into strings and word keys are returned as
    /// token sequences, see [`KeyMode::Auto`].
    pub fn keys(&self) -> Vec<Key<T>> {
        self.root.keys(&[])
    }

    /// Enumerates every stored key with an explicit reconstruction mode.
    pub fn keys_with_mode(&self, mode: KeyMode) -> Vec<Key<T>> {
        self.root.keys_with_mode(&[], mode)
    }

    /// Enumerates every stored key along with its weight.
    pub fn entries(&self) -> Vec<(Key<T>, &W)> {
        self.root.entries(&[], KeyMode::Auto)
    }

    /// Writes every key and its weight to `out`, one per line.
    pub fn dump<O: io::Write>(&self, out: &mut O) -> io::Result<()>
    where
        T: fmt::Debug,
        W: fmt::Display,
    {
        writeln!(out, "Dumping trie:")?;
        for (key, value) in self.entries() {
            writeln!(out, "  t[{}] = {}", key, value)?;
        }
        Ok(())
    }
}

impl<T: Token, W: Ord> Trie<T, W> {
    /// Ranks the tokens that may follow `prefix`.
    ///
    /// Uses [`Ranking::Weight`] and returns at most `max_candidates` tokens. An
    /// unknown prefix yields an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::{Trie, DEFAULT_MAX_CANDIDATES};
    ///
    /// let mut trie = Trie::<&str, u32>::new();
    /// trie.insert(&["the", "cat"], 4).unwrap();
    /// trie.insert(&["the", "dog"], 9).unwrap();
    ///
    /// let next: Vec<&str> = trie
    ///     .predict(&["the"], DEFAULT_MAX_CANDIDATES)
    ///     .iter()
    ///     .map(|p| *p.token())
    ///     .collect();
    /// assert_eq!(next, vec!["dog", "cat"]);
    /// ```
    pub fn predict(&self, prefix: &[T], max_candidates: usize) -> Vec<Prediction<'_, T, W>> {
        self.root.predict(prefix, max_candidates)
    }

    /// Like [`Trie::predict`], with an explicit ranking policy.
    pub fn predict_with(
        &self,
        prefix: &[T],
        max_candidates: usize,
        ranking: Ranking,
    ) -> Vec<Prediction<'_, T, W>> {
        self.root.predict_with(prefix, max_candidates, ranking)
    }
}

// Default implementation
impl<T, W> Default for Trie<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token, W> Extend<(Vec<T>, W)> for Trie<T, W> {
    /// Inserts every pair, skipping empty keys.
    fn extend<I: IntoIterator<Item = (Vec<T>, W)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if self.insert(&key, value).is_err() {
                trace!("skipped empty key");
            }
        }
    }
}

impl<T: Token, W> FromIterator<(Vec<T>, W)> for Trie<T, W> {
    fn from_iter<I: IntoIterator<Item = (Vec<T>, W)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}
