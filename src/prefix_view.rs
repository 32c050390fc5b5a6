//! Prefix view into a token trie.
//!
//! This module provides the `PrefixView` type, the handle returned by prefix
//! navigation. It borrows the node reached by a prefix and remembers the prefix
//! so that keys enumerated from the view can be rebuilt in full.

use crate::key::{Key, KeyMode};
use crate::node::TrieNode;
use crate::predict::{Prediction, Ranking};
use crate::token::Token;
use crate::{Error, Result};

/// A lightweight view into the subtree reached by a key prefix.
///
/// Lookups on a view take suffixes relative to the view's prefix.
///
/// # Examples
///
/// ```
/// use token_trie::{Key, Trie};
///
/// let mut trie = Trie::<&str, u32>::new();
/// trie.insert(&["the", "cat"], 5).unwrap();
/// trie.insert(&["the", "cat", "sat"], 2).unwrap();
///
/// let view = trie.subtrie(&["the"]).unwrap();
/// assert_eq!(view.get(&["cat"]).unwrap(), &5);
/// assert_eq!(
///     view.keys()[1],
///     Key::Sequence(vec!["the", "cat", "sat"])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixView<'a, T, W> {
    /// The token prefix defining this view
    prefix: Vec<T>,

    /// The node reached by the prefix
    node: &'a TrieNode<T, W>,
}

impl<'a, T, W> PrefixView<'a, T, W> {
    pub(crate) fn new(prefix: Vec<T>, node: &'a TrieNode<T, W>) -> Self {
        PrefixView { prefix, node }
    }

    /// Returns the token prefix for this view.
    pub fn prefix(&self) -> &[T] {
        &self.prefix
    }

    /// Returns the node reached by the prefix.
    pub fn node(&self) -> &'a TrieNode<T, W> {
        self.node
    }

    /// Returns the number of keys stored at or below the prefix.
    pub fn len(&self) -> usize {
        self.node.size()
    }

    /// Returns whether no key is stored at or below the prefix.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the weight of the prefix itself, if it is a stored key.
    pub fn value(&self) -> Option<&'a W> {
        self.node.value()
    }
}

impl<'a, T: Token, W> PrefixView<'a, T, W> {
    /// Gets the weight stored for `prefix + suffix`.
    pub fn get(&self, suffix: &[T]) -> Result<&'a W> {
        self.node.get(suffix)
    }

    /// Checks if `prefix + suffix` is a stored key.
    pub fn contains(&self, suffix: &[T]) -> bool {
        self.node.contains(suffix)
    }

    /// Narrows the view to `prefix + suffix`.
    pub fn subtrie(&self, suffix: &[T]) -> Result<PrefixView<'a, T, W>> {
        if suffix.is_empty() {
            return Err(Error::EmptyKey);
        }
        let node = self.node.descend(suffix)?;
        let mut prefix = self.prefix.clone();
        prefix.extend_from_slice(suffix);
        Ok(PrefixView::new(prefix, node))
    }

    /// Enumerates the full keys stored below the prefix, prefix included.
    pub fn keys(&self) -> Vec<Key<T>> {
        self.node.keys(&self.prefix)
    }

    /// Enumerates the full keys with an explicit reconstruction mode.
    pub fn keys_with_mode(&self, mode: KeyMode) -> Vec<Key<T>> {
        self.node.keys_with_mode(&self.prefix, mode)
    }

    /// Enumerates what follows the prefix in every key stored below it.
    ///
    /// When the prefix is itself a stored key, its empty suffix comes first.
    pub fn suffixes(&self) -> Vec<Key<T>> {
        self.node.keys(&[])
    }
}

impl<'a, T: Token, W: Ord> PrefixView<'a, T, W> {
    /// Ranks the tokens that may follow the prefix.
    pub fn predict(&self, max_candidates: usize) -> Vec<Prediction<'a, T, W>> {
        self.node.candidates(max_candidates, Ranking::Weight)
    }

    /// Like [`PrefixView::predict`], with an explicit ranking policy.
    pub fn predict_with(&self, max_candidates: usize, ranking: Ranking) -> Vec<Prediction<'a, T, W>> {
        self.node.candidates(max_candidates, ranking)
    }
}
