//! Recursive node implementation for the token trie.
//!
//! This module contains the `TrieNode` structure that forms the backbone of the
//! trie. Every node exclusively owns its children, so a whole subtree can be
//! borrowed, walked and pruned without shared pointers.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::key::{Key, KeyMode};
use crate::token::Token;
use crate::{Error, Result};

/// A node of the token trie.
///
/// Each node maps single tokens to owned child nodes and may carry the weight
/// of the key that ends here. A node can be terminal and have children at the
/// same time, e.g. `car` and `cart`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode<T, W> {
    /// Weight of the key ending at this node, if one is stored
    pub(crate) value: Option<W>,

    /// Child nodes indexed by the token leading to them
    pub(crate) children: BTreeMap<T, TrieNode<T, W>>,
}

impl<T, W> TrieNode<T, W> {
    /// Creates a new empty node
    pub fn new() -> Self {
        TrieNode {
            value: None,
            children: BTreeMap::new(),
        }
    }

    /// Creates a new node holding `value` and no children
    pub fn with_value(value: W) -> Self {
        TrieNode {
            value: Some(value),
            children: BTreeMap::new(),
        }
    }

    /// Returns the weight stored at this node, if this node ends a key.
    pub fn value(&self) -> Option<&W> {
        self.value.as_ref()
    }

    /// Returns whether a key ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Returns whether this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of stored keys at or below this node.
    ///
    /// The count is recomputed on every call by walking the whole subtree.
    pub fn size(&self) -> usize {
        let mut count = if self.value.is_some() { 1 } else { 0 };

        for child in self.children.values() {
            count += child.size();
        }

        count
    }

    /// Iterates over the immediate children in ascending token order.
    pub fn children(&self) -> btree_map::Iter<'_, T, TrieNode<T, W>> {
        self.children.iter()
    }

    // Equivalent to `size() == 0` as long as empty children are pruned eagerly
    pub(crate) fn is_vacant(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

impl<T: Token, W> TrieNode<T, W> {
    /// Returns the immediate child reached through `token`.
    pub fn child(&self, token: &T) -> Option<&TrieNode<T, W>> {
        self.children.get(token)
    }

    /// Walks `prefix` from this node and returns the node it ends on.
    ///
    /// The node reached does not have to be terminal.
    ///
    /// # Errors
    ///
    /// `Error::EmptyKey` if `prefix` is empty, `Error::KeyNotFound` if any token
    /// of `prefix` is missing along the path.
    pub fn descend(&self, prefix: &[T]) -> Result<&TrieNode<T, W>> {
        if prefix.is_empty() {
            return Err(Error::EmptyKey);
        }

        let mut current = self;
        for token in prefix {
            current = current.children.get(token).ok_or(Error::KeyNotFound)?;
        }

        Ok(current)
    }

    /// Returns the weight stored for `key` below this node.
    ///
    /// # Errors
    ///
    /// `Error::KeyNotFound` if the path is missing or ends on a node that is only
    /// a prefix of longer keys.
    pub fn get(&self, key: &[T]) -> Result<&W> {
        self.descend(key)?.value.as_ref().ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if `key` is stored below this node.
    pub fn contains(&self, key: &[T]) -> bool {
        self.get(key).is_ok()
    }

    /// Stores `value` for `key`, creating the missing nodes along the path.
    ///
    /// Returns the weight previously stored for `key`, which is replaced.
    pub fn insert(&mut self, key: &[T], value: W) -> Result<Option<W>> {
        let (head, rest) = key.split_first().ok_or(Error::EmptyKey)?;
        let child = self.children.entry(head.clone()).or_insert_with(TrieNode::new);

        if rest.is_empty() {
            Ok(child.value.replace(value))
        } else {
            child.insert(rest, value)
        }
    }

    /// Removes `key` and returns its weight.
    ///
    /// Every node left without a value and without children on the way back up
    /// is dropped from its parent, so no dangling branch survives the removal.
    /// Nothing is modified when the key is not stored.
    pub fn remove(&mut self, key: &[T]) -> Result<W> {
        let (head, rest) = key.split_first().ok_or(Error::EmptyKey)?;
        let child = self.children.get_mut(head).ok_or(Error::KeyNotFound)?;

        let removed = if rest.is_empty() {
            child.value.take().ok_or(Error::KeyNotFound)?
        } else {
            child.remove(rest)?
        };

        if child.is_vacant() {
            self.children.remove(head);
        }

        Ok(removed)
    }

    /// Enumerates every key stored at or below this node, each prefixed by
    /// `prefix`, reconstructing them with [`KeyMode::Auto`].
    ///
    /// Keys are listed depth-first: a node before its descendants, siblings in
    /// ascending token order.
    pub fn keys(&self, prefix: &[T]) -> Vec<Key<T>> {
        self.keys_with_mode(prefix, KeyMode::Auto)
    }

    /// Like [`TrieNode::keys`], with an explicit reconstruction mode.
    pub fn keys_with_mode(&self, prefix: &[T], mode: KeyMode) -> Vec<Key<T>> {
        let mut out = Vec::new();
        let mut path = prefix.to_vec();
        self.walk(&mut path, &mut |path, _| out.push(Key::from_tokens(path, mode)));
        out
    }

    /// Enumerates `(key, weight)` pairs in the same order as [`TrieNode::keys`].
    pub fn entries(&self, prefix: &[T], mode: KeyMode) -> Vec<(Key<T>, &W)> {
        let mut out = Vec::new();
        let mut path = prefix.to_vec();
        self.walk(&mut path, &mut |path, value| {
            out.push((Key::from_tokens(path, mode), value))
        });
        out
    }

    // Depth-first walk calling `visit` for every terminal node
    fn walk<'a, F>(&'a self, path: &mut Vec<T>, visit: &mut F)
    where
        F: FnMut(&[T], &'a W),
    {
        if let Some(value) = &self.value {
            visit(path, value);
        }

        for (token, child) in &self.children {
            path.push(token.clone());
            child.walk(path, visit);
            path.pop();
        }
    }
}

impl<T, W> Default for TrieNode<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrieNode<char, u32> {
        let mut root = TrieNode::new();
        root.insert(&['c', 'a', 't'], 10).unwrap();
        root.insert(&['c', 'a', 'r'], 7).unwrap();
        root.insert(&['c', 'o', 'w'], 3).unwrap();
        root
    }

    #[test]
    fn test_new_node() {
        let node: TrieNode<char, u32> = TrieNode::new();

        assert!(node.value().is_none());
        assert!(!node.is_terminal());
        assert!(node.is_leaf());
        assert_eq!(node.size(), 0);
    }

    #[test]
    fn test_with_value() {
        let node: TrieNode<char, u32> = TrieNode::with_value(42);

        assert_eq!(node.value(), Some(&42));
        assert!(node.is_leaf());
        assert_eq!(node.size(), 1);
    }

    #[test]
    fn test_subtree_size() {
        let mut node: TrieNode<char, u32> = TrieNode::with_value(42);
        assert_eq!(node.size(), 1);

        node.children.insert('a', TrieNode::with_value(43));
        assert_eq!(node.size(), 2);

        // Routing node without a value only counts its descendants
        let mut routing = TrieNode::new();
        routing.children.insert('b', TrieNode::with_value(1));
        node.children.insert('r', routing);
        assert_eq!(node.size(), 3);
    }

    #[test]
    fn test_insert_returns_previous_value() {
        let mut root: TrieNode<char, u32> = TrieNode::new();

        assert_eq!(root.insert(&['a'], 1).unwrap(), None);
        assert_eq!(root.insert(&['a'], 2).unwrap(), Some(1));
        assert_eq!(root.get(&['a']).unwrap(), &2);
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn test_insert_empty_key() {
        let mut root: TrieNode<char, u32> = TrieNode::new();

        assert!(matches!(root.insert(&[], 1), Err(Error::EmptyKey)));
        assert!(root.is_vacant());
    }

    #[test]
    fn test_get_interior_node() {
        let root = sample();

        assert_eq!(root.get(&['c', 'a', 't']).unwrap(), &10);
        assert!(matches!(root.get(&['c', 'a']), Err(Error::KeyNotFound)));
        assert!(matches!(root.get(&['d']), Err(Error::KeyNotFound)));
        assert!(matches!(root.get(&['c', 'a', 't', 's']), Err(Error::KeyNotFound)));
    }

    #[test]
    fn test_descend() {
        let root = sample();

        let node = root.descend(&['c', 'a']).unwrap();
        assert!(!node.is_terminal());
        assert_eq!(node.size(), 2);

        assert!(matches!(root.descend(&['c', 'x']), Err(Error::KeyNotFound)));
        assert!(matches!(root.descend(&[]), Err(Error::EmptyKey)));
    }

    #[test]
    fn test_remove_prunes_dangling_branch() {
        let mut root = sample();

        assert_eq!(root.remove(&['c', 'o', 'w']).unwrap(), 3);

        let c = root.child(&'c').unwrap();
        assert!(c.child(&'o').is_none());
        assert!(c.child(&'a').is_some());
        assert_eq!(root.size(), 2);
    }

    #[test]
    fn test_remove_keeps_shared_prefix() {
        let mut root = sample();

        root.remove(&['c', 'a', 't']).unwrap();

        let a = root.descend(&['c', 'a']).unwrap();
        assert!(a.child(&'t').is_none());
        assert_eq!(a.child(&'r').unwrap().value(), Some(&7));
    }

    #[test]
    fn test_remove_terminal_with_children() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['a'], 1).unwrap();
        root.insert(&['a', 'b'], 2).unwrap();

        assert_eq!(root.remove(&['a']).unwrap(), 1);

        // The node stays as a routing node for 'ab'
        let a = root.child(&'a').unwrap();
        assert!(!a.is_terminal());
        assert_eq!(root.get(&['a', 'b']).unwrap(), &2);
    }

    #[test]
    fn test_remove_missing_key_leaves_tree_untouched() {
        let mut root = sample();
        let before = root.clone();

        assert!(matches!(root.remove(&['c', 'a']), Err(Error::KeyNotFound)));
        assert!(matches!(root.remove(&['c', 'a', 'x']), Err(Error::KeyNotFound)));
        assert!(matches!(root.remove(&['z']), Err(Error::KeyNotFound)));
        assert!(matches!(root.remove(&[]), Err(Error::EmptyKey)));

        assert_eq!(root, before);
    }

    #[test]
    fn test_remove_last_key_empties_root() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['a', 'b', 'c'], 1).unwrap();

        root.remove(&['a', 'b', 'c']).unwrap();

        assert!(root.is_leaf());
        assert_eq!(root.size(), 0);
    }

    #[test]
    fn test_keys_depth_first_in_token_order() {
        let root = sample();

        assert_eq!(
            root.keys(&[]),
            vec![
                Key::Joined("car".to_string()),
                Key::Joined("cat".to_string()),
                Key::Joined("cow".to_string()),
            ]
        );
    }

    #[test]
    fn test_keys_node_before_descendants() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['a', 'b'], 2).unwrap();
        root.insert(&['a'], 1).unwrap();

        assert_eq!(
            root.keys(&[]),
            vec![Key::Joined("a".to_string()), Key::Joined("ab".to_string())]
        );
    }

    #[test]
    fn test_keys_with_accumulator() {
        let root = sample();
        let a = root.descend(&['c', 'a']).unwrap();

        assert_eq!(
            a.keys(&['c', 'a']),
            vec![Key::Joined("car".to_string()), Key::Joined("cat".to_string())]
        );
        assert_eq!(
            a.keys_with_mode(&[], KeyMode::Sequence),
            vec![Key::Sequence(vec!['r']), Key::Sequence(vec!['t'])]
        );
    }

    #[test]
    fn test_entries() {
        let root = sample();
        let entries = root.entries(&[], KeyMode::Auto);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (Key::Joined("car".to_string()), &7));
        assert_eq!(entries[2], (Key::Joined("cow".to_string()), &3));
    }
}
