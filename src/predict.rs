//! Ranked next-token prediction.

use std::cmp::Ordering;

use crate::node::TrieNode;
use crate::token::Token;

/// Number of candidates returned when the caller does not ask for a specific count.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Ordering applied to the children of a prefix when predicting the next token.
///
/// Every policy breaks ties by descending subtree size, then ascending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Children that end a stored key come first, by descending weight; the
    /// others follow by descending subtree size.
    Weight,
    /// Descending number of keys stored below each child.
    Size,
    /// Descending best weight stored anywhere below each child.
    BestCompletion,
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking::Weight
    }
}

/// A candidate next token together with the subtree it leads to.
#[derive(Debug, PartialEq, Eq)]
pub struct Prediction<'a, T, W> {
    token: &'a T,
    node: &'a TrieNode<T, W>,
}

impl<'a, T, W> Clone for Prediction<'a, T, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, W> Copy for Prediction<'a, T, W> {}

impl<'a, T, W> Prediction<'a, T, W> {
    /// The predicted token.
    pub fn token(&self) -> &'a T {
        self.token
    }

    /// The subtree reached through the predicted token.
    pub fn node(&self) -> &'a TrieNode<T, W> {
        self.node
    }

    /// Weight of the key ending with this token, if the prefix plus this token
    /// is itself a stored key.
    pub fn weight(&self) -> Option<&'a W> {
        self.node.value.as_ref()
    }

    /// Number of stored keys continuing through this token.
    pub fn size(&self) -> usize {
        self.node.size()
    }

    /// Splits the candidate into its `(token, subtree)` pair.
    pub fn into_pair(self) -> (&'a T, &'a TrieNode<T, W>) {
        (self.token, self.node)
    }
}

impl<T, W: Ord> TrieNode<T, W> {
    /// Returns the largest weight stored at or below this node.
    pub fn best_weight(&self) -> Option<&W> {
        let below = self.children.values().filter_map(|child| child.best_weight()).max();
        match (self.value.as_ref(), below) {
            (Some(own), Some(below)) => Some(own.max(below)),
            (own, below) => own.or(below),
        }
    }
}

impl<T: Token, W: Ord> TrieNode<T, W> {
    /// Ranks the tokens that may follow `prefix`, using [`Ranking::Weight`].
    ///
    /// Returns at most `max_candidates` predictions. An unknown or empty prefix
    /// yields no prediction rather than an error.
    pub fn predict(&self, prefix: &[T], max_candidates: usize) -> Vec<Prediction<'_, T, W>> {
        self.predict_with(prefix, max_candidates, Ranking::Weight)
    }

    /// Like [`TrieNode::predict`], with an explicit ranking policy.
    pub fn predict_with(
        &self,
        prefix: &[T],
        max_candidates: usize,
        ranking: Ranking,
    ) -> Vec<Prediction<'_, T, W>> {
        match self.descend(prefix) {
            Ok(node) => node.candidates(max_candidates, ranking),
            Err(_) => Vec::new(),
        }
    }

    /// Ranks the immediate children of this node.
    pub fn candidates(&self, max_candidates: usize, ranking: Ranking) -> Vec<Prediction<'_, T, W>> {
        let mut ranked: Vec<(Prediction<'_, T, W>, usize)> = self
            .children
            .iter()
            .map(|(token, node)| (Prediction { token, node }, node.size()))
            .collect();

        ranked.sort_by(|(a, a_size), (b, b_size)| {
            rank(a, b, ranking)
                .then_with(|| b_size.cmp(a_size))
                .then_with(|| a.token.cmp(b.token))
        });

        ranked
            .into_iter()
            .take(max_candidates)
            .map(|(prediction, _)| prediction)
            .collect()
    }
}

// Orders `a` before `b` when `a` is the better candidate
fn rank<T, W: Ord>(a: &Prediction<'_, T, W>, b: &Prediction<'_, T, W>, ranking: Ranking) -> Ordering {
    match ranking {
        Ranking::Weight => match (a.weight(), b.weight()) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        Ranking::Size => Ordering::Equal,
        // `None` sorts below any weight, so reversing puts it last
        Ranking::BestCompletion => b.node.best_weight().cmp(&a.node.best_weight()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens<'a, T, W>(predictions: &[Prediction<'a, T, W>]) -> Vec<&'a T> {
        predictions.iter().map(|p| p.token()).collect()
    }

    fn sample() -> TrieNode<char, u32> {
        let mut root = TrieNode::new();
        root.insert(&['c', 'a', 't'], 10).unwrap();
        root.insert(&['c', 'a', 'r'], 7).unwrap();
        root.insert(&['c', 'o', 'w'], 3).unwrap();
        root
    }

    #[test]
    fn test_predict_children_of_prefix() {
        let root = sample();
        let predictions = root.predict(&['c', 'a'], DEFAULT_MAX_CANDIDATES);

        assert_eq!(tokens(&predictions), vec![&'t', &'r']);
        assert_eq!(predictions[0].weight(), Some(&10));
        assert_eq!(predictions[1].weight(), Some(&7));
    }

    #[test]
    fn test_predict_unknown_prefix_is_empty() {
        let root = sample();

        assert!(root.predict(&['x'], 5).is_empty());
        assert!(root.predict(&['c', 'a', 't', 's'], 5).is_empty());
        assert!(root.predict(&[], 5).is_empty());
    }

    #[test]
    fn test_predict_honors_cap() {
        let root = sample();

        assert_eq!(tokens(&root.predict(&['c', 'a'], 1)), vec![&'t']);
        assert!(root.predict(&['c', 'a'], 0).is_empty());
    }

    #[test]
    fn test_weight_ranking_puts_terminals_first() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['a', 'b'], 1).unwrap();
        root.insert(&['a', 'c', 'x'], 50).unwrap();
        root.insert(&['a', 'c', 'y'], 50).unwrap();

        let predictions = root.predict(&['a'], 5);
        assert_eq!(tokens(&predictions), vec![&'b', &'c']);
    }

    #[test]
    fn test_size_ranking() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['a', 'b'], 100).unwrap();
        root.insert(&['a', 'c', 'x'], 1).unwrap();
        root.insert(&['a', 'c', 'y'], 1).unwrap();

        let predictions = root.predict_with(&['a'], 5, Ranking::Size);
        assert_eq!(tokens(&predictions), vec![&'c', &'b']);
        assert_eq!(predictions[0].size(), 2);
    }

    #[test]
    fn test_best_completion_ranking() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['a', 'b'], 5).unwrap();
        root.insert(&['a', 'c', 'x'], 9).unwrap();
        root.insert(&['a', 'd'], 1).unwrap();

        let predictions = root.predict_with(&['a'], 5, Ranking::BestCompletion);
        assert_eq!(tokens(&predictions), vec![&'c', &'b', &'d']);
    }

    #[test]
    fn test_ties_break_by_size_then_token() {
        let mut root: TrieNode<char, u32> = TrieNode::new();
        root.insert(&['z'], 4).unwrap();
        root.insert(&['y'], 4).unwrap();
        root.insert(&['x'], 4).unwrap();
        root.insert(&['x', 'x'], 1).unwrap();

        let predictions = root.candidates(5, Ranking::Weight);
        assert_eq!(tokens(&predictions), vec![&'x', &'y', &'z']);
    }

    #[test]
    fn test_best_weight() {
        let root = sample();

        assert_eq!(root.best_weight(), Some(&10));
        assert_eq!(root.descend(&['c', 'o']).unwrap().best_weight(), Some(&3));
        assert_eq!(TrieNode::<char, u32>::new().best_weight(), None);
    }

    #[test]
    fn test_prediction_pair() {
        let root = sample();
        let (token, node) = root.predict(&['c'], 5)[0].into_pair();

        assert_eq!(*token, 'a');
        assert_eq!(node.size(), 2);
    }
}
