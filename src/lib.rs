//! # Token Trie
//!
//! A weighted prefix tree over token sequences, built for predictive text input.
//!
//! Keys are sequences of tokens: the characters of a word, or the words of an
//! n-gram. Every stored key carries a weight (a frequency or a rank) that is used
//! to rank next-token predictions.
//!
//! ## Features
//!
//! - **Exact lookup**: `get`, `contains` and `remove` over whole keys
//! - **Prefix navigation**: `subtrie` returns a view rooted at any stored prefix
//! - **Ranked prediction**: `predict` lists the tokens that may follow a prefix
//! - **Key reconstruction**: character keys come back as joined strings, word keys
//!   as token sequences
//! - **Loading**: count files in unigram or n-gram format, with a per-line report
//!
//! ## Example
//!
//! ```rust
//! use token_trie::Trie;
//!
//! let mut trie = Trie::<char, u32>::new();
//! trie.insert(&['c', 'a', 't'], 10).unwrap();
//! trie.insert(&['c', 'a', 'r'], 7).unwrap();
//!
//! assert_eq!(trie.get(&['c', 'a', 't']).ok(), Some(&10));
//! assert!(!trie.contains(&['c', 'a']));
//!
//! let next: Vec<char> = trie
//!     .predict(&['c', 'a'], 5)
//!     .iter()
//!     .map(|p| *p.token())
//!     .collect();
//! assert_eq!(next, vec!['t', 'r']);
//! ```

use std::path::PathBuf;

use thiserror::Error;

mod key;
pub mod loader;
pub mod node;
mod predict;
mod prefix_view;
mod token;
mod trie;

// Re-export public types
pub use crate::key::{Key, KeyMode};
pub use crate::loader::{LoadMode, LoadOptions, LoadReport, Loader, SkipReason};
pub use crate::node::TrieNode;
pub use crate::predict::{Prediction, Ranking, DEFAULT_MAX_CANDIDATES};
pub use crate::prefix_view::PrefixView;
pub use crate::token::Token;
pub use crate::trie::Trie;

/// Errors that can occur in trie operations
#[derive(Debug, Error)]
pub enum Error {
    /// No stored key matches the requested token sequence
    #[error("key not found")]
    KeyNotFound,

    /// Keys and prefixes must contain at least one token
    #[error("key must contain at least one token")]
    EmptyKey,

    /// A count file could not be opened or read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for trie operations.
pub type Result<T> = std::result::Result<T, Error>;
