//! Reconstruction of stored keys during enumeration.

use std::fmt;

use crate::token::Token;

/// Longest fragment, in characters, that still counts as a character token
/// when reconstructing keys in [`KeyMode::Auto`].
const MAX_JOINED_FRAGMENT: usize = 2;

/// A key produced by enumerating a trie.
///
/// Character keys are joined back into the word they spell, while word keys are
/// returned as the token sequence that was inserted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key<T> {
    /// Concatenation of the fragments of every token in the key
    Joined(String),
    /// The raw token sequence
    Sequence(Vec<T>),
}

/// How enumeration turns a token path back into a [`Key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Join the path when every token has a fragment of at most two characters,
    /// otherwise return the sequence.
    Auto,
    /// Join the path whenever every token has a fragment, whatever its length.
    Joined,
    /// Always return the sequence.
    Sequence,
}

impl Default for KeyMode {
    fn default() -> Self {
        KeyMode::Auto
    }
}

impl<T: Token> Key<T> {
    /// Builds the key for a token path according to `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use token_trie::{Key, KeyMode};
    ///
    /// let chars = Key::from_tokens(&['c', 'a', 't'], KeyMode::Auto);
    /// assert_eq!(chars, Key::Joined("cat".to_string()));
    ///
    /// let words = Key::from_tokens(&["the", "cat"], KeyMode::Auto);
    /// assert_eq!(words, Key::Sequence(vec!["the", "cat"]));
    /// ```
    pub fn from_tokens(tokens: &[T], mode: KeyMode) -> Self {
        let limit = match mode {
            KeyMode::Auto => Some(MAX_JOINED_FRAGMENT),
            KeyMode::Joined => None,
            KeyMode::Sequence => return Key::Sequence(tokens.to_vec()),
        };

        let mut joined = String::new();
        for token in tokens {
            match token.fragment() {
                Some(fragment) if limit.map_or(true, |max| fragment.chars().count() <= max) => {
                    joined.push_str(&fragment);
                }
                _ => return Key::Sequence(tokens.to_vec()),
            }
        }

        Key::Joined(joined)
    }
}

impl<T> Key<T> {
    /// Returns the joined string, if this key was joined.
    pub fn as_joined(&self) -> Option<&str> {
        match self {
            Key::Joined(s) => Some(s),
            Key::Sequence(_) => None,
        }
    }

    /// Returns the token sequence, if this key was not joined.
    pub fn as_sequence(&self) -> Option<&[T]> {
        match self {
            Key::Joined(_) => None,
            Key::Sequence(tokens) => Some(tokens),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Joined(s) => f.write_str(s),
            Key::Sequence(tokens) => write!(f, "{:?}", tokens),
        }
    }
}
