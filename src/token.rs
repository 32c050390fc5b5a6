//! Defines the trait implemented by the atoms of a trie key.
use std::borrow::Cow;

/// A single step of a trie key: a character in unigram mode, a word in n-gram mode.
///
/// Tokens must be totally ordered so that children can be enumerated
/// deterministically. A token may also expose a short textual fragment, which
/// key reconstruction uses to join character keys back into words.
pub trait Token: Ord + Clone {
    /// Returns the text of this token, if it has one.
    ///
    /// The default implementation returns `None`, which makes every key that
    /// contains this token come back as a raw sequence.
    fn fragment(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl Token for String {
    fn fragment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<'a> Token for &'a str {
    fn fragment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(*self))
    }
}

impl Token for Box<str> {
    fn fragment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_ref()))
    }
}

impl Token for char {
    fn fragment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

macro_rules! opaque_token {
    ($($ty:ty),*) => {
        $(impl Token for $ty {})*
    };
}

opaque_token!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
