//! Content-addressed stream cache.
//!
//! The cache is a plain value owned by whoever drives the rules (usually
//! a [`Tokenizer`](crate::Tokenizer)); there is no hidden global store.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::stream::Tokens;

/// Hash of a piece of source text, used as the cache key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeHash(u64);

impl CodeHash {
    pub fn of(code: &str) -> Self {
        let mut hasher = FxHasher::default();
        code.hash(&mut hasher);
        CodeHash(hasher.finish())
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Streams keyed by the hash of the code they were built from.
#[derive(Clone, Debug, Default)]
pub struct TokenCache {
    entries: FxHashMap<CodeHash, Tokens>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: CodeHash) -> Option<&Tokens> {
        self.entries.get(&hash)
    }

    pub fn contains(&self, hash: CodeHash) -> bool {
        self.entries.contains_key(&hash)
    }

    /// Stores `tokens` under `hash`, returning the entry it replaced.
    pub fn put(&mut self, hash: CodeHash, tokens: Tokens) -> Option<Tokens> {
        self.entries.insert(hash, tokens)
    }

    pub fn remove(&mut self, hash: CodeHash) -> Option<Tokens> {
        self.entries.remove(&hash)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
