//! Kind-occurrence index for a token stream.
//!
//! Counts per kind are kept exact across every mutation, so "is this kind
//! present" is a hash lookup. The kind → positions map is only needed by
//! kind searches; it is built on first use and dropped whenever a mutation
//! moves or re-kinds a slot.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::token::{Token, TokenKind};

#[derive(Clone, Debug, Default)]
pub(crate) struct KindIndex {
    counts: FxHashMap<TokenKind, usize>,
    positions: OnceLock<FxHashMap<TokenKind, Vec<usize>>>,
}

impl KindIndex {
    pub(crate) fn build(tokens: &[Token]) -> Self {
        let mut index = KindIndex::default();
        for token in tokens {
            index.register(token.kind());
        }
        index
    }

    /// Number of slots holding `kind`. Tombstones are never counted.
    pub(crate) fn count(&self, kind: TokenKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn contains(&self, kind: TokenKind) -> bool {
        self.count(kind) > 0
    }

    /// Records that one slot changed from `old` to `new`.
    pub(crate) fn replace(&mut self, old: TokenKind, new: TokenKind) {
        if old == new {
            return;
        }
        self.unregister(old);
        self.register(new);
        self.positions = OnceLock::new();
    }

    /// Records newly inserted slots. Positions after the insertion point
    /// shift, so the positions map is dropped.
    pub(crate) fn insert(&mut self, kinds: impl IntoIterator<Item = TokenKind>) {
        for kind in kinds {
            self.register(kind);
        }
        self.positions = OnceLock::new();
    }

    /// Drops the positions map after slots were physically removed.
    pub(crate) fn invalidate_positions(&mut self) {
        self.positions = OnceLock::new();
    }

    /// Sorted positions of `kind` in `tokens`.
    pub(crate) fn positions<'a>(&'a self, tokens: &[Token], kind: TokenKind) -> &'a [usize] {
        self.positions
            .get_or_init(|| {
                let mut map: FxHashMap<TokenKind, Vec<usize>> = FxHashMap::default();
                for (index, token) in tokens.iter().enumerate() {
                    if !token.is_empty() {
                        map.entry(token.kind()).or_default().push(index);
                    }
                }
                map
            })
            .get(&kind)
            .map_or(&[], Vec::as_slice)
    }

    fn register(&mut self, kind: TokenKind) {
        if kind != TokenKind::Empty {
            *self.counts.entry(kind).or_insert(0) += 1;
        }
    }

    fn unregister(&mut self, kind: TokenKind) {
        if let Some(count) = self.counts.get_mut(&kind) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&kind);
            }
        }
    }
}
