//! The editable token stream.
//!
//! # Index stability
//!
//! Length-preserving mutations (`set`, `clear_at`, `clear_range`, the
//! whitespace helpers) replace slots with tombstones instead of removing
//! them, so indices other rules hold stay valid. Only `insert_at`,
//! `override_range` with a longer replacement and `clear_empty_tokens`
//! renumber slots.

mod search;
mod whitespace;

use std::fmt;
use std::ops::{Bound, Index, Range, RangeBounds};

use fixer_lexer::{LexItem, TokenId};
use tracing::debug;

use crate::cache::CodeHash;
use crate::error::TokensError;
use crate::kind_index::KindIndex;
use crate::token::{Token, TokenKind};

/// Direction of a sibling search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The neighbouring index in this direction, if any.
    #[inline]
    pub(crate) fn step(self, index: usize) -> Option<usize> {
        match self {
            Direction::Forward => index.checked_add(1),
            Direction::Backward => index.checked_sub(1),
        }
    }
}

/// An ordered, index-addressable, mutable sequence of tokens.
#[derive(Clone, Debug)]
pub struct Tokens {
    tokens: Vec<Token>,
    index: KindIndex,
    code_hash: CodeHash,
    changed: bool,
}

impl Tokens {
    /// Builds a stream from scanner output. The stream starts unchanged.
    pub fn from_lex_items(items: &[LexItem<'_>]) -> Self {
        Self::from_vec(items.iter().map(Token::from_lex).collect())
    }

    /// Builds a stream from finished tokens. The stream starts unchanged
    /// and its code hash is that of the tokens' concatenated text.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::from_vec(tokens.into_iter().collect())
    }

    fn from_vec(tokens: Vec<Token>) -> Self {
        let index = KindIndex::build(&tokens);
        let code_hash = CodeHash::of(&concat(&tokens));
        Tokens {
            tokens,
            index,
            code_hash,
            changed: false,
        }
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&Token, TokensError> {
        self.tokens.get(index).ok_or(TokensError::IndexOutOfBounds {
            index,
            len: self.tokens.len(),
        })
    }

    /// Whether the slot at `index` holds a tombstone.
    pub fn is_empty_at(&self, index: usize) -> Result<bool, TokensError> {
        self.at(index).map(Token::is_empty)
    }

    /// Whether any structural mutation happened since construction or the
    /// last [`clear_changed`](Self::clear_changed).
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Hash of the content this stream was built from.
    #[inline]
    pub fn code_hash(&self) -> CodeHash {
        self.code_hash
    }

    // ─── Kind occurrence ───

    pub fn is_token_kind_found(&self, kind: impl Into<TokenKind>) -> bool {
        self.index.contains(kind.into())
    }

    pub fn is_all_token_kinds_found<K: Into<TokenKind>>(
        &self,
        kinds: impl IntoIterator<Item = K>,
    ) -> bool {
        kinds.into_iter().all(|kind| self.is_token_kind_found(kind))
    }

    pub fn is_any_token_kinds_found<K: Into<TokenKind>>(
        &self,
        kinds: impl IntoIterator<Item = K>,
    ) -> bool {
        kinds.into_iter().any(|kind| self.is_token_kind_found(kind))
    }

    /// Number of slots holding `kind`.
    pub fn count_token_kind(&self, kind: impl Into<TokenKind>) -> usize {
        self.index.count(kind.into())
    }

    // ─── Code generation ───

    /// The current text of the stream. Tombstones contribute nothing.
    pub fn generate_code(&self) -> String {
        concat(&self.tokens)
    }

    /// The text of the tokens in `range`, clamped to the stream.
    pub fn generate_partial_code(&self, range: impl RangeBounds<usize>) -> String {
        concat(&self.tokens[self.clamp_range(range)])
    }

    /// Whether the file is one PHP region from the first byte to the end:
    /// a single open tag first, no inline HTML, and at most a final close
    /// tag.
    pub fn is_monolithic_php(&self) -> bool {
        let first = self.tokens.iter().find(|token| !token.is_empty());
        let starts_with_tag = first
            .is_some_and(|token| token.is_any_kind(&[TokenId::OpenTag, TokenId::OpenTagWithEcho]));
        if !starts_with_tag || self.is_token_kind_found(TokenId::InlineHtml) {
            return false;
        }
        self.count_token_kind(TokenId::OpenTag) + self.count_token_kind(TokenId::OpenTagWithEcho)
            == 1
    }

    // ─── Mutation ───

    /// Replaces the slot at `index`. A token exactly equal to the current
    /// one leaves the slot and the changed flag untouched.
    pub fn set(&mut self, index: usize, token: Token) -> Result<(), TokensError> {
        let current = self.at(index)?;
        if *current == token {
            return Ok(());
        }
        let old_kind = current.kind();
        self.index.replace(old_kind, token.kind());
        self.tokens[index] = token;
        self.changed = true;
        Ok(())
    }

    /// Inserts `tokens` before `index`, shifting later slots up. Returns
    /// how many tokens were inserted.
    pub fn insert_at(
        &mut self,
        index: usize,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<usize, TokensError> {
        let len = self.tokens.len();
        if index > len {
            return Err(TokensError::IndexOutOfBounds { index, len });
        }
        let before = self.tokens.len();
        self.tokens.splice(index..index, tokens);
        let inserted = self.tokens.len() - before;
        if inserted > 0 {
            self.index
                .insert(self.tokens[index..index + inserted].iter().map(Token::kind));
            self.changed = true;
        }
        Ok(inserted)
    }

    /// Replaces the slot at `index` with a tombstone.
    pub fn clear_at(&mut self, index: usize) -> Result<(), TokensError> {
        self.set(index, Token::empty())
    }

    /// Tombstones every slot in `start..=end`.
    pub fn clear_range(&mut self, start: usize, end: usize) -> Result<(), TokensError> {
        self.check_range(start, end)?;
        for index in start..=end {
            self.clear_at(index)?;
        }
        Ok(())
    }

    /// Replaces `start..=end` with `replacement`.
    ///
    /// Slots already equal to their replacement are left alone. A shorter
    /// replacement tombstones the rest of the range; a longer one inserts
    /// the overflow after `end`.
    pub fn override_range(
        &mut self,
        start: usize,
        end: usize,
        replacement: impl IntoIterator<Item = Token>,
    ) -> Result<(), TokensError> {
        self.check_range(start, end)?;
        let mut replacement: Vec<Token> = replacement.into_iter().collect();
        let range_len = end - start + 1;
        debug!(
            start,
            end,
            replacement = replacement.len(),
            "override token range"
        );

        let overflow = if replacement.len() > range_len {
            replacement.split_off(range_len)
        } else {
            Vec::new()
        };
        let written = replacement.len();
        for (offset, token) in replacement.into_iter().enumerate() {
            self.set(start + offset, token)?;
        }
        if overflow.is_empty() {
            if written < range_len {
                self.clear_range(start + written, end)?;
            }
        } else {
            self.insert_at(end + 1, overflow)?;
        }
        Ok(())
    }

    /// Physically removes tombstones, renumbering every later slot.
    pub fn clear_empty_tokens(&mut self) {
        let before = self.tokens.len();
        self.tokens.retain(|token| !token.is_empty());
        let removed = before - self.tokens.len();
        if removed > 0 {
            debug!(removed, "compacted token stream");
            self.index.invalidate_positions();
        }
    }

    // ─── Internal helpers ───

    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<(), TokensError> {
        let len = self.tokens.len();
        if start > end || end >= len {
            return Err(TokensError::InvalidRange { start, end, len });
        }
        Ok(())
    }

    /// `range` as a half-open range clamped to the stream.
    pub(crate) fn clamp_range(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        let len = self.tokens.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .min(len);
        start.min(end)..end
    }
}

fn concat(tokens: &[Token]) -> String {
    let mut code = String::with_capacity(tokens.iter().map(|token| token.text().len()).sum());
    for token in tokens {
        code.push_str(token.text());
    }
    code
}

impl Index<usize> for Tokens {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl FromIterator<Token> for Tokens {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
