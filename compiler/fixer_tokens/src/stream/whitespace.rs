//! Whitespace-preserving mutation helpers.
//!
//! None of these change the number of slots except
//! `ensure_whitespace_at_index`, which inserts one token when there is no
//! whitespace to reuse.

use fixer_lexer::TokenId;
use tracing::trace;

use super::{Direction, Tokens};
use crate::error::TokensError;
use crate::token::{Token, DEFAULT_WHITESPACE};

impl Tokens {
    /// Tombstones `index`. When whitespace follows, it is merged into the
    /// whitespace before (or moved into the freed slot when there is none)
    /// so the two sides never end up as adjacent whitespace tokens.
    pub fn clear_token_and_merge_surrounding_whitespace(
        &mut self,
        index: usize,
    ) -> Result<(), TokensError> {
        self.clear_at(index)?;
        if index + 1 == self.tokens.len() {
            return Ok(());
        }
        let Some(next) = self.non_empty_sibling(index, Direction::Forward) else {
            return Ok(());
        };
        if !self.tokens[next].is_whitespace() {
            return Ok(());
        }

        let next_text = self.tokens[next].text().to_owned();
        match self.non_empty_sibling(index, Direction::Backward) {
            Some(prev) if self.tokens[prev].is_whitespace() => {
                trace!(prev, next, "merging whitespace around cleared token");
                let merged = format!("{}{next_text}", self.tokens[prev].text());
                self.set(prev, Token::whitespace(merged))?;
            }
            prev => {
                // Every slot between `prev` and `next` is a tombstone now.
                let slot = prev.map_or(0, |prev| prev + 1);
                trace!(slot, next, "moving whitespace into cleared slot");
                self.set(slot, Token::whitespace(next_text))?;
            }
        }
        self.clear_at(next)
    }

    /// Makes the slot at `index + offset` hold exactly `whitespace`.
    ///
    /// If `index` itself is whitespace it is rewritten in place; otherwise
    /// a whitespace token is inserted at `index + offset`. When writing
    /// after an open tag, the tag's own trailing newline is rebuilt from
    /// the start of `whitespace`.
    ///
    /// Returns whether a token was inserted.
    pub fn ensure_whitespace_at_index(
        &mut self,
        index: usize,
        offset: isize,
        whitespace: &str,
    ) -> Result<bool, TokensError> {
        let len = self.tokens.len();
        if index >= len {
            return Err(TokensError::IndexOutOfBounds { index, len });
        }

        if self.tokens[index].is_whitespace() {
            let rest = match index.checked_sub(1) {
                Some(prev) => self.absorb_into_open_tag(prev, offset, whitespace)?,
                None => whitespace,
            };
            if rest.is_empty() {
                self.clear_at(index)?;
            } else {
                self.set(index, Token::whitespace(rest))?;
            }
            return Ok(false);
        }

        let target = index
            .checked_add_signed(offset)
            .filter(|&target| target <= len)
            .ok_or(TokensError::IndexOutOfBounds { index, len })?;
        let rest = self.absorb_into_open_tag(index, offset, whitespace)?;
        if rest.is_empty() {
            return Ok(false);
        }
        self.insert_at(target, [Token::whitespace(rest)])?;
        Ok(true)
    }

    /// When whitespace goes right after an open tag, the tag keeps the
    /// leading newline (or first character) of `whitespace` and the rest
    /// is returned.
    fn absorb_into_open_tag<'w>(
        &mut self,
        index: usize,
        offset: isize,
        whitespace: &'w str,
    ) -> Result<&'w str, TokensError> {
        if offset != 1 || !self.tokens[index].is_given_kind(TokenId::OpenTag) {
            return Ok(whitespace);
        }
        let head_len = if whitespace.starts_with("\r\n") {
            2
        } else {
            whitespace.chars().next().map_or(0, char::len_utf8)
        };
        let (head, rest) = whitespace.split_at(head_len);
        let tag = format!("{}{head}", self.tokens[index].text().trim_end());
        self.set(index, Token::new(TokenId::OpenTag, tag))?;
        Ok(rest)
    }

    /// Strips characters in `chars` (default: all whitespace) from the end
    /// of the whitespace before `index`.
    pub fn remove_leading_whitespace(
        &mut self,
        index: usize,
        chars: Option<&str>,
    ) -> Result<(), TokensError> {
        self.remove_whitespace_beside(index, Direction::Backward, chars)
    }

    /// Strips characters in `chars` (default: all whitespace) from the
    /// start of the whitespace after `index`.
    pub fn remove_trailing_whitespace(
        &mut self,
        index: usize,
        chars: Option<&str>,
    ) -> Result<(), TokensError> {
        self.remove_whitespace_beside(index, Direction::Forward, chars)
    }

    /// Never changes the slot count. The line break ending a single-line
    /// comment is kept so the comment cannot swallow the next line.
    fn remove_whitespace_beside(
        &mut self,
        index: usize,
        direction: Direction,
        chars: Option<&str>,
    ) -> Result<(), TokensError> {
        self.at(index)?;
        let Some(ws_index) = self.non_empty_sibling(index, direction) else {
            return Ok(());
        };
        if !self.tokens[ws_index].is_given_kind(TokenId::Whitespace) {
            return Ok(());
        }
        let chars: Vec<char> = chars.unwrap_or(DEFAULT_WHITESPACE).chars().collect();
        let text = self.tokens[ws_index].text();

        let after_comment = self
            .non_empty_sibling(ws_index, Direction::Backward)
            .is_some_and(|prev| self.tokens[prev].is_single_line_comment());
        let kept_len = if after_comment {
            line_break_len(text)
        } else {
            0
        };
        let (kept, strippable) = text.split_at(kept_len);
        let stripped = match direction {
            Direction::Backward => strippable.trim_end_matches(chars.as_slice()),
            Direction::Forward => strippable.trim_start_matches(chars.as_slice()),
        };
        let new_text = format!("{kept}{stripped}");

        trace!(ws_index, before = text.len(), after = new_text.len(), "removing whitespace");
        self.set(ws_index, Token::whitespace(new_text))
    }
}

/// Length of a leading `\r\n`, `\n` or `\r`.
fn line_break_len(text: &str) -> usize {
    if text.starts_with("\r\n") {
        2
    } else if text.starts_with(['\n', '\r']) {
        1
    } else {
        0
    }
}
