//! Queries over a token stream: sibling navigation, kind search and
//! sequence search.

use std::collections::BTreeMap;
use std::ops::RangeBounds;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{Direction, Tokens};
use crate::error::TokensError;
use crate::pattern::{CaseSensitivity, TokenPattern};
use crate::token::{Token, TokenKind};

impl Tokens {
    // ─── Siblings ───

    /// First index after `index` satisfying `accept`, walking in
    /// `direction`.
    fn sibling_where(
        &self,
        index: usize,
        direction: Direction,
        accept: impl Fn(&Token) -> bool,
    ) -> Option<usize> {
        let mut current = index;
        loop {
            current = direction.step(current)?;
            let token = self.tokens.get(current)?;
            if accept(token) {
                return Some(current);
            }
        }
    }

    /// Nearest token in `direction` that is not whitespace, a comment or
    /// a tombstone.
    pub fn meaningful_sibling(&self, index: usize, direction: Direction) -> Option<usize> {
        self.sibling_where(index, direction, Token::is_meaningful)
    }

    pub fn next_meaningful(&self, index: usize) -> Option<usize> {
        self.meaningful_sibling(index, Direction::Forward)
    }

    pub fn prev_meaningful(&self, index: usize) -> Option<usize> {
        self.meaningful_sibling(index, Direction::Backward)
    }

    /// Nearest non-tombstone in `direction`.
    pub fn non_empty_sibling(&self, index: usize, direction: Direction) -> Option<usize> {
        self.sibling_where(index, direction, |token| !token.is_empty())
    }

    /// Nearest token after `index` that is not whitespace from `chars`
    /// (the default set when `None`) and not a tombstone. Comments count
    /// as non-whitespace.
    pub fn next_non_whitespace(&self, index: usize, chars: Option<&str>) -> Option<usize> {
        self.non_whitespace_sibling(index, Direction::Forward, chars)
    }

    pub fn prev_non_whitespace(&self, index: usize, chars: Option<&str>) -> Option<usize> {
        self.non_whitespace_sibling(index, Direction::Backward, chars)
    }

    fn non_whitespace_sibling(
        &self,
        index: usize,
        direction: Direction,
        chars: Option<&str>,
    ) -> Option<usize> {
        match chars {
            Some(chars) => self.sibling_where(index, direction, |token| {
                !token.is_whitespace_in(chars)
            }),
            None => self.sibling_where(index, direction, |token| !token.is_whitespace()),
        }
    }

    /// Nearest token in `direction` matching any of `patterns`.
    ///
    /// Every token is a candidate, so comment patterns work too. Patterns
    /// whose kind does not occur in the stream are dropped up front; when
    /// none are left the scan is skipped.
    pub fn token_of_kind_sibling(
        &self,
        index: usize,
        direction: Direction,
        patterns: &[TokenPattern],
        case_sensitive: bool,
    ) -> Option<usize> {
        let present: SmallVec<[&TokenPattern; 4]> = patterns
            .iter()
            .filter(|pattern| self.is_token_kind_found(pattern.kind()))
            .collect();
        if present.is_empty() {
            return None;
        }
        self.sibling_where(index, direction, |token| {
            present
                .iter()
                .any(|pattern| token.matches(pattern, case_sensitive))
        })
    }

    pub fn next_token_of_kind(
        &self,
        index: usize,
        patterns: &[TokenPattern],
        case_sensitive: bool,
    ) -> Option<usize> {
        self.token_of_kind_sibling(index, Direction::Forward, patterns, case_sensitive)
    }

    pub fn prev_token_of_kind(
        &self,
        index: usize,
        patterns: &[TokenPattern],
        case_sensitive: bool,
    ) -> Option<usize> {
        self.token_of_kind_sibling(index, Direction::Backward, patterns, case_sensitive)
    }

    // ─── Kind search ───

    /// Every token of `kind` within `range`, keyed by index.
    pub fn find_given_kind(
        &self,
        kind: impl Into<TokenKind>,
        range: impl RangeBounds<usize>,
    ) -> BTreeMap<usize, &Token> {
        let kind = kind.into();
        let range = self.clamp_range(range);
        if !self.is_token_kind_found(kind) || range.is_empty() {
            return BTreeMap::new();
        }
        self.index
            .positions(&self.tokens, kind)
            .iter()
            .copied()
            .filter(|index| range.contains(index))
            .map(|index| (index, &self.tokens[index]))
            .collect()
    }

    /// [`find_given_kind`](Self::find_given_kind) for several kinds at once.
    /// Every requested kind has an entry, empty when it does not occur.
    pub fn find_given_kinds<K: Into<TokenKind>>(
        &self,
        kinds: impl IntoIterator<Item = K>,
        range: impl RangeBounds<usize> + Clone,
    ) -> FxHashMap<TokenKind, BTreeMap<usize, &Token>> {
        kinds
            .into_iter()
            .map(|kind| {
                let kind = kind.into();
                (kind, self.find_given_kind(kind, range.clone()))
            })
            .collect()
    }

    // ─── Sequence search ───

    /// Finds the first run of meaningful tokens within `range` matching
    /// `pattern` element by element. Whitespace and comments between the
    /// matched tokens are skipped.
    ///
    /// Returns the matched tokens keyed by index, or `None`.
    pub fn find_sequence(
        &self,
        pattern: &[TokenPattern],
        range: impl RangeBounds<usize>,
        case_sensitivity: &CaseSensitivity,
    ) -> Result<Option<BTreeMap<usize, &Token>>, TokensError> {
        let Some((first, rest)) = pattern.split_first() else {
            return Err(TokensError::EmptySequence);
        };
        if let Some(position) = pattern.iter().position(|element| !element.is_meaningful()) {
            return Err(TokensError::NonMeaningfulToken { position });
        }

        if !pattern
            .iter()
            .all(|element| self.is_token_kind_found(element.kind()))
        {
            return Ok(None);
        }
        let range = self.clamp_range(range);
        if range.is_empty() {
            return Ok(None);
        }
        let end = range.end - 1;
        let first_patterns = std::slice::from_ref(first);
        let first_sensitive = case_sensitivity.is_sensitive(0);

        // The first element is looked up from the token before `start`.
        let mut candidate = match range.start.checked_sub(1) {
            Some(before) => self.next_token_of_kind(before, first_patterns, first_sensitive),
            None => self
                .tokens
                .first()
                .filter(|token| token.matches(first, first_sensitive))
                .map(|_| 0)
                .or_else(|| self.next_token_of_kind(0, first_patterns, first_sensitive)),
        };

        'candidates: while let Some(start) = candidate {
            if start > end {
                return Ok(None);
            }
            let mut matched: SmallVec<[usize; 8]> = SmallVec::new();
            matched.push(start);
            let mut current = start;
            for (offset, element) in rest.iter().enumerate() {
                match self.next_meaningful(current) {
                    Some(next) if next <= end => current = next,
                    _ => return Ok(None),
                }
                if !self.tokens[current].matches(element, case_sensitivity.is_sensitive(offset + 1))
                {
                    candidate = self.next_token_of_kind(start, first_patterns, first_sensitive);
                    continue 'candidates;
                }
                matched.push(current);
            }
            return Ok(Some(
                matched
                    .into_iter()
                    .map(|index| (index, &self.tokens[index]))
                    .collect(),
            ));
        }
        Ok(None)
    }
}
