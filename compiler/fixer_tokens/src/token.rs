//! The token value type.

use std::fmt;
use std::hash::{Hash, Hasher};

use fixer_lexer::{LexItem, LexKind, TokenId};

use crate::category::{classify, TokenCategory};
use crate::pattern::TokenPattern;

/// Characters treated as whitespace when no custom set is given.
pub const DEFAULT_WHITESPACE: &str = " \t\n\r\0\x0B";

/// The kind of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// A tombstone left behind by clearing a slot.
    Empty,
    /// A generic single-character token, keyed by the character.
    Char(char),
    /// A semantic token.
    Id(TokenId),
}

impl TokenKind {
    /// The semantic id, if this is one.
    #[inline]
    pub fn id(self) -> Option<TokenId> {
        match self {
            TokenKind::Id(id) => Some(id),
            _ => None,
        }
    }
}

impl From<TokenId> for TokenKind {
    fn from(id: TokenId) -> Self {
        TokenKind::Id(id)
    }
}

impl From<char> for TokenKind {
    fn from(c: char) -> Self {
        TokenKind::Char(c)
    }
}

impl From<LexKind> for TokenKind {
    fn from(kind: LexKind) -> Self {
        match kind {
            LexKind::Char(c) => TokenKind::Char(c),
            LexKind::Id(id) => TokenKind::Id(id),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Empty => f.write_str("<empty>"),
            TokenKind::Char(c) => write!(f, "'{c}'"),
            TokenKind::Id(id) => write!(f, "{id}"),
        }
    }
}

/// One lexical unit: a kind, its exact text and the line it started on.
///
/// Tokens are immutable; the stream replaces slots instead of editing
/// tokens in place. Equality and hashing look at kind and text only, so a
/// token built by a rule equals the scanned one regardless of line.
#[derive(Clone, Debug)]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: u32,
}

impl Token {
    /// A semantic token. Empty text yields a tombstone.
    pub fn new(id: TokenId, text: impl Into<String>) -> Self {
        Self::with_kind(TokenKind::Id(id), text.into())
    }

    /// A generic token consisting of exactly `c`.
    pub fn char(c: char) -> Self {
        Token {
            kind: TokenKind::Char(c),
            text: c.to_string(),
            line: 0,
        }
    }

    /// A generic token whose kind is its last character, so `b"` has the
    /// kind `"`. Empty text yields a tombstone.
    pub fn generic(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.chars().next_back() {
            Some(c) => Self::with_kind(TokenKind::Char(c), text),
            None => Self::empty(),
        }
    }

    /// A tombstone.
    pub fn empty() -> Self {
        Token {
            kind: TokenKind::Empty,
            text: String::new(),
            line: 0,
        }
    }

    /// A `T_WHITESPACE` token.
    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TokenId::Whitespace, text)
    }

    /// Converts one scanner item.
    pub fn from_lex(item: &LexItem<'_>) -> Self {
        Self::with_kind(TokenKind::from(item.kind), item.text.to_owned()).with_line(item.line)
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    fn with_kind(kind: TokenKind, text: String) -> Self {
        if text.is_empty() {
            return Self::empty();
        }
        Token { kind, text, line: 0 }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn id(&self) -> Option<TokenId> {
        self.kind.id()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The 1-based source line, or 0 for tokens built by hand.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Whether this is a tombstone.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == TokenKind::Empty
    }

    /// Whether this is whitespace from [`DEFAULT_WHITESPACE`]. Tombstones
    /// count as whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.is_whitespace_in(DEFAULT_WHITESPACE)
    }

    /// Whether this is a tombstone or a `T_WHITESPACE` made only of
    /// characters from `chars`.
    pub fn is_whitespace_in(&self, chars: &str) -> bool {
        match self.kind {
            TokenKind::Empty => true,
            TokenKind::Id(TokenId::Whitespace) => self.text.chars().all(|c| chars.contains(c)),
            _ => false,
        }
    }

    /// `T_COMMENT` or `T_DOC_COMMENT`.
    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Id(TokenId::Comment | TokenId::DocComment)
        )
    }

    /// A `//` or `#` comment.
    pub fn is_single_line_comment(&self) -> bool {
        self.kind == TokenKind::Id(TokenId::Comment) && !self.text.starts_with("/*")
    }

    /// Neither whitespace, a comment nor a tombstone.
    pub fn is_meaningful(&self) -> bool {
        !self.is_empty() && !self.is(TokenCategory::TRIVIA)
    }

    #[inline]
    pub fn is_given_kind(&self, id: TokenId) -> bool {
        self.kind == TokenKind::Id(id)
    }

    pub fn is_any_kind(&self, ids: &[TokenId]) -> bool {
        self.id().is_some_and(|id| ids.contains(&id))
    }

    #[inline]
    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Char(c)
    }

    /// Every category this token belongs to.
    pub fn categories(&self) -> TokenCategory {
        classify(self.kind, &self.text)
    }

    /// Whether this token belongs to any of the categories in `category`.
    pub fn is(&self, category: TokenCategory) -> bool {
        self.categories().intersects(category)
    }

    /// Kind and text equality. Case-insensitive comparison folds ASCII
    /// case of semantic tokens only; generic tokens always compare
    /// exactly.
    pub fn equals(&self, other: &Token, case_sensitive: bool) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if case_sensitive || !matches!(self.kind, TokenKind::Id(_)) {
            return self.text == other.text;
        }
        self.text.eq_ignore_ascii_case(&other.text)
    }

    /// Whether this token matches one search pattern element.
    pub fn matches(&self, pattern: &TokenPattern, case_sensitive: bool) -> bool {
        match pattern {
            TokenPattern::Char(c) => self.is_char(*c),
            TokenPattern::Kind(id) => self.is_given_kind(*id),
            TokenPattern::Text(id, text) => {
                self.is_given_kind(*id)
                    && if case_sensitive {
                        self.text == *text
                    } else {
                        self.text.eq_ignore_ascii_case(text)
                    }
            }
            TokenPattern::Token(token) => self.equals(token, case_sensitive),
        }
    }

    pub fn matches_any(&self, patterns: &[TokenPattern], case_sensitive: bool) -> bool {
        patterns
            .iter()
            .any(|pattern| self.matches(pattern, case_sensitive))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.text.hash(state);
    }
}

impl From<char> for Token {
    fn from(c: char) -> Self {
        Token::char(c)
    }
}

impl From<(TokenId, &str)> for Token {
    fn from((id, text): (TokenId, &str)) -> Self {
        Token::new(id, text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
