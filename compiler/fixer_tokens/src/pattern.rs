//! Search pattern elements and per-element case sensitivity.

use std::collections::BTreeMap;

use fixer_lexer::TokenId;

use crate::token::{Token, TokenKind, DEFAULT_WHITESPACE};

/// One element of a search pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenPattern {
    /// A generic single-character token.
    Char(char),
    /// Any token of this kind, whatever its text.
    Kind(TokenId),
    /// A token of this kind with this text.
    Text(TokenId, String),
    /// A token equal to this one.
    Token(Token),
}

impl TokenPattern {
    /// The kind a matching token must have.
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenPattern::Char(c) => TokenKind::Char(*c),
            TokenPattern::Kind(id) | TokenPattern::Text(id, _) => TokenKind::Id(*id),
            TokenPattern::Token(token) => token.kind(),
        }
    }

    /// Whether this element can only match meaningful tokens.
    pub fn is_meaningful(&self) -> bool {
        match self {
            TokenPattern::Char(c) => !DEFAULT_WHITESPACE.contains(*c),
            TokenPattern::Kind(id) | TokenPattern::Text(id, _) => !matches!(
                id,
                TokenId::Whitespace | TokenId::Comment | TokenId::DocComment
            ),
            TokenPattern::Token(token) => token.is_meaningful(),
        }
    }
}

impl From<char> for TokenPattern {
    fn from(c: char) -> Self {
        TokenPattern::Char(c)
    }
}

impl From<TokenId> for TokenPattern {
    fn from(id: TokenId) -> Self {
        TokenPattern::Kind(id)
    }
}

impl From<(TokenId, &str)> for TokenPattern {
    fn from((id, text): (TokenId, &str)) -> Self {
        TokenPattern::Text(id, text.to_owned())
    }
}

impl From<Token> for TokenPattern {
    fn from(token: Token) -> Self {
        TokenPattern::Token(token)
    }
}

/// Case sensitivity for a sequence search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
    /// Per pattern position; positions without an entry are sensitive.
    PerElement(BTreeMap<usize, bool>),
}

impl CaseSensitivity {
    /// Whether the element at `position` compares case-sensitively.
    pub fn is_sensitive(&self, position: usize) -> bool {
        match self {
            CaseSensitivity::Sensitive => true,
            CaseSensitivity::Insensitive => false,
            CaseSensitivity::PerElement(map) => map.get(&position).copied().unwrap_or(true),
        }
    }
}

impl From<bool> for CaseSensitivity {
    fn from(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        }
    }
}

impl From<BTreeMap<usize, bool>> for CaseSensitivity {
    fn from(map: BTreeMap<usize, bool>) -> Self {
        CaseSensitivity::PerElement(map)
    }
}
