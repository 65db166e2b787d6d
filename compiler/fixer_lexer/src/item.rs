//! Primitive lexical items.

use crate::token_id::TokenId;

/// The kind of a lexical item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexKind {
    /// A generic single-character token such as `;` or `(`, identified by
    /// that character. A binary-prefixed `b"` keeps the kind `"`.
    Char(char),
    /// A semantic token.
    Id(TokenId),
}

/// One item produced by the scanner: kind, exact source text and the
/// 1-based line the text starts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexItem<'a> {
    pub kind: LexKind,
    pub text: &'a str,
    pub line: u32,
}
