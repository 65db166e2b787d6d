//! Block catalog and delimiter matching.
//!
//! Several block types share the same characters: `{` opens a code block,
//! a `$a{0}` offset, a `${name}` variable, a `->{expr}` property or a
//! `use a\{B, C}` group. The catalog lists each type's delimiters; the
//! type of a concrete delimiter is resolved by looking at the tokens
//! around it, with the rules kept next to the catalog so a new block type
//! is a local change.
//!
//! Matching runs over a delimiter *family* (all parentheses, all square
//! brackets, all curly braces including the interpolation openers), so
//! nesting is counted correctly whatever the type of the inner blocks.

use fixer_lexer::TokenId;
use tracing::trace;

use crate::error::{BlockSide, TokensError};
use crate::stream::{Direction, Tokens};
use crate::token::{Token, TokenKind};

/// A catalogued block type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    /// `(` `)`
    Parenthesis = 1,
    /// `{` `}` around code.
    CurlyBrace = 2,
    /// `$a[0]`
    IndexSquareBrace = 3,
    /// `[1, 2]`
    ArraySquareBrace = 4,
    /// `$a->{$b}`
    DynamicPropBrace = 5,
    /// `${$b}`
    DynamicVarBrace = 6,
    /// `$a{0}`
    ArrayIndexCurlyBrace = 7,
    /// `use A\{B, C}`
    GroupImportBrace = 8,
    /// `[$a, $b] = $c`
    DestructuringSquareBrace = 9,
    /// `(new Foo())`
    BraceClassInstantiation = 10,
    /// `"{$a}"`
    InterpolatedCurlyBrace = 11,
    /// `"${a}"`
    InterpolatedDollarBrace = 12,
}

impl BlockType {
    /// Numeric id, stable across releases.
    pub const fn id(self) -> i64 {
        self as i64
    }

    /// The catalog entry for this type.
    fn definition(self) -> &'static BlockDefinition {
        &CATALOG[self as usize - 1]
    }

    fn family(self) -> Family {
        self.definition().family
    }

    /// Context-free detection: which edge `token` would be if its type
    /// were decided by its own kind alone. Shared characters resolve to
    /// the first catalog entry using them (`{` is a code block, `[` an
    /// index access). Use [`Tokens::detect_block_type`] for the type a
    /// delimiter actually has in a stream.
    pub fn detect(token: &Token) -> Option<BlockEdge> {
        let kind = token.kind();
        CATALOG.iter().find_map(|definition| {
            if definition.open.matches(kind) {
                Some(BlockEdge::start(definition.block_type))
            } else if definition.close.matches(kind) {
                Some(BlockEdge::end(definition.block_type))
            } else {
                None
            }
        })
    }
}

impl TryFrom<i64> for BlockType {
    type Error = TokensError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        CATALOG
            .iter()
            .map(|definition| definition.block_type)
            .find(|block_type| block_type.id() == value)
            .ok_or(TokensError::InvalidBlockType(value))
    }
}

/// A delimiter's block type and whether it opens or closes the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockEdge {
    pub block_type: BlockType,
    pub is_start: bool,
}

impl BlockEdge {
    pub const fn start(block_type: BlockType) -> Self {
        BlockEdge {
            block_type,
            is_start: true,
        }
    }

    pub const fn end(block_type: BlockType) -> Self {
        BlockEdge {
            block_type,
            is_start: false,
        }
    }
}

// ─── Catalog ───

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delimiter {
    Char(char),
    Id(TokenId),
}

impl Delimiter {
    fn matches(self, kind: TokenKind) -> bool {
        match self {
            Delimiter::Char(c) => kind == TokenKind::Char(c),
            Delimiter::Id(id) => kind == TokenKind::Id(id),
        }
    }
}

/// Delimiters that nest with each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Paren,
    Square,
    Curly,
}

impl Family {
    fn of(kind: TokenKind) -> Option<(Family, bool)> {
        match kind {
            TokenKind::Char('(') => Some((Family::Paren, true)),
            TokenKind::Char(')') => Some((Family::Paren, false)),
            TokenKind::Char('[') => Some((Family::Square, true)),
            TokenKind::Char(']') => Some((Family::Square, false)),
            TokenKind::Char('{')
            | TokenKind::Id(TokenId::CurlyOpen | TokenId::DollarOpenCurlyBraces) => {
                Some((Family::Curly, true))
            }
            TokenKind::Char('}') => Some((Family::Curly, false)),
            _ => None,
        }
    }
}

struct BlockDefinition {
    block_type: BlockType,
    family: Family,
    open: Delimiter,
    close: Delimiter,
}

const fn def(
    block_type: BlockType,
    family: Family,
    open: Delimiter,
    close: Delimiter,
) -> BlockDefinition {
    BlockDefinition {
        block_type,
        family,
        open,
        close,
    }
}

/// Indexed by `BlockType::id() - 1`.
static CATALOG: [BlockDefinition; 12] = {
    use Delimiter::{Char, Id};
    [
        def(BlockType::Parenthesis, Family::Paren, Char('('), Char(')')),
        def(BlockType::CurlyBrace, Family::Curly, Char('{'), Char('}')),
        def(BlockType::IndexSquareBrace, Family::Square, Char('['), Char(']')),
        def(BlockType::ArraySquareBrace, Family::Square, Char('['), Char(']')),
        def(BlockType::DynamicPropBrace, Family::Curly, Char('{'), Char('}')),
        def(BlockType::DynamicVarBrace, Family::Curly, Char('{'), Char('}')),
        def(BlockType::ArrayIndexCurlyBrace, Family::Curly, Char('{'), Char('}')),
        def(BlockType::GroupImportBrace, Family::Curly, Char('{'), Char('}')),
        def(BlockType::DestructuringSquareBrace, Family::Square, Char('['), Char(']')),
        def(BlockType::BraceClassInstantiation, Family::Paren, Char('('), Char(')')),
        def(
            BlockType::InterpolatedCurlyBrace,
            Family::Curly,
            Id(TokenId::CurlyOpen),
            Char('}'),
        ),
        def(
            BlockType::InterpolatedDollarBrace,
            Family::Curly,
            Id(TokenId::DollarOpenCurlyBraces),
            Char('}'),
        ),
    ]
};

// ─── Context rules ───

/// Meaningful tokens after which `[` cannot start a destructuring list.
fn disallows_destructuring(tokens: &Tokens, index: usize) -> bool {
    let token = &tokens[index];
    if token.is_char('}') {
        return matches!(
            tokens.detect_block_type(index).map(|edge| edge.block_type),
            Some(
                BlockType::DynamicPropBrace
                    | BlockType::DynamicVarBrace
                    | BlockType::ArrayIndexCurlyBrace
            )
        );
    }
    disallows_short_array_token(token)
}

/// Meaningful tokens after which `[` is an index access, not an array.
fn disallows_short_array(tokens: &Tokens, index: usize) -> bool {
    let token = &tokens[index];
    token.is_char('}') || disallows_short_array_token(token)
}

fn disallows_short_array_token(token: &Token) -> bool {
    token.is_char(')')
        || token.is_char(']')
        || token.is_char('"')
        || token.is_any_kind(&[
            TokenId::ConstantEncapsedString,
            TokenId::String,
            TokenId::StringVarname,
            TokenId::Variable,
        ])
}

/// Meaningful tokens after which `(new ...)` is a call argument list
/// rather than a wrapped instantiation.
const CALL_LIKE_KINDS: &[TokenId] = &[
    TokenId::Array,
    TokenId::Class,
    TokenId::ElseIf,
    TokenId::For,
    TokenId::Foreach,
    TokenId::If,
    TokenId::Static,
    TokenId::String,
    TokenId::Switch,
    TokenId::Variable,
    TokenId::While,
];

impl Tokens {
    /// Block edge of the delimiter at `index`, resolved from its
    /// surroundings. `None` for anything that is not a delimiter.
    pub fn detect_block_type(&self, index: usize) -> Option<BlockEdge> {
        let token = self.get(index)?;
        let edge = match token.kind() {
            TokenKind::Char('{') => BlockEdge::start(self.curly_type(index)),
            TokenKind::Char('(') => BlockEdge::start(self.paren_type(index)),
            TokenKind::Char('[') => BlockEdge::start(self.square_type(index)),
            TokenKind::Char('}' | ')' | ']') => {
                let default = BlockType::detect(token)?.block_type;
                let block_type = self
                    .matching_opener(index)
                    .and_then(|opener| self.detect_block_type(opener))
                    .map_or(default, |edge| edge.block_type);
                BlockEdge::end(block_type)
            }
            _ => BlockType::detect(token)?,
        };
        Some(edge)
    }

    /// Index of the delimiter closing the block opened at `start`.
    pub fn find_block_end(&self, block_type: BlockType, start: usize) -> Result<usize, TokensError> {
        self.at(start)?;
        if self.detect_block_type(start) != Some(BlockEdge::start(block_type)) {
            return Err(TokensError::NotBlockEdge {
                param: "startIndex",
                side: BlockSide::Start,
            });
        }
        let end = self
            .scan_family(start, block_type.family(), true)
            .ok_or(TokensError::MissingBlockEdge {
                side: BlockSide::End,
            })?;
        trace!(?block_type, start, end, "matched block end");
        Ok(end)
    }

    /// Index of the delimiter opening the block closed at `end`.
    pub fn find_block_start(&self, block_type: BlockType, end: usize) -> Result<usize, TokensError> {
        self.at(end)?;
        if self.detect_block_type(end) != Some(BlockEdge::end(block_type)) {
            return Err(TokensError::NotBlockEdge {
                param: "endIndex",
                side: BlockSide::End,
            });
        }
        let start = self
            .scan_family(end, block_type.family(), false)
            .ok_or(TokensError::MissingBlockEdge {
                side: BlockSide::Start,
            })?;
        trace!(?block_type, start, end, "matched block start");
        Ok(start)
    }

    /// Walks from the delimiter at `from` counting nesting within
    /// `family`, returning where the depth first drops back to zero.
    fn scan_family(&self, from: usize, family: Family, forward: bool) -> Option<usize> {
        let mut depth = 0usize;
        let mut visit = |index: usize| -> Option<usize> {
            let (token_family, opens) = Family::of(self.tokens_kind(index))?;
            if token_family != family {
                return None;
            }
            if opens == forward {
                depth += 1;
            } else {
                depth = depth.checked_sub(1)?;
            }
            (depth == 0).then_some(index)
        };
        if forward {
            (from..self.len()).find_map(&mut visit)
        } else {
            (0..=from).rev().find_map(&mut visit)
        }
    }

    fn tokens_kind(&self, index: usize) -> TokenKind {
        self[index].kind()
    }

    /// The opener matching the closer at `index`.
    fn matching_opener(&self, index: usize) -> Option<usize> {
        let (family, opens) = Family::of(self.tokens_kind(index))?;
        if opens {
            return None;
        }
        self.scan_family(index, family, false)
    }

    /// The closer matching the opener at `index`.
    fn matching_closer(&self, index: usize) -> Option<usize> {
        let (family, opens) = Family::of(self.tokens_kind(index))?;
        if !opens {
            return None;
        }
        self.scan_family(index, family, true)
    }

    /// The nearest unclosed opener of `family` before `index`.
    fn enclosing_opener(&self, index: usize, family: Family) -> Option<usize> {
        let mut depth = 0usize;
        for current in (0..index).rev() {
            match Family::of(self.tokens_kind(current)) {
                Some((f, false)) if f == family => depth += 1,
                Some((f, true)) if f == family => {
                    if depth == 0 {
                        return Some(current);
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        None
    }

    fn curly_type(&self, index: usize) -> BlockType {
        if let Some(block_type) = self.curly_prefix_type(index) {
            return block_type;
        }
        let Some(prev) = self.prev_meaningful(index) else {
            return BlockType::CurlyBrace;
        };
        if self[prev].is_given_kind(TokenId::NsSeparator) {
            return BlockType::GroupImportBrace;
        }
        if self.is_offset_subject(prev) {
            return BlockType::ArrayIndexCurlyBrace;
        }
        BlockType::CurlyBrace
    }

    /// `${` and `->{` are decided by the token glued to the brace.
    fn curly_prefix_type(&self, index: usize) -> Option<BlockType> {
        let prev = &self[self.non_empty_sibling(index, Direction::Backward)?];
        if prev.is_char('$') {
            Some(BlockType::DynamicVarBrace)
        } else if prev.is_any_kind(&[TokenId::ObjectOperator, TokenId::NullsafeObjectOperator]) {
            Some(BlockType::DynamicPropBrace)
        } else {
            None
        }
    }

    /// Whether the meaningful token at `index` ends an expression that a
    /// following `{` indexes into.
    fn is_offset_subject(&self, index: usize) -> bool {
        let token = &self[index];
        if token.is_given_kind(TokenId::Variable) || token.is_char(']') {
            return true;
        }
        if token.is_given_kind(TokenId::String) {
            return self.prev_meaningful(index).is_some_and(|before| {
                self[before]
                    .is_any_kind(&[TokenId::ObjectOperator, TokenId::NullsafeObjectOperator])
            });
        }
        if token.is_char('}') {
            return self.closes_offset_curly(index);
        }
        if token.is_char(')') {
            return self
                .matching_opener(index)
                .and_then(|opener| self.prev_meaningful(opener))
                .is_some_and(|before| self[before].is_given_kind(TokenId::Array));
        }
        false
    }

    /// Whether the `}` at `index` closes an `$a{0}` offset.
    ///
    /// A run like `$a{0}{1}{2}` is walked back to its first brace in a
    /// loop; only the token before the run decides.
    fn closes_offset_curly(&self, index: usize) -> bool {
        let mut close = index;
        loop {
            let Some(open) = self.matching_opener(close) else {
                return false;
            };
            if !self[open].is_char('{') || self.curly_prefix_type(open).is_some() {
                return false;
            }
            let Some(prev) = self.prev_meaningful(open) else {
                return false;
            };
            if !self[prev].is_char('}') {
                return self.is_offset_subject(prev);
            }
            close = prev;
        }
    }

    fn paren_type(&self, index: usize) -> BlockType {
        let wraps_new = self
            .next_meaningful(index)
            .is_some_and(|next| self[next].is_given_kind(TokenId::New));
        if !wraps_new {
            return BlockType::Parenthesis;
        }
        let call_like = self.prev_meaningful(index).is_some_and(|prev| {
            let token = &self[prev];
            token.is_char(']')
                || token.is_char(')')
                || token.is_any_kind(CALL_LIKE_KINDS)
                || (token.is_char('}') && self.closes_offset_curly(prev))
        });
        if call_like {
            BlockType::Parenthesis
        } else {
            BlockType::BraceClassInstantiation
        }
    }

    fn square_type(&self, index: usize) -> BlockType {
        if self.is_destructuring_square(index) {
            return BlockType::DestructuringSquareBrace;
        }
        if self
            .prev_meaningful(index)
            .is_some_and(|prev| disallows_short_array(self, prev))
        {
            BlockType::IndexSquareBrace
        } else {
            BlockType::ArraySquareBrace
        }
    }

    /// Whether the `[` at `index` opens a destructuring list.
    ///
    /// A `[` right after `[` or `,` inherits from the enclosing list, so
    /// nested lists are walked outwards in a loop until one decides.
    fn is_destructuring_square(&self, index: usize) -> bool {
        let mut opener = index;
        loop {
            let prev = self.prev_meaningful(opener);
            if prev.is_some_and(|prev| self[prev].is_given_kind(TokenId::As)) {
                return true;
            }
            if !prev.is_some_and(|prev| disallows_destructuring(self, prev))
                && self.is_assigned_to(opener)
            {
                return true;
            }
            let nested =
                prev.is_some_and(|prev| self[prev].is_char('[') || self[prev].is_char(','));
            match self.enclosing_opener(opener, Family::Square) {
                Some(outer) if nested => opener = outer,
                _ => return false,
            }
        }
    }

    /// Whether the bracket block opened at `index` is followed by `=`.
    fn is_assigned_to(&self, index: usize) -> bool {
        self.matching_closer(index)
            .and_then(|closer| self.next_meaningful(closer))
            .is_some_and(|next| self[next].is_char('='))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
