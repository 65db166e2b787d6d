//! Semantic token categories.
//!
//! One classification function maps a token to a set of categories, so
//! rules ask `token.is(TokenCategory::CAST)` instead of calling a
//! dedicated predicate per category.

use bitflags::bitflags;
use fixer_lexer::TokenId;

use crate::token::TokenKind;

bitflags! {
    /// Categories a token belongs to. A token can be in several.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TokenCategory: u16 {
        /// `T_WHITESPACE`.
        const WHITESPACE = 1 << 0;
        /// `T_COMMENT` and `T_DOC_COMMENT`.
        const COMMENT = 1 << 1;
        /// `(int)`, `(string)` and friends.
        const CAST = 1 << 2;
        /// Visibility, `static`, `abstract`, `final` and `var`.
        const MODIFIER = 1 << 3;
        /// Reserved words.
        const KEYWORD = 1 << 4;
        /// `__CLASS__`, `__LINE__` and the other magic constants.
        const MAGIC_CONSTANT = 1 << 5;
        /// `class`, `interface` and `trait`.
        const CLASSY = 1 << 6;
        /// `->` and `?->`.
        const OBJECT_OPERATOR = 1 << 7;
        /// `array` and `list`.
        const ARRAY = 1 << 8;
        /// `true`, `false` and `null` in any case.
        const NATIVE_CONSTANT = 1 << 9;
        /// `<?php`, `<?` and `<?=`.
        const OPEN_TAG = 1 << 10;
        /// String literals and string parts.
        const STRING_LITERAL = 1 << 11;
        /// Characters and tokens that open or close a block.
        const BLOCK_DELIMITER = 1 << 12;
        /// Arithmetic, comparison, logical and assignment operators.
        const OPERATOR = 1 << 13;
    }
}

impl TokenCategory {
    /// Categories that make a token invisible to meaningful-token search.
    pub const TRIVIA: Self = Self::WHITESPACE.union(Self::COMMENT);
}

/// Classifies a token kind, using `text` where the kind alone is not
/// enough (native constants are plain `T_STRING`s).
pub fn classify(kind: TokenKind, text: &str) -> TokenCategory {
    match kind {
        TokenKind::Empty => TokenCategory::empty(),
        TokenKind::Char(c) => classify_char(c),
        TokenKind::Id(id) => classify_id(id, text),
    }
}

fn classify_char(c: char) -> TokenCategory {
    match c {
        '(' | ')' | '[' | ']' | '{' | '}' => TokenCategory::BLOCK_DELIMITER,
        '=' | '+' | '-' | '*' | '/' | '%' | '.' | '!' | '<' | '>' | '&' | '|' | '^' | '~'
        | '?' | ':' | '@' => TokenCategory::OPERATOR,
        '"' | '`' => TokenCategory::STRING_LITERAL,
        _ => TokenCategory::empty(),
    }
}

fn classify_id(id: TokenId, text: &str) -> TokenCategory {
    use TokenId as T;

    match id {
        T::Whitespace => TokenCategory::WHITESPACE,
        T::Comment | T::DocComment => TokenCategory::COMMENT,
        T::OpenTag | T::OpenTagWithEcho => TokenCategory::OPEN_TAG,
        T::ArrayCast
        | T::BoolCast
        | T::DoubleCast
        | T::IntCast
        | T::ObjectCast
        | T::StringCast
        | T::UnsetCast => TokenCategory::CAST,
        T::Public | T::Protected | T::Private | T::Static | T::Abstract | T::Final | T::Var => {
            TokenCategory::MODIFIER | TokenCategory::KEYWORD
        }
        T::Class | T::Interface | T::Trait => TokenCategory::CLASSY | TokenCategory::KEYWORD,
        T::Array | T::List => TokenCategory::ARRAY | TokenCategory::KEYWORD,
        T::ClassC
        | T::Dir
        | T::File
        | T::FuncC
        | T::Line
        | T::MethodC
        | T::NsC
        | T::TraitC => TokenCategory::MAGIC_CONSTANT,
        T::ObjectOperator | T::NullsafeObjectOperator => TokenCategory::OBJECT_OPERATOR,
        T::CurlyOpen | T::DollarOpenCurlyBraces => TokenCategory::BLOCK_DELIMITER,
        T::ConstantEncapsedString
        | T::EncapsedAndWhitespace
        | T::StartHeredoc
        | T::EndHeredoc
        | T::NumString
        | T::StringVarname => TokenCategory::STRING_LITERAL,
        T::String if is_native_constant(text) => TokenCategory::NATIVE_CONSTANT,
        T::AndEqual
        | T::BooleanAnd
        | T::BooleanOr
        | T::Coalesce
        | T::CoalesceEqual
        | T::ConcatEqual
        | T::Dec
        | T::DivEqual
        | T::DoubleArrow
        | T::Inc
        | T::IsEqual
        | T::IsGreaterOrEqual
        | T::IsIdentical
        | T::IsNotEqual
        | T::IsNotIdentical
        | T::IsSmallerOrEqual
        | T::MinusEqual
        | T::ModEqual
        | T::MulEqual
        | T::OrEqual
        | T::PlusEqual
        | T::Pow
        | T::PowEqual
        | T::Sl
        | T::SlEqual
        | T::Spaceship
        | T::Sr
        | T::SrEqual
        | T::XorEqual => TokenCategory::OPERATOR,
        T::LogicalAnd | T::LogicalOr | T::LogicalXor | T::InstanceOf => {
            TokenCategory::OPERATOR | TokenCategory::KEYWORD
        }
        _ if is_keyword(id) => TokenCategory::KEYWORD,
        _ => TokenCategory::empty(),
    }
}

fn is_native_constant(text: &str) -> bool {
    ["true", "false", "null"]
        .iter()
        .any(|name| text.eq_ignore_ascii_case(name))
}

fn is_keyword(id: TokenId) -> bool {
    use TokenId as T;

    matches!(
        id,
        T::As
            | T::Break
            | T::Callable
            | T::Case
            | T::Catch
            | T::Clone
            | T::Const
            | T::Continue
            | T::Declare
            | T::Default
            | T::Do
            | T::Echo
            | T::Else
            | T::ElseIf
            | T::Empty
            | T::EndDeclare
            | T::EndFor
            | T::EndForeach
            | T::EndIf
            | T::EndSwitch
            | T::EndWhile
            | T::Eval
            | T::Exit
            | T::Extends
            | T::Finally
            | T::Fn
            | T::For
            | T::Foreach
            | T::Function
            | T::Global
            | T::Goto
            | T::HaltCompiler
            | T::If
            | T::Implements
            | T::Include
            | T::IncludeOnce
            | T::InsteadOf
            | T::Isset
            | T::Namespace
            | T::New
            | T::Print
            | T::Require
            | T::RequireOnce
            | T::Return
            | T::Switch
            | T::Throw
            | T::Try
            | T::Unset
            | T::Use
            | T::While
            | T::Yield
            | T::YieldFrom
    )
}
