//! Case-insensitive keyword, magic constant and cast lookup.
//!
//! PHP keywords are ASCII and at most 15 bytes long, so lookups lowercase
//! into a stack buffer and match byte strings without allocating.

use crate::token_id::TokenId;

/// Length of `__halt_compiler`, the longest reserved word.
const LONGEST_KEYWORD: usize = 15;

/// Resolves an identifier to its keyword or magic-constant id.
pub(crate) fn keyword(ident: &[u8]) -> Option<TokenId> {
    if ident.len() > LONGEST_KEYWORD {
        return None;
    }
    let mut buf = [0u8; LONGEST_KEYWORD];
    let lower = &mut buf[..ident.len()];
    lower.copy_from_slice(ident);
    lower.make_ascii_lowercase();

    let id = match &*lower {
        b"abstract" => TokenId::Abstract,
        b"and" => TokenId::LogicalAnd,
        b"array" => TokenId::Array,
        b"as" => TokenId::As,
        b"break" => TokenId::Break,
        b"callable" => TokenId::Callable,
        b"case" => TokenId::Case,
        b"catch" => TokenId::Catch,
        b"class" => TokenId::Class,
        b"clone" => TokenId::Clone,
        b"const" => TokenId::Const,
        b"continue" => TokenId::Continue,
        b"declare" => TokenId::Declare,
        b"default" => TokenId::Default,
        b"die" | b"exit" => TokenId::Exit,
        b"do" => TokenId::Do,
        b"echo" => TokenId::Echo,
        b"else" => TokenId::Else,
        b"elseif" => TokenId::ElseIf,
        b"empty" => TokenId::Empty,
        b"enddeclare" => TokenId::EndDeclare,
        b"endfor" => TokenId::EndFor,
        b"endforeach" => TokenId::EndForeach,
        b"endif" => TokenId::EndIf,
        b"endswitch" => TokenId::EndSwitch,
        b"endwhile" => TokenId::EndWhile,
        b"eval" => TokenId::Eval,
        b"extends" => TokenId::Extends,
        b"final" => TokenId::Final,
        b"finally" => TokenId::Finally,
        b"fn" => TokenId::Fn,
        b"for" => TokenId::For,
        b"foreach" => TokenId::Foreach,
        b"function" => TokenId::Function,
        b"global" => TokenId::Global,
        b"goto" => TokenId::Goto,
        b"if" => TokenId::If,
        b"implements" => TokenId::Implements,
        b"include" => TokenId::Include,
        b"include_once" => TokenId::IncludeOnce,
        b"instanceof" => TokenId::InstanceOf,
        b"insteadof" => TokenId::InsteadOf,
        b"interface" => TokenId::Interface,
        b"isset" => TokenId::Isset,
        b"list" => TokenId::List,
        b"namespace" => TokenId::Namespace,
        b"new" => TokenId::New,
        b"or" => TokenId::LogicalOr,
        b"print" => TokenId::Print,
        b"private" => TokenId::Private,
        b"protected" => TokenId::Protected,
        b"public" => TokenId::Public,
        b"require" => TokenId::Require,
        b"require_once" => TokenId::RequireOnce,
        b"return" => TokenId::Return,
        b"static" => TokenId::Static,
        b"switch" => TokenId::Switch,
        b"throw" => TokenId::Throw,
        b"trait" => TokenId::Trait,
        b"try" => TokenId::Try,
        b"unset" => TokenId::Unset,
        b"use" => TokenId::Use,
        b"var" => TokenId::Var,
        b"while" => TokenId::While,
        b"xor" => TokenId::LogicalXor,
        b"yield" => TokenId::Yield,
        b"__halt_compiler" => TokenId::HaltCompiler,
        b"__class__" => TokenId::ClassC,
        b"__dir__" => TokenId::Dir,
        b"__file__" => TokenId::File,
        b"__function__" => TokenId::FuncC,
        b"__line__" => TokenId::Line,
        b"__method__" => TokenId::MethodC,
        b"__namespace__" => TokenId::NsC,
        b"__trait__" => TokenId::TraitC,
        _ => return None,
    };
    Some(id)
}

/// Resolves the type name inside a cast such as `(int)` or `( string )`.
pub(crate) fn cast(word: &[u8]) -> Option<TokenId> {
    // "boolean" is the longest accepted spelling.
    if word.len() > 7 {
        return None;
    }
    let mut buf = [0u8; 7];
    let lower = &mut buf[..word.len()];
    lower.copy_from_slice(word);
    lower.make_ascii_lowercase();

    let id = match &*lower {
        b"int" | b"integer" => TokenId::IntCast,
        b"bool" | b"boolean" => TokenId::BoolCast,
        b"float" | b"double" | b"real" => TokenId::DoubleCast,
        b"string" | b"binary" => TokenId::StringCast,
        b"array" => TokenId::ArrayCast,
        b"object" => TokenId::ObjectCast,
        b"unset" => TokenId::UnsetCast,
        _ => return None,
    };
    Some(id)
}
