//! PHP token identifiers.
//!
//! One variant per `T_*` constant the scanner can produce. The canonical
//! name is kept alongside each variant so diagnostics and test output read
//! the same as PHP's own `token_name()`.

macro_rules! define_token_ids {
    ($($variant:ident => $name:literal,)*) => {
        /// A semantic token kind, named after its `T_*` constant.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TokenId {
            $($variant,)*
        }

        impl TokenId {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [TokenId] = &[$(TokenId::$variant,)*];

            /// The canonical `T_*` name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenId::$variant => $name,)*
                }
            }

            /// Looks an identifier up by its `T_*` name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(TokenId::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

define_token_ids! {
    Abstract => "T_ABSTRACT",
    AndEqual => "T_AND_EQUAL",
    Array => "T_ARRAY",
    ArrayCast => "T_ARRAY_CAST",
    As => "T_AS",
    BadCharacter => "T_BAD_CHARACTER",
    BoolCast => "T_BOOL_CAST",
    BooleanAnd => "T_BOOLEAN_AND",
    BooleanOr => "T_BOOLEAN_OR",
    Break => "T_BREAK",
    Callable => "T_CALLABLE",
    Case => "T_CASE",
    Catch => "T_CATCH",
    Class => "T_CLASS",
    ClassC => "T_CLASS_C",
    Clone => "T_CLONE",
    CloseTag => "T_CLOSE_TAG",
    Coalesce => "T_COALESCE",
    CoalesceEqual => "T_COALESCE_EQUAL",
    Comment => "T_COMMENT",
    ConcatEqual => "T_CONCAT_EQUAL",
    Const => "T_CONST",
    ConstantEncapsedString => "T_CONSTANT_ENCAPSED_STRING",
    Continue => "T_CONTINUE",
    CurlyOpen => "T_CURLY_OPEN",
    Dec => "T_DEC",
    Declare => "T_DECLARE",
    Default => "T_DEFAULT",
    Dir => "T_DIR",
    DivEqual => "T_DIV_EQUAL",
    DNumber => "T_DNUMBER",
    Do => "T_DO",
    DocComment => "T_DOC_COMMENT",
    DollarOpenCurlyBraces => "T_DOLLAR_OPEN_CURLY_BRACES",
    DoubleArrow => "T_DOUBLE_ARROW",
    DoubleCast => "T_DOUBLE_CAST",
    DoubleColon => "T_DOUBLE_COLON",
    Echo => "T_ECHO",
    Ellipsis => "T_ELLIPSIS",
    Else => "T_ELSE",
    ElseIf => "T_ELSEIF",
    Empty => "T_EMPTY",
    EncapsedAndWhitespace => "T_ENCAPSED_AND_WHITESPACE",
    EndDeclare => "T_ENDDECLARE",
    EndFor => "T_ENDFOR",
    EndForeach => "T_ENDFOREACH",
    EndHeredoc => "T_END_HEREDOC",
    EndIf => "T_ENDIF",
    EndSwitch => "T_ENDSWITCH",
    EndWhile => "T_ENDWHILE",
    Eval => "T_EVAL",
    Exit => "T_EXIT",
    Extends => "T_EXTENDS",
    File => "T_FILE",
    Final => "T_FINAL",
    Finally => "T_FINALLY",
    Fn => "T_FN",
    For => "T_FOR",
    Foreach => "T_FOREACH",
    FuncC => "T_FUNC_C",
    Function => "T_FUNCTION",
    Global => "T_GLOBAL",
    Goto => "T_GOTO",
    HaltCompiler => "T_HALT_COMPILER",
    If => "T_IF",
    Implements => "T_IMPLEMENTS",
    Inc => "T_INC",
    Include => "T_INCLUDE",
    IncludeOnce => "T_INCLUDE_ONCE",
    InlineHtml => "T_INLINE_HTML",
    InstanceOf => "T_INSTANCEOF",
    InsteadOf => "T_INSTEADOF",
    IntCast => "T_INT_CAST",
    Interface => "T_INTERFACE",
    IsEqual => "T_IS_EQUAL",
    IsGreaterOrEqual => "T_IS_GREATER_OR_EQUAL",
    IsIdentical => "T_IS_IDENTICAL",
    IsNotEqual => "T_IS_NOT_EQUAL",
    IsNotIdentical => "T_IS_NOT_IDENTICAL",
    IsSmallerOrEqual => "T_IS_SMALLER_OR_EQUAL",
    Isset => "T_ISSET",
    Line => "T_LINE",
    List => "T_LIST",
    LNumber => "T_LNUMBER",
    LogicalAnd => "T_LOGICAL_AND",
    LogicalOr => "T_LOGICAL_OR",
    LogicalXor => "T_LOGICAL_XOR",
    MethodC => "T_METHOD_C",
    MinusEqual => "T_MINUS_EQUAL",
    ModEqual => "T_MOD_EQUAL",
    MulEqual => "T_MUL_EQUAL",
    Namespace => "T_NAMESPACE",
    New => "T_NEW",
    NsC => "T_NS_C",
    NsSeparator => "T_NS_SEPARATOR",
    NullsafeObjectOperator => "T_NULLSAFE_OBJECT_OPERATOR",
    NumString => "T_NUM_STRING",
    ObjectCast => "T_OBJECT_CAST",
    ObjectOperator => "T_OBJECT_OPERATOR",
    OpenTag => "T_OPEN_TAG",
    OpenTagWithEcho => "T_OPEN_TAG_WITH_ECHO",
    OrEqual => "T_OR_EQUAL",
    PlusEqual => "T_PLUS_EQUAL",
    Pow => "T_POW",
    PowEqual => "T_POW_EQUAL",
    Print => "T_PRINT",
    Private => "T_PRIVATE",
    Protected => "T_PROTECTED",
    Public => "T_PUBLIC",
    Require => "T_REQUIRE",
    RequireOnce => "T_REQUIRE_ONCE",
    Return => "T_RETURN",
    Sl => "T_SL",
    SlEqual => "T_SL_EQUAL",
    Spaceship => "T_SPACESHIP",
    Sr => "T_SR",
    SrEqual => "T_SR_EQUAL",
    StartHeredoc => "T_START_HEREDOC",
    Static => "T_STATIC",
    String => "T_STRING",
    StringCast => "T_STRING_CAST",
    StringVarname => "T_STRING_VARNAME",
    Switch => "T_SWITCH",
    Throw => "T_THROW",
    Trait => "T_TRAIT",
    TraitC => "T_TRAIT_C",
    Try => "T_TRY",
    Unset => "T_UNSET",
    UnsetCast => "T_UNSET_CAST",
    Use => "T_USE",
    Var => "T_VAR",
    Variable => "T_VARIABLE",
    While => "T_WHILE",
    Whitespace => "T_WHITESPACE",
    XorEqual => "T_XOR_EQUAL",
    Yield => "T_YIELD",
    YieldFrom => "T_YIELD_FROM",
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
