//! Mode-driven PHP scanner.
//!
//! [`RawScanner`] yields one [`LexItem`] per `next()` call. Its modes follow
//! the PHP lexer's start conditions: inline HTML, script, the three
//! interpolating string forms, nowdoc bodies, and the small states used
//! inside `"$var[offset]"`, `"$var->prop"` and `"${name}"`.
//!
//! # Design
//!
//! Scanning never fails. Unterminated strings and comments run to the end
//! of input, stray bytes become `T_BAD_CHARACTER`, and every input byte
//! lands in exactly one item, so concatenating the item texts reproduces
//! the source.
//!
//! Single-line comments never own their trailing blanks or newline; those
//! start the following `T_WHITESPACE` item.

use memchr::{memchr, memchr2, memchr2_iter, memchr3};
use smallvec::SmallVec;

use crate::config::LexerConfig;
use crate::cursor::Cursor;
use crate::item::{LexItem, LexKind};
use crate::keywords;
use crate::token_id::TokenId;

/// Multi-byte operators. Three-byte entries come first so the first match
/// is always the longest.
const OPERATORS: &[(&[u8], TokenId)] = &[
    (b"<=>", TokenId::Spaceship),
    (b"===", TokenId::IsIdentical),
    (b"!==", TokenId::IsNotIdentical),
    (b"**=", TokenId::PowEqual),
    (b"...", TokenId::Ellipsis),
    (b"<<=", TokenId::SlEqual),
    (b">>=", TokenId::SrEqual),
    (b"??=", TokenId::CoalesceEqual),
    (b"?->", TokenId::NullsafeObjectOperator),
    (b"==", TokenId::IsEqual),
    (b"!=", TokenId::IsNotEqual),
    (b"<>", TokenId::IsNotEqual),
    (b"<=", TokenId::IsSmallerOrEqual),
    (b">=", TokenId::IsGreaterOrEqual),
    (b"++", TokenId::Inc),
    (b"--", TokenId::Dec),
    (b"+=", TokenId::PlusEqual),
    (b"-=", TokenId::MinusEqual),
    (b"*=", TokenId::MulEqual),
    (b"/=", TokenId::DivEqual),
    (b".=", TokenId::ConcatEqual),
    (b"%=", TokenId::ModEqual),
    (b"&=", TokenId::AndEqual),
    (b"|=", TokenId::OrEqual),
    (b"^=", TokenId::XorEqual),
    (b"<<", TokenId::Sl),
    (b">>", TokenId::Sr),
    (b"&&", TokenId::BooleanAnd),
    (b"||", TokenId::BooleanOr),
    (b"->", TokenId::ObjectOperator),
    (b"=>", TokenId::DoubleArrow),
    (b"::", TokenId::DoubleColon),
    (b"**", TokenId::Pow),
    (b"??", TokenId::Coalesce),
];

/// Bytes that form a generic single-character token.
const SINGLE_CHARS: &[u8] = b";,.[]()|^&+-/*=%!~$<>?:@{}\"`";

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_label_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
fn is_label_char(b: u8) -> bool {
    is_label_start(b) || b.is_ascii_digit()
}

/// Counts line breaks, treating `\r\n` as one.
fn count_newlines(bytes: &[u8]) -> u32 {
    let breaks = memchr2_iter(b'\n', b'\r', bytes)
        .filter(|&i| bytes[i] == b'\n' || bytes.get(i + 1) != Some(&b'\n'))
        .count();
    u32::try_from(breaks).unwrap_or(u32::MAX)
}

/// Classifies an integer literal, promoting it to `T_DNUMBER` when it does
/// not fit in a signed 64-bit integer.
fn int_kind(digits: &[u8], radix: u32) -> LexKind {
    let mut value: i64 = 0;
    for &b in digits.iter().filter(|&&b| b != b'_') {
        let digit = char::from(b).to_digit(radix).unwrap_or(0);
        match value
            .checked_mul(i64::from(radix))
            .and_then(|v| v.checked_add(i64::from(digit)))
        {
            Some(v) => value = v,
            None => return LexKind::Id(TokenId::DNumber),
        }
    }
    LexKind::Id(TokenId::LNumber)
}

/// Scanner start condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode<'a> {
    InlineHtml,
    Script,
    DoubleQuotes,
    Backquote,
    Heredoc { label: &'a str },
    Nowdoc { label: &'a str },
    /// `"$var[` seen; expecting an offset or `]`.
    VarOffset,
    /// `"$var->` seen; expecting the operator, then the property name.
    Property,
    /// `"${` seen; a name followed by `[` or `}` is a `T_STRING_VARNAME`.
    Varname,
    /// Everything after `__halt_compiler();`.
    Halted,
}

/// Pull-based PHP scanner.
///
/// Produces one item at a time; collect it for the full item list.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    config: LexerConfig,
    /// Line of the next item.
    line: u32,
    mode: Mode<'a>,
    /// Modes suspended by `{`, `{$`, `${`, `[` and `->`, restored when the
    /// construct closes.
    stack: SmallVec<[Mode<'a>; 8]>,
    /// The last script token was `->` or `?->`, so a following name is a
    /// property even when it spells a keyword.
    after_arrow: bool,
    /// `__halt_compiler` was seen; the next `;` or `?>` ends scanning.
    halt_pending: bool,
}

impl<'a> RawScanner<'a> {
    /// Create a scanner positioned at the start of `source`.
    pub fn new(source: &'a str, config: LexerConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            config,
            line: 1,
            mode: Mode::InlineHtml,
            stack: SmallVec::new(),
            after_arrow: false,
            halt_pending: false,
        }
    }

    fn emit(&mut self, start: usize, kind: LexKind) -> LexItem<'a> {
        let text = self.cursor.slice_from(start);
        let line = self.line;
        self.line = self.line.saturating_add(count_newlines(text.as_bytes()));
        LexItem { kind, text, line }
    }

    fn pop_mode(&mut self) {
        self.mode = self.stack.pop().unwrap_or(Mode::Script);
    }

    fn at_line_start(&self) -> bool {
        let pos = self.cursor.pos();
        pos == 0 || matches!(self.cursor.bytes()[pos - 1], b'\n' | b'\r')
    }

    // ─── Inline HTML and tags ──────────────────────────────────────

    fn inline_html(&mut self) -> LexKind {
        if let Some(kind) = self.open_tag() {
            return kind;
        }
        loop {
            self.cursor.advance();
            match memchr(b'<', self.cursor.rest()) {
                None => {
                    self.cursor.skip_to_end();
                    break;
                }
                Some(offset) => {
                    self.cursor.advance_n(offset);
                    if self.open_tag_len().is_some() {
                        break;
                    }
                }
            }
        }
        LexKind::Id(TokenId::InlineHtml)
    }

    /// Length and kind of the open tag at the cursor, if any.
    fn open_tag_len(&self) -> Option<(usize, TokenId)> {
        let cursor = &self.cursor;
        if !cursor.starts_with(b"<?") {
            return None;
        }
        if cursor.peek_at(2) == b'=' {
            return Some((3, TokenId::OpenTagWithEcho));
        }
        if cursor.starts_with_ignore_case(b"<?php") {
            match cursor.peek_at(5) {
                0 if cursor.rest().len() == 5 => return Some((5, TokenId::OpenTag)),
                b' ' | b'\t' | b'\n' => return Some((6, TokenId::OpenTag)),
                b'\r' if cursor.peek_at(6) == b'\n' => return Some((7, TokenId::OpenTag)),
                b'\r' => return Some((6, TokenId::OpenTag)),
                _ => {}
            }
        }
        self.config
            .short_open_tag
            .then_some((2, TokenId::OpenTag))
    }

    fn open_tag(&mut self) -> Option<LexKind> {
        let (len, id) = self.open_tag_len()?;
        self.cursor.advance_n(len);
        self.mode = Mode::Script;
        Some(LexKind::Id(id))
    }

    fn close_tag(&mut self) -> LexKind {
        self.cursor.advance_n(2);
        match self.cursor.current() {
            b'\n' => self.cursor.advance(),
            b'\r' if self.cursor.peek() == b'\n' => self.cursor.advance_n(2),
            b'\r' => self.cursor.advance(),
            _ => {}
        }
        self.mode = if std::mem::take(&mut self.halt_pending) {
            Mode::Halted
        } else {
            Mode::InlineHtml
        };
        LexKind::Id(TokenId::CloseTag)
    }

    // ─── Script ────────────────────────────────────────────────────

    fn script(&mut self) -> LexKind {
        let after_arrow = std::mem::take(&mut self.after_arrow);
        let next = self.cursor.peek();
        match self.cursor.current() {
            b' ' | b'\t' | b'\n' | b'\r' => {
                self.cursor.eat_while(is_whitespace);
                self.after_arrow = after_arrow;
                LexKind::Id(TokenId::Whitespace)
            }
            b'#' => self.line_comment(),
            b'/' if next == b'/' => self.line_comment(),
            b'/' if next == b'*' => self.block_comment(),
            b'?' if next == b'>' => self.close_tag(),
            b'$' if is_label_start(next) => self.variable(),
            b'\\' => {
                self.cursor.advance();
                LexKind::Id(TokenId::NsSeparator)
            }
            b'0'..=b'9' => self.number(),
            b'.' if next.is_ascii_digit() => self.number(),
            b'\'' => self.single_quoted(0),
            b'"' => self.double_quoted(0),
            b'`' => {
                self.cursor.advance();
                self.mode = Mode::Backquote;
                LexKind::Char('`')
            }
            b'b' | b'B' if matches!(next, b'\'' | b'"') => self.binary_prefixed(),
            b'b' | b'B' if self.cursor.rest()[1..].starts_with(b"<<<") => self.binary_prefixed(),
            b'<' if self.cursor.starts_with(b"<<<") => {
                self.heredoc_start(0).unwrap_or_else(|| self.operator())
            }
            b'(' => self.paren_or_cast(),
            b'{' => {
                self.stack.push(Mode::Script);
                self.cursor.advance();
                LexKind::Char('{')
            }
            b'}' => {
                if let Some(mode) = self.stack.pop() {
                    self.mode = mode;
                }
                self.cursor.advance();
                LexKind::Char('}')
            }
            c if is_label_start(c) => self.identifier(after_arrow),
            _ => self.operator(),
        }
    }

    /// `//` or `#` comment, ending before the line break or `?>` and
    /// excluding trailing blanks.
    fn line_comment(&mut self) -> LexKind {
        let rest = self.cursor.rest();
        let mut from = 0;
        let mut end = loop {
            match memchr3(b'\n', b'\r', b'?', &rest[from..]) {
                None => break rest.len(),
                Some(offset) => {
                    let at = from + offset;
                    if rest[at] != b'?' || rest.get(at + 1) == Some(&b'>') {
                        break at;
                    }
                    from = at + 1;
                }
            }
        };
        while end > 1 && matches!(rest[end - 1], b' ' | b'\t') {
            end -= 1;
        }
        self.cursor.advance_n(end);
        LexKind::Id(TokenId::Comment)
    }

    fn block_comment(&mut self) -> LexKind {
        let start = self.cursor.pos();
        let is_doc = self.cursor.starts_with(b"/**") && is_whitespace(self.cursor.peek_at(3));
        match self.cursor.find_from(start + 2, b"*/") {
            Some(end) => self.cursor.jump_to(end + 2),
            None => self.cursor.skip_to_end(),
        }
        if is_doc {
            LexKind::Id(TokenId::DocComment)
        } else {
            LexKind::Id(TokenId::Comment)
        }
    }

    fn variable(&mut self) -> LexKind {
        self.cursor.advance();
        self.cursor.eat_while(is_label_char);
        LexKind::Id(TokenId::Variable)
    }

    fn identifier(&mut self, after_arrow: bool) -> LexKind {
        let start = self.cursor.pos();
        self.cursor.eat_while(is_label_char);
        if after_arrow {
            return LexKind::Id(TokenId::String);
        }
        let word = &self.cursor.bytes()[start..self.cursor.pos()];
        match keywords::keyword(word) {
            Some(TokenId::Yield) => LexKind::Id(self.yield_from()),
            Some(TokenId::HaltCompiler) => {
                self.halt_pending = true;
                LexKind::Id(TokenId::HaltCompiler)
            }
            Some(id) => LexKind::Id(id),
            None => LexKind::Id(TokenId::String),
        }
    }

    /// Extends a just-scanned `yield` over `from` when it follows.
    fn yield_from(&mut self) -> TokenId {
        let rest = self.cursor.rest();
        let gap = rest.iter().take_while(|&&b| is_whitespace(b)).count();
        let has_from = rest
            .get(gap..gap + 4)
            .is_some_and(|word| word.eq_ignore_ascii_case(b"from"));
        let continues = rest.get(gap + 4).is_some_and(|&b| is_label_char(b));
        if gap > 0 && has_from && !continues {
            self.cursor.advance_n(gap + 4);
            TokenId::YieldFrom
        } else {
            TokenId::Yield
        }
    }

    fn eat_digits(&mut self, is_digit: impl Fn(u8) -> bool) {
        loop {
            let c = self.cursor.current();
            if is_digit(c) || (c == b'_' && is_digit(self.cursor.peek())) {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> LexKind {
        let c = self.cursor.current();
        let next = self.cursor.peek();
        if c == b'0' && matches!(next, b'x' | b'X') && self.cursor.peek_at(2).is_ascii_hexdigit() {
            self.cursor.advance_n(2);
            let digits = self.cursor.pos();
            self.eat_digits(|b| b.is_ascii_hexdigit());
            return int_kind(&self.cursor.bytes()[digits..self.cursor.pos()], 16);
        }
        if c == b'0' && matches!(next, b'b' | b'B') && matches!(self.cursor.peek_at(2), b'0' | b'1') {
            self.cursor.advance_n(2);
            let digits = self.cursor.pos();
            self.eat_digits(|b| matches!(b, b'0' | b'1'));
            return int_kind(&self.cursor.bytes()[digits..self.cursor.pos()], 2);
        }

        let digits = self.cursor.pos();
        self.eat_digits(|b| b.is_ascii_digit());
        let int_end = self.cursor.pos();
        let mut float = false;
        if self.cursor.current() == b'.' {
            float = true;
            self.cursor.advance();
            self.eat_digits(|b| b.is_ascii_digit());
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let sign = usize::from(matches!(self.cursor.peek(), b'+' | b'-'));
            if self.cursor.peek_at(1 + sign).is_ascii_digit() {
                float = true;
                self.cursor.advance_n(1 + sign);
                self.eat_digits(|b| b.is_ascii_digit());
            }
        }
        if float {
            return LexKind::Id(TokenId::DNumber);
        }
        let digits = &self.cursor.bytes()[digits..int_end];
        let radix = if digits.len() > 1 && digits[0] == b'0' { 8 } else { 10 };
        int_kind(digits, radix)
    }

    /// `(` or a cast such as `(int)` / `( string )`.
    fn paren_or_cast(&mut self) -> LexKind {
        let rest = self.cursor.rest();
        let blanks = |from: usize| {
            rest[from..]
                .iter()
                .take_while(|&&b| b == b' ' || b == b'\t')
                .count()
        };
        let word_start = 1 + blanks(1);
        let word_len = rest[word_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let close = word_start + word_len + blanks(word_start + word_len);
        if word_len > 0 && rest.get(close) == Some(&b')') {
            if let Some(id) = keywords::cast(&rest[word_start..word_start + word_len]) {
                self.cursor.advance_n(close + 1);
                return LexKind::Id(id);
            }
        }
        self.cursor.advance();
        LexKind::Char('(')
    }

    fn operator(&mut self) -> LexKind {
        let rest = self.cursor.rest();
        if let Some(&(text, id)) = OPERATORS.iter().find(|(text, _)| rest.starts_with(text)) {
            self.cursor.advance_n(text.len());
            self.after_arrow = matches!(
                id,
                TokenId::ObjectOperator | TokenId::NullsafeObjectOperator
            );
            return LexKind::Id(id);
        }
        let c = self.cursor.current();
        if SINGLE_CHARS.contains(&c) {
            self.cursor.advance();
            return LexKind::Char(char::from(c));
        }
        self.cursor.advance_char();
        LexKind::Id(TokenId::BadCharacter)
    }

    // ─── Strings ───────────────────────────────────────────────────

    fn binary_prefixed(&mut self) -> LexKind {
        match self.cursor.peek() {
            b'\'' => self.single_quoted(1),
            b'"' => self.double_quoted(1),
            _ => self
                .heredoc_start(1)
                .unwrap_or_else(|| self.identifier(false)),
        }
    }

    /// `'...'`, skipping `prefix` bytes (a `b`) before the quote.
    fn single_quoted(&mut self, prefix: usize) -> LexKind {
        self.cursor.advance_n(prefix + 1);
        loop {
            let rest = self.cursor.rest();
            match memchr2(b'\'', b'\\', rest) {
                None => {
                    self.cursor.skip_to_end();
                    return LexKind::Id(TokenId::EncapsedAndWhitespace);
                }
                Some(offset) if rest[offset] == b'\\' => self.cursor.advance_n(offset + 2),
                Some(offset) => {
                    self.cursor.advance_n(offset + 1);
                    return LexKind::Id(TokenId::ConstantEncapsedString);
                }
            }
        }
    }

    /// `"..."`: one constant string when nothing is interpolated, otherwise
    /// the opening quote and a switch to double-quote mode.
    fn double_quoted(&mut self, prefix: usize) -> LexKind {
        let bytes = self.cursor.bytes();
        let mut i = self.cursor.pos() + prefix + 1;
        while let Some(offset) = memchr3(b'"', b'\\', b'$', &bytes[i..]) {
            let at = i + offset;
            match bytes[at] {
                b'"' => {
                    self.cursor.jump_to(at + 1);
                    return LexKind::Id(TokenId::ConstantEncapsedString);
                }
                b'\\' => i = (at + 2).min(bytes.len()),
                _ => {
                    let next = bytes.get(at + 1).copied().unwrap_or(0);
                    if is_label_start(next) || next == b'{' || bytes[at - 1] == b'{' {
                        break;
                    }
                    i = at + 1;
                }
            }
        }
        self.cursor.advance_n(prefix + 1);
        self.mode = Mode::DoubleQuotes;
        LexKind::Char('"')
    }

    /// `<<<LABEL`, `<<<"LABEL"` or `<<<'LABEL'` up to and including the
    /// line break. Returns `None` when the text is not a heredoc opener.
    fn heredoc_start(&mut self, prefix: usize) -> Option<LexKind> {
        let rest = self.cursor.rest();
        let mut i = prefix + 3;
        while matches!(rest.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        let quote = match rest.get(i) {
            Some(&q @ (b'\'' | b'"')) => {
                i += 1;
                Some(q)
            }
            _ => None,
        };
        if !rest.get(i).is_some_and(|&b| is_label_start(b)) {
            return None;
        }
        let label_start = i;
        while rest.get(i).is_some_and(|&b| is_label_char(b)) {
            i += 1;
        }
        let label_end = i;
        if let Some(q) = quote {
            if rest.get(i) != Some(&q) {
                return None;
            }
            i += 1;
        }
        match rest.get(i) {
            Some(b'\n') => i += 1,
            Some(b'\r') => {
                i += 1;
                if rest.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => return None,
        }

        let base = self.cursor.pos();
        let label = self.cursor.slice(base + label_start, base + label_end);
        self.cursor.advance_n(i);
        self.mode = if quote == Some(b'\'') {
            Mode::Nowdoc { label }
        } else {
            Mode::Heredoc { label }
        };
        Some(LexKind::Id(TokenId::StartHeredoc))
    }

    /// Length of a closing heredoc label (with its indentation) starting at
    /// `at`, if one is there.
    fn heredoc_end_len(&self, at: usize, label: &str) -> Option<usize> {
        let bytes = self.cursor.bytes();
        let indent = bytes
            .get(at..)?
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        let label_start = at + indent;
        let label_end = label_start + label.len();
        if bytes.get(label_start..label_end)? != label.as_bytes() {
            return None;
        }
        if bytes.get(label_end).is_some_and(|&b| is_label_char(b)) {
            return None;
        }
        Some(label_end - at)
    }

    fn heredoc_end(&mut self, label: &str) -> Option<LexKind> {
        if !self.at_line_start() {
            return None;
        }
        let len = self.heredoc_end_len(self.cursor.pos(), label)?;
        self.cursor.advance_n(len);
        self.mode = Mode::Script;
        Some(LexKind::Id(TokenId::EndHeredoc))
    }

    /// One item inside a double-quoted string, backtick command or heredoc.
    fn string_part(&mut self) -> LexKind {
        let mode = self.mode;
        let c = self.cursor.current();
        let next = self.cursor.peek();
        match mode {
            Mode::DoubleQuotes if c == b'"' => {
                self.cursor.advance();
                self.mode = Mode::Script;
                return LexKind::Char('"');
            }
            Mode::Backquote if c == b'`' => {
                self.cursor.advance();
                self.mode = Mode::Script;
                return LexKind::Char('`');
            }
            Mode::Heredoc { label } => {
                if let Some(kind) = self.heredoc_end(label) {
                    return kind;
                }
            }
            _ => {}
        }

        if c == b'$' && is_label_start(next) {
            return self.string_variable();
        }
        if c == b'$' && next == b'{' {
            self.cursor.advance_n(2);
            self.stack.push(mode);
            self.mode = Mode::Varname;
            return LexKind::Id(TokenId::DollarOpenCurlyBraces);
        }
        if c == b'{' && next == b'$' {
            self.cursor.advance();
            self.stack.push(mode);
            self.mode = Mode::Script;
            return LexKind::Id(TokenId::CurlyOpen);
        }
        self.string_literal(mode)
    }

    /// `$name` inside a string, entering offset or property mode when
    /// `[` or `->name` follows.
    fn string_variable(&mut self) -> LexKind {
        self.variable();
        let c = self.cursor.current();
        if c == b'[' {
            self.stack.push(self.mode);
            self.mode = Mode::VarOffset;
        } else if c == b'-' && self.cursor.peek() == b'>' && is_label_start(self.cursor.peek_at(2)) {
            self.stack.push(self.mode);
            self.mode = Mode::Property;
        }
        LexKind::Id(TokenId::Variable)
    }

    /// Literal text up to the next interpolation or closing delimiter.
    fn string_literal(&mut self, mode: Mode<'a>) -> LexKind {
        let bytes = self.cursor.bytes();
        let start = self.cursor.pos();
        let heredoc_label = match mode {
            Mode::Heredoc { label } => Some(label),
            _ => None,
        };
        let mut i = start;
        while i < bytes.len() {
            let b = bytes[i];
            let next = bytes.get(i + 1).copied().unwrap_or(0);
            match b {
                // In heredocs a backslash never hides a line break from the
                // closing-label check.
                b'\\' if heredoc_label.is_some() && matches!(next, b'\n' | b'\r') => i += 1,
                b'\\' => i += 2,
                b'"' if mode == Mode::DoubleQuotes => break,
                b'`' if mode == Mode::Backquote => break,
                b'$' if is_label_start(next) || next == b'{' => break,
                b'{' if next == b'$' => break,
                b'\n' | b'\r' => {
                    i += 1;
                    if b == b'\r' && next == b'\n' {
                        continue;
                    }
                    if let Some(label) = heredoc_label {
                        if self.heredoc_end_len(i, label).is_some() {
                            break;
                        }
                    }
                }
                _ => i += 1,
            }
        }
        let end = i.min(bytes.len());
        if end > start {
            self.cursor.jump_to(end);
        } else {
            self.cursor.advance_char();
        }
        LexKind::Id(TokenId::EncapsedAndWhitespace)
    }

    fn nowdoc_part(&mut self, label: &'a str) -> LexKind {
        if let Some(kind) = self.heredoc_end(label) {
            return kind;
        }
        let bytes = self.cursor.bytes();
        let mut i = self.cursor.pos();
        loop {
            match memchr(b'\n', &bytes[i..]) {
                None => {
                    i = bytes.len();
                    break;
                }
                Some(offset) => {
                    i += offset + 1;
                    if self.heredoc_end_len(i, label).is_some() {
                        break;
                    }
                }
            }
        }
        self.cursor.jump_to(i);
        LexKind::Id(TokenId::EncapsedAndWhitespace)
    }

    /// Inside `"$var[...]"`.
    fn var_offset(&mut self) -> LexKind {
        let c = self.cursor.current();
        let next = self.cursor.peek();
        match c {
            b'[' => {
                self.cursor.advance();
                LexKind::Char('[')
            }
            b']' => {
                self.cursor.advance();
                self.pop_mode();
                LexKind::Char(']')
            }
            b'$' if is_label_start(next) => self.variable(),
            b'0'..=b'9' => {
                self.cursor.eat_while(is_label_char);
                LexKind::Id(TokenId::NumString)
            }
            b'-' if next.is_ascii_digit() => {
                self.cursor.advance();
                self.cursor.eat_while(is_label_char);
                LexKind::Id(TokenId::NumString)
            }
            c if is_label_start(c) => {
                self.cursor.eat_while(is_label_char);
                LexKind::Id(TokenId::String)
            }
            _ => {
                self.pop_mode();
                self.cursor.advance_char();
                LexKind::Id(TokenId::EncapsedAndWhitespace)
            }
        }
    }

    /// Inside `"$var->name"`.
    fn string_property(&mut self) -> LexKind {
        if self.cursor.starts_with(b"->") {
            self.cursor.advance_n(2);
            return LexKind::Id(TokenId::ObjectOperator);
        }
        self.cursor.eat_while(is_label_char);
        self.pop_mode();
        LexKind::Id(TokenId::String)
    }

    /// Right after `${` inside a string.
    fn varname(&mut self) -> LexKind {
        self.mode = Mode::Script;
        if is_label_start(self.cursor.current()) {
            let len = self
                .cursor
                .rest()
                .iter()
                .take_while(|&&b| is_label_char(b))
                .count();
            if matches!(self.cursor.peek_at(len), b'[' | b'}') {
                self.cursor.advance_n(len);
                return LexKind::Id(TokenId::StringVarname);
            }
        }
        self.script()
    }
}

impl<'a> Iterator for RawScanner<'a> {
    type Item = LexItem<'a>;

    fn next(&mut self) -> Option<LexItem<'a>> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        let kind = match self.mode {
            Mode::InlineHtml => self.inline_html(),
            Mode::Script => self.script(),
            Mode::DoubleQuotes | Mode::Backquote | Mode::Heredoc { .. } => self.string_part(),
            Mode::Nowdoc { label } => self.nowdoc_part(label),
            Mode::VarOffset => self.var_offset(),
            Mode::Property => self.string_property(),
            Mode::Varname => self.varname(),
            Mode::Halted => {
                self.cursor.skip_to_end();
                LexKind::Id(TokenId::InlineHtml)
            }
        };
        if self.halt_pending && kind == LexKind::Char(';') {
            self.halt_pending = false;
            self.mode = Mode::Halted;
        }
        // Never stall, whatever the input.
        if self.cursor.pos() == start {
            self.cursor.advance_char();
        }
        Some(self.emit(start, kind))
    }
}
