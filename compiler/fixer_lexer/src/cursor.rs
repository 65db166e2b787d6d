//! Byte cursor over PHP source.
//!
//! Every position the scanner stops at sits on an ASCII delimiter or at the
//! end of input, so slices taken between two cursor positions are always
//! valid UTF-8. Bytes `0x80..=0xFF` only ever appear inside identifiers,
//! strings, comments and inline HTML, which the scanner consumes whole.

use memchr::memmem;

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The whole source as bytes.
    #[inline]
    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// The unconsumed part of the source.
    #[inline]
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.pos..]
    }

    /// Byte at the cursor, or `0` at end of input.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.peek_at(0)
    }

    /// Byte after the cursor, or `0` past end of input.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.peek_at(1)
    }

    #[inline]
    pub(crate) fn peek_at(&self, offset: usize) -> u8 {
        self.source
            .as_bytes()
            .get(self.pos + offset)
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(crate) fn starts_with_ignore_case(&self, prefix: &[u8]) -> bool {
        self.rest()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Advance past one whole UTF-8 character.
    pub(crate) fn advance_char(&mut self) {
        let width = self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.advance_n(width);
    }

    /// Move to an absolute position (never backwards past the start).
    #[inline]
    pub(crate) fn jump_to(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    pub(crate) fn skip_to_end(&mut self) {
        self.pos = self.source.len();
    }

    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Absolute position of the next occurrence of `needle` at or after
    /// `from`.
    pub(crate) fn find_from(&self, from: usize, needle: &[u8]) -> Option<usize> {
        let haystack = self.source.as_bytes().get(from..)?;
        memmem::find(haystack, needle).map(|offset| from + offset)
    }

    /// Source text between two absolute positions.
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Source text from `start` up to the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.pos)
    }
}
