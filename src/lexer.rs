//! Cursor and the lexical rules shared by the line-oriented grammars.

use crate::span::Span;

// ---------------------------------------------------------------------------
// Byte classes
// ---------------------------------------------------------------------------

/// Horizontal whitespace: space or tab.
#[inline]
pub(crate) fn is_hws(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
pub(crate) fn is_eol_byte(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Bytes allowed in a word: anything but space, tab, CR and LF.
#[inline]
pub(crate) fn is_word_byte(b: u8) -> bool {
    !is_hws(b) && !is_eol_byte(b)
}

/// Bytes allowed in a line value: anything but CR and LF.
#[inline]
pub(crate) fn is_value_byte(b: u8) -> bool {
    !is_eol_byte(b)
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Read position inside a span.
///
/// Grammars work on a cursor and only write the final position back to the
/// caller's span once they succeed. `mark`/`reset` give speculative
/// alternatives a way to roll back; `furthest` survives roll-backs so a
/// failure can report how far matching got.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
    end: usize,
    furthest: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: Span<'a>) -> Self {
        Self {
            source: input.source(),
            pos: input.start(),
            end: input.end(),
            furthest: input.start(),
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn furthest(&self) -> usize {
        self.furthest
    }

    pub(crate) fn mark(&self) -> usize {
        self.pos
    }

    pub(crate) fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        if self.at_end() {
            None
        } else {
            Some(self.source[self.pos])
        }
    }

    fn bump(&mut self, n: usize) {
        self.pos += n;
        self.furthest = self.furthest.max(self.pos);
    }

    /// Consume `b` if it is the next byte.
    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.bump(1);
            true
        } else {
            false
        }
    }

    /// Consume `lit` if the input continues with it.
    pub(crate) fn eat_literal(&mut self, lit: &[u8]) -> bool {
        if self.source[self.pos..self.end].starts_with(lit) {
            self.bump(lit.len());
            true
        } else {
            false
        }
    }

    /// Consume the longest run of bytes matching `pred` (possibly empty).
    pub(crate) fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> Span<'a> {
        let start = self.pos;
        let len = self.source[self.pos..self.end]
            .iter()
            .take_while(|&&b| pred(b))
            .count();
        self.bump(len);
        Span::from_range(self.source, start, self.pos)
    }

    /// Like [`take_while`](Self::take_while) but requires at least one byte.
    pub(crate) fn take_while1(&mut self, pred: impl Fn(u8) -> bool) -> Option<Span<'a>> {
        let span = self.take_while(pred);
        if span.is_empty() { None } else { Some(span) }
    }

    /// Consume everything up to the end of the input.
    pub(crate) fn take_rest(&mut self) -> Span<'a> {
        self.take_while(|_| true)
    }

    /// Skip a (possibly empty) run of horizontal whitespace.
    pub(crate) fn skip_hws(&mut self) {
        self.take_while(is_hws);
    }

    /// A maximal non-empty run of word bytes.
    pub(crate) fn word(&mut self) -> Option<Span<'a>> {
        self.take_while1(is_word_byte)
    }

    /// Consume one line terminator: CRLF, LF or a lone CR.
    pub(crate) fn eol(&mut self) -> bool {
        self.eat_literal(b"\r\n") || self.eat(b'\n') || self.eat(b'\r')
    }

    /// A line terminator, or nothing at all at the end of input.
    pub(crate) fn eol_or_end(&mut self) -> bool {
        self.eol() || self.at_end()
    }

    /// Empty span at the current position.
    pub(crate) fn empty(&self) -> Span<'a> {
        Span::empty_at(self.source, self.pos)
    }

    /// Span from `start` to the current position.
    pub(crate) fn since(&self, start: usize) -> Span<'a> {
        Span::from_range(self.source, start, self.pos)
    }

    /// Move `input` up to the current position.
    pub(crate) fn commit(&self, input: &mut Span<'a>) {
        input.advance_to(self.pos);
    }
}

// ---------------------------------------------------------------------------
// Tests (unit)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_bytes_exclude_whitespace_and_eol() {
        for &b in b" \t\r\n" {
            assert!(!is_word_byte(b), "expected non-word byte 0x{b:02X}");
        }
        for &b in b"aZ09:/?#@\x00\xFF" {
            assert!(is_word_byte(b), "expected word byte 0x{b:02X}");
        }
    }

    #[test]
    fn take_while_stops_at_input_end() {
        let buf = b"abc def";
        let mut cur = Cursor::new(Span::from_range(buf, 0, 2));
        assert_eq!(cur.take_while(is_word_byte), "ab");
        assert!(cur.at_end());
        assert!(cur.word().is_none());
    }

    #[test]
    fn eol_variants() {
        for input in [&b"\r\nx"[..], b"\nx", b"\rx"] {
            let mut cur = Cursor::new(Span::new(input));
            assert!(cur.eol());
            assert_eq!(cur.peek(), Some(b'x'));
        }
        let mut cur = Cursor::new(Span::new(b"x"));
        assert!(!cur.eol());
        assert!(!cur.eol_or_end());
    }

    #[test]
    fn reset_keeps_furthest() {
        let buf = b"abc:";
        let mut cur = Cursor::new(Span::new(buf));
        let mark = cur.mark();
        cur.word();
        cur.reset(mark);
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.furthest(), 4);
    }

    #[test]
    fn commit_advances_input() {
        let buf = b"GET /";
        let mut input = Span::new(buf);
        let mut cur = Cursor::new(input);
        cur.word();
        cur.commit(&mut input);
        assert_eq!(input, " /");
    }
}
