use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// A non-owning view of `source[start..end]`.
///
/// Spans never copy or allocate; they borrow the buffer that owns the bytes,
/// so the borrow checker guarantees a span cannot outlive it. Offsets are
/// absolute positions into `source`, which keeps every span produced by the
/// grammars directly comparable with the original input.
///
/// An empty span (`start == end`) is how the grammars report an optional
/// field that did not match.
#[derive(Clone, Copy)]
pub struct Span<'a> {
    source: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> Span<'a> {
    /// Span covering the whole of `source`.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
        }
    }

    /// Span covering `source[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > source.len()`. Both are programming
    /// errors, not parse failures.
    pub fn from_range(source: &'a [u8], start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {start} is past its end {end}");
        assert!(
            end <= source.len(),
            "span end {end} is past the buffer length {}",
            source.len()
        );
        Self { source, start, end }
    }

    /// Empty span positioned at `pos` in `source`.
    pub fn empty_at(source: &'a [u8], pos: usize) -> Self {
        Self::from_range(source, pos, pos)
    }

    /// The buffer this span points into.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The referenced bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.source[self.start..self.end]
    }

    /// Iterate over the referenced bytes.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'a, u8>> {
        self.as_bytes().iter().copied()
    }

    /// Drop everything before `pos`, keeping the same end.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside `[start, end]`.
    pub fn advance_to(&mut self, pos: usize) {
        assert!(
            (self.start..=self.end).contains(&pos),
            "cannot advance span {}..{} to {pos}",
            self.start,
            self.end
        );
        self.start = pos;
    }

    /// Span from the start of `self` to the end of `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` lives in a different buffer or ends before `self`
    /// starts.
    pub fn join(&self, other: &Span<'a>) -> Span<'a> {
        assert!(
            std::ptr::eq(self.source, other.source),
            "cannot join spans over different buffers"
        );
        Span::from_range(self.source, self.start, other.end)
    }

    /// View the bytes as UTF-8, if they are.
    pub fn to_str(&self) -> Result<&'a str, std::str::Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    fn identity(&self) -> (usize, usize, usize, usize) {
        (
            self.source.as_ptr() as usize,
            self.source.len(),
            self.start,
            self.end,
        )
    }
}

impl PartialEq for Span<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Span<'_> {}

impl PartialOrd for Span<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl PartialEq<[u8]> for Span<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for Span<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Span<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl PartialEq<str> for Span<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Span<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} {:?}", self.start, self.end, self.to_string_lossy())
    }
}

impl fmt::Display for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for Span<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'a> IntoIterator for Span<'a> {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests (unit)
// ---------------------------------------------------------------------------
