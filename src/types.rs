use serde::{Serialize, Serializer};
use std::fmt;

use crate::authority::parse_authority;
use crate::error::ParseError;
use crate::path::parse_path;
use crate::span::Span;

// Every result renders one `field=value` line per field, in declaration
// order. The composite results append a blank line after each embedded
// result.

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// A header key together with every value recorded under it.
///
/// Folded continuation lines append further values to the entry opened by
/// the most recent keyed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry<'a> {
    pub key: Span<'a>,
    pub values: Vec<Span<'a>>,
}

impl<'a> HeaderEntry<'a> {
    pub fn value_spans(&self) -> &[Span<'a>] {
        &self.values
    }
}

/// An ordered header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock<'a> {
    pub headers: Vec<HeaderEntry<'a>>,
    /// `true` only when an explicit blank line ended the block. `false`
    /// means the input ran out, which may be a truncated capture.
    pub terminated: bool,
}

impl<'a> HeaderBlock<'a> {
    /// Look up the first entry whose key matches `key` (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&HeaderEntry<'a>> {
        self.headers
            .iter()
            .find(|h| h.key.as_bytes().eq_ignore_ascii_case(key.as_bytes()))
    }

    /// Return the values of every entry whose key matches `key`
    /// (case-insensitive), in input order.
    pub fn values(&self, key: &str) -> Vec<Span<'a>> {
        self.headers
            .iter()
            .filter(|h| h.key.as_bytes().eq_ignore_ascii_case(key.as_bytes()))
            .flat_map(|h| h.values.iter().copied())
            .collect()
    }
}

impl fmt::Display for HeaderBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for header in &self.headers {
            write!(f, "{}=", header.key)?;
            for (i, value) in header.values.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "terminated={}", self.terminated)
    }
}

// ---------------------------------------------------------------------------
// Request / response lines
// ---------------------------------------------------------------------------

/// The three fields of a request line. `version` is empty for
/// HTTP/0.9-style lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestLine<'a> {
    pub method: Span<'a>,
    pub uri: Span<'a>,
    pub version: Span<'a>,
}

impl fmt::Display for RequestLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "method={}", self.method)?;
        writeln!(f, "uri={}", self.uri)?;
        writeln!(f, "version={}", self.version)
    }
}

/// The three fields of a response line. `message` may be empty and may
/// contain spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseLine<'a> {
    pub version: Span<'a>,
    pub status: Span<'a>,
    pub message: Span<'a>,
}

impl fmt::Display for ResponseLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version={}", self.version)?;
        writeln!(f, "status={}", self.status)?;
        writeln!(f, "message={}", self.message)
    }
}

// ---------------------------------------------------------------------------
// URI, authority, path
// ---------------------------------------------------------------------------

/// Components of a URI reference. Empty means "not present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uri<'a> {
    pub scheme: Span<'a>,
    pub authority: Span<'a>,
    pub path: Span<'a>,
    pub query: Span<'a>,
    pub fragment: Span<'a>,
}

impl<'a> Uri<'a> {
    /// Split the authority component into its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotFullyParsed`] if the authority grammar leaves
    /// bytes of the component unconsumed (e.g. a second `@`).
    pub fn parse_authority(&self) -> Result<Authority<'a>, ParseError> {
        let mut input = self.authority;
        let authority = parse_authority(&mut input)?;
        if !input.is_empty() {
            return Err(ParseError::NotFullyParsed {
                what: "authority",
                position: input.start(),
            });
        }
        Ok(authority)
    }

    /// Split the path component using the given separators.
    ///
    /// # Errors
    ///
    /// None in practice: the path grammar accepts every input, including an
    /// empty path. The `Result` mirrors [`parse_path`].
    pub fn parse_path(
        &self,
        directory_separator: u8,
        extension_separator: u8,
    ) -> Result<PathParts<'a>, ParseError> {
        let mut input = self.path;
        parse_path(&mut input, directory_separator, extension_separator)
    }
}

impl fmt::Display for Uri<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scheme={}", self.scheme)?;
        writeln!(f, "authority={}", self.authority)?;
        writeln!(f, "path={}", self.path)?;
        writeln!(f, "query={}", self.query)?;
        writeln!(f, "fragment={}", self.fragment)
    }
}

/// `[username[:password]@]host[:port]`. `password` is only ever non-empty
/// when the userinfo form matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Authority<'a> {
    pub username: Span<'a>,
    pub password: Span<'a>,
    pub host: Span<'a>,
    pub port: Span<'a>,
}

impl<'a> Authority<'a> {
    /// An authority with every field empty at `pos`.
    pub(crate) fn empty_at(source: &'a [u8], pos: usize) -> Self {
        let empty = Span::empty_at(source, pos);
        Self {
            username: empty,
            password: empty,
            host: empty,
            port: empty,
        }
    }
}

impl fmt::Display for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "username={}", self.username)?;
        writeln!(f, "password={}", self.password)?;
        writeln!(f, "host={}", self.host)?;
        writeln!(f, "port={}", self.port)
    }
}

/// A path split into directory, file, base and extension.
///
/// `file` is `base` when `extension` is empty, and otherwise runs from the
/// start of `base` to the end of `extension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathParts<'a> {
    pub directory: Span<'a>,
    pub file: Span<'a>,
    pub base: Span<'a>,
    pub extension: Span<'a>,
    #[serde(serialize_with = "serialize_separator")]
    pub directory_separator: u8,
    #[serde(serialize_with = "serialize_separator")]
    pub extension_separator: u8,
}

fn serialize_separator<S: Serializer>(sep: &u8, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_char(char::from(*sep))
}

impl fmt::Display for PathParts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "directory={}", self.directory)?;
        writeln!(f, "file={}", self.file)?;
        writeln!(f, "base={}", self.base)?;
        writeln!(f, "extension={}", self.extension)
    }
}

// ---------------------------------------------------------------------------
// Composite messages
// ---------------------------------------------------------------------------

/// A request line, its URI and the header block that follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request<'a> {
    /// The first line without its terminator.
    pub raw_request_line: Span<'a>,
    pub request_line: RequestLine<'a>,
    pub uri: Uri<'a>,
    pub headers: HeaderBlock<'a>,
    /// Everything the assembler consumed, terminators included.
    #[serde(skip)]
    pub(crate) consumed: Span<'a>,
}

impl<'a> Request<'a> {
    pub fn consumed(&self) -> Span<'a> {
        self.consumed
    }
}

impl fmt::Display for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "raw_request_line={}", self.raw_request_line)?;
        writeln!(f, "{}", self.request_line)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.headers)
    }
}

/// A response line and the header block that follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response<'a> {
    /// The first line without its terminator.
    pub raw_response_line: Span<'a>,
    pub response_line: ResponseLine<'a>,
    pub headers: HeaderBlock<'a>,
    /// Everything the assembler consumed, terminators included.
    #[serde(skip)]
    pub(crate) consumed: Span<'a>,
}

impl<'a> Response<'a> {
    pub fn consumed(&self) -> Span<'a> {
        self.consumed
    }
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "raw_response_line={}", self.raw_response_line)?;
        writeln!(f, "{}", self.response_line)?;
        writeln!(f, "{}", self.headers)
    }
}
