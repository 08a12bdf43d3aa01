use std::fmt;

/// Names the grammar that rejected its input.
///
/// The authority and path grammars accept every input and so never appear
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    Headers,
    RequestLine,
    ResponseLine,
    Uri,
}

impl Grammar {
    /// Return the grammar name as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Headers => "headers",
            Self::RequestLine => "request line",
            Self::ResponseLine => "response line",
            Self::Uri => "URI",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while parsing.
///
/// Every variant carries the absolute byte offset (into the buffer the input
/// span points at) where parsing gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A grammar could not match its mandatory prefix.
    Incomplete {
        grammar: Grammar,
        /// Furthest position the grammar reached before failing.
        position: usize,
    },
    /// A sub-parse succeeded but stopped short of the end of its input.
    NotFullyParsed {
        /// What was being parsed (`"URI"`, `"authority"`, ...).
        what: &'static str,
        /// Where consumption stopped.
        position: usize,
    },
    /// The header block has more lines than the configured maximum.
    TooManyHeaderLines { limit: usize, position: usize },
    /// The message head did not finish within the configured maximum length.
    HeadTooLarge {
        limit: usize,
        /// Where the allowed window ended.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset at which the failure was detected.
    pub fn position(&self) -> usize {
        match self {
            Self::Incomplete { position, .. }
            | Self::NotFullyParsed { position, .. }
            | Self::TooManyHeaderLines { position, .. }
            | Self::HeadTooLarge { position, .. } => *position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete { grammar, position } => {
                write!(f, "Incomplete {grammar}. (at byte {position})")
            }
            Self::NotFullyParsed { what, position } => {
                write!(f, "{what} not fully parsed. (at byte {position})")
            }
            Self::TooManyHeaderLines { limit, position } => write!(
                f,
                "header block exceeds {limit} lines (at byte {position})"
            ),
            Self::HeadTooLarge { limit, position } => write!(
                f,
                "message head exceeds {limit} bytes (at byte {position})"
            ),
        }
    }
}

impl std::error::Error for ParseError {}
