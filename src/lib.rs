//! # parser-suite
//!
//! Zero-copy, **permissive** grammars for the text of HTTP-like traffic:
//! header blocks, request and response lines, URIs, authorities and
//! filesystem-style paths.
//!
//! The grammars are meant for inspection rather than enforcement. They
//! accept truncated and non-conformant input wherever a partial structure
//! can still be recovered, and every field they produce is a [`Span`] into
//! the caller's buffer; nothing is copied.
//!
//! Each entry point takes a `&mut Span` over the remaining input, advances
//! it past what it consumed and returns the parsed structure, so grammars
//! chain naturally.
//!
//! ## Quick start
//!
//! ```rust
//! use parser_suite::{Span, parse_request};
//!
//! let raw = b"GET http://example.com/index.html?q=1 HTTP/1.1\r\nHost: example.com\r\n\r\nbody";
//! let mut input = Span::new(raw);
//! let request = parse_request(&mut input).expect("valid request");
//!
//! assert_eq!(request.request_line.method, "GET");
//! assert_eq!(request.uri.authority, "example.com");
//! assert_eq!(request.uri.query, "q=1");
//! assert!(request.headers.terminated);
//! assert_eq!(input, "body");
//! ```
//!
//! ## Splitting components further
//!
//! ```rust
//! use parser_suite::{Span, parse_authority, parse_path};
//!
//! let mut input = Span::new(b"user:pass@host:80");
//! let authority = parse_authority(&mut input).unwrap();
//! assert_eq!(authority.password, "pass");
//! assert_eq!(authority.port, "80");
//!
//! let mut input = Span::new(b"/a/b/archive.tar.gz");
//! let path = parse_path(&mut input, b'/', b'.').unwrap();
//! assert_eq!(path.base, "archive.tar");
//! assert_eq!(path.extension, "gz");
//! ```

mod authority;
mod config;
mod error;
mod headers;
mod lexer;
mod line;
mod message;
mod output;
mod path;
mod span;
mod types;
mod uri;

// Re-export public API.
pub use authority::parse_authority;
pub use config::ParserConfig;
pub use error::{Grammar, ParseError};
pub use headers::{parse_headers, parse_headers_with_config};
pub use line::{parse_request_line, parse_response_line};
pub use message::{
    parse_request, parse_request_with_config, parse_response, parse_response_with_config,
};
pub use output::{format_json, format_text};
pub use path::parse_path;
pub use span::Span;
pub use types::{
    Authority, HeaderBlock, HeaderEntry, PathParts, Request, RequestLine, Response, ResponseLine,
    Uri,
};
pub use uri::parse_uri;
