use tracing::debug;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::headers::parse_headers_with_config;
use crate::line::{parse_request_line, parse_response_line};
use crate::span::Span;
use crate::types::{HeaderBlock, Request, Response};
use crate::uri::parse_uri;

/// Parse a request line, its URI and the header block after it.
///
/// `input` is advanced past the header block; whatever follows (a body, the
/// next pipelined message) is left for the caller.
///
/// # Errors
///
/// The first failing step aborts the parse: a bad request line, a URI that
/// the URI grammar does not fully consume, or a missing header block.
pub fn parse_request<'a>(input: &mut Span<'a>) -> Result<Request<'a>, ParseError> {
    parse_request_with_config(input, &ParserConfig::unbounded())
}

/// Like [`parse_request`], enforcing the limits in `config`.
///
/// `config.max_head_len` bounds the request line plus header block; the
/// bytes after the head are never looked at.
///
/// # Errors
///
/// Additionally returns [`ParseError::HeadTooLarge`] when the head does not
/// finish within `max_head_len` bytes.
pub fn parse_request_with_config<'a>(
    input: &mut Span<'a>,
    config: &ParserConfig,
) -> Result<Request<'a>, ParseError> {
    let request = within_head_limit(input, config, |window| request_head(window, config))?;
    debug!(
        start = request.consumed.start(),
        end = request.consumed.end(),
        headers = request.headers.headers.len(),
        terminated = request.headers.terminated,
        "parsed request"
    );
    Ok(request)
}

fn request_head<'a>(input: &mut Span<'a>, config: &ParserConfig) -> Result<Request<'a>, ParseError> {
    let begin = input.start();

    let request_line = parse_request_line(input)?;
    let raw_request_line = strip_terminator(Span::from_range(
        input.source(),
        begin,
        input.start(),
    ));

    let mut uri_input = request_line.uri;
    let uri = parse_uri(&mut uri_input)?;
    if !uri_input.is_empty() {
        debug!(position = uri_input.start(), "URI not fully parsed");
        return Err(ParseError::NotFullyParsed {
            what: "URI",
            position: uri_input.start(),
        });
    }

    let headers = parse_headers_with_config(input, config)?;

    Ok(Request {
        raw_request_line,
        request_line,
        uri,
        headers,
        consumed: Span::from_range(input.source(), begin, input.start()),
    })
}

/// Parse a response line and the header block after it.
///
/// `input` is advanced past the header block.
///
/// # Errors
///
/// Fails if the response line or the header block cannot be parsed.
pub fn parse_response<'a>(input: &mut Span<'a>) -> Result<Response<'a>, ParseError> {
    parse_response_with_config(input, &ParserConfig::unbounded())
}

/// Like [`parse_response`], enforcing the limits in `config`.
///
/// # Errors
///
/// Additionally returns [`ParseError::HeadTooLarge`] when the head does not
/// finish within `max_head_len` bytes.
pub fn parse_response_with_config<'a>(
    input: &mut Span<'a>,
    config: &ParserConfig,
) -> Result<Response<'a>, ParseError> {
    let response = within_head_limit(input, config, |window| response_head(window, config))?;
    debug!(
        start = response.consumed.start(),
        end = response.consumed.end(),
        headers = response.headers.headers.len(),
        terminated = response.headers.terminated,
        "parsed response"
    );
    Ok(response)
}

fn response_head<'a>(
    input: &mut Span<'a>,
    config: &ParserConfig,
) -> Result<Response<'a>, ParseError> {
    let begin = input.start();

    let response_line = parse_response_line(input)?;
    let raw_response_line = strip_terminator(Span::from_range(
        input.source(),
        begin,
        input.start(),
    ));

    let headers = parse_headers_with_config(input, config)?;

    Ok(Response {
        raw_response_line,
        response_line,
        headers,
        consumed: Span::from_range(input.source(), begin, input.start()),
    })
}

/// A parsed head that can tell whether it ended cleanly.
trait Head<'a> {
    fn headers(&self) -> &HeaderBlock<'a>;
    fn consumed(&self) -> Span<'a>;
}

impl<'a> Head<'a> for Request<'a> {
    fn headers(&self) -> &HeaderBlock<'a> {
        &self.headers
    }

    fn consumed(&self) -> Span<'a> {
        self.consumed
    }
}

impl<'a> Head<'a> for Response<'a> {
    fn headers(&self) -> &HeaderBlock<'a> {
        &self.headers
    }

    fn consumed(&self) -> Span<'a> {
        self.consumed
    }
}

/// Run `parse` over at most `max_head_len` bytes of `input`.
///
/// When the window is shorter than the input, the head must end with a
/// blank line inside it. A head that runs into the window end, or a failure
/// at the window end, means the real head is longer than the limit.
fn within_head_limit<'a, T: Head<'a>>(
    input: &mut Span<'a>,
    config: &ParserConfig,
    parse: impl FnOnce(&mut Span<'a>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let limit = match config.max_head_len {
        Some(limit) if input.len() > limit => limit,
        _ => {
            return parse(input);
        }
    };

    let mut window = Span::from_range(input.source(), input.start(), input.start() + limit);
    let too_large = ParseError::HeadTooLarge {
        limit,
        position: window.end(),
    };

    match parse(&mut window) {
        Ok(head) => {
            // A CR as the last window byte may be half of a CRLF.
            let split_terminator =
                window.is_empty() && !head.consumed().as_bytes().ends_with(b"\n");
            if !head.headers().terminated || split_terminator {
                debug!(limit, "message head does not fit the limit");
                return Err(too_large);
            }
            input.advance_to(window.start());
            Ok(head)
        }
        Err(e) if e.position() >= window.end() => {
            debug!(limit, position = e.position(), "message head cut by the limit");
            Err(too_large)
        }
        Err(e) => Err(e),
    }
}

/// Drop a trailing CRLF, LF or CR.
fn strip_terminator(line: Span<'_>) -> Span<'_> {
    let bytes = line.as_bytes();
    let mut end = line.end();
    if bytes.ends_with(b"\n") {
        end -= 1;
    }
    if bytes[..end - line.start()].ends_with(b"\r") {
        end -= 1;
    }
    Span::from_range(line.source(), line.start(), end)
}
