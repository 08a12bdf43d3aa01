use tracing::{debug, trace};

use crate::error::{Grammar, ParseError};
use crate::lexer::{Cursor, is_value_byte, is_word_byte};
use crate::span::Span;
use crate::types::{RequestLine, ResponseLine};

fn incomplete(grammar: Grammar, cur: &Cursor<'_>) -> ParseError {
    debug!(%grammar, position = cur.furthest(), "line grammar failed");
    ParseError::Incomplete {
        grammar,
        position: cur.furthest(),
    }
}

/// Parse `method SP uri [SP version] EOL`.
///
/// Leading and separating whitespace may be any run of spaces and tabs. A
/// missing version yields an empty `version` span. The line may end with a
/// terminator or at the end of input; `input` is advanced past it.
///
/// # Errors
///
/// Returns [`ParseError::Incomplete`] if the method or URI is missing, or if
/// anything other than a line terminator follows the last word.
pub fn parse_request_line<'a>(input: &mut Span<'a>) -> Result<RequestLine<'a>, ParseError> {
    let mut cur = Cursor::new(*input);
    let grammar = Grammar::RequestLine;

    cur.skip_hws();
    let method = cur.word().ok_or_else(|| incomplete(grammar, &cur))?;
    cur.skip_hws();
    let uri = cur.word().ok_or_else(|| incomplete(grammar, &cur))?;
    cur.skip_hws();
    let version = cur.take_while(is_word_byte);
    if !cur.eol_or_end() {
        return Err(incomplete(grammar, &cur));
    }

    trace!(start = input.start(), end = cur.pos(), "parsed request line");
    cur.commit(input);
    Ok(RequestLine {
        method,
        uri,
        version,
    })
}

/// Parse `version SP status [SP message] EOL`.
///
/// The message runs verbatim to the end of the line and may be empty or
/// contain spaces. `input` is advanced past the line terminator.
///
/// # Errors
///
/// Returns [`ParseError::Incomplete`] if the version or status is missing.
pub fn parse_response_line<'a>(input: &mut Span<'a>) -> Result<ResponseLine<'a>, ParseError> {
    let mut cur = Cursor::new(*input);
    let grammar = Grammar::ResponseLine;

    cur.skip_hws();
    let version = cur.word().ok_or_else(|| incomplete(grammar, &cur))?;
    cur.skip_hws();
    let status = cur.word().ok_or_else(|| incomplete(grammar, &cur))?;
    cur.skip_hws();
    let message = cur.take_while(is_value_byte);
    if !cur.eol_or_end() {
        return Err(incomplete(grammar, &cur));
    }

    trace!(start = input.start(), end = cur.pos(), "parsed response line");
    cur.commit(input);
    Ok(ResponseLine {
        version,
        status,
        message,
    })
}
