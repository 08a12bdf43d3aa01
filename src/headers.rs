use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::{Grammar, ParseError};
use crate::lexer::{Cursor, is_eol_byte, is_hws, is_value_byte};
use crate::span::Span;
use crate::types::{HeaderBlock, HeaderEntry};

/// One matched header line.
enum Line<'a> {
    /// `key:` followed by a value; opens a new entry.
    Keyed(Span<'a>, Span<'a>),
    /// Leading whitespace followed by a value; continues the last entry.
    Folded(Span<'a>),
}

/// Parse a block of header lines.
///
/// Each line is either `key: value` or a folded continuation starting with
/// whitespace. The block may end with a blank line, which sets
/// [`HeaderBlock::terminated`], or simply at the end of the input.
///
/// On success `input` is advanced past the consumed lines (and terminator).
///
/// # Errors
///
/// Returns [`ParseError::Incomplete`] if not even one header line matches,
/// including when the first line is a continuation.
pub fn parse_headers<'a>(input: &mut Span<'a>) -> Result<HeaderBlock<'a>, ParseError> {
    parse_headers_with_config(input, &ParserConfig::unbounded())
}

/// Like [`parse_headers`], enforcing `config.max_header_lines`.
///
/// # Errors
///
/// Additionally returns [`ParseError::TooManyHeaderLines`] when the block has
/// more lines than allowed.
pub fn parse_headers_with_config<'a>(
    input: &mut Span<'a>,
    config: &ParserConfig,
) -> Result<HeaderBlock<'a>, ParseError> {
    let mut cur = Cursor::new(*input);
    let mut headers: Vec<HeaderEntry<'a>> = Vec::new();
    let mut lines = 0usize;

    loop {
        let mark = cur.mark();
        let Some(line) = header_line(&mut cur) else {
            cur.reset(mark);
            break;
        };

        if let Some(limit) = config.max_header_lines {
            if lines == limit {
                debug!(limit, position = mark, "header line limit reached");
                return Err(ParseError::TooManyHeaderLines {
                    limit,
                    position: mark,
                });
            }
        }
        lines += 1;

        match line {
            Line::Keyed(key, value) => headers.push(HeaderEntry {
                key,
                values: vec![value],
            }),
            Line::Folded(value) => match headers.last_mut() {
                Some(entry) => entry.values.push(value),
                None => {
                    cur.reset(mark);
                    break;
                }
            },
        }
    }

    if headers.is_empty() {
        debug!(position = cur.furthest(), "no header line matched");
        return Err(ParseError::Incomplete {
            grammar: Grammar::Headers,
            position: cur.furthest(),
        });
    }

    let mark = cur.mark();
    cur.skip_hws();
    let terminated = cur.eol();
    if !terminated {
        cur.reset(mark);
    }

    trace!(
        start = input.start(),
        end = cur.pos(),
        entries = headers.len(),
        terminated,
        "parsed header block"
    );
    cur.commit(input);
    Ok(HeaderBlock {
        headers,
        terminated,
    })
}

/// Try a keyed line first, then a folded continuation.
fn header_line<'a>(cur: &mut Cursor<'a>) -> Option<Line<'a>> {
    let mark = cur.mark();
    if let Some((key, value)) = keyed_line(cur) {
        return Some(Line::Keyed(key, value));
    }
    cur.reset(mark);
    folded_line(cur).map(Line::Folded)
}

fn keyed_line<'a>(cur: &mut Cursor<'a>) -> Option<(Span<'a>, Span<'a>)> {
    let key = cur.take_while(|b| !is_hws(b) && b != b':' && !is_eol_byte(b));
    if !cur.eat(b':') {
        return None;
    }
    cur.skip_hws();
    let value = cur.take_while(is_value_byte);
    cur.eol_or_end().then_some((key, value))
}

fn folded_line<'a>(cur: &mut Cursor<'a>) -> Option<Span<'a>> {
    cur.take_while1(is_hws)?;
    // A whitespace-only line is left for the terminator.
    let value = cur.take_while1(is_value_byte)?;
    cur.eol_or_end().then_some(value)
}
