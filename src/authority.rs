use tracing::trace;

use crate::error::ParseError;
use crate::lexer::{Cursor, is_eol_byte, is_hws};
use crate::span::Span;
use crate::types::Authority;

/// Bytes allowed in any authority field.
#[inline]
fn is_field_byte(b: u8) -> bool {
    !matches!(b, b'@' | b':') && !is_hws(b) && !is_eol_byte(b)
}

/// Split an authority into username, password, host and port.
///
/// `user:pass@host:port` and `host:port` look the same until an `@` shows
/// up, so the userinfo form is tried first and abandoned without a trace if
/// no `@` follows. Every field may be empty. `input` is advanced past the
/// bytes that matched; anything after the port (a second `@`, whitespace) is
/// left in place for the caller to inspect.
///
/// # Errors
///
/// None in practice: an input that matches nothing yields an empty host.
/// The `Result` keeps the signature in line with the other grammars.
pub fn parse_authority<'a>(input: &mut Span<'a>) -> Result<Authority<'a>, ParseError> {
    let mut cur = Cursor::new(*input);
    let source = input.source();
    let start = cur.mark();
    let mut result = Authority::empty_at(source, start);

    // [username] [":" password] "@" host
    result.username = cur.take_while(is_field_byte);
    result.password = if cur.eat(b':') {
        cur.take_while(is_field_byte)
    } else {
        cur.empty()
    };
    if cur.eat(b'@') {
        result.host = cur.take_while(is_field_byte);
    } else {
        // host only: drop whatever the userinfo attempt assigned.
        cur.reset(start);
        result = Authority::empty_at(source, start);
        result.host = cur.take_while(is_field_byte);
    }

    result.port = if cur.eat(b':') {
        cur.take_while(is_field_byte)
    } else {
        cur.empty()
    };

    trace!(start, end = cur.pos(), "parsed authority");
    cur.commit(input);
    Ok(result)
}
