use tracing::{debug, trace};

use crate::error::{Grammar, ParseError};
use crate::lexer::{Cursor, is_eol_byte, is_hws};
use crate::span::Span;
use crate::types::Uri;

#[inline]
fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

/// Split a URI reference into scheme, authority, path, query and fragment.
///
/// This is a punctuation-driven tokenizer, not a validator:
///
/// ```text
/// [scheme ":"] ["//" authority] path ["?" query] ["#" fragment] (EOL | end)
/// ```
///
/// Every component is optional and reported as an empty span when absent.
/// Nothing is decoded or normalised.
///
/// # Errors
///
/// Returns [`ParseError::Incomplete`] if the components are followed by
/// anything other than a line terminator or the end of input (a space, for
/// instance).
pub fn parse_uri<'a>(input: &mut Span<'a>) -> Result<Uri<'a>, ParseError> {
    let mut cur = Cursor::new(*input);

    let mark = cur.mark();
    let scheme = match cur.take_while1(is_scheme_byte) {
        Some(scheme) if cur.eat(b':') => scheme,
        _ => {
            cur.reset(mark);
            cur.empty()
        }
    };

    let authority = if cur.eat_literal(b"//") {
        cur.take_while(|b| !is_hws(b) && !matches!(b, b'/' | b'?' | b'#') && !is_eol_byte(b))
    } else {
        cur.empty()
    };

    let path = cur.take_while(|b| !is_hws(b) && !matches!(b, b'?' | b'#') && !is_eol_byte(b));

    let query = if cur.eat(b'?') {
        cur.take_while(|b| b != b' ' && b != b'#' && !is_eol_byte(b))
    } else {
        cur.empty()
    };

    let fragment = if cur.eat(b'#') {
        cur.take_while(|b| b != b' ' && !is_eol_byte(b))
    } else {
        cur.empty()
    };

    if !cur.eol_or_end() {
        debug!(position = cur.pos(), "trailing bytes after URI");
        return Err(ParseError::Incomplete {
            grammar: Grammar::Uri,
            position: cur.pos(),
        });
    }

    trace!(start = input.start(), end = cur.pos(), "parsed URI");
    cur.commit(input);
    Ok(Uri {
        scheme,
        authority,
        path,
        query,
        fragment,
    })
}
