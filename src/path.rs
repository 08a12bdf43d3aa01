use tracing::trace;

use crate::error::ParseError;
use crate::lexer::Cursor;
use crate::span::Span;
use crate::types::PathParts;

/// Split a path into directory, base and extension.
///
/// Both separators are supplied by the caller, so the same grammar handles
/// POSIX (`/`, `.`), Windows (`\`, `.`) or any other hierarchical name with
/// single-byte delimiters.
///
/// - `directory` runs up to and including the last directory separator.
/// - `base` is the file name up to its last extension separator.
/// - `extension` is everything after that separator.
///
/// `archive.tar.gz` therefore has base `archive.tar` and extension `gz`.
/// The whole input is consumed.
///
/// # Errors
///
/// None in practice; every input splits somehow. The `Result` keeps the
/// signature in line with the other grammars.
pub fn parse_path<'a>(
    input: &mut Span<'a>,
    directory_separator: u8,
    extension_separator: u8,
) -> Result<PathParts<'a>, ParseError> {
    let mut cur = Cursor::new(*input);

    // directory: ([sep] segment &sep)* [sep]
    let dir_start = cur.mark();
    loop {
        let mark = cur.mark();
        cur.eat(directory_separator);
        cur.take_while(|b| b != directory_separator);
        if cur.peek() != Some(directory_separator) {
            cur.reset(mark);
            break;
        }
    }
    cur.eat(directory_separator);
    let directory = cur.since(dir_start);

    // base: segment (sep segment &sep)*
    let base_start = cur.mark();
    cur.take_while(|b| b != extension_separator);
    loop {
        let mark = cur.mark();
        if !cur.eat(extension_separator) {
            break;
        }
        cur.take_while(|b| b != extension_separator);
        if cur.peek() != Some(extension_separator) {
            cur.reset(mark);
            break;
        }
    }
    let base = cur.since(base_start);

    let extension = if cur.eat(extension_separator) {
        cur.take_rest()
    } else {
        cur.empty()
    };

    let file = if extension.is_empty() {
        base
    } else {
        base.join(&extension)
    };

    trace!(start = input.start(), end = cur.pos(), "parsed path");
    cur.commit(input);
    Ok(PathParts {
        directory,
        file,
        base,
        extension,
        directory_separator,
        extension_separator,
    })
}
