//! Properties every grammar must hold on arbitrary, possibly hostile input.

use parser_suite::{
    Span, parse_authority, parse_headers, parse_path, parse_request, parse_request_line,
    parse_response, parse_response_line, parse_uri,
};
use proptest::prelude::*;

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..256)
}

/// Bytes biased towards the grammars' punctuation.
fn protocol_bytes() -> impl Strategy<Value = Vec<u8>> {
    let interesting = prop_oneof![
        Just(b' '),
        Just(b'\t'),
        Just(b'\r'),
        Just(b'\n'),
        Just(b':'),
        Just(b'@'),
        Just(b'/'),
        Just(b'?'),
        Just(b'#'),
        Just(b'.'),
        b'a'..=b'z',
    ];
    proptest::collection::vec(interesting, 0..128)
}

fn within(span: &Span<'_>, start: usize, end: usize) -> bool {
    span.start() >= start && span.end() <= end
}

proptest! {
    #[test]
    fn headers_spans_stay_in_consumed_region(data in protocol_bytes()) {
        let mut input = Span::new(&data);
        if let Ok(block) = parse_headers(&mut input) {
            prop_assert!(!block.headers.is_empty());
            for entry in &block.headers {
                prop_assert!(!entry.values.is_empty());
                prop_assert!(within(&entry.key, 0, input.start()));
                for value in &entry.values {
                    prop_assert!(within(value, 0, input.start()));
                }
            }
        } else {
            prop_assert_eq!(input.start(), 0);
        }
    }

    #[test]
    fn line_grammars_never_panic(data in bytes()) {
        let mut input = Span::new(&data);
        if let Ok(line) = parse_request_line(&mut input) {
            prop_assert!(!line.method.is_empty());
            prop_assert!(!line.uri.is_empty());
            prop_assert!(within(&line.version, 0, input.start()));
        }
        let mut input = Span::new(&data);
        if let Ok(line) = parse_response_line(&mut input) {
            prop_assert!(!line.status.is_empty());
            prop_assert!(within(&line.message, 0, input.start()));
        }
    }

    #[test]
    fn uri_components_are_ordered(data in protocol_bytes()) {
        let mut input = Span::new(&data);
        if let Ok(uri) = parse_uri(&mut input) {
            let parts = [uri.scheme, uri.authority, uri.path, uri.query, uri.fragment];
            for pair in parts.windows(2) {
                prop_assert!(pair[0].end() <= pair[1].start());
            }
            prop_assert!(uri.fragment.end() <= input.start());
        }
    }

    #[test]
    fn authority_always_succeeds(data in protocol_bytes()) {
        let mut input = Span::new(&data);
        let authority = parse_authority(&mut input);
        prop_assert!(authority.is_ok());
        let authority = authority.unwrap();
        if !authority.password.is_empty() {
            prop_assert!(data.contains(&b'@'));
        }
        prop_assert!(within(&authority.port, 0, input.start()));
    }

    #[test]
    fn path_consumes_everything(
        data in bytes(),
        dir_sep in any::<u8>(),
        ext_sep in any::<u8>(),
    ) {
        let mut input = Span::new(&data);
        let parts = parse_path(&mut input, dir_sep, ext_sep).unwrap();
        prop_assert!(input.is_empty());
        if parts.extension.is_empty() {
            prop_assert_eq!(parts.file, parts.base);
        } else {
            prop_assert_eq!(parts.file.start(), parts.base.start());
            prop_assert_eq!(parts.file.end(), parts.extension.end());
        }
        prop_assert_eq!(parts.directory.start(), 0);
    }

    #[test]
    fn composites_never_panic(data in protocol_bytes()) {
        let mut input = Span::new(&data);
        if let Ok(req) = parse_request(&mut input) {
            prop_assert_eq!(req.consumed().end(), input.start());
            prop_assert!(data.starts_with(req.raw_request_line.as_bytes()));
        }
        let mut input = Span::new(&data);
        if let Ok(resp) = parse_response(&mut input) {
            prop_assert_eq!(resp.consumed().end(), input.start());
        }
    }

    #[test]
    fn generated_requests_round_trip(
        method in "[A-Z]{1,7}",
        path in "/[a-z0-9._-]{0,8}(/[a-z0-9._-]{1,8}){0,3}",
        headers in proptest::collection::vec(("[A-Za-z-]{1,10}", "[!-~][ -~]{0,20}"), 1..6),
        body in "[a-z]{0,10}",
    ) {
        let mut raw = format!("{method} {path} HTTP/1.1\r\n");
        for (key, value) in &headers {
            raw.push_str(&format!("{key}: {value}\r\n"));
        }
        raw.push_str("\r\n");
        let head_len = raw.len();
        raw.push_str(&body);

        let mut input = Span::new(raw.as_bytes());
        let req = parse_request(&mut input).unwrap();

        prop_assert_eq!(req.request_line.method, method.as_str());
        prop_assert_eq!(req.uri.path, path.as_str());
        prop_assert_eq!(req.headers.headers.len(), headers.len());
        for (entry, (key, value)) in req.headers.headers.iter().zip(&headers) {
            prop_assert_eq!(entry.key, key.as_str());
            prop_assert_eq!(entry.values[0], value.as_str());
        }
        prop_assert!(req.headers.terminated);
        prop_assert_eq!(req.consumed().len(), head_len);
        prop_assert_eq!(input, body.as_str());

        // Same input, same spans.
        let mut again = Span::new(raw.as_bytes());
        prop_assert_eq!(parse_request(&mut again).unwrap(), req);
    }
}
