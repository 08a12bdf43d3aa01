use serde::Serialize;
use std::fmt::Display;

/// Serialize any parse result to a JSON string. Spans render as strings.
///
/// When `pretty` is `true` the output is indented for readability.
pub fn format_json<T: Serialize + ?Sized>(result: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    } else {
        serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Render a parse result in its canonical `field=value` text form.
pub fn format_text<T: Display + ?Sized>(result: &T) -> String {
    result.to_string()
}
