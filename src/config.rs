/// Configurable limits for the bounded entry points.
///
/// The grammars themselves only stop at the end of their input; these limits
/// cap the work done on untrusted captures. `None` disables a limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum length of a message head, i.e. the first line plus the
    /// header block and its terminator (default: 64 KiB). The body and any
    /// pipelined messages after the head do not count.
    pub max_head_len: Option<usize>,
    /// Maximum number of header lines, folded continuations included
    /// (default: 128).
    pub max_header_lines: Option<usize>,
}

impl ParserConfig {
    /// A configuration with every limit disabled.
    pub fn unbounded() -> Self {
        Self {
            max_head_len: None,
            max_header_lines: None,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_head_len: Some(64 * 1024),
            max_header_lines: Some(128),
        }
    }
}
