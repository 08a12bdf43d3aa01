use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser as ClapParser};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use parser_suite::{
    ParseError, ParserConfig, Span, format_json, format_text, parse_authority,
    parse_headers_with_config, parse_path, parse_request_line, parse_request_with_config,
    parse_response_line, parse_response_with_config, parse_uri,
};

/// parser-suite CLI: permissive zero-copy grammars for HTTP-like text.
///
/// Reads raw input from a file, --raw string, or stdin, runs the selected
/// grammar over it and prints the result in the chosen format.
///
/// Escape sequences (\r, \n, \t, \\) in the --raw value are interpreted so
/// you can pass a full message as a single shell argument.
#[derive(ClapParser)]
#[command(name = "parser-suite-cli", version, about, long_about = None)]
struct Cli {
    /// Grammar to run.
    #[arg(value_enum)]
    grammar: GrammarArg,

    /// Path to a file containing the input.
    /// Reads from stdin when neither FILE nor --raw is given.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Raw input string (escape sequences \r \n \t \\ are expanded).
    #[arg(long)]
    raw: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Pretty-print JSON output (ignored for other formats).
    #[arg(short, long)]
    pretty: bool,

    /// Directory separator for the path grammar.
    #[arg(long, default_value = "/", value_parser = parse_separator)]
    dir_sep: u8,

    /// Extension separator for the path grammar.
    #[arg(long, default_value = ".", value_parser = parse_separator)]
    ext_sep: u8,

    /// Maximum length in bytes of a request/response head (first line plus
    /// headers). The body is not counted.
    #[arg(long, default_value = "65536")]
    max_head_len: usize,

    /// Maximum number of header lines.
    #[arg(long, default_value = "128")]
    max_header_lines: usize,

    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum GrammarArg {
    Headers,
    RequestLine,
    ResponseLine,
    Uri,
    Authority,
    Path,
    Request,
    Response,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Canonical field=value lines
    Text,
    /// JSON output
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Nothing to inspect on an interactive terminal.
    let piped = !std::io::stdin().is_terminal();
    if cli.file.is_none() && cli.raw.is_none() && !piped {
        Cli::command().print_help().ok();
        println!();
        process::exit(0);
    }

    let data = match capture_bytes(&cli) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading capture: {e}");
            process::exit(1);
        }
    };

    let config = ParserConfig {
        max_head_len: Some(cli.max_head_len),
        max_header_lines: Some(cli.max_header_lines),
    };

    let mut input = Span::new(&data);
    let output = match run(&cli, &config, &mut input) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("Parse error: {e}");
            process::exit(2);
        }
    };
    debug!(remaining = input.len(), "unconsumed input");

    print!("{output}");
}

/// Run the selected grammar and render its result.
fn run(cli: &Cli, config: &ParserConfig, input: &mut Span<'_>) -> Result<String, ParseError> {
    macro_rules! render {
        ($result:expr) => {{
            let result = $result;
            match cli.format {
                OutputFormat::Text => format_text(&result),
                OutputFormat::Json => format_json(&result, cli.pretty),
            }
        }};
    }

    Ok(match cli.grammar {
        GrammarArg::Headers => render!(parse_headers_with_config(input, config)?),
        GrammarArg::RequestLine => render!(parse_request_line(input)?),
        GrammarArg::ResponseLine => render!(parse_response_line(input)?),
        GrammarArg::Uri => render!(parse_uri(input)?),
        GrammarArg::Authority => render!(parse_authority(input)?),
        GrammarArg::Path => render!(parse_path(input, cli.dir_sep, cli.ext_sep)?),
        GrammarArg::Request => render!(parse_request_with_config(input, config)?),
        GrammarArg::Response => render!(parse_response_with_config(input, config)?),
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Accept a single ASCII character as a separator byte.
fn parse_separator(s: &str) -> Result<u8, String> {
    match unescape(s).as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("separator must be a single ASCII character, got '{s}'")),
    }
}

/// The captured message text to run the grammar over. `--raw` wins over
/// FILE; stdin is the fallback. Bytes are taken verbatim, so binary or
/// non-UTF-8 captures are fine.
fn capture_bytes(cli: &Cli) -> std::io::Result<Vec<u8>> {
    match (&cli.raw, &cli.file) {
        (Some(raw), _) => Ok(unescape(raw).into_bytes()),
        (None, Some(path)) => std::fs::read(path),
        (None, None) => {
            let mut capture = Vec::new();
            std::io::stdin().lock().read_to_end(&mut capture)?;
            Ok(capture)
        }
    }
}

/// Turn `\r`, `\n`, `\t` and `\\` typed on the command line into the raw
/// bytes a captured message would contain. Unknown escapes stay literal.
fn unescape(s: &str) -> String {
    let mut message = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(at) = rest.find('\\') {
        message.push_str(&rest[..at]);
        let mut escaped = rest[at + 1..].chars();
        let byte = match escaped.next() {
            Some('r') => "\r",
            Some('n') => "\n",
            Some('t') => "\t",
            Some('\\') => "\\",
            // Unknown escape or a trailing backslash: keep the backslash
            // and let the next round copy whatever follows it.
            _ => {
                message.push('\\');
                rest = &rest[at + 1..];
                continue;
            }
        };
        message.push_str(byte);
        rest = escaped.as_str();
    }
    message.push_str(rest);
    message
}
