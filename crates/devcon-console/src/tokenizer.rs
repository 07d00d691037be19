//! Command-line splitting and tokenizing.
//!
//! An input line is first split into sub-commands on unescaped `;`, then
//! each sub-command is scanned left to right into a name and arguments.
//! Both passes are pure and never fail: malformed quoting degrades into
//! plain token material instead of an error.

/// Separates sub-commands on one input line.
pub const SEPARATOR: char = ';';

/// Escape marker. A separator or quote right after it loses its meaning.
pub const SCREENER: char = '\\';

/// Characters that open and close a quoted token.
pub const QUOTES: [char; 2] = ['"', '\''];

/// Token boundary outside quotes.
pub const TOKEN_DELIMITER: char = ' ';

/// One tokenized sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The sub-command text exactly as it was split off the input line.
    pub raw: String,
    /// First token, or empty when the sub-command holds no tokens.
    pub name: String,
    /// Remaining tokens in left-to-right order.
    pub arguments: Vec<String>,
}

impl ParsedCommand {
    /// Whether the sub-command produced no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Split an input line into raw sub-commands.
///
/// A `;` directly preceded by `\` is not a split point and stays in the
/// segment verbatim. Empty segments are passed through (`""` yields `[""]`,
/// `"a;;b"` yields `["a", "", "b"]`); filtering them is the caller's job.
pub fn split_commands(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, ch) in input.char_indices() {
        if ch == SEPARATOR && prev != Some(SCREENER) {
            segments.push(&input[start..i]);
            start = i + ch.len_utf8();
        }
        prev = Some(ch);
    }
    segments.push(&input[start..]);

    segments
}

/// Tokenize one raw sub-command into a name and its arguments.
///
/// - Outside quotes, a space ends the current token; empty tokens are dropped.
/// - `"` or `'` opens a quoted token unless screened by `\`. Only the same
///   character closes it; the other quote kind is literal inside.
/// - Unquoted text directly before an opening quote is emitted as its own
///   token (`a"b c"d` gives `a`, `b c`, `d`).
/// - End of input flushes whatever is pending, including an unterminated
///   quoted token.
/// - Screened quotes keep their screener: `a\"b` is the single token `a\"b`.
pub fn parse_command(raw: &str) -> ParsedCommand {
    let mut tokens: Vec<String> = Vec::new();
    let mut open_quote: Option<char> = None;
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, ch) in raw.char_indices() {
        let screened = prev == Some(SCREENER);
        prev = Some(ch);

        if QUOTES.contains(&ch) && !screened {
            match open_quote {
                Some(q) if q == ch => {
                    push_candidate(&mut tokens, &raw[start..i]);
                    open_quote = None;
                    start = i + ch.len_utf8();
                },
                // The other quote kind is literal inside a quoted token.
                Some(_) => {},
                None => {
                    push_candidate(&mut tokens, &raw[start..i]);
                    open_quote = Some(ch);
                    start = i + ch.len_utf8();
                },
            }
        } else if ch == TOKEN_DELIMITER && open_quote.is_none() {
            push_candidate(&mut tokens, &raw[start..i]);
            start = i + ch.len_utf8();
        }
    }
    push_candidate(&mut tokens, &raw[start..]);

    let mut tokens = tokens.into_iter();
    let name = tokens.next().unwrap_or_default();
    ParsedCommand {
        raw: raw.to_string(),
        name,
        arguments: tokens.collect(),
    }
}

/// Split and tokenize a whole line, dropping blank sub-commands.
pub fn parse_line(input: &str) -> Vec<ParsedCommand> {
    split_commands(input)
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_command)
        .filter(|parsed| !parsed.is_empty())
        .collect()
}

fn push_candidate(tokens: &mut Vec<String>, candidate: &str) {
    if !candidate.is_empty() {
        tokens.push(candidate.to_string());
    }
}
