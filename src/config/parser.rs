//! Config text format.
//!
//! One keyword per line, followed by its value and an optional comment:
//!
//! ```text
//! OBS_EXPTIME             60                  # [sec] simulated exposure time
//! FPA_CHIP_SIZE           (2048, 2048)        # [pixel] chip dimensions
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Literals map onto
//! [`Value`] variants: `None`, `True`/`False`/`yes`/`no`, integers, floats,
//! bracketed lists, quoted strings, and bare strings for everything else.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConfigLoadError;
use crate::value::Value;

/// Keywords are identifiers: letters, digits and underscores.
pub const KEYWORD_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Width of the keyword column when rendering.
pub const KEYWORD_COLUMN: usize = 24;

/// Width of the value column when a comment follows it.
pub const VALUE_COLUMN: usize = 20;

static KEYWORD_RE: OnceLock<Regex> = OnceLock::new();

fn keyword_re() -> &'static Regex {
    KEYWORD_RE.get_or_init(|| Regex::new(KEYWORD_PATTERN).expect("keyword pattern compiles"))
}

/// Returns true if `key` is a syntactically valid keyword.
#[must_use]
pub fn is_valid_keyword(key: &str) -> bool {
    keyword_re().is_match(key)
}

/// A parsed `KEYWORD value # comment` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    pub comment: Option<String>,
    /// 1-based line number in the source text.
    pub line: usize,
}

/// Parses config text into entries, in source order.
///
/// Duplicate keywords are returned as-is; callers decide whether that is an
/// error (default data) or an override (user files).
pub fn parse_str(text: &str) -> Result<Vec<Entry>, ConfigLoadError> {
    let mut entries = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let (body, comment) = split_comment(raw_line);
        let body = body.trim();
        if body.is_empty() {
            continue;
        }

        let (key, raw_value) = match body.split_once(char::is_whitespace) {
            Some((key, rest)) => (key, rest.trim()),
            None => (body, ""),
        };

        if !is_valid_keyword(key) {
            return Err(ConfigLoadError::parse(line, format!("invalid keyword '{key}'")));
        }
        if raw_value.is_empty() {
            return Err(ConfigLoadError::parse(line, format!("keyword '{key}' has no value")));
        }

        let value = parse_value(raw_value).map_err(|reason| ConfigLoadError::parse(line, reason))?;

        entries.push(Entry {
            key: key.to_string(),
            value,
            comment: comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string),
            line,
        });
    }

    Ok(entries)
}

/// Parses a single value literal (without trailing comment).
pub fn parse_value(raw: &str) -> Result<Value, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty value".to_string());
    }

    if let Some(close) = list_close(raw) {
        if !raw.ends_with(close) || raw.len() < 2 {
            return Err(format!("unterminated list '{raw}'"));
        }
        let inner = &raw[1..raw.len() - 1];
        return parse_list(inner).map(Value::List);
    }

    if let Some(inner) = unquote(raw) {
        return Ok(Value::String(inner));
    }

    Ok(parse_scalar(raw))
}

fn list_close(raw: &str) -> Option<char> {
    match raw.chars().next() {
        Some('[') => Some(']'),
        Some('(') => Some(')'),
        _ => None,
    }
}

/// Strips the quotes of a fully quoted literal.
///
/// Single quotes are literal; double quotes understand `\\`, `\"`, `\'`,
/// `\n`, `\r` and `\t`. Other backslashes are kept as written.
fn unquote(raw: &str) -> Option<String> {
    match raw.chars().next()? {
        '\'' if raw.len() >= 2 && raw.ends_with('\'') => Some(raw[1..raw.len() - 1].to_string()),
        '"' => unescape_double(&raw[1..]),
        _ => None,
    }
}

fn unescape_double(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            // The closing quote must end the literal.
            '"' => return chars.as_str().is_empty().then_some(out),
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            other => out.push(other),
        }
    }
    None
}

fn escape_double(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Quote tracking shared by the comment and list splitters.
#[derive(Debug, Default)]
struct QuoteState {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feeds one char. Returns true if it sits outside any quoted literal.
    fn step(&mut self, c: char) -> bool {
        match self.quote {
            Some('"') if self.escaped => self.escaped = false,
            Some('"') if c == '\\' => self.escaped = true,
            Some(q) if c == q => self.quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => self.quote = Some(c),
            None => return true,
        }
        false
    }

    fn is_open(&self) -> bool {
        self.quote.is_some()
    }
}

fn parse_list(inner: &str) -> Result<Vec<Value>, String> {
    let items = split_top_level(inner)?;
    let last = items.len().saturating_sub(1);
    let mut values = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let item = item.trim();
        if item.is_empty() {
            // `(2048,)` and `[]` both leave a single empty trailing item.
            if i == last {
                continue;
            }
            return Err("empty list element".to_string());
        }
        values.push(parse_value(item)?);
    }

    Ok(values)
}

/// Splits on commas outside nested brackets and quotes.
fn split_top_level(inner: &str) -> Result<Vec<&str>, String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quotes = QuoteState::default();
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        if !quotes.step(c) {
            continue;
        }
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced brackets in list".to_string())?;
            }
            ',' if depth == 0 => {
                items.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err("unbalanced brackets in list".to_string());
    }
    if quotes.is_open() {
        return Err("unterminated quote in list".to_string());
    }
    items.push(&inner[start..]);
    Ok(items)
}

/// Interprets an unquoted scalar literal.
#[must_use]
pub fn parse_scalar(raw: &str) -> Value {
    if raw == "None" {
        return Value::Null;
    }
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("no") {
        return Value::Bool(false);
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Int(v);
    }
    if let Ok(v) = raw.parse::<f64>() {
        return Value::Float(v);
    }
    Value::String(raw.to_string())
}

/// Splits a line at the first `#` outside quotes.
fn split_comment(line: &str) -> (&str, Option<&str>) {
    let mut quotes = QuoteState::default();
    for (i, c) in line.char_indices() {
        if quotes.step(c) && c == '#' {
            return (&line[..i], Some(&line[i + 1..]));
        }
    }
    (line, None)
}

/// Quotes `s` when writing it bare would not read back as the same string.
///
/// Bare strings never carry quotes, brackets, commas or `#`, so they survive
/// both a config line and a list element. Strings with a line break or a
/// single quote are written as escaped double-quoted literals.
#[must_use]
pub fn quote_if_needed(s: &str) -> String {
    let bare_ok = !s.is_empty()
        && s.trim() == s
        && !s.contains(['#', ',', '\'', '"', '[', ']', '(', ')', '\n', '\r'])
        && parse_scalar(s) == Value::String(s.to_string());

    if bare_ok {
        s.to_string()
    } else if s.contains(['\'', '\n', '\r']) {
        escape_double(s)
    } else {
        format!("'{s}'")
    }
}

/// Renders one config line.
#[must_use]
pub fn render_line(key: &str, value: &Value, comment: Option<&str>) -> String {
    let value = value.to_string();
    match comment {
        Some(comment) => format!(
            "{key:<kw$} {value:<val$} # {comment}",
            kw = KEYWORD_COLUMN - 1,
            val = VALUE_COLUMN - 1
        ),
        None => format!("{key:<kw$} {value}", kw = KEYWORD_COLUMN - 1),
    }
}
