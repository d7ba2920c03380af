//! Template body parser.
//!
//! Splits a body into literal text and `${...}` interpolations. An
//! interpolation holds a dotted path and an optional default:
//!
//! ```text
//! ${user}                     strict: fails when `user` is missing
//! ${latestProduct.url}        walks one field at a time
//! ${nickname!}                empty when missing
//! ${nickname!"stranger"}      literal when missing
//! ```
//!
//! A `$` that is not followed by `{` is literal text.

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Interpolation(Interpolation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Interpolation {
    pub path: Vec<String>,
    /// Text used when the path does not resolve; `None` means strict.
    pub fallback: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Interpolation {
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// 1-based position in the template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    line: usize,
    column: usize,
}

impl Position {
    fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

struct Parser<'a> {
    template: &'a str,
}

impl Parser<'_> {
    fn syntax(&self, message: impl Into<String>, at: Position) -> RenderError {
        RenderError::Syntax {
            template: self.template.to_string(),
            message: message.into(),
            line: at.line,
            column: at.column,
        }
    }

    fn parse(&self, source: &str) -> Result<Vec<Segment>, RenderError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut pos = Position::start();

        while let Some(start) = rest.find("${") {
            if start > 0 {
                let text = &rest[..start];
                segments.push(Segment::Text(text.to_string()));
                pos.advance(text);
            }

            let open = pos;
            let body_start = start + 2;
            let close = find_close(&rest[body_start..])
                .ok_or_else(|| self.syntax("unclosed interpolation, expected `}`", open))?;
            let body = &rest[body_start..body_start + close];
            segments.push(Segment::Interpolation(self.interpolation(body, open)?));

            let end = body_start + close + 1;
            pos.advance(&rest[start..end]);
            rest = &rest[end..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(segments)
    }

    fn interpolation(&self, body: &str, at: Position) -> Result<Interpolation, RenderError> {
        let (path_text, fallback) = match body.split_once('!') {
            Some((path, default)) => (path, Some(self.fallback(default.trim(), at)?)),
            None => (body, None),
        };

        let path_text = path_text.trim();
        if path_text.is_empty() {
            return Err(self.syntax("empty interpolation", at));
        }

        let path: Vec<String> = path_text.split('.').map(str::to_string).collect();
        if let Some(bad) = path.iter().find(|part| !is_identifier(part)) {
            let message = if bad.is_empty() {
                format!("empty name in path `{}`", path_text)
            } else {
                format!("invalid name `{}` in path `{}`", bad, path_text)
            };
            return Err(self.syntax(message, at));
        }

        Ok(Interpolation {
            path,
            fallback,
            line: at.line,
            column: at.column,
        })
    }

    fn fallback(&self, text: &str, at: Position) -> Result<String, RenderError> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let not_literal = || {
            self.syntax(
                format!("default after `!` must be a string literal, got `{}`", text),
                at,
            )
        };
        let quote = text
            .chars()
            .next()
            .filter(|c| *c == '"' || *c == '\'')
            .ok_or_else(not_literal)?;

        // The first unescaped quote must be the last character.
        let last = text.len() - 1;
        if closing_quote(&text[1..], quote).map(|i| i + 1) != Some(last) {
            return Err(not_literal());
        }
        unescape(&text[1..last])
            .ok_or_else(|| self.syntax(format!("bad escape in default {}", text), at))
    }
}

/// Parses a template body into segments.
pub(crate) fn parse(template: &str, source: &str) -> Result<Vec<Segment>, RenderError> {
    Parser { template }.parse(source)
}

/// Byte offset of the `}` closing an interpolation, skipping string literals.
fn find_close(body: &str) -> Option<usize> {
    let mut offset = 0;
    loop {
        let rest = &body[offset..];
        let i = rest.find(['}', '"', '\''])?;
        match rest.as_bytes()[i] {
            b'}' => return Some(offset + i),
            quote => {
                let close = closing_quote(&rest[i + 1..], char::from(quote))?;
                offset += i + 1 + close + 1;
            }
        }
    }
}

/// Byte offset of the first unescaped `quote` in `text`.
fn closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Some(i);
        }
    }
    None
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn unescape(inner: &str) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        out.push(match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            c @ ('\\' | '"' | '\'' | '$' | '{') => c,
            _ => return None,
        });
    }
    Some(out)
}
