//! Display names for parameterized cases.
//!
//! Patterns use `{index}` (1-based case number), `{arguments}` (the whole
//! row) and `{0}`, `{1}`... (single arguments). Text between single quotes is
//! copied literally and `''` produces one quote, so
//! `"{index} ==> the rank of ''{0}'' is {1}"` renders as
//! `"1 ==> the rank of 'apple' is 1"`.

use crate::args::Arguments;

/// The pattern used when a test does not name its cases.
pub const DEFAULT_DISPLAY_NAME: &str = "[{index}] {arguments}";

/// Renders `pattern` for the case at `index` (1-based).
///
/// Unknown placeholders are kept as written. Null arguments render as
/// `null`.
pub fn display_name(pattern: &str, index: usize, args: &Arguments) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\'' => quoted = !quoted,
            '{' if !quoted => {
                let mut token = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    token.push(next);
                }
                if !closed {
                    out.push('{');
                    out.push_str(&token);
                    continue;
                }
                substitute(&mut out, &token, index, args);
            }
            c => out.push(c),
        }
    }
    out
}

fn substitute(out: &mut String, token: &str, index: usize, args: &Arguments) {
    match token {
        "index" => out.push_str(&index.to_string()),
        "arguments" => out.push_str(&args.to_string()),
        _ => match token.parse::<usize>().ok().and_then(|i| args.raw(i).ok()) {
            Some(value) => out.push_str(value.unwrap_or("null")),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        },
    }
}
