//! REGEX to LIKE rewriting.
//!
//! Most regular expressions in practice are substring, prefix or exact
//! matches. Those are rewritten into `LIKE` or `=`, which every engine can
//! evaluate with an index; anything else goes to the dialect's native
//! regex operator unchanged.

use crate::dialect::{is_case_insensitive, Dialect};
use tracing::debug;

/// Characters that keep their regex meaning after simplification.
const REGEX_META: &[char] = &['.', '*', '+', '{', '}', '[', ']', '|', '?', '(', ')', '^', '$'];

#[derive(Debug, PartialEq, Eq)]
enum Simplified {
    /// Whole-string match against an unescaped literal
    Exact(String),
    /// LIKE pattern with `\` escapes
    Like(String),
}

/// Render `value REGEX pattern`.
///
/// `pattern` is the pattern as an SQL string literal; `flags` are the raw
/// SPARQL regex flags.
pub fn optimize_regex(
    value: &str,
    pattern: &str,
    flags: Option<&str>,
    dialect: &dyn Dialect,
) -> String {
    let insensitive = is_case_insensitive(flags);
    match simplify(pattern) {
        Some(Simplified::Exact(literal)) if insensitive => {
            format!("lower({value}) = lower('{literal}')")
        }
        Some(Simplified::Exact(literal)) => format!("{value} = '{literal}'"),
        Some(Simplified::Like(like)) if insensitive => dialect.ilike(value, &format!("'{like}'")),
        Some(Simplified::Like(like)) => format!("{value} LIKE '{like}'"),
        None => {
            debug!(pattern, "regex not simplifiable, using native operator");
            dialect.regexp(value, pattern, flags)
        }
    }
}

fn simplify(pattern: &str) -> Option<Simplified> {
    let mut s = pattern.strip_prefix('\'').unwrap_or(pattern);
    s = s.strip_suffix('\'').unwrap_or(s);

    s = s.strip_prefix(".*").unwrap_or(s);
    if let Some(rest) = s.strip_suffix(".*") {
        if !is_escaped_at_end(rest) {
            s = rest;
        }
    }

    let mut body = s;

    let mut like = String::with_capacity(body.len() + 2);
    let mut wildcard = false;
    match body.strip_prefix('^') {
        Some(rest) => body = rest,
        None => {
            like.push('%');
            wildcard = true;
        }
    }
    let anchored_end = match body.strip_suffix('$') {
        Some(rest) if !is_escaped_at_end(rest) => {
            body = rest;
            true
        }
        _ => false,
    };

    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let next = chars.next()?;
                if next.is_ascii_alphanumeric() {
                    return None;
                }
                like.push('\\');
                like.push(next);
            }
            '.' if chars.peek() == Some(&'*') => {
                chars.next();
                like.push('%');
                wildcard = true;
            }
            '.' if chars.peek() == Some(&'+') => {
                chars.next();
                like.push_str("_%");
                wildcard = true;
            }
            '%' | '_' => {
                like.push('\\');
                like.push(c);
            }
            c if REGEX_META.contains(&c) => return None,
            c => like.push(c),
        }
    }
    if !anchored_end {
        like.push('%');
        wildcard = true;
    }

    if wildcard {
        Some(Simplified::Like(like))
    } else {
        Some(Simplified::Exact(unescape(&like)))
    }
}

/// Whether `s` ends in an odd number of backslashes.
fn is_escaped_at_end(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
