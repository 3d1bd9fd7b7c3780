//! String-literal escaping.
//!
//! Every non-integer literal is passed through an [`Escaper`] before it is
//! wrapped in single quotes. The escaper is chosen by the dialect, but any
//! `Fn(&str) -> String` closure can stand in for one.

/// Dialect-specific string-literal escaping.
pub trait Escaper: Send + Sync {
    /// Escape `raw` so it can be placed between single quotes.
    fn escape(&self, raw: &str) -> String;
}

impl<F> Escaper for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn escape(&self, raw: &str) -> String {
        self(raw)
    }
}

/// ANSI escaping: a single quote is doubled.
///
/// Correct for PostgreSQL (with `standard_conforming_strings`) and SQLite.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEscaper;

impl Escaper for StandardEscaper {
    fn escape(&self, raw: &str) -> String {
        raw.replace('\'', "''")
    }
}

/// MySQL escaping: backslash-prefixed control characters and quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEscaper;

impl Escaper for MySqlEscaper {
    fn escape(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 8);
        for c in raw.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\x1a' => out.push_str("\\Z"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out
    }
}
