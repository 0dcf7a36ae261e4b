// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quoted `KEY="VALUE",KEY="VALUE"` codec for the program file's
//! `environment=` line.
//!
//! Values (e.g. `basic_auth`, a comma-separated `user:pass` list, or
//! `webhook`, a comma-separated URL list) may themselves contain commas, so
//! a naive split on `,` is lossy. Commas and quotes inside a value are
//! preserved by quoting the whole value and backslash-escaping embedded
//! quotes, mirroring how supervisor-style config grammars quote values.

/// Render `pairs` as `KEY="VALUE",KEY="VALUE"`, in the given order.
pub fn encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Find the end of the quoted value starting just after its opening `"`,
/// honoring `\"` and `\\` escapes. Returns the byte offset of the closing
/// quote, or `None` if the value is unterminated.
fn find_closing_quote(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse a `KEY="VALUE",KEY="VALUE"` line back into ordered pairs.
///
/// Returns `None` on malformed input (unterminated quote, missing `=`).
pub fn decode(line: &str) -> Option<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        let eq = rest.find('=')?;
        let key = rest[..eq].trim().to_string();
        rest = rest[eq + 1..].strip_prefix('"')?;

        let end = find_closing_quote(rest)?;
        pairs.push((key, unescape(&rest[..end])));
        rest = rest[end + 1..].trim_start();

        match rest.strip_prefix(',') {
            Some(stripped) => rest = stripped.trim_start(),
            None if rest.is_empty() => break,
            None => return None,
        }
    }
    Some(pairs)
}

#[cfg(test)]
#[path = "env_codec_tests.rs"]
mod tests;
