//! Indentation and blank-line cleanup of generated source.
//!
//! Lines are re-indented from scratch by brace nesting: a line holding only
//! `{` opens a level, a line holding only `}` or `};` closes one, and access
//! labels sit one level out from their block. Runs of blank lines collapse
//! to one, and no blank line survives at the start of a block, right before
//! its closing brace, or at the end of the text.

use crate::Error;

/// Columns per nesting level.
const INDENT: usize = 2;

fn is_open(line: &str) -> bool {
    line == "{"
}

fn is_close(line: &str) -> bool {
    line == "}" || line == "};"
}

fn is_access_label(line: &str) -> bool {
    matches!(line, "public:" | "protected:" | "private:")
}

fn pad(indent: usize, line: &str) -> String {
    format!("{}{}", " ".repeat(indent), line)
}

/// Normalize indentation and blank lines.
///
/// Fails with [`Error::UnbalancedBraces`] on a closing brace with no open
/// block. Unclosed blocks at the end are left as they are.
pub fn beautify(text: &str) -> Result<String, Error> {
    let indented = indent_lines(text)?;
    let mut lines = retract_blank_before_close(indented);

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Ok(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn indent_lines(text: &str) -> Result<Vec<String>, Error> {
    let mut indent = 0usize;
    let mut out: Vec<String> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let strip = line.trim();

        if strip.is_empty() {
            match out.last() {
                None => {}
                Some(prev) if prev.is_empty() || is_open(prev.trim_start()) => {}
                Some(_) => out.push(String::new()),
            }
            continue;
        }

        if is_close(strip) {
            if out.last().is_some_and(|l| l.is_empty()) {
                out.pop();
            }
            indent = indent
                .checked_sub(INDENT)
                .ok_or(Error::UnbalancedBraces { line: idx + 1 })?;
            out.push(pad(indent, strip));
        } else if is_open(strip) {
            out.push(pad(indent, strip));
            indent += INDENT;
        } else if is_access_label(strip) {
            out.push(pad(indent.saturating_sub(INDENT), strip));
        } else {
            out.push(pad(indent, strip));
        }
    }

    Ok(out)
}

/// Drop any blank line directly followed by a closing brace.
fn retract_blank_before_close(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if is_close(line.trim_start()) && out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }
        out.push(line);
    }
    out
}
