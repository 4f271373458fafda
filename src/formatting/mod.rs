//! Source normalization.
//!
//! Produces a canonical layout for a snippet: tabs expanded to four spaces,
//! trailing whitespace removed from every line, leading and trailing blank
//! lines dropped, and exactly one final newline. `\r\n` and bare `\r` both
//! count as line breaks and come out as `\n`.

/// Replacement for a horizontal tab.
pub const TAB_REPLACEMENT: &str = "    ";

/// Normalize whitespace in `code`.
///
/// Total and idempotent; empty input yields `"\n"`.
pub fn format_code(code: &str) -> String {
    let expanded = code
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', TAB_REPLACEMENT);
    let lines: Vec<&str> = expanded.lines().map(str::trim_end).collect();

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());

    let mut formatted = match (first, last) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    };
    formatted.push('\n');
    formatted
}
