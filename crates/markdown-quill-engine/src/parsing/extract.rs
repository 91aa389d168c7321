//! Plain-text extraction: block markers first, then the inline pass.
//!
//! `extract` and `resolve` are thin views over the same rendering step, so
//! the text one returns and the offsets the other returns can never drift
//! apart. Both are pure functions of the block source; neither reads or
//! advances any cursor state.

use super::inline::{InlineSpan, Rendered, render_inline};

/// Strips block-level markers from every line of a block's source:
/// ATX heading hashes, unordered list markers (`- `, `* `, `+ `), ordered
/// list markers (`N. `), and setext underline lines.
pub(crate) fn strip_block_markers(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for (i, line) in source.lines().enumerate() {
        let stripped = strip_line_marker(line);
        if is_setext_underline(stripped) {
            continue;
        }
        if i > 0 {
            out.push('\n');
        }
        out.push_str(stripped);
    }
    out
}

fn strip_line_marker(line: &str) -> &str {
    // Heading: 1-6 leading hashes followed by whitespace
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if rest.starts_with([' ', '\t']) {
            return rest.trim_start();
        }
    }

    let body = line.trim_start();

    // Unordered list marker: `- `, `* `, `+ ` (whitespace after is required,
    // which keeps `*italic*` at line start out of this rule)
    if let Some(rest) = body
        .strip_prefix(['-', '*', '+'])
        .filter(|r| r.starts_with([' ', '\t']))
    {
        return rest.trim_start();
    }

    // Ordered list marker: digits, a dot, whitespace
    let digits = body.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &body[digits..];
        if let Some(rest) = rest.strip_prefix('.').filter(|r| r.starts_with([' ', '\t'])) {
            return rest.trim_start();
        }
    }

    line
}

/// A line of only `=` or `-` characters under a heading's text is setext
/// syntax, not content.
fn is_setext_underline(line: &str) -> bool {
    line.len() >= 2
        && (line.bytes().all(|b| b == b'=') || line.bytes().all(|b| b == b'-'))
}

/// Runs the full strip-then-resolve pipeline for one block's source text.
pub(crate) fn render_block(source: &str) -> Rendered {
    render_inline(&strip_block_markers(source))
}

/// Returns a block's rendered plain text with all markup syntax removed.
///
/// Heading hashes, bold/italic/code delimiters, and list markers are
/// stripped; a link is reduced to its display text (the URL is dropped).
/// Stripping is idempotent: extracting already-plain text is a no-op.
pub fn extract(source: &str) -> String {
    render_block(source).text
}

/// Returns the inline spans of a block's source text.
///
/// Offsets are character positions into `extract(source)`, not into the
/// markup source.
pub fn resolve(source: &str) -> Vec<InlineSpan> {
    render_block(source).spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::SpanKind;

    #[test]
    fn strips_heading_markers() {
        assert_eq!(extract("## Section Two"), "Section Two");
        assert_eq!(extract("###### Deep"), "Deep");
    }

    #[test]
    fn seven_hashes_is_not_a_heading_marker() {
        assert_eq!(extract("####### nope"), "####### nope");
    }

    #[test]
    fn strips_list_markers() {
        assert_eq!(extract("- item"), "item");
        assert_eq!(extract("* item"), "item");
        assert_eq!(extract("+ item"), "item");
        assert_eq!(extract("  - indented"), "indented");
        assert_eq!(extract("3. third"), "third");
    }

    #[test]
    fn leading_italic_is_not_a_list_marker() {
        assert_eq!(extract("*emphasis* first"), "emphasis first");
    }

    #[test]
    fn strips_inline_syntax() {
        assert_eq!(extract("**b** and *i* and `c`"), "b and i and c");
    }

    #[test]
    fn link_reduces_to_display_text() {
        assert_eq!(extract("[docs](https://example.com)"), "docs");
    }

    #[test]
    fn extraction_is_idempotent() {
        let sources = [
            "# A **bold** heading",
            "- a *list* item",
            "plain paragraph",
            "a `code` span and [link](url)",
        ];
        for source in sources {
            let once = extract(source);
            assert_eq!(extract(&once), once, "re-extracting {source:?}");
        }
    }

    #[test]
    fn setext_underline_is_dropped() {
        assert_eq!(extract("Title\n====="), "Title");
        assert_eq!(extract("Title\n-----"), "Title");
    }

    #[test]
    fn interior_newlines_survive() {
        assert_eq!(extract("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn resolve_offsets_are_into_extracted_text() {
        let source = "## Try **this**";
        let spans = resolve(source);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Bold);
        let text = extract(source);
        let covered: String = text
            .chars()
            .skip(spans[0].start)
            .take(spans[0].end - spans[0].start)
            .collect();
        assert_eq!(covered, "this");
    }

    #[test]
    fn empty_source_extracts_to_empty() {
        assert_eq!(extract(""), "");
    }
}
