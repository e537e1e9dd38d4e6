//! Markup generation for scanned lines.
//!
//! Plain text is emitted escaped with no wrapper; every other token kind is
//! wrapped in a `<span style="color:...">` with the color the [`Theme`]
//! gives it. Match emphasis is layered inside those spans with `<mark>`
//! elements, so stripping all tags and unescaping `&amp;`, `&lt;` and
//! `&gt;` always yields the original line.

use std::ops::Range;

use crate::highlighter::{BracketDepth, scan_line};
use crate::language::LanguageTag;
use crate::theme::Theme;

/// A region of a line to emphasize as a search match.
///
/// `range` is in characters relative to the start of the line. Marks passed
/// to [`render_line`] must be sorted and must not overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMark {
    pub range: Range<usize>,
    /// Whether this is the match the user navigated to
    pub current: bool,
}

/// Appends `text` to `out`, escaping `&`, `<` and `>`.
pub fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escapes `&`, `<` and `>` in `text`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

/// Scans and renders one line to markup.
pub fn render_line(
    line: &str,
    tag: LanguageTag,
    theme: Theme,
    depth: &mut BracketDepth,
    marks: &[MatchMark],
) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut char_pos = 0usize;
    for span in scan_line(line, tag, depth) {
        let text = &line[span.range];
        let color = theme.color(span.kind);
        if let Some(color) = color {
            out.push_str("<span style=\"color:");
            out.push_str(color);
            out.push_str("\">");
        }
        char_pos = push_marked(&mut out, text, char_pos, marks);
        if color.is_some() {
            out.push_str("</span>");
        }
    }
    out
}

/// Renders one line with marks only: no colors, no bracket tracking.
pub fn render_plain(line: &str, marks: &[MatchMark]) -> String {
    let mut out = String::with_capacity(line.len() + marks.len() * 32);
    push_marked(&mut out, line, 0, marks);
    out
}

/// Emits `text` (which starts at line char `start`) with any overlapping
/// marks applied, returning the char position just past it.
fn push_marked(out: &mut String, text: &str, start: usize, marks: &[MatchMark]) -> usize {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect();
    let end = start + bounds.len() - 1;
    let byte_at = |c: usize| bounds[c - start];

    let mut cursor = start;
    for mark in marks {
        let s = mark.range.start.max(start);
        let e = mark.range.end.min(end);
        if s >= e {
            continue;
        }
        if s > cursor {
            escape_into(out, &text[byte_at(cursor)..byte_at(s)]);
        }
        out.push_str(if mark.current {
            "<mark class=\"match current\">"
        } else {
            "<mark class=\"match\">"
        });
        escape_into(out, &text[byte_at(s)..byte_at(e)]);
        out.push_str("</mark>");
        cursor = e;
    }
    if cursor < end {
        escape_into(out, &text[byte_at(cursor)..]);
    }
    end
}
