//! Whole-document rendering.
//!
//! Each line becomes `<span class="gutter">N</span>CODE\n`. Bracket depth
//! starts at 0 for the document and is carried from line to line. Search
//! matches come from a [`MatchIndex`] over the raw text; they are cut at
//! line boundaries and handed to the highlighter as per-line marks, with
//! the navigator's current match flagged for emphasis.

use peek_buffer::{MatchIndex, TextDocument};
use peek_syntax::{Highlighter, LanguageTag, MatchMark, Theme, render_plain};

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fill the gutter with 1-based line numbers
    pub line_numbers: bool,

    /// Apply syntax and bracket colors; when off, only search marks remain
    pub syntax: bool,

    /// Colors used when `syntax` is on
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            syntax: true,
            theme: Theme::default(),
        }
    }
}

/// Renders a document to markup.
pub fn render_document(
    doc: &TextDocument,
    tag: LanguageTag,
    index: &MatchIndex,
    current: Option<usize>,
    options: RenderOptions,
) -> String {
    let mut highlighter = Highlighter::new(tag).with_theme(options.theme);
    let matches = index.matches();

    let mut out = String::with_capacity(doc.len_chars() * 2);
    let mut next_match = 0usize;
    let mut line_start = 0usize;
    for (line_idx, line) in doc.lines().enumerate() {
        let line_end = line_start + line.chars().count();

        while next_match < matches.len() && matches[next_match].end() <= line_start {
            next_match += 1;
        }
        let mut marks = Vec::new();
        let mut k = next_match;
        while k < matches.len() && matches[k].start < line_end {
            let m = matches[k];
            marks.push(MatchMark {
                range: m.start.max(line_start) - line_start..m.end().min(line_end) - line_start,
                current: current == Some(k),
            });
            k += 1;
        }

        out.push_str("<span class=\"gutter\">");
        if options.line_numbers {
            out.push_str(&(line_idx + 1).to_string());
        }
        out.push_str("</span>");
        if options.syntax {
            out.push_str(&highlighter.highlight(&line, &marks));
        } else {
            out.push_str(&render_plain(&line, &marks));
        }
        out.push('\n');

        // Skip the '\n' that ended this line.
        line_start = line_end + 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(text: &str, tag: LanguageTag, query: &str, current: Option<usize>) -> String {
        let doc = TextDocument::from(text);
        let index = MatchIndex::new(&doc.text(), query);
        render_document(&doc, tag, &index, current, RenderOptions::default())
    }

    #[test]
    fn test_gutter_and_lines() {
        assert_eq!(
            render("a\nb", LanguageTag::Plain, "", None),
            "<span class=\"gutter\">1</span>a\n<span class=\"gutter\">2</span>b\n"
        );
    }

    #[test]
    fn test_line_numbers_off() {
        let doc = TextDocument::from("x");
        let out = render_document(
            &doc,
            LanguageTag::Plain,
            &MatchIndex::default(),
            None,
            RenderOptions {
                line_numbers: false,
                ..RenderOptions::default()
            },
        );
        assert_eq!(out, "<span class=\"gutter\"></span>x\n");
    }

    #[test]
    fn test_depth_threads_across_lines() {
        let out = render("(\n)", LanguageTag::Plain, "", None);
        assert_eq!(
            out,
            "<span class=\"gutter\">1</span><span style=\"color:#98c379\">(</span>\n\
             <span class=\"gutter\">2</span><span style=\"color:#98c379\">)</span>\n"
        );
    }

    #[test]
    fn test_theme_colors_brackets_across_lines() {
        let doc = TextDocument::from("(\n)");
        let out = render_document(
            &doc,
            LanguageTag::Plain,
            &MatchIndex::default(),
            None,
            RenderOptions {
                theme: Theme::Dracula,
                ..RenderOptions::default()
            },
        );
        assert_eq!(
            out,
            "<span class=\"gutter\">1</span><span style=\"color:#50fa7b\">(</span>\n\
             <span class=\"gutter\">2</span><span style=\"color:#50fa7b\">)</span>\n"
        );
    }

    #[test]
    fn test_current_match_on_second_line() {
        let out = render("ab\nab", LanguageTag::Plain, "AB", Some(1));
        assert_eq!(
            out,
            "<span class=\"gutter\">1</span><mark class=\"match\">ab</mark>\n\
             <span class=\"gutter\">2</span><mark class=\"match current\">ab</mark>\n"
        );
    }

    #[test]
    fn test_match_crossing_newline_is_clipped() {
        let out = render("xa\nby", LanguageTag::Plain, "a\nb", None);
        assert_eq!(
            out,
            "<span class=\"gutter\">1</span>x<mark class=\"match\">a</mark>\n\
             <span class=\"gutter\">2</span><mark class=\"match\">b</mark>y\n"
        );
    }

    #[test]
    fn test_syntax_off_renders_plain() {
        let doc = TextDocument::from("fn x()");
        let out = render_document(
            &doc,
            LanguageTag::Rust,
            &MatchIndex::default(),
            None,
            RenderOptions {
                syntax: false,
                ..RenderOptions::default()
            },
        );
        assert_eq!(out, "<span class=\"gutter\">1</span>fn x()\n");
    }

    proptest! {
        #[test]
        fn prop_one_gutter_per_line(text in "[a-c\\n(){} ]{0,80}", syntax in any::<bool>()) {
            let doc = TextDocument::from(text.as_str());
            let out = render_document(
                &doc,
                LanguageTag::Rust,
                &MatchIndex::default(),
                None,
                RenderOptions { syntax, ..RenderOptions::default() },
            );
            prop_assert_eq!(out.matches("<span class=\"gutter\">").count(), doc.len_lines());
        }

        #[test]
        fn prop_marks_iff_matches(text in "[abAB\\n ]{0,60}", query in "[ab]{1,2}") {
            let doc = TextDocument::from(text.as_str());
            let index = MatchIndex::new(&doc.text(), &query);
            let out = render_document(&doc, LanguageTag::Plain, &index, None, RenderOptions::default());
            prop_assert_eq!(out.contains("<mark class=\"match\">"), !index.is_empty());
        }
    }
}
