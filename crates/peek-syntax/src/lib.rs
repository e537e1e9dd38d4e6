//! # Peek Syntax
//!
//! Lightweight, best-effort syntax highlighting: one left-to-right pass per
//! line, no tokenizer, no syntax tree.
//!
//! ## What Gets Colored
//!
//! - Comments (`//`, `#`, and same-line `/* */` for JavaScript)
//! - Double-quoted strings
//! - Keywords from a fixed per-language table
//! - `true` / `false` / `null` / `none` in any case
//! - Runs of ASCII digits
//! - Brackets, colored by nesting depth from a 5-color palette
//!
//! Colors come from a [`Theme`]; [`highlight_line`] always uses the
//! classic one.
//!
//! ## Threading Depth
//!
//! Bracket depth is the only state that crosses line boundaries. Callers
//! either use [`Highlighter`], which owns the counter for one file, or call
//! [`highlight_line`] and feed each returned depth into the next call.

mod highlighter;
mod language;
mod markup;
mod theme;

pub use highlighter::{
    BracketDepth, Highlighter, MIN_DEPTH, PALETTE_LEN, Span, TokenKind, classify_word, scan_line,
};
pub use language::LanguageTag;
pub use markup::{MatchMark, escape, escape_into, render_line, render_plain};
pub use theme::{Palette, Theme};

use peek_buffer::find_matches;

/// Errors that can occur when selecting a language.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Highlights one line, returning its markup and the depth for the next line.
///
/// When `query` is non-empty, every case-insensitive occurrence within the
/// line is wrapped in `<mark class="match">`.
///
/// # Example
/// ```
/// use peek_syntax::{LanguageTag, highlight_line};
///
/// let (markup, depth) = highlight_line("f(x", LanguageTag::Rust, None, 0);
/// assert_eq!(depth, 1);
/// assert!(markup.starts_with('f'));
/// ```
pub fn highlight_line(
    line: &str,
    tag: LanguageTag,
    query: Option<&str>,
    depth_in: i32,
) -> (String, i32) {
    let marks: Vec<MatchMark> = query
        .map(|q| {
            find_matches(line, q)
                .into_iter()
                .map(|m| MatchMark {
                    range: m.start..m.end(),
                    current: false,
                })
                .collect()
        })
        .unwrap_or_default();

    let mut depth = BracketDepth::new(depth_in);
    let markup = render_line(line, tag, Theme::Classic, &mut depth, &marks);
    (markup, depth.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Removes tags and undoes the three entity escapes.
    fn strip_markup(markup: &str) -> String {
        let mut text = String::new();
        let mut in_tag = false;
        for c in markup.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_python_comment_scenario() {
        let (markup, depth) = highlight_line("# comment true 42 (x)", LanguageTag::Python, None, 0);
        assert_eq!(
            markup,
            "<span style=\"color:gray\"># comment true 42 (x)</span>"
        );
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_rust_scenario() {
        let (markup, depth) =
            highlight_line("fn main() { let x = 1; }", LanguageTag::Rust, None, 0);
        assert!(markup.starts_with("<span style=\"color:#61afef\">fn</span> main"));
        assert!(markup.contains("<span style=\"color:#61afef\">let</span>"));
        assert!(markup.contains("<span style=\"color:#d19a66\">1</span>"));
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_python_true_vs_lowercase() {
        let (kw, _) = highlight_line("True", LanguageTag::Python, None, 0);
        assert_eq!(kw, "<span style=\"color:#61afef\">True</span>");
        let (boolean, _) = highlight_line("true", LanguageTag::Python, None, 0);
        assert_eq!(boolean, "<span style=\"color:#c678dd\">true</span>");
    }

    #[test]
    fn test_query_marks() {
        let (markup, _) = highlight_line("Abc abc", LanguageTag::Plain, Some("ABC"), 0);
        assert_eq!(
            markup,
            "<mark class=\"match\">Abc</mark> <mark class=\"match\">abc</mark>"
        );
        let (unmarked, _) = highlight_line("abc", LanguageTag::Plain, Some(""), 0);
        assert_eq!(unmarked, "abc");
    }

    #[test]
    fn test_depth_threading_across_calls() {
        let (_, d1) = highlight_line("if (a && (b", LanguageTag::JavaScript, None, 0);
        assert_eq!(d1, 2);
        let (_, d2) = highlight_line("))", LanguageTag::JavaScript, None, d1);
        assert_eq!(d2, 0);
    }

    #[test]
    fn test_depth_clamp_from_input() {
        let line = ")".repeat(2000);
        let (_, depth) = highlight_line(&line, LanguageTag::Plain, None, 5);
        assert_eq!(depth, MIN_DEPTH);
    }

    fn balanced(depth: u32) -> BoxedStrategy<String> {
        let leaf = "[a-z0-9 _.,;=+-]{0,4}".boxed();
        leaf.prop_recursive(depth, 64, 4, |inner| {
            (
                prop::sample::select(vec![('(', ')'), ('[', ']'), ('}', '{')]),
                inner.clone(),
                inner,
            )
                .prop_map(|((open, close), a, b)| format!("{open}{a}{close}{b}"))
        })
        .boxed()
    }

    proptest! {
        #[test]
        fn prop_markup_round_trips(line in "\\PC{0,60}", tag_idx in 0usize..5, query in "[a-z]{0,2}") {
            let tag = LanguageTag::all()[tag_idx];
            let (markup, _) = highlight_line(&line, tag, Some(&query), 0);
            prop_assert_eq!(strip_markup(&markup), line);
        }

        #[test]
        fn prop_balanced_brackets_restore_depth(line in balanced(4), start in -1000i32..1000, tag_idx in 0usize..5) {
            let tag = LanguageTag::all()[tag_idx];
            let (_, depth) = highlight_line(&line, tag, None, start);
            prop_assert_eq!(depth, start);
        }

        #[test]
        fn prop_depth_never_below_floor(closers in 0usize..3000, start in -1000i32..50) {
            let line = "]".repeat(closers);
            let (_, depth) = highlight_line(&line, LanguageTag::Plain, None, start);
            prop_assert!(depth >= MIN_DEPTH);
        }
    }
}
