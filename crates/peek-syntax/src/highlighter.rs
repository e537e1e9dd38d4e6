//! Single-pass, line-oriented token scanner.
//!
//! Each line is scanned left to right exactly once. At every position the
//! first rule that applies wins, in this order: block comment, line
//! comment, quoted string, word, bracket, any other character. The only
//! state carried between lines is the bracket depth.
//!
//! Unterminated constructs simply run to the end of the line; the scanner
//! never fails.

use std::ops::Range;

use crate::language::LanguageTag;
use crate::markup::{self, MatchMark};
use crate::theme::Theme;

/// Number of entries in the bracket color palette.
pub const PALETTE_LEN: usize = 5;

/// Lowest value the bracket depth may reach.
pub const MIN_DEPTH: i32 = -1000;

/// Classification of a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Comment,
    Number,
    /// `true`, `false`, `null` or `none` in any letter case
    Boolean,
    /// A bracket colored with palette entry `palette_index`
    Bracket { palette_index: usize },
}

/// A classified byte range of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

/// Bracket nesting depth, threaded across the lines of one file.
///
/// `(`, `[` and `}` open; `)`, `]` and `{` close. Note the inverted brace
/// pairing; rendered colors depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BracketDepth(i32);

impl BracketDepth {
    pub fn new(depth: i32) -> Self {
        Self(depth)
    }

    /// Returns the raw depth value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Palette entry for the current depth.
    pub fn palette_index(&self) -> usize {
        self.0.max(0) as usize % PALETTE_LEN
    }

    /// Colors an opener at the current depth, then nests one level deeper.
    pub fn open(&mut self) -> usize {
        let idx = self.palette_index();
        self.0 = self.0.saturating_add(1);
        idx
    }

    /// Un-nests one level (never below [`MIN_DEPTH`]), then colors the
    /// closer at the resulting depth.
    pub fn close(&mut self) -> usize {
        self.0 = self.0.saturating_sub(1).max(MIN_DEPTH);
        self.palette_index()
    }
}

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '[' | '}')
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '{')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Classifies a complete word token.
pub fn classify_word(word: &str, tag: LanguageTag) -> TokenKind {
    if tag.is_keyword(word) {
        TokenKind::Keyword
    } else if ["true", "false", "null", "none"]
        .iter()
        .any(|b| word.eq_ignore_ascii_case(b))
    {
        TokenKind::Boolean
    } else if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        TokenKind::Number
    } else {
        TokenKind::Plain
    }
}

/// Scans one line into classified spans, updating `depth` as brackets go by.
///
/// Spans are contiguous, in order, and together cover the whole line.
/// Adjacent plain text is merged into a single span.
pub fn scan_line(line: &str, tag: LanguageTag, depth: &mut BracketDepth) -> Vec<Span> {
    let chars: Vec<char> = line.chars().collect();
    // Byte offset of each char, plus a sentinel for end of line.
    let offsets: Vec<usize> = line
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(line.len()))
        .collect();
    let n = chars.len();

    let mut spans: Vec<Span> = Vec::new();
    let mut i = 0usize;
    while i < n {
        let ch = chars[i];
        let rest = &line[offsets[i]..];

        if tag.has_block_comments() && rest.starts_with("/*") {
            let end = rest[2..]
                .find("*/")
                .map(|rel| offsets[i] + 2 + rel + 2)
                .unwrap_or(line.len());
            push(&mut spans, TokenKind::Comment, offsets[i]..end);
            i = offsets.partition_point(|&b| b < end);
            continue;
        }

        if tag.line_comment().is_some_and(|prefix| rest.starts_with(prefix)) {
            push(&mut spans, TokenKind::Comment, offsets[i]..line.len());
            break;
        }

        if ch == '"' {
            let mut j = i + 1;
            while j < n && chars[j] != '"' {
                j += 1;
            }
            let end = (j + 1).min(n);
            push(&mut spans, TokenKind::String, offsets[i]..offsets[end]);
            i = end;
            continue;
        }

        if is_word_char(ch) {
            let mut j = i;
            while j < n && is_word_char(chars[j]) {
                j += 1;
            }
            let range = offsets[i]..offsets[j];
            push(&mut spans, classify_word(&line[range.clone()], tag), range);
            i = j;
            continue;
        }

        let kind = if is_opener(ch) {
            TokenKind::Bracket {
                palette_index: depth.open(),
            }
        } else if is_closer(ch) {
            TokenKind::Bracket {
                palette_index: depth.close(),
            }
        } else {
            TokenKind::Plain
        };
        push(&mut spans, kind, offsets[i]..offsets[i + 1]);
        i += 1;
    }
    spans
}

fn push(spans: &mut Vec<Span>, kind: TokenKind, range: Range<usize>) {
    if kind == TokenKind::Plain {
        if let Some(last) = spans.last_mut() {
            if last.kind == TokenKind::Plain && last.range.end == range.start {
                last.range.end = range.end;
                return;
            }
        }
    }
    spans.push(Span { kind, range });
}

/// Highlights the lines of one file, threading bracket depth between them.
///
/// ## Learning: Owning the Pass State
///
/// The depth counter belongs to exactly one render pass. Keeping it inside
/// a value that is created per file (instead of a global) means a new file
/// can never inherit a stale depth.
#[derive(Debug, Clone)]
pub struct Highlighter {
    tag: LanguageTag,
    theme: Theme,
    depth: BracketDepth,
}

impl Highlighter {
    /// Starts a render pass at depth 0 with the classic colors.
    pub fn new(tag: LanguageTag) -> Self {
        Self {
            tag,
            theme: Theme::default(),
            depth: BracketDepth::default(),
        }
    }

    /// Colors this pass with `theme` instead.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns the depth carried into the next line.
    pub fn depth(&self) -> BracketDepth {
        self.depth
    }

    /// Scans the next line into spans.
    pub fn spans(&mut self, line: &str) -> Vec<Span> {
        scan_line(line, self.tag, &mut self.depth)
    }

    /// Renders the next line to markup, with `marks` emphasized.
    pub fn highlight(&mut self, line: &str, marks: &[MatchMark]) -> String {
        markup::render_line(line, self.tag, self.theme, &mut self.depth, marks)
    }
}
