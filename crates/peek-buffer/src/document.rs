//! Read-only text document backed by a rope.
//!
//! ## Line Model
//!
//! Lines are split on `\n` only. A `\r` left over from CRLF files stays in
//! the line as an ordinary character, so a document with N newlines always
//! has N + 1 lines and character offsets from the search engine map onto
//! exactly the same line boundaries.

use ropey::Rope;
use std::borrow::Cow;

use crate::{BufferError, BufferResult};

/// A decoded, immutable text document.
#[derive(Debug, Clone)]
pub struct TextDocument {
    /// The rope holding our text content
    rope: Rope,

    /// Whether the text carries U+FFFD from a lossy decode
    lossy: bool,
}

impl TextDocument {
    /// Creates a new empty document.
    ///
    /// # Example
    /// ```
    /// use peek_buffer::TextDocument;
    ///
    /// let doc = TextDocument::new();
    /// assert!(doc.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            lossy: false,
        }
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a specific line (0-indexed) without its trailing `\n`.
    pub fn line(&self, line_idx: usize) -> BufferResult<Cow<'_, str>> {
        if line_idx >= self.len_lines() {
            return Err(BufferError::LineOutOfBounds {
                line: line_idx,
                len: self.len_lines(),
            });
        }
        Ok(strip_newline(self.rope.line(line_idx).into()))
    }

    /// Iterates over all lines without their trailing `\n`.
    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.rope
            .lines()
            .map(|line| strip_newline(line.into()))
    }

    // ==================== Measurements ====================

    /// Returns true if the document is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters (Unicode scalar values).
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines.
    ///
    /// An empty document has 1 line. A document ending with `\n` counts
    /// the empty line after it.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the number of lines a reader would count: a trailing `\n`
    /// does not start another line, and an empty document has none.
    pub fn line_count(&self) -> usize {
        let len = self.rope.len_chars();
        if len == 0 {
            0
        } else if self.rope.char(len - 1) == '\n' {
            self.rope.len_lines() - 1
        } else {
            self.rope.len_lines()
        }
    }

    /// Returns the size of the text in UTF-8 bytes.
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Returns true if the text contains replacement characters, which is
    /// how a lossy UTF-8 decode shows up.
    pub fn is_lossy(&self) -> bool {
        self.lossy
    }

    // ==================== Position Conversion ====================

    /// Returns the line containing a character offset.
    pub fn char_to_line(&self, char_idx: usize) -> BufferResult<usize> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        Ok(self.rope.char_to_line(char_idx))
    }

    /// Returns the character offset at which a line starts.
    pub fn line_to_char(&self, line_idx: usize) -> BufferResult<usize> {
        if line_idx >= self.len_lines() {
            return Err(BufferError::LineOutOfBounds {
                line: line_idx,
                len: self.len_lines(),
            });
        }
        Ok(self.rope.line_to_char(line_idx))
    }
}

fn strip_newline(line: Cow<'_, str>) -> Cow<'_, str> {
    match line {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_suffix('\n').unwrap_or(s)),
        Cow::Owned(mut s) => {
            if s.ends_with('\n') {
                s.pop();
            }
            Cow::Owned(s)
        }
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextDocument {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            lossy: s.contains('\u{FFFD}'),
        }
    }
}

impl From<String> for TextDocument {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
