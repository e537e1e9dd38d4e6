//! # Peek Buffer
//!
//! Read-only text storage and case-insensitive match search.
//!
//! ## Pieces
//!
//! - [`TextDocument`] owns the decoded text in a rope so that line and
//!   character lookups stay cheap on large files.
//! - [`find_matches`] / [`MatchIndex`] compute the non-overlapping,
//!   leftmost-first occurrences of a query.
//! - [`MatchNavigator`] steps cyclically through those occurrences.
//!
//! Nothing here performs I/O: bytes come in already read.

mod document;
mod navigator;
mod search;

pub use document::TextDocument;
pub use navigator::{Direction, MatchNavigator};
pub use search::{Match, MatchIndex, count_matches, find_matches};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Line {line} is out of bounds (document has {len} lines)")]
    LineOutOfBounds { line: usize, len: usize },

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = TextDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len_lines(), 1);
    }

    #[test]
    fn test_search_then_navigate() {
        let doc = TextDocument::from("alpha\nbeta ALPHA\ngamma alpha");
        let index = MatchIndex::new(&doc.text(), "alpha");
        assert_eq!(index.count(), 3);

        let mut nav = MatchNavigator::new(index.count());
        let current = nav.step(Direction::Forward).unwrap();
        let m = index.get(current).unwrap();
        assert_eq!(doc.char_to_line(m.start).unwrap(), 1);
    }
}
