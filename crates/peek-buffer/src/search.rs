//! Case-insensitive substring search.
//!
//! Matching is exact substring search over case-folded characters with
//! non-overlapping, leftmost-first semantics: after a hit the scan resumes
//! at the end of that hit, so `"aa"` occurs twice in `"aaaa"`, not three
//! times.
//!
//! Offsets are counted in `char`s of the raw text. Each character is folded
//! to its lowercase form only when that form is a single character, which
//! keeps folded and raw offsets in lock-step.

use serde::Serialize;

/// One occurrence of a query in the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Character offset where the occurrence begins
    pub start: usize,
    /// Length of the occurrence in characters
    pub len: usize,
}

impl Match {
    /// Character offset one past the end of the occurrence.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Finds all non-overlapping, case-insensitive occurrences of `query`.
///
/// An empty query yields no matches.
pub fn find_matches(text: &str, query: &str) -> Vec<Match> {
    let needle: Vec<char> = query.chars().map(fold).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<char> = text.chars().map(fold).collect();

    let mut matches = Vec::new();
    let mut pos = 0usize;
    while pos + needle.len() <= hay.len() {
        if hay[pos..pos + needle.len()] == needle[..] {
            matches.push(Match {
                start: pos,
                len: needle.len(),
            });
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    matches
}

/// Counts non-overlapping, case-insensitive occurrences of `query`.
pub fn count_matches(text: &str, query: &str) -> usize {
    find_matches(text, query).len()
}

fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// The ordered match list for one (text, query) pair.
///
/// A fresh index must be built whenever either input changes; previous
/// indices are meaningless against new text.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    query: String,
    matches: Vec<Match>,
}

impl MatchIndex {
    /// Indexes every occurrence of `query` in `text`.
    pub fn new(text: &str, query: &str) -> Self {
        Self {
            query: query.to_string(),
            matches: find_matches(text, query),
        }
    }

    /// Returns the query this index was built for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the number of matches.
    #[inline]
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if there are no matches.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the match at a position in the ordered list.
    pub fn get(&self, idx: usize) -> Option<Match> {
        self.matches.get(idx).copied()
    }

    /// Returns all matches in text order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }
}
