//! Language tags and their fixed keyword/comment rules.
//!
//! ## Learning: Enums as Closed Sets
//!
//! A `LanguageTag` can only ever be one of the variants below, so every
//! `match` on it is checked for exhaustiveness by the compiler. Adding a
//! language means the compiler points at every rule that needs updating.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::SyntaxError;

/// Identifies which keyword set and comment syntax apply to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageTag {
    /// No syntax rules; only words, strings and brackets are colored
    #[default]
    Plain,
    JavaScript,
    Python,
    Rust,
    Toml,
}

impl LanguageTag {
    /// Derives a tag from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "js" => LanguageTag::JavaScript,
            "py" => LanguageTag::Python,
            "rs" => LanguageTag::Rust,
            "toml" => LanguageTag::Toml,
            _ => LanguageTag::Plain,
        }
    }

    /// Derives a tag from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Returns the short tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Plain => "none",
            LanguageTag::JavaScript => "js",
            LanguageTag::Python => "py",
            LanguageTag::Rust => "rs",
            LanguageTag::Toml => "toml",
        }
    }

    /// Returns the reserved words for this language (case-sensitive).
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            LanguageTag::Rust => RUST_KEYWORDS,
            LanguageTag::Python => PYTHON_KEYWORDS,
            LanguageTag::JavaScript => JAVASCRIPT_KEYWORDS,
            LanguageTag::Toml | LanguageTag::Plain => &[],
        }
    }

    /// Returns true if `word` is a reserved word for this language.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords().contains(&word)
    }

    /// Returns the line-comment prefix, if the language has one.
    pub fn line_comment(&self) -> Option<&'static str> {
        match self {
            LanguageTag::JavaScript | LanguageTag::Rust => Some("//"),
            LanguageTag::Python | LanguageTag::Toml => Some("#"),
            LanguageTag::Plain => None,
        }
    }

    /// Returns true if `/* ... */` comments are recognized.
    ///
    /// Block comments never continue onto the next line.
    pub fn has_block_comments(&self) -> bool {
        matches!(self, LanguageTag::JavaScript)
    }

    /// Returns every tag, in display order.
    pub fn all() -> &'static [LanguageTag] {
        &[
            LanguageTag::Plain,
            LanguageTag::JavaScript,
            LanguageTag::Python,
            LanguageTag::Rust,
            LanguageTag::Toml,
        ]
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "plain" | "text" | "txt" => Ok(LanguageTag::Plain),
            "js" | "javascript" => Ok(LanguageTag::JavaScript),
            "py" | "python" => Ok(LanguageTag::Python),
            "rs" | "rust" => Ok(LanguageTag::Rust),
            "toml" => Ok(LanguageTag::Toml),
            _ => Err(SyntaxError::UnknownLanguage(s.to_string())),
        }
    }
}

// ============================================================================
// Language keyword sets
// ============================================================================

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn",
    "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let",
    "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self",
    "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while", "union", "box", "try", "yield", "macro",
    "macro_rules",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
    "match", "case",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "class", "extends", "super", "import",
    "export", "default", "return", "if", "else", "for", "while", "do",
    "switch", "case", "break", "continue", "try", "catch", "finally", "throw",
    "new", "this", "in", "of", "await", "async", "yield", "typeof",
    "instanceof", "void", "delete", "with",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageTag::from_extension("RS"), LanguageTag::Rust);
        assert_eq!(LanguageTag::from_extension("py"), LanguageTag::Python);
        assert_eq!(LanguageTag::from_extension("md"), LanguageTag::Plain);
        assert_eq!(LanguageTag::from_path("src/main.js"), LanguageTag::JavaScript);
        assert_eq!(LanguageTag::from_path("Cargo.toml"), LanguageTag::Toml);
        assert_eq!(LanguageTag::from_path("Makefile"), LanguageTag::Plain);
    }

    #[test]
    fn test_keyword_tables_are_case_sensitive() {
        assert!(LanguageTag::Python.is_keyword("True"));
        assert!(!LanguageTag::Python.is_keyword("true"));
        assert!(LanguageTag::Rust.is_keyword("Self"));
        assert!(!LanguageTag::Rust.is_keyword("SELF"));
        assert!(!LanguageTag::Toml.is_keyword("true"));
    }

    #[test]
    fn test_comment_rules() {
        assert_eq!(LanguageTag::Rust.line_comment(), Some("//"));
        assert_eq!(LanguageTag::Toml.line_comment(), Some("#"));
        assert_eq!(LanguageTag::Plain.line_comment(), None);
        assert!(LanguageTag::JavaScript.has_block_comments());
        assert!(!LanguageTag::Rust.has_block_comments());
    }

    #[test]
    fn test_parse_round_trip() {
        for tag in LanguageTag::all() {
            assert_eq!(tag.as_str().parse::<LanguageTag>().unwrap(), *tag);
        }
        assert!(matches!(
            "cobol".parse::<LanguageTag>(),
            Err(SyntaxError::UnknownLanguage(name)) if name == "cobol"
        ));
    }
}
