//! Contracts for the platform layer.
//!
//! File dialogs, reading files, the clipboard and the OS file manager are
//! all outside the core. The viewer reaches them only through these traits,
//! and treats whatever they return as already fully materialized.

use std::path::{Path, PathBuf};

/// A displayable image produced by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// Where the renderer should load the image from (usually a file URL)
    pub location: String,
    /// Natural width in pixels
    pub width: u32,
    /// Natural height in pixels
    pub height: u32,
}

/// Result of resolving a file.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenedFile {
    Text {
        path: String,
        /// Decoded text (invalid UTF-8 already replaced)
        content: String,
        /// Platform handle id, when the file was not reached by path
        handle: Option<String>,
    },
    Image {
        path: String,
        image: ImageHandle,
        handle: Option<String>,
    },
    Error {
        path: String,
        message: String,
    },
}

impl OpenedFile {
    /// The path or name the file was opened under.
    pub fn path(&self) -> &str {
        match self {
            OpenedFile::Text { path, .. }
            | OpenedFile::Image { path, .. }
            | OpenedFile::Error { path, .. } => path,
        }
    }
}

/// Which files count as siblings when stepping through a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Image,
}

/// Picks and loads files.
pub trait FileResolver {
    /// Lets the user pick a file. `None` means the user cancelled.
    fn resolve_file(&mut self) -> Option<OpenedFile>;

    /// Loads a file by path (recents, hotkeys, command line).
    fn resolve_path(&mut self, path: &Path) -> OpenedFile;

    /// Lists the files of `kind` in the folder holding `path`, sorted by
    /// name. `path` itself is included when it is of that kind.
    fn siblings(&mut self, path: &Path, kind: FileKind) -> Vec<PathBuf>;
}

/// Writes to the system clipboard.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), PlatformError>;
}

/// Shows a path in the OS file browser. Fire-and-forget.
pub trait Revealer {
    fn reveal(&self, path: &Path);
}

/// Errors raised by platform implementations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open image: {0}")]
    Image(String),
}
