//! # Peek Core
//!
//! Viewer state and the seams to the platform.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Viewer                            │
//! │  ┌─────────────┐ ┌─────────────┐ ┌──────────────────────┐ │
//! │  │ Preferences │ │   Recents   │ │  Content + Search    │ │
//! │  └──────┬──────┘ └──────┬──────┘ │  (doc, index, nav)   │ │
//! │         └───────┬───────┘        └──────────┬───────────┘ │
//! │           ┌─────┴─────┐              ┌──────┴──────┐      │
//! │           │   Store   │              │  Renderer   │      │
//! │           └───────────┘              └─────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//!        ▲ FileResolver / Clipboard / Revealer (injected)
//! ```
//!
//! Everything platform-specific (dialogs, clipboard, the file manager,
//! where settings live on disk) is reached through a trait, so the whole
//! viewer can be driven from tests with in-memory fakes.

pub mod config;
pub mod image;
pub mod platform;
pub mod preferences;
pub mod recents;
pub mod render;
pub mod store;
pub mod viewer;

pub use config::Config;
pub use image::{check_texture_budget, fit_scale, texture_bytes};
pub use platform::{
    Clipboard, FileKind, FileResolver, ImageHandle, OpenedFile, PlatformError, Revealer,
};
pub use preferences::Preferences;
pub use recents::{MAX_HOTKEY_SLOT, MAX_RECENTS, RecentEntry, RecentKind, Recents};
pub use render::{RenderOptions, render_document};
pub use store::{FileStore, MemoryStore, Store, StoreError};
pub use viewer::{Content, OpenOutcome, Viewer};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Failed to read file: {message}")]
    FileRead { path: String, message: String },

    #[error("File is too large (> {limit_mb:.1}MB)")]
    FileTooLarge { size: u64, limit_mb: f64 },

    #[error("Image too large: {width}x{height} (~{estimated_mb:.1} MB RGBA). Limit ~{limit_mb:.0} MB")]
    ImageTooLarge {
        width: u32,
        height: u32,
        estimated_mb: f64,
        limit_mb: f64,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No file is open")]
    NoContent,

    #[error("Recent entry cannot be reopened: {0}")]
    RecentUnavailable(String),
}
