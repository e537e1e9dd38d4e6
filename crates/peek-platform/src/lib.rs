//! # Peek Platform
//!
//! Native implementations of the seams declared in `peek_core::platform`:
//!
//! - [`NativeResolver`]: `rfd` file dialog plus filesystem loading
//! - [`SystemClipboard`]: the OS clipboard through `arboard`
//! - [`SystemRevealer`]: the OS file manager (`explorer`, `open -R`, `xdg-open`)
//!
//! ## Learning: Keeping the Core Testable
//!
//! Nothing in `peek-core` links against a GUI toolkit or spawns a process.
//! Everything that needs a real desktop lives here, so the core's tests can
//! run headless with in-memory fakes.

mod clipboard;
mod resolver;
mod reveal;

pub use clipboard::SystemClipboard;
pub use resolver::{IMAGE_EXTENSIONS, NativeResolver, TEXT_EXTENSIONS, file_kind, is_supported_image};
pub use reveal::SystemRevealer;
