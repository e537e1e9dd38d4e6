//! Showing files in the OS file manager.

use std::path::Path;
use std::process::Command;

use peek_core::Revealer;

/// Opens the platform file manager at a file.
///
/// Windows and macOS select the file itself; elsewhere the containing
/// directory is opened with `xdg-open`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRevealer;

impl SystemRevealer {
    /// The command that reveals `path`, or `None` when there is nothing to
    /// open (a bare file name on Linux has no parent to show).
    pub fn command(path: &Path) -> Option<Command> {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("explorer");
            cmd.arg(format!("/select,{}", path.display()));
            Some(cmd)
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg("-R").arg(path);
            Some(cmd)
        } else {
            let parent = path.parent().filter(|p| !p.as_os_str().is_empty())?;
            let mut cmd = Command::new("xdg-open");
            cmd.arg(parent);
            Some(cmd)
        }
    }
}

impl Revealer for SystemRevealer {
    fn reveal(&self, path: &Path) {
        let Some(mut cmd) = Self::command(path) else {
            tracing::debug!("Nothing to reveal for {}", path.display());
            return;
        };
        if let Err(e) = cmd.spawn() {
            tracing::warn!("Could not open file manager for {}: {}", path.display(), e);
        }
    }
}
