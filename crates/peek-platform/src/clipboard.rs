//! System clipboard.

use peek_core::{Clipboard, PlatformError};

/// The OS clipboard, opened lazily on first use.
///
/// Opening can fail on headless systems; that failure is reported from
/// [`Clipboard::set_text`] rather than at construction.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, PlatformError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| PlatformError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.handle()?
            .set_text(text.to_owned())
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }
}
