//! The viewer state machine.
//!
//! ## Learning: The Facade Pattern
//!
//! `Viewer` is the one object a front end talks to. It owns the open
//! content, the search state and the persisted preferences, and reaches
//! the outside world only through the traits in [`crate::platform`] and
//! [`crate::store`]. A front end forwards user actions to it and redraws
//! from [`Viewer::render`] and [`Viewer::status`].

use std::path::{Path, PathBuf};

use peek_buffer::{Direction, Match, MatchIndex, MatchNavigator, TextDocument};
use peek_syntax::{LanguageTag, Theme};

use crate::config::Config;
use crate::image::{fit_scale, texture_mib};
use crate::platform::{Clipboard, FileKind, FileResolver, ImageHandle, OpenedFile, Revealer};
use crate::preferences::{Preferences, ZOOM_STEP};
use crate::recents::{RecentEntry, RecentKind, Recents};
use crate::render::{RenderOptions, render_document};
use crate::store::Store;
use crate::{CoreError, CoreResult};

/// What is currently on screen.
#[derive(Debug, Clone)]
pub enum Content {
    Text {
        path: String,
        document: TextDocument,
        tag: LanguageTag,
    },
    Image {
        path: String,
        image: ImageHandle,
    },
}

impl Content {
    pub fn path(&self) -> &str {
        match self {
            Content::Text { path, .. } | Content::Image { path, .. } => path,
        }
    }
}

/// Result of an open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Cancelled,
    Failed(String),
}

/// The viewer.
pub struct Viewer<S: Store> {
    /// Where preferences and recents are persisted
    store: S,

    config: Config,
    preferences: Preferences,
    recents: Recents,

    /// Open text or image, if any
    content: Option<Content>,

    /// Search state; only meaningful for text content
    query: String,
    index: MatchIndex,
    navigator: MatchNavigator,

    /// Size of the image area, once the front end has reported it
    viewport: Option<(f32, f32)>,

    /// Transient status override (e.g. after copying the path)
    notice: Option<String>,

    /// Message from the last failed open
    error_message: Option<String>,
}

impl<S: Store> Viewer<S> {
    /// Creates a viewer, loading preferences and recents from `store`.
    pub fn new(store: S, config: Config) -> Self {
        let preferences = Preferences::load(&store);
        let recents = Recents::load(&store);
        Self {
            store,
            config,
            preferences,
            recents,
            content: None,
            query: String::new(),
            index: MatchIndex::default(),
            navigator: MatchNavigator::default(),
            viewport: None,
            notice: None,
            error_message: None,
        }
    }

    // ==================== Opening ====================

    /// Asks the resolver for a file and shows it.
    pub fn open(&mut self, resolver: &mut dyn FileResolver) -> OpenOutcome {
        match resolver.resolve_file() {
            Some(file) => {
                tracing::debug!("Picked {}", file.path());
                self.show(file)
            }
            None => {
                tracing::debug!("Open cancelled");
                OpenOutcome::Cancelled
            }
        }
    }

    /// Opens a file by path.
    pub fn open_path(&mut self, resolver: &mut dyn FileResolver, path: &Path) -> OpenOutcome {
        let file = resolver.resolve_path(path);
        self.show(file)
    }

    /// Reopens the recent entry bound to hotkey `slot` (1 = most recent).
    ///
    /// An empty slot is a no-op. Entries that are not plain paths cannot be
    /// reached again from here and are reported as unavailable.
    pub fn open_recent(
        &mut self,
        resolver: &mut dyn FileResolver,
        slot: usize,
    ) -> CoreResult<OpenOutcome> {
        let Some(entry) = self.recents.hotkey(slot).cloned() else {
            return Ok(OpenOutcome::Cancelled);
        };
        if entry.kind != RecentKind::Path {
            tracing::info!(
                "Skipping recent '{}': {:?} entries cannot be reopened",
                entry.display_label(),
                entry.kind
            );
            return Err(CoreError::RecentUnavailable(entry.display_label().to_string()));
        }
        Ok(self.open_path(resolver, Path::new(&entry.identifier)))
    }

    /// Opens the next or previous file of the same kind (text or image)
    /// in the open file's folder, wrapping around at either end. Nothing
    /// happens when no file is open or it has no siblings.
    pub fn open_neighbor(
        &mut self,
        resolver: &mut dyn FileResolver,
        direction: Direction,
    ) -> OpenOutcome {
        let (path, kind) = match &self.content {
            Some(Content::Text { path, .. }) => (PathBuf::from(path), FileKind::Text),
            Some(Content::Image { path, .. }) => (PathBuf::from(path), FileKind::Image),
            None => return OpenOutcome::Cancelled,
        };
        let siblings = resolver.siblings(&path, kind);
        match neighbor(&siblings, &path, direction) {
            Some(next) => {
                tracing::debug!("Stepping {:?} to {}", direction, next.display());
                self.open_path(resolver, &next)
            }
            None => OpenOutcome::Cancelled,
        }
    }

    fn show(&mut self, file: OpenedFile) -> OpenOutcome {
        match file {
            OpenedFile::Text {
                path,
                content,
                handle,
            } => {
                let document = TextDocument::from(content);
                let tag = LanguageTag::from_path(&path);
                tracing::debug!(
                    "Opened text {} ({} lines, language {})",
                    path,
                    document.line_count(),
                    tag
                );
                if document.is_lossy() {
                    tracing::info!("{} is not valid UTF-8; invalid bytes were replaced", path);
                }
                self.remember(&path, handle);
                self.content = Some(Content::Text {
                    path,
                    document,
                    tag,
                });
                self.reindex();
            }
            OpenedFile::Image {
                path,
                image,
                handle,
            } => {
                tracing::debug!("Opened image {} ({}x{})", path, image.width, image.height);
                self.remember(&path, handle);
                self.preferences.image_zoom = 1.0;
                if let Some(viewport) = self.viewport {
                    self.preferences.fit = fit_scale(viewport, (image.width, image.height)) < 1.0;
                }
                self.preferences.save(&mut self.store);
                self.content = Some(Content::Image { path, image });
                self.reindex();
            }
            OpenedFile::Error { path, message } => {
                tracing::warn!("Could not open {}: {}", path, message);
                self.error_message = Some(message.clone());
                return OpenOutcome::Failed(message);
            }
        }
        self.error_message = None;
        self.notice = None;
        OpenOutcome::Opened
    }

    fn remember(&mut self, path: &str, handle: Option<String>) {
        let entry = match handle {
            Some(id) => RecentEntry::handle(id, path),
            None => RecentEntry::path(path),
        };
        self.recents.push(entry);
        self.recents.save(&mut self.store);
    }

    /// Overrides the detected language of the open text. Returns false when
    /// no text is open.
    pub fn set_language(&mut self, language: LanguageTag) -> bool {
        match &mut self.content {
            Some(Content::Text { tag, .. }) => {
                *tag = language;
                true
            }
            _ => false,
        }
    }

    /// Closes whatever is open.
    pub fn clear_view(&mut self) {
        self.content = None;
        self.error_message = None;
        self.notice = None;
        self.reindex();
    }

    // ==================== Search ====================

    /// Replaces the search query and starts navigation over.
    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.reindex();
        tracing::debug!("Query {:?}: {} match(es)", self.query, self.index.count());
    }

    fn reindex(&mut self) {
        self.index = match &self.content {
            Some(Content::Text { document, .. }) => MatchIndex::new(&document.text(), &self.query),
            _ => MatchIndex::default(),
        };
        self.navigator.reset(self.index.count());
    }

    /// Moves to the next or previous match, wrapping around.
    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        self.navigator.step(direction)
    }

    /// Emphasizes match `idx` directly.
    pub fn select_match(&mut self, idx: usize) -> Option<usize> {
        self.navigator.select(idx)
    }

    /// The emphasized match, if navigation has started.
    pub fn current_match(&self) -> Option<Match> {
        self.navigator.current().and_then(|i| self.index.get(i))
    }

    /// Line holding the emphasized match, for scrolling it into view.
    pub fn current_match_line(&self) -> Option<usize> {
        let m = self.current_match()?;
        match &self.content {
            Some(Content::Text { document, .. }) => document.char_to_line(m.start).ok(),
            _ => None,
        }
    }

    pub fn match_count(&self) -> usize {
        self.index.count()
    }

    /// `"N match(es)"`, or empty when nothing matches.
    pub fn match_summary(&self) -> String {
        match self.index.count() {
            0 => String::new(),
            n => format!("{} match(es)", n),
        }
    }

    // ==================== Display ====================

    /// Renders the open text document; `None` for images or nothing open.
    pub fn render(&self) -> Option<String> {
        self.render_with(self.render_options())
    }

    /// Options [`Viewer::render`] uses: the gutter preference and theme,
    /// with syntax colors dropped over the highlight limit and both colors
    /// and line numbers dropped for large files.
    pub fn render_options(&self) -> RenderOptions {
        let (syntax, large) = match &self.content {
            Some(Content::Text { document, .. }) => {
                let large = self.is_large(document);
                let syntax =
                    !large && document.len_chars() <= self.config.highlight.max_highlight_chars;
                (syntax, large)
            }
            _ => (true, false),
        };
        RenderOptions {
            line_numbers: self.preferences.line_numbers && !large,
            syntax,
            theme: self.preferences.theme,
        }
    }

    fn is_large(&self, document: &TextDocument) -> bool {
        let limits = &self.config.highlight;
        document.len_bytes() >= limits.large_text_bytes
            || document.line_count() >= limits.large_text_lines
    }

    /// CSS for the current theme.
    pub fn stylesheet(&self) -> String {
        self.preferences.theme.stylesheet()
    }

    /// Renders the open text document with explicit options.
    pub fn render_with(&self, options: RenderOptions) -> Option<String> {
        let Some(Content::Text { document, tag, .. }) = &self.content else {
            return None;
        };
        Some(render_document(
            document,
            *tag,
            &self.index,
            self.navigator.current(),
            options,
        ))
    }

    /// The status line.
    pub fn status(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        match &self.content {
            None => String::new(),
            Some(Content::Text { path, document, .. }) => {
                let mut status = format!("{} - {} lines", path, document.line_count());
                if self.is_large(document) {
                    status.push_str(" - Large file: reduced features");
                }
                if document.is_lossy() {
                    status.push_str(" - UTF-8 (lossy)");
                }
                status
            }
            Some(Content::Image { path, image }) => {
                let zoom = self.effective_image_zoom().unwrap_or(1.0);
                let fit_note = if self.preferences.fit { " Fit: on" } else { "" };
                format!(
                    "{} - {}x{} px - Zoom: {:.0}% - Texture ~{:.1} MB{}",
                    path,
                    image.width,
                    image.height,
                    zoom * 100.0,
                    texture_mib(image.width, image.height),
                    fit_note
                )
            }
        }
    }

    /// Reports the size of the image area.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Some((width, height));
    }

    /// Scale the image is drawn at: the fit scale when fitting, else the
    /// stored zoom.
    pub fn effective_image_zoom(&self) -> Option<f32> {
        let Some(Content::Image { image, .. }) = &self.content else {
            return None;
        };
        match (self.preferences.fit, self.viewport) {
            (true, Some(viewport)) => Some(fit_scale(viewport, (image.width, image.height))),
            _ => Some(self.preferences.image_zoom),
        }
    }

    // ==================== Platform Actions ====================

    /// Copies the open file's path to the clipboard. Clipboard failures
    /// are logged and otherwise ignored.
    pub fn copy_path(&mut self, clipboard: &mut dyn Clipboard) -> CoreResult<()> {
        let path = self.current_path().ok_or(CoreError::NoContent)?.to_string();
        match clipboard.set_text(&path) {
            Ok(()) => self.notice = Some("Path copied to clipboard".to_string()),
            Err(e) => tracing::debug!("Copy path failed: {}", e),
        }
        Ok(())
    }

    /// Shows the open file in the OS file browser.
    pub fn reveal(&self, revealer: &dyn Revealer) -> CoreResult<()> {
        let path = self.current_path().ok_or(CoreError::NoContent)?;
        revealer.reveal(Path::new(path));
        Ok(())
    }

    // ==================== Preferences ====================

    pub fn toggle_dark(&mut self) -> bool {
        self.preferences.dark = !self.preferences.dark;
        self.persist();
        self.preferences.dark
    }

    pub fn toggle_wrap(&mut self) -> bool {
        self.preferences.wrap = !self.preferences.wrap;
        self.persist();
        self.preferences.wrap
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        self.preferences.line_numbers = !self.preferences.line_numbers;
        self.persist();
        self.preferences.line_numbers
    }

    pub fn set_fit(&mut self, fit: bool) {
        self.preferences.fit = fit;
        self.persist();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!("Theme: {}", theme);
        self.preferences.theme = theme;
        self.persist();
    }

    /// Multiplies the text zoom by `factor` (clamped).
    pub fn zoom_text(&mut self, factor: f32) -> f32 {
        self.preferences.zoom_text(factor);
        self.persist();
        self.preferences.text_zoom
    }

    pub fn zoom_image_in(&mut self) -> f32 {
        self.set_image_zoom(self.preferences.image_zoom * ZOOM_STEP)
    }

    pub fn zoom_image_out(&mut self) -> f32 {
        self.set_image_zoom(self.preferences.image_zoom / ZOOM_STEP)
    }

    pub fn reset_image_zoom(&mut self) -> f32 {
        self.set_image_zoom(1.0)
    }

    // Manual zoom always leaves fit mode.
    fn set_image_zoom(&mut self, level: f32) -> f32 {
        self.preferences.fit = false;
        self.preferences.set_image_zoom(level);
        self.persist();
        self.preferences.image_zoom
    }

    pub fn clear_recents(&mut self) {
        self.recents.clear();
        self.recents.save(&mut self.store);
    }

    fn persist(&mut self) {
        self.notice = None;
        self.preferences.save(&mut self.store);
    }

    // ==================== Accessors ====================

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn current_path(&self) -> Option<&str> {
        self.content.as_ref().map(Content::path)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn match_index(&self) -> &MatchIndex {
        &self.index
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn recents(&self) -> &Recents {
        &self.recents
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Picks the file after (or before) `current` among `siblings` by name,
/// wrapping around. `current` need not be one of them.
fn neighbor(siblings: &[PathBuf], current: &Path, direction: Direction) -> Option<PathBuf> {
    let name = current.file_name()?;
    let mut others: Vec<&PathBuf> = siblings
        .iter()
        .filter(|p| p.file_name() != Some(name))
        .collect();
    others.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let picked = match direction {
        Direction::Forward => others
            .iter()
            .find(|p| p.file_name() > Some(name))
            .or(others.first()),
        Direction::Backward => others
            .iter()
            .rev()
            .find(|p| p.file_name() < Some(name))
            .or(others.last()),
    };
    picked.map(|p| (*p).clone())
}
