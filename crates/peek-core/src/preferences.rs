//! Display preferences.
//!
//! Preferences are stored as one JSON object under the `settings` key and
//! written back on every change. A store that cannot be read or written
//! never stops the viewer: failures are logged and the in-memory values
//! stay in effect.

use peek_syntax::Theme;
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::{self, Store};

/// Store key for the preference bag.
pub const SETTINGS_KEY: &str = "settings";

/// Multiplicative step for one zoom increment.
pub const ZOOM_STEP: f32 = 1.1;

pub const TEXT_ZOOM_MIN: f32 = 0.6;
pub const TEXT_ZOOM_MAX: f32 = 3.0;
pub const IMAGE_ZOOM_MIN: f32 = 0.1;
pub const IMAGE_ZOOM_MAX: f32 = 6.0;

/// User-visible display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Dark color scheme
    pub dark: bool,

    /// Fit images to the window
    pub fit: bool,

    /// Soft-wrap long lines
    pub wrap: bool,

    /// Show the line-number gutter
    #[serde(rename = "ln")]
    pub line_numbers: bool,

    /// Text zoom factor
    pub text_zoom: f32,

    /// Image zoom factor (used when not fitting)
    pub image_zoom: f32,

    /// Code color theme
    #[serde(deserialize_with = "lenient_theme")]
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark: false,
            fit: false,
            wrap: true,
            line_numbers: true,
            text_zoom: 1.0,
            image_zoom: 1.0,
            theme: Theme::default(),
        }
    }
}

impl Preferences {
    /// Loads preferences, falling back to defaults if the store fails.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        match store::load::<Self, S>(store, SETTINGS_KEY) {
            Ok(Some(prefs)) => prefs.sanitized(),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Could not load preferences, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Saves preferences; failures are logged and otherwise ignored.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        if let Err(e) = store::save(store, SETTINGS_KEY, self) {
            tracing::warn!("Could not save preferences: {}", e);
        }
    }

    /// Sets the text zoom, clamped to its allowed range.
    pub fn set_text_zoom(&mut self, level: f32) {
        self.text_zoom = clamp_zoom(level, TEXT_ZOOM_MIN, TEXT_ZOOM_MAX);
    }

    /// Multiplies the text zoom by `factor`, clamped.
    pub fn zoom_text(&mut self, factor: f32) {
        self.set_text_zoom(self.text_zoom * factor);
    }

    /// Sets the image zoom, clamped to its allowed range.
    pub fn set_image_zoom(&mut self, level: f32) {
        self.image_zoom = clamp_zoom(level, IMAGE_ZOOM_MIN, IMAGE_ZOOM_MAX);
    }

    /// Brings stored values back into range; a zero or garbage zoom
    /// becomes 1.0.
    fn sanitized(mut self) -> Self {
        if !(self.text_zoom.is_finite() && self.text_zoom > 0.0) {
            self.text_zoom = 1.0;
        }
        if !(self.image_zoom.is_finite() && self.image_zoom > 0.0) {
            self.image_zoom = 1.0;
        }
        self.set_text_zoom(self.text_zoom);
        self.set_image_zoom(self.image_zoom);
        self
    }
}

// An unknown theme name only resets the theme, not the whole bag.
fn lenient_theme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Theme, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|name| name.parse().ok())
        .unwrap_or_default())
}

fn clamp_zoom(level: f32, min: f32, max: f32) -> f32 {
    if level.is_nan() { min } else { level.clamp(min, max) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use serde_json::{Value, json};

    struct BrokenStore;

    impl Store for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            Err(StoreError::NoConfigDir)
        }

        fn set(&mut self, _key: &str, _value: Value) -> Result<(), StoreError> {
            Err(StoreError::NoConfigDir)
        }
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, json!({"dark": true})).unwrap();
        let prefs = Preferences::load(&store);
        assert!(prefs.dark);
        assert!(prefs.wrap);
        assert!(prefs.line_numbers);
        assert!(!prefs.fit);
        assert_eq!(prefs.text_zoom, 1.0);
        assert_eq!(prefs.image_zoom, 1.0);
        assert_eq!(prefs.theme, Theme::Classic);
    }

    #[test]
    fn test_theme_is_persisted_by_name() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            theme: Theme::NightOwl,
            ..Preferences::default()
        };
        prefs.save(&mut store);
        let raw = store.get(SETTINGS_KEY).unwrap().unwrap();
        assert_eq!(raw["theme"], json!("night-owl"));
        assert_eq!(Preferences::load(&store).theme, Theme::NightOwl);
    }

    #[test]
    fn test_unknown_theme_keeps_other_settings() {
        let mut store = MemoryStore::new();
        store
            .set(SETTINGS_KEY, json!({"dark": true, "theme": "solarized"}))
            .unwrap();
        let prefs = Preferences::load(&store);
        assert!(prefs.dark);
        assert_eq!(prefs.theme, Theme::Classic);

        store.set(SETTINGS_KEY, json!({"theme": 7})).unwrap();
        assert_eq!(Preferences::load(&store).theme, Theme::Classic);
    }

    #[test]
    fn test_persisted_field_names() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            line_numbers: false,
            text_zoom: 1.5,
            ..Preferences::default()
        };
        prefs.save(&mut store);
        let raw = store.get(SETTINGS_KEY).unwrap().unwrap();
        assert_eq!(raw["ln"], json!(false));
        assert_eq!(raw["textZoom"], json!(1.5));
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn test_broken_store_falls_back() {
        let mut store = BrokenStore;
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        prefs.save(&mut store);
    }

    #[test]
    fn test_zoom_clamping() {
        let mut prefs = Preferences::default();
        prefs.set_text_zoom(10.0);
        assert_eq!(prefs.text_zoom, TEXT_ZOOM_MAX);
        prefs.zoom_text(0.01);
        assert_eq!(prefs.text_zoom, TEXT_ZOOM_MIN);
        prefs.set_image_zoom(0.0);
        assert_eq!(prefs.image_zoom, IMAGE_ZOOM_MIN);
    }

    #[test]
    fn test_garbage_zoom_is_reset() {
        let mut store = MemoryStore::new();
        store
            .set(SETTINGS_KEY, json!({"textZoom": 0, "imageZoom": 50.0}))
            .unwrap();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.text_zoom, 1.0);
        assert_eq!(prefs.image_zoom, IMAGE_ZOOM_MAX);
    }
}
