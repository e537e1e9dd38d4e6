//! Recently opened files.
//!
//! The list is kept oldest-first, deduplicated by (kind, identifier) and
//! capped at [`MAX_RECENTS`]. Hotkey slots count from the other end: slot 1
//! is the most recent entry.

use serde::{Deserialize, Serialize};

use crate::store::{self, Store};

/// Store key for the recents list.
pub const RECENTS_KEY: &str = "recents";

/// Number of entries kept.
pub const MAX_RECENTS: usize = 10;

/// Highest numeric hotkey slot.
pub const MAX_HOTKEY_SLOT: usize = 9;

/// How a recent entry refers to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentKind {
    /// A filesystem path that can be reopened directly
    Path,
    /// An opaque handle id issued by the platform layer
    Handle,
    /// A bare display name with no way back to the file
    Name,
}

/// One remembered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    #[serde(rename = "type")]
    pub kind: RecentKind,

    #[serde(rename = "value")]
    pub identifier: String,

    #[serde(default)]
    pub label: String,
}

impl RecentEntry {
    pub fn path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            kind: RecentKind::Path,
            label: path.clone(),
            identifier: path,
        }
    }

    pub fn handle(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: RecentKind::Handle,
            identifier: id.into(),
            label: label.into(),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: RecentKind::Name,
            label: name.clone(),
            identifier: name,
        }
    }

    /// Text shown in the recents list.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.identifier
        } else {
            &self.label
        }
    }

    fn same_target(&self, other: &RecentEntry) -> bool {
        self.kind == other.kind && self.identifier == other.identifier
    }
}

/// Older stores kept bare path strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecent {
    Entry(RecentEntry),
    Legacy(String),
}

impl From<StoredRecent> for RecentEntry {
    fn from(stored: StoredRecent) -> Self {
        match stored {
            StoredRecent::Entry(entry) => entry,
            StoredRecent::Legacy(path) => RecentEntry::path(path),
        }
    }
}

/// The recents list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recents {
    /// Oldest first
    entries: Vec<RecentEntry>,
}

impl Recents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the list, falling back to empty if the store fails.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        match store::load::<Vec<StoredRecent>, S>(store, RECENTS_KEY) {
            Ok(stored) => {
                let mut recents = Self::new();
                for entry in stored.unwrap_or_default() {
                    recents.push(entry.into());
                }
                recents
            }
            Err(e) => {
                tracing::warn!("Could not load recents, starting empty: {}", e);
                Self::new()
            }
        }
    }

    /// Saves the list; failures are logged and otherwise ignored.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        if let Err(e) = store::save(store, RECENTS_KEY, &self.entries) {
            tracing::warn!("Could not save recents: {}", e);
        }
    }

    /// Records an opened file as the most recent entry.
    pub fn push(&mut self, entry: RecentEntry) {
        self.entries.retain(|e| !e.same_target(&entry));
        self.entries.push(entry);
        if self.entries.len() > MAX_RECENTS {
            let overflow = self.entries.len() - MAX_RECENTS;
            self.entries.drain(0..overflow);
        }
    }

    /// Returns the entry bound to a numeric hotkey (1 = most recent).
    pub fn hotkey(&self, slot: usize) -> Option<&RecentEntry> {
        if slot == 0 || slot > MAX_HOTKEY_SLOT || slot > self.entries.len() {
            return None;
        }
        self.entries.get(self.entries.len() - slot)
    }

    /// Iterates from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &RecentEntry> {
        self.entries.iter().rev()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
