//! In-memory history of sent items.
//!
//! The store keeps every staged entry in insertion order for the lifetime of
//! the process. Text entries can be masked in the display output; hotkey
//! entries are always shown as-is.

use crate::error::{Result, StagerError};

/// What kind of entry a history item records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Text,
    Hotkey,
}

/// A single entry in the send history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub content: String,
    pub kind: ItemKind,
    pub visible: bool,
}

impl HistoryItem {
    /// Display string for front-end listing.
    ///
    /// Hotkeys are tagged and never masked. Hidden text entries render as a
    /// run of `*` matching the content length so the entry stays selectable
    /// without leaking its value.
    pub fn display_text(&self) -> String {
        match self.kind {
            ItemKind::Hotkey => format!("[HOTKEY] {}", self.content),
            ItemKind::Text => {
                if self.visible {
                    self.content.clone()
                } else {
                    "*".repeat(self.content.chars().count())
                }
            }
        }
    }
}

/// Ordered, unbounded store of sent items.
///
/// Insertion order is chronological order. Entries are never deduplicated and
/// never persisted; the history lives only as long as the process.
///
/// # Example
///
/// ```
/// use key_stager::HistoryStore;
///
/// let mut store = HistoryStore::new(true);
/// store.add_text("hunter2");
/// store.add_hotkey("CTRL+V");
///
/// assert_eq!(store.display_items(), vec!["*******", "[HOTKEY] CTRL+V"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
    obfuscate_by_default: bool,
}

impl HistoryStore {
    pub fn new(obfuscate_by_default: bool) -> Self {
        Self {
            items: Vec::new(),
            obfuscate_by_default,
        }
    }

    /// Update the default-obfuscation setting for future text entries.
    /// Existing entries keep their current visibility.
    pub fn set_obfuscate_by_default(&mut self, obfuscate: bool) {
        self.obfuscate_by_default = obfuscate;
    }

    pub fn obfuscate_by_default(&self) -> bool {
        self.obfuscate_by_default
    }

    /// Append a text entry. It starts hidden when default obfuscation is on.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.items.push(HistoryItem {
            content: text.into(),
            kind: ItemKind::Text,
            visible: !self.obfuscate_by_default,
        });
    }

    /// Append a hotkey entry. Hotkeys are always visible.
    pub fn add_hotkey(&mut self, combo: impl Into<String>) {
        self.items.push(HistoryItem {
            content: combo.into(),
            kind: ItemKind::Hotkey,
            visible: true,
        });
    }

    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    /// Remove the entry at `index`. Out-of-range indices leave the store
    /// untouched and report the failure.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(StagerError::index_out_of_range(index, self.items.len()));
        }
        self.items.remove(index);
        Ok(())
    }

    /// Flip visibility of the text entry at `index`.
    ///
    /// Fails without changing state when the index is out of range or the
    /// entry is a hotkey.
    pub fn toggle_visibility(&mut self, index: usize) -> Result<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| StagerError::index_out_of_range(index, len))?;
        if item.kind == ItemKind::Hotkey {
            return Err(StagerError::hotkey_always_visible(index));
        }
        item.visible = !item.visible;
        Ok(())
    }

    /// Bulk visibility toggle over all text entries, majority rule.
    ///
    /// Reveals everything only when hidden entries are a strict majority;
    /// otherwise (including an exact tie) hides everything. Hotkey entries
    /// are untouched, and an all-hotkey or empty store is a no-op.
    pub fn toggle_all(&mut self) {
        let text_count = self
            .items
            .iter()
            .filter(|item| item.kind == ItemKind::Text)
            .count();
        if text_count == 0 {
            return;
        }

        let hidden_count = self
            .items
            .iter()
            .filter(|item| item.kind == ItemKind::Text && !item.visible)
            .count();
        let reveal_all = hidden_count * 2 > text_count;

        for item in &mut self.items {
            if item.kind == ItemKind::Text {
                item.visible = reveal_all;
            }
        }
    }

    /// Display strings for every entry, in order.
    pub fn display_items(&self) -> Vec<String> {
        self.items.iter().map(HistoryItem::display_text).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
