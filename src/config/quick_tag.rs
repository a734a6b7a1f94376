//! Value types held by a loaded configuration

use crate::constants::defaults;

/// A tag pre-registered in `tags.json`, shown in the primary menu and optionally
/// bound to a keyboard shortcut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTag {
    name: String,
    shortcut: String,
}

impl QuickTag {
    /// Create a quick tag. `name` must be non-blank; the parser guarantees this.
    pub fn new(name: impl Into<String>, shortcut: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shortcut: shortcut.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shortcut text as written by the user; empty means no shortcut is bound
    pub fn shortcut(&self) -> &str {
        &self.shortcut
    }

    pub fn has_shortcut(&self) -> bool {
        !self.shortcut.trim().is_empty()
    }
}

/// Settings for the "Other tags..." overflow sub-menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub other_tags_visible: bool,
    pub other_tags_limit: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            other_tags_visible: defaults::OTHER_TAGS_VISIBLE,
            other_tags_limit: defaults::OTHER_TAGS_LIMIT,
        }
    }
}
