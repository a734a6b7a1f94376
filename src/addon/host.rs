//! Interface to the flashcard application hosting the add-on

use std::fmt;

use anyhow::Result;

/// Identifier of a note in the host's collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main window state, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// Reviewing cards
    Review,
    /// Deck list; the editor's context menu is only extended here
    DeckBrowser,
    Other,
}

/// Everything the add-on needs from the host application
///
/// Persistence, undo and the review session itself belong to the host; the
/// add-on only queries tags and asks for single tags to be added or removed.
pub trait Host {
    fn state(&self) -> HostState;

    /// Note of the card currently under review, if any
    fn reviewing_note(&self) -> Option<NoteId>;

    /// Tags on `note`, or `None` if the note doesn't exist
    fn note_tags(&self, note: NoteId) -> Option<Vec<String>>;

    /// Every tag name used anywhere in the collection
    fn all_tag_names(&self) -> Vec<String>;

    /// Add `tag` to `note` and persist the note
    fn add_tag(&mut self, note: NoteId, tag: &str) -> Result<()>;

    /// Remove `tag` from `note` and persist the note
    fn remove_tag(&mut self, note: NoteId, tag: &str) -> Result<()>;

    /// Short-lived notification (tooltip)
    fn tooltip(&mut self, message: &str);

    /// Blocking notification, used for configuration errors
    fn show_info(&mut self, message: &str);

    /// Re-render the card under review after its note changed
    fn redraw_reviewer(&mut self);

    /// Reload `note` into the open editor after it changed
    fn reload_editor(&mut self, note: NoteId);
}
