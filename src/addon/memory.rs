//! In-memory host, used by the command-line harness and by tests

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Result, bail};

use super::host::{Host, HostState, NoteId};

/// A minimal collection: notes with tag sets, plus the bits of UI state the add-on
/// reads. Notifications are recorded instead of shown.
#[derive(Debug)]
pub struct MemoryHost {
    pub state: HostState,
    pub reviewing: Option<NoteId>,
    notes: BTreeMap<NoteId, BTreeSet<String>>,
    /// Tags known to the collection that aren't on any note (e.g. from deleted notes)
    extra_tags: BTreeSet<String>,
    pub tooltips: Vec<String>,
    pub infos: Vec<String>,
    pub reviewer_redraws: usize,
    pub editor_reloads: Vec<NoteId>,
}

impl MemoryHost {
    pub fn new(state: HostState) -> Self {
        Self {
            state,
            reviewing: None,
            notes: BTreeMap::new(),
            extra_tags: BTreeSet::new(),
            tooltips: Vec::new(),
            infos: Vec::new(),
            reviewer_redraws: 0,
            editor_reloads: Vec::new(),
        }
    }

    /// Add a note with the given tags, returning its id
    pub fn add_note<I, S>(&mut self, tags: I) -> NoteId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = NoteId(self.notes.keys().last().map_or(1, |last| last.0 + 1));
        self.notes.insert(id, tags.into_iter().map(Into::into).collect());
        id
    }

    /// Register tag names with the collection without attaching them to a note
    pub fn register_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_tags.extend(tags.into_iter().map(Into::into));
    }

    fn note_mut(&mut self, note: NoteId) -> Result<&mut BTreeSet<String>> {
        match self.notes.get_mut(&note) {
            Some(tags) => Ok(tags),
            None => bail!("Note {} does not exist", note),
        }
    }
}

impl Host for MemoryHost {
    fn state(&self) -> HostState {
        self.state
    }

    fn reviewing_note(&self) -> Option<NoteId> {
        self.reviewing
    }

    fn note_tags(&self, note: NoteId) -> Option<Vec<String>> {
        self.notes
            .get(&note)
            .map(|tags| tags.iter().cloned().collect())
    }

    fn all_tag_names(&self) -> Vec<String> {
        self.notes
            .values()
            .flatten()
            .chain(self.extra_tags.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn add_tag(&mut self, note: NoteId, tag: &str) -> Result<()> {
        self.note_mut(note)?.insert(tag.to_string());
        Ok(())
    }

    fn remove_tag(&mut self, note: NoteId, tag: &str) -> Result<()> {
        self.note_mut(note)?.remove(tag);
        Ok(())
    }

    fn tooltip(&mut self, message: &str) {
        self.tooltips.push(message.to_string());
    }

    fn show_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn redraw_reviewer(&mut self) {
        self.reviewer_redraws += 1;
    }

    fn reload_editor(&mut self, note: NoteId) {
        self.editor_reloads.push(note);
    }
}
