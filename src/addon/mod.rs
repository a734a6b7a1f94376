//! Host integration
//!
//! [`QuickTags`] is the object the host's extension points call into: it builds
//! context menus, lists shortcuts to register, and toggles tags on notes. It owns
//! the [`ConfigStore`] and reloads it before every menu or shortcut rebuild, so
//! edits to `tags.json` take effect without restarting the host.

pub mod host;
pub mod memory;
pub mod menu;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{ConfigDocument, ConfigError, ConfigStore, Shortcut};
use crate::constants::{app, ui};
use crate::tags;

pub use host::{Host, HostState, NoteId};
pub use memory::MemoryHost;
pub use menu::{ContextMenu, MenuSurface, ShortcutBinding, SubMenu, TagAction};

/// What triggered a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOrigin {
    /// Reviewer context menu
    Reviewer,
    /// Editor context menu for the given note
    Editor(NoteId),
    /// Review shortcut; the note is resolved when the shortcut fires
    Shortcut,
}

/// Result of toggling a tag on a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added(NoteId),
    Removed(NoteId),
}

pub struct QuickTags {
    store: ConfigStore,
}

impl QuickTags {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Load the configuration and create the add-on
    ///
    /// On a configuration error the user is told via [`Host::show_info`] and `None`
    /// is returned: the caller must not register any hooks.
    pub fn start(path: impl Into<PathBuf>, host: &mut dyn Host) -> Option<Self> {
        match ConfigStore::open(path) {
            Ok(store) => {
                info!(
                    path = %store.path().display(),
                    quick_tags = store.quick_tags().len(),
                    "Quick tags loaded"
                );
                Some(Self::new(store))
            }
            Err(e) => {
                host.show_info(&format!("{}: {}", app::NAME, e));
                None
            }
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Build the entries to append to a context menu
    ///
    /// Returns `Ok(None)` when the host is in a state where the surface isn't
    /// extended, or when there is no note to act on.
    pub fn on_build_menu(
        &mut self,
        host: &dyn Host,
        surface: MenuSurface,
    ) -> Result<Option<ContextMenu>, ConfigError> {
        let note = match surface {
            MenuSurface::Reviewer if host.state() == HostState::Review => host.reviewing_note(),
            MenuSurface::Editor(note) if host.state() == HostState::DeckBrowser => Some(note),
            _ => return Ok(None),
        };
        let Some(note) = note else {
            return Ok(None);
        };
        let Some(note_tags) = host.note_tags(note) else {
            debug!(note = %note, "Note not found, skipping context menu");
            return Ok(None);
        };

        let document = self.store.reload()?;
        warn_duplicate_names(document);

        let action = |tag: &str| TagAction {
            tag: tag.to_string(),
            checked: note_tags.iter().any(|t| t == tag),
        };

        let quick_tags = document.quick_tag_names().map(action).collect();

        let other_tags = document.display.other_tags_visible.then(|| {
            let all = host.all_tag_names();
            let names = tags::other_tags(
                all.iter().map(String::as_str),
                document.quick_tag_names(),
                document.display.other_tags_limit,
            );
            SubMenu {
                label: ui::OTHER_TAGS_MENU.to_string(),
                actions: names.iter().map(String::as_str).map(action).collect(),
            }
        });

        Ok(Some(ContextMenu {
            surface,
            quick_tags,
            other_tags,
        }))
    }

    /// Shortcuts to register for `state`; only the review state gets any
    pub fn on_build_shortcuts(
        &mut self,
        state: HostState,
    ) -> Result<Vec<ShortcutBinding>, ConfigError> {
        if state != HostState::Review {
            return Ok(Vec::new());
        }

        let document = self.store.reload()?;
        warn_duplicate_names(document);

        let mut seen: HashMap<Shortcut, &str> = HashMap::new();
        let mut bindings = Vec::new();

        for tag in document.quick_tags.iter().filter(|t| t.has_shortcut()) {
            let parsed = match tag.shortcut().parse::<Shortcut>() {
                Ok(shortcut) => {
                    if let Some(previous) = seen.insert(shortcut.clone(), tag.name()) {
                        warn!(
                            shortcut = %shortcut,
                            first = previous,
                            second = tag.name(),
                            "Shortcut bound to more than one quick tag"
                        );
                    }
                    Some(shortcut)
                }
                Err(e) => {
                    warn!(
                        tag = tag.name(),
                        error = %e,
                        "Unrecognised shortcut, passing it to the host as written"
                    );
                    None
                }
            };

            bindings.push(ShortcutBinding {
                shortcut: tag.shortcut().to_string(),
                parsed,
                tag: tag.name().to_string(),
            });
        }

        Ok(bindings)
    }

    /// Add `tag` to the note if it's absent, otherwise remove it
    ///
    /// Returns `Ok(None)` when there is no note to act on (nothing under review).
    pub fn on_toggle_tag(
        &self,
        host: &mut dyn Host,
        tag: &str,
        origin: ToggleOrigin,
    ) -> Result<Option<Toggle>> {
        let note = match origin {
            ToggleOrigin::Reviewer | ToggleOrigin::Shortcut => host.reviewing_note(),
            ToggleOrigin::Editor(note) => Some(note),
        };
        let Some(note) = note else {
            return Ok(None);
        };
        let Some(note_tags) = host.note_tags(note) else {
            return Ok(None);
        };

        let toggle = if note_tags.iter().any(|t| t == tag) {
            host.remove_tag(note, tag)
                .with_context(|| format!("Failed to remove '{}' from note {}", tag, note))?;
            host.tooltip(&format!("Removed '{}'...", tag));
            Toggle::Removed(note)
        } else {
            host.add_tag(note, tag)
                .with_context(|| format!("Failed to add '{}' to note {}", tag, note))?;
            host.tooltip(&format!("Added '{}'...", tag));
            Toggle::Added(note)
        };

        match origin {
            ToggleOrigin::Reviewer => host.redraw_reviewer(),
            ToggleOrigin::Editor(note) => host.reload_editor(note),
            ToggleOrigin::Shortcut => {}
        }

        debug!(tag, ?toggle, "Toggled tag");
        Ok(Some(toggle))
    }
}

fn warn_duplicate_names(document: &ConfigDocument) {
    // Quick tags are sorted, so duplicates are adjacent
    for pair in document.quick_tags.windows(2) {
        if pair[0].name() == pair[1].name() {
            warn!(tag = pair[0].name(), "Quick tag configured more than once");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::constants::config::FILENAME;

    const CONFIG: &str = r#"{
        "tags": [
            { "name": "marked", "shortcut": "Ctrl+M" },
            { "name": "leech", "shortcut": "" },
            { "name": "hard", "shortcut": "Ctrl+Alt+H" }
        ],
        "other-tags": { "visible": true, "limit": 2 }
    }"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        path: PathBuf,
        addon: QuickTags,
        host: MemoryHost,
        note: NoteId,
    }

    fn fixture(config: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        fs::write(&path, config).unwrap();

        let mut host = MemoryHost::new(HostState::Review);
        let note = host.add_note(["marked", "zoology"]);
        host.add_note(["biology", "chemistry", "hard"]);
        host.reviewing = Some(note);

        let addon = QuickTags::start(&path, &mut host).unwrap();
        Fixture {
            _dir: dir,
            path,
            addon,
            host,
            note,
        }
    }

    #[test]
    fn test_start_reports_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = MemoryHost::new(HostState::Review);

        let addon = QuickTags::start(dir.path().join(FILENAME), &mut host);
        assert!(addon.is_none());
        assert_eq!(host.infos.len(), 1);
        assert!(host.infos[0].starts_with("AnkiQuickTags: Missing tags.json in "));
    }

    #[test]
    fn test_reviewer_menu() {
        let mut f = fixture(CONFIG);
        let menu = f
            .addon
            .on_build_menu(&f.host, MenuSurface::Reviewer)
            .unwrap()
            .unwrap();

        let quick: Vec<_> = menu.quick_tags.iter().map(|a| (a.tag.as_str(), a.checked)).collect();
        assert_eq!(
            quick,
            vec![("hard", false), ("leech", false), ("marked", true)]
        );

        let other = menu.other_tags.unwrap();
        assert_eq!(other.label, "Other tags...");
        let names: Vec<_> = other.actions.iter().map(|a| a.tag.as_str()).collect();
        assert_eq!(names, vec!["biology", "chemistry"]);
    }

    #[test]
    fn test_hidden_other_tags() {
        let mut f = fixture(r#"{ "tags": [{ "name": "marked" }], "other-tags": { "visible": false } }"#);
        let menu = f
            .addon
            .on_build_menu(&f.host, MenuSurface::Reviewer)
            .unwrap()
            .unwrap();
        assert!(menu.other_tags.is_none());
    }

    #[test]
    fn test_other_tags_checked_state() {
        let mut f = fixture(r#"{ "other-tags": { "limit": 10 } }"#);
        let menu = f
            .addon
            .on_build_menu(&f.host, MenuSurface::Reviewer)
            .unwrap()
            .unwrap();

        assert!(menu.quick_tags.is_empty());
        let other = menu.other_tags.unwrap();
        let checked = |tag: &str| other.actions.iter().find(|a| a.tag == tag).unwrap().checked;
        assert!(checked("zoology"));
        assert!(!checked("biology"));
    }

    #[test]
    fn test_menu_requires_matching_state() {
        let mut f = fixture(CONFIG);

        f.host.state = HostState::DeckBrowser;
        assert!(f.addon.on_build_menu(&f.host, MenuSurface::Reviewer).unwrap().is_none());

        let editor = MenuSurface::Editor(f.note);
        assert!(f.addon.on_build_menu(&f.host, editor).unwrap().is_some());

        f.host.state = HostState::Review;
        assert!(f.addon.on_build_menu(&f.host, editor).unwrap().is_none());

        f.host.reviewing = None;
        assert!(f.addon.on_build_menu(&f.host, MenuSurface::Reviewer).unwrap().is_none());
    }

    #[test]
    fn test_menu_rebuild_sees_config_edits() {
        let mut f = fixture(CONFIG);
        fs::write(&f.path, r#"{ "tags": [{ "name": "new" }] }"#).unwrap();

        let menu = f
            .addon
            .on_build_menu(&f.host, MenuSurface::Reviewer)
            .unwrap()
            .unwrap();
        assert_eq!(menu.quick_tags.len(), 1);
        assert_eq!(menu.quick_tags[0].tag, "new");
    }

    #[test]
    fn test_invalid_config_builds_nothing() {
        let mut f = fixture(CONFIG);
        fs::write(&f.path, "{ not json").unwrap();

        assert!(matches!(
            f.addon.on_build_menu(&f.host, MenuSurface::Reviewer),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(f.addon.on_build_shortcuts(HostState::Review).is_err());
    }

    #[test]
    fn test_shortcuts_only_in_review() {
        let mut f = fixture(CONFIG);

        let bindings = f.addon.on_build_shortcuts(HostState::Review).unwrap();
        let pairs: Vec<_> = bindings
            .iter()
            .map(|b| (b.shortcut.as_str(), b.tag.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Ctrl+Alt+H", "hard"), ("Ctrl+M", "marked")]);
        assert!(bindings.iter().all(|b| b.parsed.is_some()));

        assert!(f.addon.on_build_shortcuts(HostState::DeckBrowser).unwrap().is_empty());
    }

    #[test]
    fn test_other_state_builds_nothing() {
        let mut f = fixture(CONFIG);
        f.host.state = HostState::Other;

        assert!(f.addon.on_build_menu(&f.host, MenuSurface::Reviewer).unwrap().is_none());
        assert!(f.addon.on_build_menu(&f.host, MenuSurface::Editor(f.note)).unwrap().is_none());
        assert!(f.addon.on_build_shortcuts(HostState::Other).unwrap().is_empty());
    }

    #[test]
    fn test_unparsable_shortcut_is_still_bound() {
        let mut f = fixture(r#"{ "tags": [{ "name": "odd", "shortcut": "Ctrl+" }] }"#);

        let bindings = f.addon.on_build_shortcuts(HostState::Review).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].shortcut, "Ctrl+");
        assert!(bindings[0].parsed.is_none());
    }

    #[test]
    fn test_toggle_from_reviewer() {
        let mut f = fixture(CONFIG);

        let result = f
            .addon
            .on_toggle_tag(&mut f.host, "marked", ToggleOrigin::Reviewer)
            .unwrap();
        assert_eq!(result, Some(Toggle::Removed(f.note)));
        assert_eq!(f.host.note_tags(f.note).unwrap(), vec!["zoology"]);

        let result = f
            .addon
            .on_toggle_tag(&mut f.host, "marked", ToggleOrigin::Reviewer)
            .unwrap();
        assert_eq!(result, Some(Toggle::Added(f.note)));

        assert_eq!(f.host.tooltips, vec!["Removed 'marked'...", "Added 'marked'..."]);
        assert_eq!(f.host.reviewer_redraws, 2);
    }

    #[test]
    fn test_toggle_from_editor_and_shortcut() {
        let mut f = fixture(CONFIG);

        f.addon
            .on_toggle_tag(&mut f.host, "leech", ToggleOrigin::Editor(f.note))
            .unwrap();
        assert_eq!(f.host.editor_reloads, vec![f.note]);

        f.addon
            .on_toggle_tag(&mut f.host, "hard", ToggleOrigin::Shortcut)
            .unwrap();
        assert_eq!(
            f.host.note_tags(f.note).unwrap(),
            vec!["hard", "leech", "marked", "zoology"]
        );
        assert_eq!(f.host.reviewer_redraws, 0);
    }

    #[test]
    fn test_toggle_without_note() {
        let mut f = fixture(CONFIG);
        f.host.reviewing = None;

        let result = f
            .addon
            .on_toggle_tag(&mut f.host, "marked", ToggleOrigin::Shortcut)
            .unwrap();
        assert!(result.is_none());
        assert!(f.host.tooltips.is_empty());
    }
}
