//! Context-menu and shortcut models handed back to the host for rendering

use std::fmt;

use crate::config::Shortcut;

/// Where a context menu is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSurface {
    /// Card reviewer; acts on the note under review
    Reviewer,
    /// Note editor; acts on the note being edited
    Editor(super::NoteId),
}

/// A checkable menu entry that toggles one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAction {
    pub tag: String,
    /// Whether the note currently has the tag
    pub checked: bool,
}

/// A labelled sub-menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMenu {
    pub label: String,
    pub actions: Vec<TagAction>,
}

/// Entries appended to the host's context menu, after a separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub surface: MenuSurface,
    pub quick_tags: Vec<TagAction>,
    /// Present only when the "Other tags..." sub-menu is enabled
    pub other_tags: Option<SubMenu>,
}

impl fmt::Display for ContextMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----")?;
        for action in &self.quick_tags {
            writeln!(f, "{action}")?;
        }
        if let Some(sub) = &self.other_tags {
            writeln!(f, "{} >", sub.label)?;
            for action in &sub.actions {
                writeln!(f, "    {action}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.checked { "x" } else { " " };
        write!(f, "[{}] {}", mark, self.tag)
    }
}

/// A shortcut to register while reviewing; triggering it toggles `tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    /// Raw shortcut text, passed through to the host unchanged
    pub shortcut: String,
    /// Parsed form, when the text could be parsed
    pub parsed: Option<Shortcut>,
    pub tag: String,
}

impl fmt::Display for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parsed {
            Some(shortcut) => write!(f, "{:<20} {}", shortcut.display_name(), self.tag),
            None => write!(f, "{:<20} {} (unrecognised)", self.shortcut, self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(tag: &str, checked: bool) -> TagAction {
        TagAction {
            tag: tag.to_string(),
            checked,
        }
    }

    #[test]
    fn test_render_menu() {
        let menu = ContextMenu {
            surface: MenuSurface::Reviewer,
            quick_tags: vec![action("Tag01", true), action("Tag02", false)],
            other_tags: Some(SubMenu {
                label: "Other tags...".to_string(),
                actions: vec![action("misc", false)],
            }),
        };

        assert_eq!(
            menu.to_string(),
            "----\n[x] Tag01\n[ ] Tag02\nOther tags... >\n    [ ] misc\n"
        );
    }

    #[test]
    fn test_render_without_sub_menu() {
        let menu = ContextMenu {
            surface: MenuSurface::Editor(crate::addon::NoteId(4)),
            quick_tags: vec![action("Tag01", false)],
            other_tags: None,
        };

        assert_eq!(menu.to_string(), "----\n[ ] Tag01\n");
    }

    #[test]
    fn test_render_binding() {
        let binding = ShortcutBinding {
            shortcut: "ctrl+m".to_string(),
            parsed: "ctrl+m".parse().ok(),
            tag: "marked".to_string(),
        };
        assert_eq!(binding.to_string(), format!("{:<20} marked", "Ctrl+M"));

        let binding = ShortcutBinding {
            shortcut: "Ctrl+".to_string(),
            parsed: None,
            tag: "odd".to_string(),
        };
        assert!(binding.to_string().ends_with("odd (unrecognised)"));
    }
}
