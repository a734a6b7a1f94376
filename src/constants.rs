//! Application-wide constants
//!
//! Configuration keys, file locations and default values, kept in one place so the
//! parser, the integration layer and the CLI agree on them.

/// Add-on identity
pub mod app {
    /// Name shown to the user when reporting errors
    pub const NAME: &str = "AnkiQuickTags";

    /// Directory name under the XDG data directory
    pub const DATA_DIR: &str = "anki-quick-tags";
}

/// Environment variables
pub mod env {
    /// Overrides the add-on data directory
    pub const DATA_DIR_OVERRIDE: &str = "ANKI_QUICK_TAGS_DIR";

    /// Set while the add-on is being developed; switches to the dev user files
    pub const DEVELOPMENT_MODE: &str = "ANKI_ADDON_DEVELOPMENT";
}

/// Configuration paths and filenames
pub mod config {
    /// Configuration filename
    pub const FILENAME: &str = "tags.json";

    /// User files directory (user-owned, survives add-on updates)
    pub const USER_FILES: &str = "user_files";

    /// User files directory used in development mode
    pub const USER_FILES_DEV: &str = "user_files_dev";
}

/// JSON keys of `tags.json`
pub mod keys {
    pub const TAGS: &str = "tags";
    pub const NAME: &str = "name";
    pub const SHORTCUT: &str = "shortcut";
    pub const OTHER_TAGS: &str = "other-tags";
    pub const VISIBLE: &str = "visible";
    pub const LIMIT: &str = "limit";
}

/// Default configuration values, used when optional fields are absent
pub mod defaults {
    /// Show the "Other tags..." sub-menu
    pub const OTHER_TAGS_VISIBLE: bool = true;

    /// Maximum number of entries in the "Other tags..." sub-menu
    pub const OTHER_TAGS_LIMIT: usize = 10;
}

/// Host UI text
pub mod ui {
    /// Label of the overflow sub-menu
    pub const OTHER_TAGS_MENU: &str = "Other tags...";
}
