//! Configuration management
//!
//! Loads and validates the user's `tags.json`: the quick tags (name + shortcut) and
//! the display settings of the "Other tags..." sub-menu.

pub mod document;
pub mod error;
pub mod quick_tag;
pub mod shortcut;
pub mod store;

pub use document::ConfigDocument;
pub use error::ConfigError;
pub use shortcut::Shortcut;
pub use store::ConfigStore;
