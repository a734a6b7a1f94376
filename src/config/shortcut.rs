//! Keyboard shortcut text as written in `tags.json`
//!
//! The host registers shortcuts from their raw text; parsing here is only used to
//! compare bindings (so `ctrl+t` and `Ctrl+T` are recognised as the same key) and
//! to show them in a canonical form.

use std::fmt;
use std::str::FromStr;

/// A keyboard shortcut with modifiers, e.g. `Ctrl+Alt+T`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Main key; single characters are stored upper-cased
    pub key: String,

    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,

    /// Meta / Super / Cmd
    pub meta: bool,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(key: impl Into<String>, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        Self {
            key: normalize_key(&key.into()),
            ctrl,
            shift,
            alt,
            meta,
        }
    }

    /// Canonical display form: modifiers in a fixed order, then the key
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();

        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.meta {
            parts.push("Meta");
        }

        parts.push(&self.key);
        parts.join("+")
    }
}

impl FromStr for Shortcut {
    type Err = String;

    /// Parse `Modifier+...+Key`. Modifiers are case-insensitive and may appear in any
    /// order; the key must come last.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();

        let Some((key, modifiers)) = parts.split_last() else {
            return Err("Empty shortcut".to_string());
        };

        // "Ctrl++" binds the plus key itself
        let plus_key = key.is_empty() && modifiers.len() >= 2 && modifiers.last() == Some(&"");
        let (key, modifiers) = if plus_key {
            ("+", &modifiers[..modifiers.len() - 1])
        } else {
            (*key, modifiers)
        };

        if key.is_empty() {
            return Err(format!("No key found in shortcut '{}'", s));
        }

        let mut shortcut = Shortcut::new(key, false, false, false, false);

        for modifier in modifiers {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "shift" => shortcut.shift = true,
                "alt" | "option" => shortcut.alt = true,
                "meta" | "super" | "cmd" | "command" => shortcut.meta = true,
                "" => return Err(format!("Empty modifier in shortcut '{}'", s)),
                other => {
                    return Err(format!(
                        "Non-modifier key '{}' must be last in shortcut '{}'",
                        other, s
                    ));
                }
            }
        }

        Ok(shortcut)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_uppercase().collect(),
        _ => {
            // Named keys: "f1" -> "F1", "space" -> "Space"
            let lower = key.to_ascii_lowercase();
            let mut named = lower.chars();
            match named.next() {
                Some(first) if lower.len() == 2 && first == 'f' => lower.to_ascii_uppercase(),
                Some(first) => first.to_uppercase().chain(named).collect(),
                None => String::new(),
            }
        }
    }
}
