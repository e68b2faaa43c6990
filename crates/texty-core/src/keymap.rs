//! Keyboard accelerators.
//!
//! Bindings are single chords (`Ctrl+Shift+S`). The UI converts its
//! toolkit key events into [`KeyPress`] values and asks the [`Keymap`]
//! for a [`Command`].

use crate::command::Command;
use std::collections::HashMap;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };

    /// Ctrl+Shift.
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            #[cfg(target_os = "macos")]
            parts.push("Cmd");
            #[cfg(not(target_os = "macos"))]
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Always stored lowercase
    Char(char),
    Enter,
    Escape,
}

impl Key {
    /// Parses a key name such as `s`, `enter` or `esc`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Esc"),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press. Characters are folded to lowercase so
    /// `Shift+s` and `Shift+S` are the same chord.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Self { key, modifiers }
    }

    /// Parses a binding string like `ctrl+shift+s`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = Key::parse(parts.pop()?)?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "command" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return None,
            }
        }

        Some(Self::new(key, modifiers))
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Maps chords to commands.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Command>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        use Command::*;

        let defaults = [
            (KeyPress::new(Key::Char('n'), Modifiers::CTRL), New),
            (KeyPress::new(Key::Char('o'), Modifiers::CTRL), Open),
            (KeyPress::new(Key::Char('s'), Modifiers::CTRL), Save),
            (KeyPress::new(Key::Char('s'), Modifiers::CTRL_SHIFT), SaveAs),
            (KeyPress::new(Key::Char('n'), Modifiers::CTRL_SHIFT), NewWindow),
            (KeyPress::new(Key::Char('w'), Modifiers::CTRL), ToggleWrap),
        ];

        Self {
            bindings: defaults.into_iter().collect(),
        }
    }

    /// Default bindings plus user overrides from preferences.
    ///
    /// Entries that do not parse are skipped with a warning.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut keymap = Self::new();
        for (key_str, cmd_str) in overrides {
            match (KeyPress::parse(key_str), Command::parse(cmd_str)) {
                (Some(key), Some(cmd)) => {
                    keymap.bindings.insert(key, cmd);
                }
                _ => tracing::warn!("Ignoring key binding {:?} = {:?}", key_str, cmd_str),
            }
        }
        keymap
    }

    /// Returns the command bound to `key`.
    pub fn lookup(&self, key: &KeyPress) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    /// Returns a chord bound to `command`, for menu hints. When several
    /// chords are bound, the shortest label wins.
    pub fn binding_for(&self, command: Command) -> Option<KeyPress> {
        self.bindings
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(key, _)| *key)
            .min_by_key(|key| key.to_string())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypress_parse() {
        let kp = KeyPress::parse("ctrl+shift+S").unwrap();
        assert_eq!(kp.key, Key::Char('s'));
        assert!(kp.modifiers.ctrl);
        assert!(kp.modifiers.shift);
        assert!(KeyPress::parse("hyper+s").is_none());
        assert!(KeyPress::parse("ctrl+").is_none());
    }

    #[test]
    fn test_default_bindings() {
        let keymap = Keymap::new();
        let save_as = KeyPress::new(Key::Char('S'), Modifiers::CTRL_SHIFT);
        assert_eq!(keymap.lookup(&save_as), Some(Command::SaveAs));
        assert_eq!(
            keymap.lookup(&KeyPress::new(Key::Char('w'), Modifiers::CTRL)),
            Some(Command::ToggleWrap)
        );
        assert_eq!(keymap.lookup(&KeyPress::new(Key::Char('s'), Modifiers::NONE)), None);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("ctrl+q".to_string(), "close".to_string());
        overrides.insert("ctrl+w".to_string(), "font_size_20".to_string());
        overrides.insert("ctrl+e".to_string(), "explode".to_string());

        let keymap = Keymap::with_overrides(&overrides);
        assert_eq!(keymap.lookup(&KeyPress::parse("ctrl+q").unwrap()), Some(Command::Close));
        assert_eq!(
            keymap.lookup(&KeyPress::parse("ctrl+w").unwrap()),
            Some(Command::SetFontSize(20))
        );
        assert_eq!(keymap.lookup(&KeyPress::parse("ctrl+e").unwrap()), None);
    }

    #[test]
    fn test_binding_for_menu_hint() {
        let keymap = Keymap::new();
        let hint = keymap.binding_for(Command::SaveAs).unwrap();
        assert_eq!(hint, KeyPress::new(Key::Char('s'), Modifiers::CTRL_SHIFT));
        assert!(keymap.binding_for(Command::About).is_none());
    }
}
