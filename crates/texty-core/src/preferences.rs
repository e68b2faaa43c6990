//! Persisted user preferences.
//!
//! ## Learning: Serde Defaults
//!
//! `#[serde(default)]` on a struct fills every missing field from
//! `Default::default()`, so a preferences file written by an older
//! version (or edited by hand down to one line) still loads.
//!
//! ```toml
//! [window]
//! width = 1000
//! height = 600
//!
//! [editor]
//! word_wrap = true
//! font_size = 18
//!
//! [behavior]
//! close_guard = "prompt"
//!
//! [keyboard.bindings]
//! "ctrl+shift+w" = "toggle_wrap"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Font sizes offered in the menu, in pixels.
pub const FONT_SIZES: [u16; 9] = [14, 16, 18, 20, 22, 24, 26, 28, 30];

/// Font size used when nothing is configured.
pub const DEFAULT_FONT_SIZE: u16 = 18;

pub const MIN_WINDOW_WIDTH: u32 = 320;
pub const MIN_WINDOW_HEIGHT: u32 = 240;

/// All persisted preferences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Geometry of the most recently closed window
    pub window: WindowPrefs,

    /// Text view settings
    pub editor: EditorPrefs,

    /// Guard behaviour
    pub behavior: BehaviorPrefs,

    /// Keyboard settings
    pub keyboard: KeyboardPrefs,
}

impl Preferences {
    /// Loads preferences from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let prefs: Self = toml::from_str(&content)?;
        Ok(prefs.normalized())
    }

    /// Writes preferences to a file, creating its directory.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default preferences file path.
    pub fn default_path() -> Result<PathBuf, PreferencesError> {
        let config_dir = dirs::config_dir().ok_or(PreferencesError::NoConfigDir)?;
        Ok(config_dir.join("texty").join("preferences.toml"))
    }

    /// Pulls out-of-range values back to something the UI can show.
    pub fn normalized(mut self) -> Self {
        self.editor.font_size = snap_font_size(self.editor.font_size);
        self.window.width = self.window.width.max(MIN_WINDOW_WIDTH);
        self.window.height = self.window.height.max(MIN_WINDOW_HEIGHT);
        self
    }
}

/// Window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPrefs {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowPrefs {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Text view configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPrefs {
    /// Wrap long lines at word boundaries
    pub word_wrap: bool,

    /// Font size in pixels, one of [`FONT_SIZES`]
    pub font_size: u16,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            word_wrap: true,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorPrefs {
    pub close_guard: CloseGuard,
}

/// What closing a window with unsaved changes does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseGuard {
    /// Ask Save / Discard / Cancel, same as New and Open.
    #[default]
    Prompt,
    /// Close without asking.
    Discard,
}

/// Keyboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardPrefs {
    /// Extra bindings, key string to command name
    pub bindings: HashMap<String, String>,
}

/// Clamps to the offered range and rounds odd sizes down.
pub fn snap_font_size(size: u16) -> u16 {
    let (min, max) = (FONT_SIZES[0], FONT_SIZES[FONT_SIZES.len() - 1]);
    let size = size.clamp(min, max);
    size - size % 2
}

/// Preferences plus the file they came from.
///
/// Reads never fail: a missing file means defaults, a broken one is
/// logged and replaced by defaults on the next write.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: Option<PathBuf>,
    prefs: Preferences,
}

impl PreferencesStore {
    /// Loads from `path`, or from [`Preferences::default_path`] when `None`.
    pub fn open(path: Option<PathBuf>) -> Self {
        let path = match path {
            Some(path) => Some(path),
            None => match Preferences::default_path() {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Preferences will not be saved: {}", e);
                    None
                }
            },
        };

        let prefs = match &path {
            Some(path) if path.exists() => Preferences::load_from(path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring preferences at {}: {}", path.display(), e);
                Preferences::default()
            }),
            _ => Preferences::default(),
        };

        Self { path, prefs }
    }

    /// A store that is never written to disk.
    pub fn in_memory(prefs: Preferences) -> Self {
        Self {
            path: None,
            prefs: prefs.normalized(),
        }
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_word_wrap(&mut self, enabled: bool) {
        self.prefs.editor.word_wrap = enabled;
    }

    /// Stores the snapped size and returns it.
    pub fn set_font_size(&mut self, size: u16) -> u16 {
        let size = snap_font_size(size);
        self.prefs.editor.font_size = size;
        size
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.prefs.window.width = width.max(MIN_WINDOW_WIDTH);
        self.prefs.window.height = height.max(MIN_WINDOW_HEIGHT);
    }

    /// Writes the current preferences to disk.
    pub fn persist(&self) -> Result<(), PreferencesError> {
        match &self.path {
            Some(path) => {
                self.prefs.save_to(path)?;
                tracing::debug!("Preferences written to {}", path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Preferences errors.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
