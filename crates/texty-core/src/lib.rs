//! # Texty Core
//!
//! Everything the editor does that does not need a window.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 EditSession                   │
//! │  current_file · dirty · outstanding request   │
//! │        │                     │                │
//! │  ┌─────┴─────┐        ┌──────┴──────┐         │
//! │  │ TextStore │        │ FileService │         │
//! │  └───────────┘        └─────────────┘         │
//! └──────────────────────────────────────────────┘
//!          ▲ Effect / response
//!          │
//!     UI shell (texty-ui)
//! ```
//!
//! The session never talks to dialogs itself. It hands an [`Effect`] back
//! to the caller, and the caller reports the user's answer later. That
//! keeps every branch of the unsaved-changes guard testable without a
//! display.

pub mod command;
pub mod keymap;
pub mod preferences;
pub mod services;
pub mod session;

pub use command::Command;
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use preferences::{CloseGuard, Preferences, PreferencesError, PreferencesStore};
pub use services::{FileService, LineEnding, LocalFiles, StringStore, TextStore};
pub use session::{DialogChoice, EditSession, Effect, Notice, NoticeLevel, PendingAction, Title};

use std::path::PathBuf;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
