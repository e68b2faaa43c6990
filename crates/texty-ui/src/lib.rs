//! # Texty UI
//!
//! iced front end for texty.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA), one `EditorWindow` per OS
//! window:
//! - **Model**: `App` holds the windows and the shared preferences
//! - **Message**: every message carries the id of the window it targets
//! - **Update**: messages drive the window's `EditSession`, whose
//!   `Effect`s become `Task`s (file pickers, closing windows)
//! - **View**: a pure function of one window's state

pub mod app;
pub mod style;
pub mod theme;

pub use app::{run, App, Flags};
