use iced::widget::text_editor;
use iced::{Size, keyboard, window};
use std::path::PathBuf;

use texty_core::{Command, DialogChoice};

use crate::app::types::MenuKind;

/// Every message names the window it is meant for.
#[derive(Debug, Clone)]
pub enum Message {
    // Commands from menus, buttons and shortcuts
    Command(window::Id, Command),

    // Editor
    EditorAction(window::Id, text_editor::Action),

    // Menus
    ToggleMenu(window::Id, MenuKind),
    CloseMenu(window::Id),

    // Dialogs
    DialogResponse(window::Id, DialogChoice),
    HideAbout(window::Id),

    // Toasts
    ToastExpired(window::Id, u64),

    // Keyboard
    KeyPressed(window::Id, keyboard::Key, keyboard::Modifiers),

    // Window lifecycle
    WindowOpened(window::Id),
    WindowResized(window::Id, Size),
    CloseRequested(window::Id),
    WindowClosed(window::Id),

    // Async results
    OpenPathChosen(window::Id, Option<PathBuf>),
    SavePathChosen(window::Id, Option<PathBuf>),
}
