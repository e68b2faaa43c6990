//! Window commands.
//!
//! ## Learning: The Command Pattern
//!
//! Menus, buttons and key bindings all produce a `Command`. The UI then
//! runs it against the window it came from, so a shortcut always acts
//! on the window that received it.

use crate::preferences::FONT_SIZES;

/// Everything a window can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    NewWindow,
    ToggleWrap,
    SetFontSize(u16),
    About,
    Close,
}

impl Command {
    /// Parses the command names used in the `[keyboard.bindings]` table.
    ///
    /// Font sizes are written `font_size_<px>`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "new" => Some(Command::New),
            "open" => Some(Command::Open),
            "save" => Some(Command::Save),
            "save_as" => Some(Command::SaveAs),
            "new_window" => Some(Command::NewWindow),
            "toggle_wrap" => Some(Command::ToggleWrap),
            "about" => Some(Command::About),
            "close" => Some(Command::Close),
            _ => name
                .strip_prefix("font_size_")
                .and_then(|px| px.parse().ok())
                .filter(|px| FONT_SIZES.contains(px))
                .map(Command::SetFontSize),
        }
    }

    /// Menu label.
    pub fn label(&self) -> String {
        match self {
            Command::New => "New".to_string(),
            Command::Open => "Open".to_string(),
            Command::Save => "Save".to_string(),
            Command::SaveAs => "Save As".to_string(),
            Command::NewWindow => "New Window".to_string(),
            Command::ToggleWrap => "Wrap Text".to_string(),
            Command::SetFontSize(px) => format!("{}px", px),
            Command::About => "About texty".to_string(),
            Command::Close => "Close Window".to_string(),
        }
    }
}
