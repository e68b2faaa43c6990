use std::path::PathBuf;

use iced::Size;
use iced::widget::text_editor;
use texty_core::{EditSession, LineEnding, LocalFiles, NoticeLevel, Preferences, TextStore};

/// The text widget's content, seen by the session as a [`TextStore`].
///
/// The widget splits text into lines and forgets how they were broken, so
/// the file's line ending is kept here and used again when joining.
pub struct EditorContent {
    content: text_editor::Content,
    ending: LineEnding,
    /// The widget dropped the empty line after a final break
    final_break: bool,
}

impl EditorContent {
    pub fn new() -> Self {
        Self {
            content: text_editor::Content::new(),
            ending: LineEnding::default(),
            final_break: false,
        }
    }

    pub fn content(&self) -> &text_editor::Content {
        &self.content
    }

    pub fn perform(&mut self, action: text_editor::Action) {
        self.content.perform(action);
    }
}

impl Default for EditorContent {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore for EditorContent {
    fn text(&self) -> String {
        let ending = self.ending.as_str();
        let mut text = String::new();
        for (i, line) in self.content.lines().enumerate() {
            if i > 0 {
                text.push_str(ending);
            }
            text.push_str(&line);
        }
        if self.final_break {
            text.push_str(ending);
        }
        text
    }

    fn set_text(&mut self, text: &str) {
        self.ending = LineEnding::detect(text);
        self.content = text_editor::Content::with_text(text);
        self.final_break = self.content.line_count() < self.ending.line_count(text);
    }
}

/// Which dropdown is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Arrow next to the Save button: New, Open, Save As, New Window
    File,
    /// Hamburger: Wrap Text, Font Size, About
    Main,
}

/// A transient notification shown at the bottom of the window.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: NoticeLevel,
    /// Matches the expiry timer that will hide this toast
    pub seq: u64,
}

/// Per-window state.
pub struct EditorWindow {
    pub session: EditSession<EditorContent, LocalFiles>,
    pub word_wrap: bool,
    pub font_size: u16,
    /// Last known inner size, persisted on close
    pub size: Size,
    pub menu: Option<MenuKind>,
    pub about_visible: bool,
    pub toast: Option<Toast>,
    pub toast_seq: u64,
}

impl EditorWindow {
    pub fn new(prefs: &Preferences) -> Self {
        let session = EditSession::new(EditorContent::new(), LocalFiles)
            .with_close_guard(prefs.behavior.close_guard);

        Self {
            session,
            word_wrap: prefs.editor.word_wrap,
            font_size: prefs.editor.font_size,
            size: Size::new(prefs.window.width as f32, prefs.window.height as f32),
            menu: None,
            about_visible: false,
            toast: None,
            toast_seq: 0,
        }
    }

    /// Replaces the toast with the latest queued notice, if any, and
    /// returns the sequence number to expire it with.
    pub fn show_notices(&mut self) -> Option<u64> {
        let notice = self.session.drain_notices().pop()?;
        self.toast_seq += 1;
        self.toast = Some(Toast {
            message: notice.message,
            level: notice.level,
            seq: self.toast_seq,
        });
        Some(self.toast_seq)
    }

    /// Suggested file name for the save picker.
    pub fn suggested_file_name(&self) -> String {
        self.session
            .current_file()
            .map(texty_core::session::display_name)
            .unwrap_or_else(|| "untitled.txt".to_string())
    }
}

#[derive(Debug, Default)]
pub struct Flags {
    /// File to load into the first window
    pub file: Option<PathBuf>,
    /// Preferences file to use instead of the default location
    pub config: Option<PathBuf>,
}
