//! Collaborators the session depends on.
//!
//! The session only needs two things from the outside world: somewhere to
//! keep the text being edited and a way to read and write whole files.
//! Both are traits so tests can substitute in-memory or failing versions.

use std::io;
use std::path::Path;

/// Synchronous whole-file I/O.
pub trait FileService {
    /// Reads the entire file as UTF-8 text.
    fn read_all(&self, path: &Path) -> io::Result<String>;

    /// Replaces the file's content with `text`, creating it if needed.
    fn write_all(&self, path: &Path, text: &str) -> io::Result<()>;
}

/// [`FileService`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileService for LocalFiles {
    fn read_all(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_all(&self, path: &Path, text: &str) -> io::Result<()> {
        std::fs::write(path, text)
    }
}

/// The editable text buffer of one window.
///
/// `set_text` is only called by the session (load, reset). It must not be
/// reported back as a user edit; user edits reach the session through
/// [`EditSession::on_text_changed`](crate::EditSession::on_text_changed).
pub trait TextStore {
    /// Returns the full buffer content.
    fn text(&self) -> String;

    /// Replaces the full buffer content.
    fn set_text(&mut self, text: &str);
}

/// A plain in-memory [`TextStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringStore(String);

impl StringStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends text, the way typing at the end of the buffer would.
    pub fn push_str(&mut self, text: &str) {
        self.0.push_str(text);
    }

    /// Borrows the content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StringStore {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl TextStore for StringStore {
    fn text(&self) -> String {
        self.0.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.0.clear();
        self.0.push_str(text);
    }
}

/// Line break style of a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style: \n
    #[default]
    Lf,
    /// Windows-style: \r\n
    CrLf,
    /// Classic Mac: \r
    Cr,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Detects the line ending used by `text`. Text without breaks is `Lf`.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else if text.contains('\r') {
            LineEnding::Cr
        } else {
            LineEnding::Lf
        }
    }

    /// Number of lines in `text` when split on this ending. A final break
    /// starts an empty last line.
    pub fn line_count(&self, text: &str) -> usize {
        text.matches(self.as_str()).count() + 1
    }
}
