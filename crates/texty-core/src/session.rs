//! The unsaved-changes guard for one editor window.
//!
//! ## State Machine
//!
//! ```text
//!              request_new / request_open / request_close
//!                             │
//!              ┌── clean ─────┴───── dirty ──┐
//!              ▼                             ▼
//!         run action                 Confirm(action)
//!                                            │ on_dialog_response
//!                      ┌─────────────┬───────┴───────┐
//!                    Save         Discard          Cancel
//!                      │             │               │
//!          bound? write : picker   run action     nothing
//!                      │
//!          ok → run action, failed/cancelled → abandon
//! ```
//!
//! Dialogs and file pickers are asynchronous in every toolkit, so the
//! session never waits on them. Each request returns an [`Effect`]; the
//! shell carries it out and reports the result through one of the
//! `on_*` methods. What happens next is a pure function of the stored
//! continuation and that result.

use std::path::{Path, PathBuf};

use crate::preferences::CloseGuard;
use crate::services::{FileService, LocalFiles, TextStore};
use crate::{CoreError, CoreResult};

/// Primary caption of an untitled window.
pub const DEFAULT_TITLE: &str = "texty";

/// Secondary caption of an untitled window.
pub const DEFAULT_SUBTITLE: &str = "a minimal text editor";

const MODIFIED_MARKER: &str = "* ";

/// An operation that would throw away the buffer and therefore waits for
/// the user's consent when there are unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    New,
    Open,
    Close,
}

/// The user's answer to the "Save changes?" dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Save,
    Discard,
    /// Also used when the dialog is dismissed without an answer.
    Cancel,
}

/// Work the shell must do on behalf of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Effect {
    None,
    /// Show the confirmation dialog, then call `on_dialog_response`.
    Confirm(PendingAction),
    /// Show an open-file picker, then call `on_open_path_chosen`.
    PickOpenPath,
    /// Show a save-file picker, then call `on_save_path_chosen`.
    PickSavePath,
    /// Close the window this session belongs to.
    CloseWindow,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message for the user ("File saved: notes.txt").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Two-line window caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub primary: String,
    pub secondary: String,
}

/// What the session is waiting on. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outstanding {
    Confirm(PendingAction),
    OpenPicker,
    SavePicker { then: Option<PendingAction> },
}

/// Binds one text buffer to an optional file on disk.
pub struct EditSession<S, F = LocalFiles> {
    store: S,
    files: F,
    current_file: Option<PathBuf>,
    dirty: bool,
    outstanding: Option<Outstanding>,
    close_guard: CloseGuard,
    notices: Vec<Notice>,
}

impl<S: TextStore, F: FileService> EditSession<S, F> {
    /// Creates an untitled, clean session.
    pub fn new(store: S, files: F) -> Self {
        Self {
            store,
            files,
            current_file: None,
            dirty: false,
            outstanding: None,
            close_guard: CloseGuard::default(),
            notices: Vec::new(),
        }
    }

    /// Sets how close requests on a dirty buffer are treated.
    pub fn with_close_guard(mut self, guard: CloseGuard) -> Self {
        self.close_guard = guard;
        self
    }

    // ==================== Getters ====================

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access for the shell to apply user edits. Report them
    /// with [`on_text_changed`](Self::on_text_changed).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Returns true if the buffer has changed since the last load, save
    /// or reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The action waiting on the confirmation dialog, if it is showing.
    pub fn pending_action(&self) -> Option<PendingAction> {
        match self.outstanding {
            Some(Outstanding::Confirm(action)) => Some(action),
            _ => None,
        }
    }

    /// Returns true while a dialog or picker started by this session has
    /// not been answered.
    pub fn is_busy(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn close_guard(&self) -> CloseGuard {
        self.close_guard
    }

    /// Takes the notices queued since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ==================== Requests ====================

    /// Starts a new, empty document.
    pub fn request_new(&mut self) -> Effect {
        self.guarded(PendingAction::New)
    }

    /// Replaces the buffer with a file chosen by the user.
    pub fn request_open(&mut self) -> Effect {
        self.guarded(PendingAction::Open)
    }

    /// Closes the window, asking first if the close guard says so.
    pub fn request_close(&mut self) -> Effect {
        if self.is_busy() {
            return self.ignored("close");
        }
        if self.dirty && self.close_guard == CloseGuard::Prompt {
            return self.confirm(PendingAction::Close);
        }
        Effect::CloseWindow
    }

    /// Saves to the bound file, or asks for a path when untitled.
    pub fn request_save(&mut self) -> Effect {
        if self.is_busy() {
            return self.ignored("save");
        }
        self.save_then(None)
    }

    /// Always asks for a path, then binds the session to it.
    pub fn request_save_as(&mut self) -> Effect {
        if self.is_busy() {
            return self.ignored("save as");
        }
        self.outstanding = Some(Outstanding::SavePicker { then: None });
        Effect::PickSavePath
    }

    // ==================== Responses ====================

    /// Resumes the request that opened the confirmation dialog.
    pub fn on_dialog_response(&mut self, choice: DialogChoice) -> Effect {
        let action = match self.outstanding {
            Some(Outstanding::Confirm(action)) => action,
            other => {
                tracing::warn!("Dialog response {:?} without a dialog ({:?})", choice, other);
                return Effect::None;
            }
        };
        self.outstanding = None;
        tracing::debug!("Dialog answered {:?} for {:?}", choice, action);

        match choice {
            DialogChoice::Save => self.save_then(Some(action)),
            DialogChoice::Discard => self.run(action),
            DialogChoice::Cancel => Effect::None,
        }
    }

    /// Completes an open request. `None` means the picker was cancelled.
    pub fn on_open_path_chosen(&mut self, path: Option<PathBuf>) -> Effect {
        if self.outstanding != Some(Outstanding::OpenPicker) {
            tracing::warn!("Open picker result without an open request");
            return Effect::None;
        }
        self.outstanding = None;

        match path {
            Some(path) => {
                // `load` has already queued the error notice.
                if let Err(e) = self.load(&path) {
                    tracing::debug!("Open abandoned: {}", e);
                }
            }
            None => self.notices.push(Notice::info("Open operation cancelled")),
        }
        Effect::None
    }

    /// Completes a save request. `None` means the picker was cancelled,
    /// which also abandons any action waiting on the save.
    pub fn on_save_path_chosen(&mut self, path: Option<PathBuf>) -> Effect {
        let then = match self.outstanding {
            Some(Outstanding::SavePicker { then }) => then,
            _ => {
                tracing::warn!("Save picker result without a save request");
                return Effect::None;
            }
        };
        self.outstanding = None;

        let Some(path) = path else {
            self.notices.push(Notice::info("Save operation cancelled"));
            if let Some(action) = then {
                tracing::debug!("Save cancelled, abandoning {:?}", action);
            }
            return Effect::None;
        };

        match self.write_to(&path) {
            Ok(()) => {
                self.current_file = Some(path);
                then.map_or(Effect::None, |action| self.run(action))
            }
            Err(_) => Effect::None,
        }
    }

    /// Reports that the user changed the text.
    pub fn on_text_changed(&mut self) {
        if !self.dirty {
            tracing::debug!("Buffer modified");
        }
        self.dirty = true;
    }

    // ==================== File Operations ====================

    /// Replaces the buffer with the content of `path` and binds to it.
    ///
    /// On failure nothing changes; an error notice is queued and the
    /// error is returned for callers that care.
    pub fn load(&mut self, path: &Path) -> CoreResult<()> {
        match self.files.read_all(path) {
            Ok(text) => {
                self.store.set_text(&text);
                self.current_file = Some(path.to_path_buf());
                self.dirty = false;
                tracing::info!("Opened {}", path.display());
                self.notices
                    .push(Notice::info(format!("File opened: {}", display_name(path))));
                Ok(())
            }
            Err(source) => {
                tracing::warn!("Failed to open {}: {}", path.display(), source);
                self.notices
                    .push(Notice::error(format!("Error opening file: {}", source)));
                Err(CoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Writes the buffer to `path` and clears the dirty flag.
    ///
    /// The file binding is left to the caller. On failure the dirty flag
    /// stays set.
    pub fn write_to(&mut self, path: &Path) -> CoreResult<()> {
        let text = self.store.text();
        match self.files.write_all(path, &text) {
            Ok(()) => {
                self.dirty = false;
                tracing::info!("Saved {} ({} bytes)", path.display(), text.len());
                self.notices
                    .push(Notice::info(format!("File saved: {}", display_name(path))));
                Ok(())
            }
            Err(source) => {
                tracing::warn!("Failed to save {}: {}", path.display(), source);
                self.notices
                    .push(Notice::error(format!("Error saving file: {}", source)));
                Err(CoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    // ==================== Title ====================

    /// Caption for the header bar.
    pub fn title(&self) -> Title {
        let (primary, secondary) = match &self.current_file {
            Some(path) => (display_name(path), path.display().to_string()),
            None => (DEFAULT_TITLE.to_string(), DEFAULT_SUBTITLE.to_string()),
        };

        let primary = if self.dirty {
            format!("{MODIFIED_MARKER}{primary}")
        } else {
            primary
        };

        Title { primary, secondary }
    }

    /// Caption for the OS window.
    pub fn window_title(&self) -> String {
        let title = self.title();
        if self.current_file.is_some() {
            format!("{} - {}", title.primary, DEFAULT_TITLE)
        } else {
            title.primary
        }
    }

    // ==================== Internals ====================

    fn guarded(&mut self, action: PendingAction) -> Effect {
        if self.is_busy() {
            return self.ignored(match action {
                PendingAction::New => "new",
                PendingAction::Open => "open",
                PendingAction::Close => "close",
            });
        }
        if self.dirty {
            return self.confirm(action);
        }
        self.run(action)
    }

    fn confirm(&mut self, action: PendingAction) -> Effect {
        self.outstanding = Some(Outstanding::Confirm(action));
        Effect::Confirm(action)
    }

    fn ignored(&self, request: &str) -> Effect {
        tracing::debug!("Ignoring {} request, waiting on {:?}", request, self.outstanding);
        Effect::None
    }

    /// Saves, then runs `then` only if the save is known to have succeeded.
    fn save_then(&mut self, then: Option<PendingAction>) -> Effect {
        match self.current_file.clone() {
            Some(path) => match self.write_to(&path) {
                Ok(()) => then.map_or(Effect::None, |action| self.run(action)),
                Err(_) => {
                    if let Some(action) = then {
                        tracing::debug!("Save failed, abandoning {:?}", action);
                    }
                    Effect::None
                }
            },
            None => {
                self.outstanding = Some(Outstanding::SavePicker { then });
                Effect::PickSavePath
            }
        }
    }

    fn run(&mut self, action: PendingAction) -> Effect {
        match action {
            PendingAction::New => {
                self.reset();
                Effect::None
            }
            PendingAction::Open => {
                self.outstanding = Some(Outstanding::OpenPicker);
                Effect::PickOpenPath
            }
            PendingAction::Close => Effect::CloseWindow,
        }
    }

    fn reset(&mut self) {
        self.store.set_text("");
        self.current_file = None;
        self.dirty = false;
        self.notices.push(Notice::info("New file created"));
    }
}

/// File name shown to the user, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StringStore;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    /// In-memory files. Writes to paths listed in `read_only` fail.
    #[derive(Default)]
    struct MemoryFiles {
        files: RefCell<HashMap<PathBuf, String>>,
        read_only: Vec<PathBuf>,
    }

    impl MemoryFiles {
        fn with_file(path: &str, text: &str) -> Self {
            let files = Self::default();
            files.files.borrow_mut().insert(PathBuf::from(path), text.to_string());
            files
        }

        fn content(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl FileService for &MemoryFiles {
        fn read_all(&self, path: &Path) -> io::Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write_all(&self, path: &Path, text: &str) -> io::Result<()> {
            if self.read_only.iter().any(|p| p == path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.files.borrow_mut().insert(path.to_path_buf(), text.to_string());
            Ok(())
        }
    }

    fn session(files: &MemoryFiles) -> EditSession<StringStore, &MemoryFiles> {
        EditSession::new(StringStore::new(), files)
    }

    fn type_text<F: FileService>(session: &mut EditSession<StringStore, F>, text: &str) {
        session.store_mut().push_str(text);
        session.on_text_changed();
    }

    #[test]
    fn test_new_session_is_clean_and_untitled() {
        let files = MemoryFiles::default();
        let session = session(&files);
        assert!(!session.is_dirty());
        assert!(session.current_file().is_none());
        assert!(session.pending_action().is_none());
        assert_eq!(session.title().primary, DEFAULT_TITLE);
        assert_eq!(session.title().secondary, DEFAULT_SUBTITLE);
    }

    #[test]
    fn test_request_new_when_clean_resets_without_dialog() {
        let files = MemoryFiles::with_file("/notes.txt", "hello");
        let mut session = session(&files);
        session.load(Path::new("/notes.txt")).unwrap();

        assert_eq!(session.request_new(), Effect::None);
        assert_eq!(session.store().as_str(), "");
        assert!(session.current_file().is_none());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_request_open_when_clean_goes_straight_to_picker() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        assert_eq!(session.request_open(), Effect::PickOpenPath);
        assert!(session.pending_action().is_none());
    }

    #[test]
    fn test_request_new_when_dirty_asks_first() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "draft");

        assert_eq!(session.request_new(), Effect::Confirm(PendingAction::New));
        assert_eq!(session.pending_action(), Some(PendingAction::New));
        assert_eq!(session.store().as_str(), "draft");
        assert!(session.is_dirty());
    }

    #[test]
    fn test_cancel_leaves_everything_as_it_was() {
        let files = MemoryFiles::with_file("/a.txt", "a");
        let mut session = session(&files);
        session.load(Path::new("/a.txt")).unwrap();
        type_text(&mut session, "b");

        let _ = session.request_new();
        assert_eq!(session.on_dialog_response(DialogChoice::Cancel), Effect::None);

        assert_eq!(session.store().as_str(), "ab");
        assert_eq!(session.current_file(), Some(Path::new("/a.txt")));
        assert!(session.is_dirty());
        assert!(session.pending_action().is_none());
    }

    #[test]
    fn test_discard_runs_new_without_writing() {
        let files = MemoryFiles::with_file("/a.txt", "a");
        let mut session = session(&files);
        session.load(Path::new("/a.txt")).unwrap();
        type_text(&mut session, " changed");

        let _ = session.request_new();
        assert_eq!(session.on_dialog_response(DialogChoice::Discard), Effect::None);

        assert_eq!(session.store().as_str(), "");
        assert!(session.current_file().is_none());
        assert!(!session.is_dirty());
        assert_eq!(files.content("/a.txt").as_deref(), Some("a"));
    }

    #[test]
    fn test_save_then_new_writes_before_clearing() {
        let files = MemoryFiles::with_file("/a.txt", "a");
        let mut session = session(&files);
        session.load(Path::new("/a.txt")).unwrap();
        type_text(&mut session, "bc");

        let _ = session.request_new();
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::None);

        assert_eq!(files.content("/a.txt").as_deref(), Some("abc"));
        assert_eq!(session.store().as_str(), "");
        assert!(session.current_file().is_none());
    }

    #[test]
    fn test_failed_save_abandons_new() {
        let mut files = MemoryFiles::with_file("/locked.txt", "x");
        files.read_only.push(PathBuf::from("/locked.txt"));
        let mut session = session(&files);
        session.load(Path::new("/locked.txt")).unwrap();
        type_text(&mut session, "y");
        session.drain_notices();

        let _ = session.request_new();
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::None);

        assert_eq!(session.store().as_str(), "xy");
        assert_eq!(session.current_file(), Some(Path::new("/locked.txt")));
        assert!(session.is_dirty());
        let notices = session.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.starts_with("Error saving file:"));
    }

    #[test]
    fn test_save_on_untitled_carries_pending_open_through_picker() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "scratch");

        assert_eq!(session.request_open(), Effect::Confirm(PendingAction::Open));
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::PickSavePath);
        assert!(session.pending_action().is_none());
        assert!(session.is_busy());

        let effect = session.on_save_path_chosen(Some(PathBuf::from("/scratch.txt")));
        assert_eq!(effect, Effect::PickOpenPath);
        assert_eq!(files.content("/scratch.txt").as_deref(), Some("scratch"));
        assert_eq!(session.current_file(), Some(Path::new("/scratch.txt")));
    }

    #[test]
    fn test_cancelled_save_picker_abandons_pending_action() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "keep me");

        let _ = session.request_new();
        let _ = session.on_dialog_response(DialogChoice::Save);
        assert_eq!(session.on_save_path_chosen(None), Effect::None);

        assert_eq!(session.store().as_str(), "keep me");
        assert!(session.is_dirty());
        assert!(!session.is_busy());
        assert_eq!(
            session.drain_notices(),
            vec![Notice::info("Save operation cancelled")]
        );
    }

    #[test]
    fn test_requests_are_ignored_while_dialog_is_open() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "x");

        let _ = session.request_new();
        assert_eq!(session.request_open(), Effect::None);
        assert_eq!(session.request_save(), Effect::None);
        assert_eq!(session.request_save_as(), Effect::None);
        assert_eq!(session.request_close(), Effect::None);
        assert_eq!(session.pending_action(), Some(PendingAction::New));
    }

    fn assert_requests_ignored<F: FileService>(session: &mut EditSession<StringStore, F>) {
        assert_eq!(session.request_new(), Effect::None);
        assert_eq!(session.request_open(), Effect::None);
        assert_eq!(session.request_save(), Effect::None);
        assert_eq!(session.request_save_as(), Effect::None);
        assert_eq!(session.request_close(), Effect::None);
        assert!(session.is_busy());
        assert!(session.pending_action().is_none());
    }

    #[test]
    fn test_requests_are_ignored_while_open_picker_is_open() {
        let files = MemoryFiles::with_file("/a.txt", "a");
        let mut session = session(&files);
        assert_eq!(session.request_open(), Effect::PickOpenPath);

        assert_requests_ignored(&mut session);

        assert_eq!(session.on_open_path_chosen(Some("/a.txt".into())), Effect::None);
        assert_eq!(session.store().as_str(), "a");
        assert!(!session.is_busy());
    }

    #[test]
    fn test_requests_are_ignored_while_save_picker_is_open() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "draft");
        assert_eq!(session.request_new(), Effect::Confirm(PendingAction::New));
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::PickSavePath);

        assert_requests_ignored(&mut session);
        assert_eq!(session.store().as_str(), "draft");

        // The continuation survives the ignored requests.
        assert_eq!(session.on_save_path_chosen(Some("/draft.txt".into())), Effect::None);
        assert_eq!(files.content("/draft.txt").as_deref(), Some("draft"));
        assert_eq!(session.store().as_str(), "");
        assert!(session.current_file().is_none());
    }

    #[test]
    fn test_requests_are_ignored_while_save_as_picker_is_open() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        assert_eq!(session.request_save_as(), Effect::PickSavePath);

        assert_requests_ignored(&mut session);

        assert_eq!(session.on_save_path_chosen(None), Effect::None);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_close_guard_save_writes_then_closes() {
        let files = MemoryFiles::with_file("/notes.txt", "n");
        let mut session = session(&files);
        session.load(Path::new("/notes.txt")).unwrap();
        type_text(&mut session, " more");

        assert_eq!(session.request_close(), Effect::Confirm(PendingAction::Close));
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::CloseWindow);
        assert_eq!(files.content("/notes.txt").as_deref(), Some("n more"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_close_guard_save_on_untitled_closes_after_picker() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "keep me");

        let _ = session.request_close();
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::PickSavePath);
        assert_eq!(
            session.on_save_path_chosen(Some("/kept.txt".into())),
            Effect::CloseWindow
        );
        assert_eq!(files.content("/kept.txt").as_deref(), Some("keep me"));
    }

    #[test]
    fn test_close_guard_save_failure_keeps_window_open() {
        let mut files = MemoryFiles::with_file("/locked.txt", "v1");
        files.read_only.push(PathBuf::from("/locked.txt"));
        let mut session = session(&files);
        session.load(Path::new("/locked.txt")).unwrap();
        type_text(&mut session, " v2");

        let _ = session.request_close();
        assert_eq!(session.on_dialog_response(DialogChoice::Save), Effect::None);
        assert!(session.is_dirty());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_close_guard_cancel_keeps_window_open() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "x");

        assert_eq!(session.request_close(), Effect::Confirm(PendingAction::Close));
        assert_eq!(session.on_dialog_response(DialogChoice::Cancel), Effect::None);
        assert!(session.is_dirty());
        assert!(!session.is_busy());
        assert_eq!(session.store().as_str(), "x");
    }

    #[test]
    fn test_stray_responses_do_nothing() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        assert_eq!(session.on_dialog_response(DialogChoice::Discard), Effect::None);
        assert_eq!(session.on_save_path_chosen(Some("/x.txt".into())), Effect::None);
        assert_eq!(session.on_open_path_chosen(Some("/x.txt".into())), Effect::None);
        assert!(files.content("/x.txt").is_none());
    }

    #[test]
    fn test_save_as_rebinds_to_new_path() {
        let files = MemoryFiles::with_file("/old.txt", "body");
        let mut session = session(&files);
        session.load(Path::new("/old.txt")).unwrap();

        assert_eq!(session.request_save_as(), Effect::PickSavePath);
        let _ = session.on_save_path_chosen(Some(PathBuf::from("/new.txt")));

        assert_eq!(session.current_file(), Some(Path::new("/new.txt")));
        assert_eq!(files.content("/new.txt").as_deref(), Some("body"));
    }

    #[test]
    fn test_failed_save_as_keeps_old_binding() {
        let mut files = MemoryFiles::with_file("/old.txt", "body");
        files.read_only.push(PathBuf::from("/ro.txt"));
        let mut session = session(&files);
        session.load(Path::new("/old.txt")).unwrap();
        type_text(&mut session, "!");

        let _ = session.request_save_as();
        let _ = session.on_save_path_chosen(Some(PathBuf::from("/ro.txt")));

        assert_eq!(session.current_file(), Some(Path::new("/old.txt")));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_failed_load_keeps_previous_document() {
        let files = MemoryFiles::with_file("/a.txt", "a");
        let mut session = session(&files);
        session.load(Path::new("/a.txt")).unwrap();
        type_text(&mut session, "b");
        session.drain_notices();

        assert!(session.load(Path::new("/missing.txt")).is_err());
        assert_eq!(session.store().as_str(), "ab");
        assert_eq!(session.current_file(), Some(Path::new("/a.txt")));
        assert!(session.is_dirty());

        let notices = session.drain_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.starts_with("Error opening file:"));
    }

    #[test]
    fn test_cancelled_open_picker_changes_nothing() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        let _ = session.request_open();
        assert_eq!(session.on_open_path_chosen(None), Effect::None);
        assert!(!session.is_busy());
        assert_eq!(
            session.drain_notices(),
            vec![Notice::info("Open operation cancelled")]
        );
    }

    #[test]
    fn test_close_guard_prompt_asks_when_dirty() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        assert_eq!(session.request_close(), Effect::CloseWindow);

        type_text(&mut session, "x");
        assert_eq!(session.request_close(), Effect::Confirm(PendingAction::Close));
        assert_eq!(
            session.on_dialog_response(DialogChoice::Discard),
            Effect::CloseWindow
        );
    }

    #[test]
    fn test_close_guard_discard_closes_immediately() {
        let files = MemoryFiles::default();
        let mut session = session(&files).with_close_guard(CloseGuard::Discard);
        assert_eq!(session.close_guard(), CloseGuard::Discard);
        type_text(&mut session, "x");
        assert_eq!(session.request_close(), Effect::CloseWindow);
    }

    #[test]
    fn test_title_marker_appears_once() {
        let files = MemoryFiles::with_file("/dir/notes.txt", "n");
        let mut session = session(&files);
        session.load(Path::new("/dir/notes.txt")).unwrap();
        assert_eq!(session.title().primary, "notes.txt");
        assert_eq!(session.title().secondary, "/dir/notes.txt");

        type_text(&mut session, "1");
        type_text(&mut session, "2");
        type_text(&mut session, "3");
        assert_eq!(session.title().primary, "* notes.txt");
        assert_eq!(session.window_title(), "* notes.txt - texty");

        let _ = session.request_save();
        assert_eq!(session.title().primary, "notes.txt");
    }

    #[test]
    fn test_untitled_dirty_title() {
        let files = MemoryFiles::default();
        let mut session = session(&files);
        type_text(&mut session, "x");
        assert_eq!(session.window_title(), "* texty");
    }
}
