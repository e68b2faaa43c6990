use iced::{Event, Size, Subscription, Task, Theme, event, keyboard, window};
use std::collections::BTreeMap;
use std::path::PathBuf;

use texty_core::preferences::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use texty_core::{Keymap, PreferencesStore};

pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use messages::*;
pub use types::*;

/// How long a toast stays visible.
pub const TOAST_DURATION: std::time::Duration = std::time::Duration::from_secs(3);

pub struct App {
    pub windows: BTreeMap<window::Id, EditorWindow>,
    pub prefs: PreferencesStore,
    pub keymap: Keymap,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let prefs = PreferencesStore::open(flags.config);
        if let Some(path) = prefs.path() {
            tracing::info!("Preferences: {}", path.display());
        }
        let keymap = Keymap::with_overrides(&prefs.get().keyboard.bindings);

        let mut app = Self {
            windows: BTreeMap::new(),
            prefs,
            keymap,
        };

        let task = app.open_window(flags.file);
        (app, task)
    }

    /// Opens a new window, optionally loading `file` into it.
    pub fn open_window(&mut self, file: Option<PathBuf>) -> Task<Message> {
        let prefs = self.prefs.get();
        let (id, opened) = window::open(window::Settings {
            size: Size::new(prefs.window.width as f32, prefs.window.height as f32),
            min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
            exit_on_close_request: false,
            ..Default::default()
        });

        let mut window = EditorWindow::new(prefs);
        if let Some(path) = file {
            // The session already queued the error toast.
            if let Err(e) = window.session.load(&path) {
                tracing::debug!("Starting untitled: {}", e);
            }
        }
        let toast = window.show_notices();
        self.windows.insert(id, window);
        tracing::debug!("Window {:?} created ({} open)", id, self.windows.len());

        let opened = opened.map(Message::WindowOpened);
        match toast {
            Some(seq) => Task::batch([opened, Self::expire_toast(id, seq)]),
            None => opened,
        }
    }

    pub fn title(&self, id: window::Id) -> String {
        self.windows
            .get(&id)
            .map(|w| w.session.window_title())
            .unwrap_or_else(|| texty_core::session::DEFAULT_TITLE.to_string())
    }

    pub fn theme(&self, _id: window::Id) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            event::listen_with(Self::route_event),
            window::resize_events().map(|(id, size)| Message::WindowResized(id, size)),
            window::close_requests().map(Message::CloseRequested),
            window::close_events().map(Message::WindowClosed),
        ])
    }

    fn route_event(event: Event, status: event::Status, id: window::Id) -> Option<Message> {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
                if routes_key(&key, modifiers, status) =>
            {
                Some(Message::KeyPressed(id, key, modifiers))
            }
            _ => None,
        }
    }
}

/// Whether a key press reaches the keymap.
///
/// A focused editor captures Escape and modifier chords as well as typed
/// text. Chords and Escape are still routed; plain keys the editor
/// consumed are not, so a binding without modifiers never eats typing.
fn routes_key(key: &keyboard::Key, modifiers: keyboard::Modifiers, status: event::Status) -> bool {
    let is_chord = modifiers.command() || modifiers.alt();
    let is_escape = matches!(key, keyboard::Key::Named(keyboard::key::Named::Escape));
    status == event::Status::Ignored || is_chord || is_escape
}

pub fn run(flags: Flags) -> iced::Result {
    iced::daemon(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
