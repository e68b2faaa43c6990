use iced::{Task, keyboard, window};

use texty_core::{Command, DialogChoice, Effect, Key, KeyPress, Modifiers};

use super::{App, EditorWindow, Message, TOAST_DURATION};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Command(id, command) => {
                return self.run_command(id, command);
            }

            Message::EditorAction(id, action) => {
                if let Some(w) = self.windows.get_mut(&id) {
                    let is_edit = action.is_edit();
                    if is_edit && w.session.is_busy() {
                        return Task::none();
                    }
                    w.session.store_mut().perform(action);
                    if is_edit {
                        w.session.on_text_changed();
                    }
                }
            }

            Message::ToggleMenu(id, kind) => {
                if let Some(w) = self.windows.get_mut(&id) {
                    w.menu = if w.menu == Some(kind) { None } else { Some(kind) };
                }
            }

            Message::CloseMenu(id) => {
                if let Some(w) = self.windows.get_mut(&id) {
                    w.menu = None;
                }
            }

            Message::DialogResponse(id, choice) => {
                let Some(w) = self.windows.get_mut(&id) else {
                    return Task::none();
                };
                let effect = w.session.on_dialog_response(choice);
                return self.settle(id, effect);
            }

            Message::HideAbout(id) => {
                if let Some(w) = self.windows.get_mut(&id) {
                    w.about_visible = false;
                }
            }

            Message::ToastExpired(id, seq) => {
                if let Some(w) = self.windows.get_mut(&id) {
                    // A newer toast has its own timer.
                    if w.toast.as_ref().is_some_and(|t| t.seq == seq) {
                        w.toast = None;
                    }
                }
            }

            Message::KeyPressed(id, key, modifiers) => {
                return self.handle_key_pressed(id, key, modifiers);
            }

            Message::WindowOpened(id) => {
                tracing::debug!("Window {:?} opened", id);
            }

            Message::WindowResized(id, size) => {
                if let Some(w) = self.windows.get_mut(&id) {
                    w.size = size;
                }
            }

            Message::CloseRequested(id) => {
                return self.run_command(id, Command::Close);
            }

            Message::WindowClosed(id) => {
                self.windows.remove(&id);
                tracing::debug!("Window {:?} closed ({} open)", id, self.windows.len());
                if self.windows.is_empty() {
                    return iced::exit();
                }
            }

            Message::OpenPathChosen(id, path) => {
                let Some(w) = self.windows.get_mut(&id) else {
                    return Task::none();
                };
                let effect = w.session.on_open_path_chosen(path);
                return self.settle(id, effect);
            }

            Message::SavePathChosen(id, path) => {
                let Some(w) = self.windows.get_mut(&id) else {
                    return Task::none();
                };
                let effect = w.session.on_save_path_chosen(path);
                return self.settle(id, effect);
            }
        }
        Task::none()
    }

    /// Runs `command` against the window it was issued in.
    pub fn run_command(&mut self, id: window::Id, command: Command) -> Task<Message> {
        if let Some(w) = self.windows.get_mut(&id) {
            w.menu = None;
        }

        match command {
            Command::NewWindow => self.open_window(None),

            Command::ToggleWrap => {
                let enabled = !self.prefs.get().editor.word_wrap;
                self.prefs.set_word_wrap(enabled);
                for w in self.windows.values_mut() {
                    w.word_wrap = enabled;
                }
                self.save_preferences();
                Task::none()
            }

            Command::SetFontSize(px) => {
                let px = self.prefs.set_font_size(px);
                for w in self.windows.values_mut() {
                    w.font_size = px;
                }
                self.save_preferences();
                Task::none()
            }

            Command::About => {
                if let Some(w) = self.windows.get_mut(&id) {
                    w.about_visible = true;
                }
                Task::none()
            }

            Command::New | Command::Open | Command::Save | Command::SaveAs | Command::Close => {
                let Some(w) = self.windows.get_mut(&id) else {
                    return Task::none();
                };
                let effect = match command {
                    Command::New => w.session.request_new(),
                    Command::Open => w.session.request_open(),
                    Command::Save => w.session.request_save(),
                    Command::SaveAs => w.session.request_save_as(),
                    _ => w.session.request_close(),
                };
                self.settle(id, effect)
            }
        }
    }

    /// Carries out `effect` for window `id`, then surfaces whatever the
    /// session reported as a toast.
    fn settle(&mut self, id: window::Id, effect: Effect) -> Task<Message> {
        let task = self.apply_effect(id, effect);
        match self.windows.get_mut(&id).and_then(EditorWindow::show_notices) {
            Some(seq) => Task::batch([task, Self::expire_toast(id, seq)]),
            None => task,
        }
    }

    fn apply_effect(&mut self, id: window::Id, effect: Effect) -> Task<Message> {
        tracing::debug!("Window {:?}: {:?}", id, effect);

        match effect {
            // The dialog is drawn from the session's pending action.
            Effect::None | Effect::Confirm(_) => Task::none(),

            Effect::PickOpenPath => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Open File")
                        .pick_file()
                        .await
                        .map(|file| file.path().to_path_buf())
                },
                move |path| Message::OpenPathChosen(id, path),
            ),

            Effect::PickSavePath => {
                let file_name = self
                    .windows
                    .get(&id)
                    .map(EditorWindow::suggested_file_name)
                    .unwrap_or_default();
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Save File")
                            .set_file_name(file_name)
                            .save_file()
                            .await
                            .map(|file| file.path().to_path_buf())
                    },
                    move |path| Message::SavePathChosen(id, path),
                )
            }

            Effect::CloseWindow => {
                if let Some(w) = self.windows.get(&id) {
                    let (width, height) = (w.size.width.round() as u32, w.size.height.round() as u32);
                    self.prefs.set_window_size(width, height);
                    self.save_preferences();
                }
                window::close(id)
            }
        }
    }

    pub(crate) fn expire_toast(id: window::Id, seq: u64) -> Task<Message> {
        Task::perform(tokio::time::sleep(TOAST_DURATION), move |_| {
            Message::ToastExpired(id, seq)
        })
    }

    fn save_preferences(&self) {
        if let Err(e) = self.prefs.persist() {
            tracing::warn!("Failed to save preferences: {}", e);
        }
    }

    pub fn handle_key_pressed(
        &mut self,
        id: window::Id,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        if matches!(key, keyboard::Key::Named(keyboard::key::Named::Escape)) {
            return self.dismiss_overlay(id);
        }

        let Some(press) = key_press(&key, modifiers) else {
            return Task::none();
        };
        match self.keymap.lookup(&press) {
            Some(command) => self.run_command(id, command),
            None => Task::none(),
        }
    }

    /// Escape closes the topmost overlay: the confirmation dialog
    /// (as Cancel), then About, then an open menu.
    fn dismiss_overlay(&mut self, id: window::Id) -> Task<Message> {
        let Some(w) = self.windows.get_mut(&id) else {
            return Task::none();
        };

        if w.session.pending_action().is_some() {
            let effect = w.session.on_dialog_response(DialogChoice::Cancel);
            return self.settle(id, effect);
        }
        if w.about_visible {
            w.about_visible = false;
        } else {
            w.menu = None;
        }
        Task::none()
    }
}

/// Converts an iced key event into the keymap's chord type.
fn key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyPress> {
    let key = match key {
        keyboard::Key::Character(c) => Key::Char(c.chars().next()?),
        keyboard::Key::Named(keyboard::key::Named::Enter) => Key::Enter,
        keyboard::Key::Named(keyboard::key::Named::Escape) => Key::Escape,
        _ => return None,
    };

    let modifiers = Modifiers {
        ctrl: modifiers.command(),
        alt: modifiers.alt(),
        shift: modifiers.shift(),
    };

    Some(KeyPress::new(key, modifiers))
}
