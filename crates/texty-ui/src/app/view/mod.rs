pub mod dialogs;

use iced::widget::{
    Column, Space, Stack, button, column, container, horizontal_space, mouse_area, row, text,
    text_editor,
};
use iced::{Alignment, Element, Font, Length, Padding, mouse, window};

use texty_core::preferences::FONT_SIZES;
use texty_core::{Command, DialogChoice};

use crate::app::{App, EditorWindow, MenuKind, Message};
use crate::style;
use crate::theme::colors;

/// Height of the header bar; dropdowns open just below it.
const HEADER_HEIGHT: f32 = 44.0;

impl App {
    pub fn view(&self, id: window::Id) -> Element<'_, Message> {
        let Some(w) = self.windows.get(&id) else {
            return Space::new(Length::Fill, Length::Fill).into();
        };

        let page: Element<'_, Message> = container(column![
            self.view_header(id, w),
            Self::view_editor(id, w)
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::page)
        .into();

        let mut layers = vec![page];

        if let Some(kind) = w.menu {
            layers.push(Self::backdrop(Message::CloseMenu(id), false));
            layers.push(self.view_menu(id, w, kind));
        }

        if w.session.pending_action().is_some() {
            layers.push(Self::backdrop(
                Message::DialogResponse(id, DialogChoice::Cancel),
                true,
            ));
            layers.push(Self::view_confirm_modal(id));
        } else if w.about_visible {
            layers.push(Self::backdrop(Message::HideAbout(id), true));
            layers.push(Self::view_about_modal(id));
        }

        if let Some(toast) = &w.toast {
            layers.push(Self::view_toast(toast));
        }

        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_header<'a>(&self, id: window::Id, w: &'a EditorWindow) -> Element<'a, Message> {
        let save_split = row![
            button(text("Save").size(13))
                .padding(Padding::from([6, 14]))
                .style(style::header_button)
                .on_press(Message::Command(id, Command::Save)),
            button(text("▾").size(13))
                .padding(Padding::from([6, 8]))
                .style(style::header_button)
                .on_press(Message::ToggleMenu(id, MenuKind::File)),
        ]
        .spacing(1);

        let title = w.session.title();
        let title = column![
            text(title.primary).size(14).color(colors::TEXT_PRIMARY),
            text(title.secondary).size(11).color(colors::TEXT_MUTED),
        ]
        .align_x(Alignment::Center);

        let hamburger = button(text("☰").size(14))
            .padding(Padding::from([6, 10]))
            .style(style::header_button)
            .on_press(Message::ToggleMenu(id, MenuKind::Main));

        let bar = row![
            container(save_split).width(Length::Fixed(120.0)),
            container(title).center_x(Length::Fill),
            container(hamburger).align_right(Length::Fixed(120.0)),
        ]
        .padding(Padding::from([0, 8]))
        .align_y(Alignment::Center);

        container(bar)
            .width(Length::Fill)
            .height(Length::Fixed(HEADER_HEIGHT))
            .center_y(Length::Fixed(HEADER_HEIGHT))
            .style(style::header_bar)
            .into()
    }

    fn view_editor(id: window::Id, w: &EditorWindow) -> Element<'_, Message> {
        let wrapping = if w.word_wrap {
            text::Wrapping::Word
        } else {
            text::Wrapping::None
        };

        text_editor(w.session.store().content())
            .on_action(move |action| Message::EditorAction(id, action))
            .height(Length::Fill)
            .padding(10)
            .font(Font::MONOSPACE)
            .size(f32::from(w.font_size))
            .wrapping(wrapping)
            .style(style::editor)
            .into()
    }

    fn view_menu<'a>(&self, id: window::Id, w: &EditorWindow, kind: MenuKind) -> Element<'a, Message> {
        let mut items: Vec<Element<'a, Message>> = Vec::new();

        match kind {
            MenuKind::File => {
                for command in [Command::New, Command::Open, Command::SaveAs] {
                    items.push(self.menu_item(id, command, None));
                }
                items.push(Self::menu_separator());
                items.push(self.menu_item(id, Command::NewWindow, None));
            }
            MenuKind::Main => {
                items.push(self.menu_item(id, Command::ToggleWrap, Some(w.word_wrap)));
                items.push(Self::menu_separator());
                items.push(
                    container(text("Font Size").size(11).color(colors::TEXT_MUTED))
                        .padding(Padding::from([4, 12]))
                        .into(),
                );
                for px in FONT_SIZES {
                    items.push(self.menu_item(
                        id,
                        Command::SetFontSize(px),
                        Some(w.font_size == px),
                    ));
                }
                items.push(Self::menu_separator());
                items.push(self.menu_item(id, Command::About, None));
            }
        }

        let menu_box = container(Column::with_children(items).width(Length::Fixed(220.0)))
            .padding(4)
            .style(style::popup);

        let placed = match kind {
            MenuKind::File => row![Space::with_width(8), menu_box],
            MenuKind::Main => row![horizontal_space(), menu_box, Space::with_width(8)],
        };

        column![Space::with_height(Length::Fixed(HEADER_HEIGHT)), placed]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// A dropdown row: optional check mark, label, and the bound shortcut.
    fn menu_item<'a>(&self, id: window::Id, command: Command, checked: Option<bool>) -> Element<'a, Message> {
        let check = match checked {
            Some(true) => "✓",
            _ => "",
        };
        let shortcut = self
            .keymap
            .binding_for(command)
            .map(|key| key.to_string())
            .unwrap_or_default();

        button(
            row![
                text(check).size(12).width(Length::Fixed(16.0)),
                text(command.label()).size(12).color(colors::TEXT_PRIMARY),
                horizontal_space(),
                text(shortcut).size(11).color(colors::TEXT_MUTED),
            ]
            .width(Length::Fill)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([6, 12]))
        .style(style::menu_item)
        .on_press(Message::Command(id, command))
        .into()
    }

    fn menu_separator<'a>() -> Element<'a, Message> {
        container(Space::new(Length::Fill, 1))
            .style(style::separator)
            .into()
    }

    /// Full-window click catcher under a menu or dialog. Dialog backdrops
    /// are dimmed and keep the pointer away from the editor.
    fn backdrop<'a>(on_press: Message, dimmed: bool) -> Element<'a, Message> {
        let fill = container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill);
        let fill = if dimmed { fill.style(style::backdrop) } else { fill };

        mouse_area(fill)
            .interaction(mouse::Interaction::Idle)
            .on_press(on_press)
            .into()
    }
}
