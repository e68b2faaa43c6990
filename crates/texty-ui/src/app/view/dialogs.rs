use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Color, Element, Length, Padding, window};

use texty_core::{DialogChoice, NoticeLevel};

use crate::app::{App, Message, Toast};
use crate::style;
use crate::theme::colors;

impl App {
    pub fn view_confirm_modal<'a>(id: window::Id) -> Element<'a, Message> {
        let choice = |label: &'a str, choice: DialogChoice| {
            let style = match choice {
                DialogChoice::Save => style::primary_button,
                DialogChoice::Discard => style::danger_button,
                DialogChoice::Cancel => style::secondary_button,
            };
            let color = match choice {
                DialogChoice::Cancel => colors::TEXT_PRIMARY,
                _ => Color::WHITE,
            };
            button(text(label).size(13).color(color))
                .padding(Padding::from([8, 20]))
                .style(style)
                .on_press(Message::DialogResponse(id, choice))
        };

        let modal_content = column![
            text("Save changes?").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            text("There are unsaved changes. Do you want to save them?")
                .size(13)
                .color(colors::TEXT_SECONDARY),
            Space::with_height(20),
            row![
                choice("Cancel", DialogChoice::Cancel),
                Space::with_width(Length::Fill),
                choice("Discard", DialogChoice::Discard),
                Space::with_width(12),
                choice("Save", DialogChoice::Save),
            ]
            .align_y(Alignment::Center),
        ]
        .padding(24)
        .width(Length::Fixed(400.0));

        Self::centered(modal_content.into())
    }

    pub fn view_about_modal<'a>(id: window::Id) -> Element<'a, Message> {
        let modal_content = column![
            text("texty").size(20).color(colors::ACCENT),
            Space::with_height(8),
            text("a minimal text editor")
                .size(13)
                .color(colors::TEXT_SECONDARY),
            Space::with_height(12),
            text(format!("Version {}", env!("CARGO_PKG_VERSION")))
                .size(12)
                .color(colors::TEXT_MUTED),
            text("Another fine mess by Footeware.ca")
                .size(12)
                .color(colors::TEXT_MUTED),
            text("Developed by Craig Foote").size(12).color(colors::TEXT_MUTED),
            text("© 2024 Craig Foote").size(12).color(colors::TEXT_MUTED),
            Space::with_height(20),
            button(text("Close").size(13).color(Color::WHITE))
                .padding(Padding::from([8, 24]))
                .style(style::primary_button)
                .on_press(Message::HideAbout(id)),
        ]
        .spacing(2)
        .padding(24)
        .width(Length::Fixed(340.0))
        .align_x(Alignment::Center);

        Self::centered(modal_content.into())
    }

    pub fn view_toast(toast: &Toast) -> Element<'_, Message> {
        let is_error = toast.level == NoticeLevel::Error;
        let pill = container(text(&toast.message).size(13))
            .padding(Padding::from([8, 16]))
            .style(style::toast(is_error));

        container(pill)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(24)
            .align_bottom(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
        container(container(content).style(style::modal))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
