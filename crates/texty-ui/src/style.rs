//! Widget styles shared by the header, menus and dialogs.

use iced::widget::{button, container, text_editor};
use iced::{Background, Border, Color, Theme};

use crate::theme::colors;

/// Flat header bar button.
pub fn header_button(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::BG_HOVER,
        button::Status::Pressed => colors::BG_ACTIVE,
        _ => colors::BG_LIGHT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// Suggested action in a dialog.
pub fn primary_button(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::ACCENT_HOVER,
        _ => colors::ACCENT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: Color::WHITE,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Destructive action in a dialog.
pub fn danger_button(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => Color::from_rgb(0.85, 0.25, 0.25),
        _ => colors::ERROR,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: Color::WHITE,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn secondary_button(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::BG_HOVER,
        _ => colors::BG_LIGHT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

pub fn menu_item(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::BG_HOVER,
        _ => colors::BG_MEDIUM,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border::default(),
        ..Default::default()
    }
}

pub fn page(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_DARK)),
        ..Default::default()
    }
}

pub fn header_bar(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_MEDIUM)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

/// Dropdown menu panel.
pub fn popup(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_MEDIUM)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// Dialog card.
pub fn modal(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_MEDIUM)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Dimmed layer behind a dialog.
pub fn backdrop(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BACKDROP)),
        ..Default::default()
    }
}

pub fn separator(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BORDER)),
        ..Default::default()
    }
}

pub fn toast(is_error: bool) -> impl Fn(&Theme) -> container::Style {
    move |_| container::Style {
        background: Some(Background::Color(if is_error {
            colors::ERROR
        } else {
            colors::BG_ACTIVE
        })),
        text_color: Some(colors::TEXT_PRIMARY),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 16.0.into(),
        },
        ..Default::default()
    }
}

pub fn editor(_: &Theme, _status: text_editor::Status) -> text_editor::Style {
    text_editor::Style {
        background: Background::Color(colors::BG_DARK),
        border: Border {
            width: 0.0,
            radius: 0.0.into(),
            color: Color::TRANSPARENT,
        },
        icon: colors::TEXT_MUTED,
        placeholder: colors::TEXT_MUTED,
        value: colors::TEXT_PRIMARY,
        selection: colors::SELECTION,
    }
}
