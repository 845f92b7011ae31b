//! Centralized theme constants and style functions for consistent UI styling.

use billed_api::endpoints::BillStatus;
use ratatui::style::{Color, Modifier, Style};

use crate::state::dashboard::CardHighlight;

// =============================================================================
// Colors
// =============================================================================

/// Card background when not selected
pub const COLOR_CARD: Color = Color::Rgb(0x0D, 0x5A, 0xE5);

/// Card background of the bill open in the detail panel
pub const COLOR_CARD_SELECTED: Color = Color::Rgb(0x2A, 0x2B, 0x35);

pub const COLOR_PENDING: Color = Color::Yellow;
pub const COLOR_ACCEPTED: Color = Color::Green;
pub const COLOR_REFUSED: Color = Color::Red;

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

pub const COLOR_ERROR: Color = Color::Red;

/// Border color for alert popups
pub const COLOR_BORDER_DANGER: Color = Color::Red;

/// Border color for informational popups
pub const COLOR_BORDER_INFO: Color = Color::Blue;

/// Border color for accent/highlighted elements
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Background for form fields when focused
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of a dashboard card
pub const CARD_HEIGHT: u16 = 4;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for screen titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn error_style() -> Style {
    Style::default()
        .fg(COLOR_ERROR)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when focused
pub fn form_field_focused_style() -> Style {
    Style::default()
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when not focused
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn danger_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_DANGER)
        .add_modifier(Modifier::BOLD)
}

pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

/// Card style for a highlight state; the keyboard focus adds bold
pub fn card_style(highlight: CardHighlight, focused: bool) -> Style {
    let bg = match highlight {
        CardHighlight::Selected => COLOR_CARD_SELECTED,
        CardHighlight::Unselected => COLOR_CARD,
    };
    let style = Style::default().bg(bg).fg(Color::White);
    if focused {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    }
}

pub fn status_color(status: BillStatus) -> Color {
    match status {
        BillStatus::Pending => COLOR_PENDING,
        BillStatus::Accepted => COLOR_ACCEPTED,
        BillStatus::Refused => COLOR_REFUSED,
    }
}

/// Accept button of the detail panel
pub fn card_accept_style() -> Style {
    Style::default()
        .bg(COLOR_ACCEPTED)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Refuse button of the detail panel
pub fn card_refuse_style() -> Style {
    Style::default()
        .bg(COLOR_REFUSED)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
