//! Blocking popups: alerts and the receipt preview.

use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::state::Modal;
use crate::ui::{layouts, theme};

use super::popup;

pub fn render_modal(f: &mut Frame, modal: &Modal) {
    match modal {
        Modal::Alert(message) => render_alert(f, message),
        Modal::Receipt {
            file_name,
            file_url,
        } => render_receipt(f, file_name.as_deref(), file_url.as_deref()),
    }
}

fn render_alert(f: &mut Frame, message: &str) {
    let inner = popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::SMALL,
        " Attention ",
        theme::danger_border_style(),
    );

    let text = vec![
        Line::from(""),
        Line::from(Span::raw(message)),
        Line::from(""),
        Line::from(Span::styled("Entrée: fermer", theme::help_text_style())),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, inner);
}

fn render_receipt(f: &mut Frame, file_name: Option<&str>, file_url: Option<&str>) {
    let inner = popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        " Justificatif ",
        theme::info_border_style(),
    );

    let mut text = vec![Line::from("")];
    match file_url {
        Some(url) => {
            text.push(Line::from(vec![
                Span::styled("Fichier : ", theme::header_style()),
                Span::raw(file_name.unwrap_or("-")),
            ]));
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(url, theme::accent_border_style())));
        }
        None => text.push(Line::from(Span::styled(
            "Aucun justificatif",
            theme::loading_style(),
        ))),
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Entrée: fermer",
        theme::help_text_style(),
    )));

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, inner);
}
