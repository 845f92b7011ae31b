use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{NewBillField, NewBillState};
use crate::ui::{components::help_bar, layouts, theme};

pub fn render(f: &mut Frame, form: &NewBillState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    f.render_widget(
        Paragraph::new("Envoyer une note de frais").style(theme::title_style()),
        title_area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(3)])
        .split(content_area);

    render_fields(f, chunks[0], form);
    render_status(f, chunks[1], form);

    help_bar::render_help_bar(
        f,
        help_area,
        "Tab/↑↓: champ | ←→: type | Enter: justificatif/envoyer | Ctrl+S: envoyer | Esc: annuler",
    );
}

fn render_fields(f: &mut Frame, area: Rect, form: &NewBillState) {
    let lines: Vec<Line> = NewBillField::ORDER
        .iter()
        .map(|&field| field_line(form, field))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::accent_border_style())
            .title(" Nouvelle note de frais "),
    );

    f.render_widget(paragraph, area);
}

fn field_line(form: &NewBillState, field: NewBillField) -> Line<'static> {
    let focused = form.current_field == field;
    let value_style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };
    let marker = if focused { "▶ " } else { "  " };

    let value = match field {
        NewBillField::ExpenseType => format!("◀ {} ▶", form.expense_type),
        NewBillField::Date if form.date.is_empty() && !focused => "AAAA-MM-JJ".to_string(),
        NewBillField::Pct if form.pct.is_empty() && !focused => "20".to_string(),
        NewBillField::File => match &form.receipt {
            Some(receipt) if !focused => format!("{} ✓", receipt.file_name),
            _ => form.file_input.clone(),
        },
        NewBillField::Submit => {
            let label = if form.submitting {
                "[ Envoi en cours... ]"
            } else {
                "[ Envoyer ]"
            };
            return Line::from(vec![
                Span::raw(marker),
                Span::styled(label, value_style),
            ]);
        }
        _ => form.value_of(field).to_string(),
    };

    let cursor = if focused && field != NewBillField::ExpenseType {
        "▏"
    } else {
        ""
    };

    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<20}", field.label()), theme::header_style()),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])
}

fn render_status(f: &mut Frame, area: Rect, form: &NewBillState) {
    let line = match &form.error_message {
        Some(message) => Line::from(Span::styled(message.clone(), theme::error_style())),
        None if form.submitting => Line::from(Span::styled(
            "Envoi de la note de frais...",
            theme::loading_style(),
        )),
        None => Line::from(""),
    };

    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
