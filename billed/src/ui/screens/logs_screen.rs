use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::LogBuffer;
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = format!("Journaux ({} entrées)", log_buffer.len());
    f.render_widget(Paragraph::new(title).style(theme::title_style()), title_area);

    render_logs(f, content_area, state, log_buffer);
    render_help(f, help_area, state);
}

fn render_logs(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    let entries = log_buffer.get_entries();
    let total = entries.len();

    if total == 0 {
        empty_state::render_empty_state(f, area, "Journaux", "Aucun message", None);
        return;
    }

    // Newest entries at the bottom; the offset counts lines from the bottom
    let inner_height = area.height.saturating_sub(4) as usize;
    let offset = state.scroll_offset.min(total.saturating_sub(1));
    let end = total - offset;
    let start = end.saturating_sub(inner_height);

    let rows: Vec<Row> = entries[start..end]
        .iter()
        .map(|entry| {
            let (label, style) = level_display(entry.level);
            Row::new(vec![
                entry.timestamp.format("%H:%M:%S%.3f").to_string(),
                label.to_string(),
                utils::truncate(&entry.target, 25),
                entry.message.clone(),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(25),
        Constraint::Min(30),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Journaux [{}-{} / {}] ",
            start + 1,
            end,
            total
        )))
        .header(
            Row::new(vec!["Heure", "Niveau", "Cible", "Message"])
                .style(theme::header_style())
                .bottom_margin(1),
        );

    f.render_widget(table, area);
}

fn level_display(level: Level) -> (&'static str, Style) {
    match level {
        Level::ERROR => ("ERROR", theme::error_style()),
        Level::WARN => ("WARN ", theme::loading_style()),
        Level::INFO => ("INFO ", Style::default().fg(theme::COLOR_ACCEPTED)),
        Level::DEBUG => ("DEBUG", Style::default().fg(Color::Blue)),
        Level::TRACE => ("TRACE", theme::help_text_style()),
    }
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState) {
    let scroll_info = if state.scroll_offset > 0 {
        format!(" ({} lignes au-dessus du bas)", state.scroll_offset)
    } else {
        String::new()
    };

    let help_text = format!(
        "j/k: défiler | PgUp/PgDn: page | Home/End: début/fin | Esc: retour | ?: aide{}",
        scroll_info
    );

    help_bar::render_help_bar(f, area, &help_text);
}
