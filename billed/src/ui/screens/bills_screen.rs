use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::session::Session;
use crate::state::{BillsState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, state: &BillsState, session: &Session) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = format!("Mes notes de frais ({})", session.email);
    screen_title::render_screen_title(f, title_area, &title, &state.bills_loading);

    render_table(f, content_area, state);

    help_bar::render_help_bar(
        f,
        help_area,
        "j/k: naviguer | Enter: justificatif | n: nouvelle note | r: recharger | ?: aide | q: quitter",
    );
}

fn render_table(f: &mut Frame, area: Rect, state: &BillsState) {
    let bills = state.sorted_bills();

    if bills.is_empty() {
        match &state.bills_loading {
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Mes notes de frais", error);
            }
            LoadingState::Loading(_) => {
                empty_state::render_loading_state(
                    f,
                    area,
                    "Mes notes de frais",
                    "Chargement des notes...",
                );
            }
            LoadingState::NotStarted | LoadingState::Loaded => {
                empty_state::render_empty_state(
                    f,
                    area,
                    "Mes notes de frais",
                    "Aucune note de frais",
                    Some("Appuyez sur n pour en créer une"),
                );
            }
        }
        return;
    }

    let rows: Vec<Row> = bills
        .iter()
        .map(|bill| {
            Row::new(vec![
                Cell::from(bill.expense_type.clone()),
                Cell::from(bill.name.clone()),
                Cell::from(utils::format_date(&bill.date)),
                Cell::from(utils::format_amount(bill.amount)),
                Cell::from(bill.status.label())
                    .style(Style::default().fg(theme::status_color(bill.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(22),
        Constraint::Percentage(33),
        Constraint::Percentage(15),
        Constraint::Percentage(12),
        Constraint::Percentage(18),
    ];

    let title = match &state.bills_loading {
        LoadingState::Error(error) => format!(" Mes notes de frais ({}) ", error),
        _ => " Mes notes de frais ".to_string(),
    };

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Type", "Nom", "Date", "Montant", "Statut"])
                .style(theme::header_style())
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(theme::selection_style())
        .highlight_symbol("▶ ");

    let mut table_state = state.table_state.borrow_mut();
    f.render_stateful_widget(table, area, &mut table_state);
}
