use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::dashboard::{
    self, BucketView, CardView, DashboardView, DetailView, RightPanel,
};
use crate::state::LoadingState;
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme, utils,
};

const ARROW_OPEN: &str = "▼";
const ARROW_CLOSED: &str = "▶";

pub fn render(f: &mut Frame, view: &DashboardView, loading: &LoadingState) {
    let (title_area, buckets_area, detail_area, help_area) =
        layouts::dashboard_layout(f.area(), view.navbar_height);

    screen_title::render_screen_title(f, title_area, "Validations", loading);

    match loading {
        LoadingState::Error(error) => {
            empty_state::render_error_state(f, buckets_area, " Notes de frais ", error);
        }
        _ => render_buckets(f, buckets_area, view),
    }

    match &view.right_panel {
        RightPanel::Placeholder => render_placeholder(f, detail_area),
        RightPanel::Detail(detail) => render_detail(f, detail_area, detail),
    }

    help_bar::render_help_bar(f, help_area, help_text(&view.right_panel));
}

fn help_text(panel: &RightPanel) -> &'static str {
    match panel {
        RightPanel::Detail(detail) if detail.editing_comment => {
            "Saisie du commentaire | Enter/Esc: terminer"
        }
        RightPanel::Detail(detail) if detail.can_review => {
            "1/2/3: statuts | j/k: cartes | Enter: fermer | c: commenter | a: accepter | x: refuser | e: justificatif"
        }
        _ => "1/2/3: statuts | j/k: cartes | Enter: ouvrir | e: justificatif | r: recharger | ?: aide",
    }
}

fn render_buckets(f: &mut Frame, area: Rect, view: &DashboardView) {
    let mut lines: Vec<Line> = Vec::new();
    let mut focused_line = None;

    for bucket in &view.buckets {
        lines.push(bucket_header(bucket));
        for card in &bucket.cards {
            if card.focused {
                focused_line = Some(lines.len());
            }
            lines.extend(card_lines(card, area.width.saturating_sub(2)));
        }
        lines.push(Line::from(""));
    }

    // Keep the focused card in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let card_height = theme::CARD_HEIGHT as usize;
    let scroll = focused_line
        .map(|line| (line + card_height).saturating_sub(inner_height))
        .unwrap_or(0);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notes de frais "),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    f.render_widget(paragraph, area);
}

fn bucket_header(bucket: &BucketView) -> Line<'static> {
    let arrow = if bucket.arrow_rotation == 0 {
        ARROW_OPEN
    } else {
        ARROW_CLOSED
    };
    Line::from(vec![
        Span::styled(format!("{} ", arrow), theme::accent_border_style()),
        Span::styled(bucket.title, theme::header_style()),
        Span::styled(
            format!(" ({})  [{}]", bucket.count, bucket.id.index()),
            theme::help_text_style(),
        ),
    ])
}

fn card_lines(view: &CardView, width: u16) -> Vec<Line<'static>> {
    let style = theme::card_style(view.highlight, view.focused);
    let width = width as usize;
    let card = &view.card;

    let pad = |left: String, right: String| -> Line<'static> {
        let used = left.chars().count() + right.chars().count();
        let gap = width.saturating_sub(used + 2).max(1);
        Line::from(Span::styled(
            format!(" {}{}{} ", left, " ".repeat(gap), right),
            style,
        ))
    };

    vec![
        pad(utils::truncate(&card.display_name(), width / 2), card.date.clone()),
        pad(utils::truncate(&card.name, width / 2), card.amount.clone()),
        pad(card.expense_type.clone(), String::new()),
        Line::from(""),
    ]
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Billed", theme::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Sélectionnez une note de frais",
            theme::help_text_style(),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(paragraph, area);
}

fn render_detail(f: &mut Frame, area: Rect, detail: &DetailView) {
    let bill = &detail.bill;

    let field = |label: &'static str, value: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<20}", label), theme::header_style()),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        field("Type de dépense", bill.expense_type.clone()),
        field("Nom de la dépense", bill.name.clone()),
        field("Date", utils::format_date(&bill.date)),
        field("Montant TTC", utils::format_amount(bill.amount)),
        field("TVA", bill.vat.clone()),
        field("%", utils::format_pct(bill.pct)),
        field("Commentaire", bill.commentary.clone()),
        field(
            "Justificatif",
            bill.file_name.clone().unwrap_or_else(|| "-".to_string()),
        ),
        Line::from(vec![
            Span::styled(format!("{:<20}", "Statut"), theme::header_style()),
            Span::styled(
                bill.status.label(),
                Style::default().fg(theme::status_color(bill.status)),
            ),
        ]),
        Line::from(""),
    ];

    let controls = detail.controls();
    if controls.contains(&dashboard::COMMENT_HOOK) {
        let comment_style = if detail.editing_comment {
            theme::form_field_focused_style()
        } else {
            theme::form_field_style()
        };
        let cursor = if detail.editing_comment { "▏" } else { "" };
        lines.push(Line::from(Span::styled(
            "Ajouter un commentaire",
            theme::header_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("{}{}", detail.comment, cursor),
            comment_style,
        )));
        lines.push(Line::from(""));
        if controls.contains(&dashboard::ACCEPT_BUTTON_HOOK) {
            lines.push(Line::from(vec![
                Span::styled(" a: Accepter ", theme::card_accept_style()),
                Span::raw("   "),
                Span::styled(" x: Refuser ", theme::card_refuse_style()),
            ]));
        }
    } else {
        lines.push(field(
            "Commentaire admin",
            bill.comment_admin.clone().unwrap_or_default(),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::accent_border_style())
                .title(" Note de frais "),
        );

    f.render_widget(paragraph, area);
}
