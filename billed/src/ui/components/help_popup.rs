use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Aide (? ou Esc pour fermer) ",
        theme::accent_border_style(),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Dashboard(dashboard) => {
            items.push(("1/2/3", "Ouvrir ou fermer En attente / Validé / Refusé"));
            items.push(("↑/k", "Carte précédente"));
            items.push(("↓/j", "Carte suivante"));
            items.push(("Enter/→/l", "Afficher ou masquer la note"));
            items.push(("e", "Voir le justificatif"));
            if dashboard.can_review() {
                items.push(("c", "Saisir un commentaire"));
                items.push(("a", "Accepter la note"));
                items.push(("x", "Refuser la note"));
            }
            items.push(("r", "Recharger les notes"));
        }
        Screen::Bills(..) => {
            items.push(("↑/k", "Note précédente"));
            items.push(("↓/j", "Note suivante"));
            items.push(("Enter/e", "Voir le justificatif"));
            items.push(("n", "Nouvelle note de frais"));
            items.push(("r", "Recharger les notes"));
        }
        Screen::NewBill(..) => {
            items.push(("Tab/↓", "Champ suivant"));
            items.push(("Shift+Tab/↑", "Champ précédent"));
            items.push(("←/→/Espace", "Changer le type de dépense"));
            items.push(("Enter", "Charger le justificatif / envoyer"));
            items.push(("Ctrl+S", "Envoyer la note"));
            items.push(("Esc", "Retour aux notes de frais"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Remonter d'une ligne"));
            items.push(("↓/j", "Descendre d'une ligne"));
            items.push(("PgUp/PgDn", "Défiler d'une page"));
            items.push(("Home/End", "Début / fin"));
            items.push(("Esc", "Retour"));
        }
    }

    items.push(("", ""));
    items.push(("g b", "Aller aux notes de frais"));
    items.push(("g n", "Nouvelle note de frais"));
    items.push(("g d", "Aller au tableau de bord"));
    items.push(("g l", "Voir les journaux"));
    items.push(("h/←", "Écran précédent"));
    items.push(("?", "Afficher l'aide"));
    items.push(("q", "Quitter"));

    items
}
