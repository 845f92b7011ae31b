use chrono::{Datelike, NaiveDate};

/// Short French month names, as printed on bill cards
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// `2004-04-04` → `4 Avr. 04`. Anything that is not a `YYYY-MM-DD` date is
/// returned unchanged.
pub fn format_date(date: &str) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return date.to_string();
    };
    format!(
        "{} {}. {:02}",
        parsed.day(),
        MONTHS[parsed.month0() as usize],
        parsed.year().rem_euclid(100)
    )
}

pub fn format_amount(amount: i64) -> String {
    format!("{} €", amount)
}

/// Percentage sign appended to a VAT rate
pub fn format_pct(pct: i64) -> String {
    format!("{} %", pct)
}

/// Shorten `text` to `max_len` characters, marking the cut with `…`
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
