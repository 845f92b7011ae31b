//! Pure helpers turning raw bills into what the screens display.

use billed_api::endpoints::{bills::Bill, BillId, BillStatus};
use std::collections::HashSet;

use crate::ui::utils as ui_utils;

/// Emails whose bills a reviewer must not see: seeded test accounts and the
/// reviewer's own address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerExclusion {
    excluded: HashSet<String>,
}

impl ReviewerExclusion {
    /// Exclude nobody
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: emails.into_iter().map(Into::into).collect(),
        }
    }

    pub fn for_reviewer(test_accounts: &[String], reviewer_email: &str) -> Self {
        Self::new(
            test_accounts
                .iter()
                .cloned()
                .chain(std::iter::once(reviewer_email.to_string())),
        )
    }

    pub fn excludes(&self, email: &str) -> bool {
        self.excluded.contains(email)
    }
}

/// Bills with exactly `status`, in source order, minus excluded submitters.
pub fn filtered_bills<'a>(
    bills: &'a [Bill],
    status: BillStatus,
    exclusion: &ReviewerExclusion,
) -> Vec<&'a Bill> {
    bills
        .iter()
        .filter(|bill| bill.status == status && !exclusion.excludes(&bill.email))
        .collect()
}

/// Display summary of one bill on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub bill_id: BillId,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub expense_type: String,
}

impl Card {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Stable hook of the card's open target
    pub fn hook(&self) -> String {
        format!("open-bill{}", self.bill_id)
    }
}

/// Best-effort submitter name from the email local part: `jane.doe@x`
/// gives ("jane", "doe"), `acme@x` gives ("", "acme").
pub fn names_from_email(email: &str) -> (String, String) {
    let local = email.split('@').next().unwrap_or_default();
    let mut parts = local.split('.');
    match (parts.next(), parts.next()) {
        (Some(first), Some(last)) => (first.to_string(), last.to_string()),
        _ => (String::new(), local.to_string()),
    }
}

pub fn card(bill: &Bill) -> Card {
    let (first_name, last_name) = names_from_email(&bill.email);
    Card {
        bill_id: bill.id.clone(),
        first_name,
        last_name,
        name: bill.name.clone(),
        amount: ui_utils::format_amount(bill.amount),
        date: ui_utils::format_date(&bill.date),
        expense_type: bill.expense_type.clone(),
    }
}

pub fn cards(bills: &[&Bill]) -> Vec<Card> {
    bills.iter().map(|bill| card(bill)).collect()
}

/// Admin decision on a pending bill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Accept,
    Refuse,
}

impl ReviewDecision {
    pub fn status(&self) -> BillStatus {
        match self {
            Self::Accept => BillStatus::Accepted,
            Self::Refuse => BillStatus::Refused,
        }
    }

    pub fn apply(&self, bill: &Bill, comment: &str) -> Bill {
        Bill {
            status: self.status(),
            comment_admin: Some(comment.to_string()),
            ..bill.clone()
        }
    }
}

pub fn accept_bill(bill: &Bill, comment: &str) -> Bill {
    ReviewDecision::Accept.apply(bill, comment)
}

pub fn refuse_bill(bill: &Bill, comment: &str) -> Bill {
    ReviewDecision::Refuse.apply(bill, comment)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn bill(id: &str, email: &str, status: BillStatus) -> Bill {
        Bill {
            id: BillId::from(id),
            email: email.to_string(),
            expense_type: "Hôtel et logement".to_string(),
            name: format!("bill {}", id),
            amount: 400,
            date: "2004-04-04".to_string(),
            vat: "80".to_string(),
            pct: 20,
            commentary: "séminaire billed".to_string(),
            file_url: Some(format!("https://storage.test/{}.jpg", id)),
            file_name: Some(format!("{}.jpg", id)),
            status,
            comment_admin: None,
        }
    }

    #[test]
    fn filter_keeps_only_matching_status() {
        let pending = bill("1", "a.b@x.com", BillStatus::Pending);
        let bills = vec![pending.clone()];

        let for_pending = filtered_bills(&bills, BillStatus::Pending, &ReviewerExclusion::none());
        assert_eq!(for_pending, vec![&pending]);

        let for_accepted =
            filtered_bills(&bills, BillStatus::Accepted, &ReviewerExclusion::none());
        assert!(for_accepted.is_empty());
    }

    #[test]
    fn filter_preserves_source_order() {
        let bills = vec![
            bill("3", "c@x", BillStatus::Refused),
            bill("1", "a@x", BillStatus::Refused),
            bill("2", "b@x", BillStatus::Pending),
            bill("0", "d@x", BillStatus::Refused),
        ];
        let ids: Vec<_> = filtered_bills(&bills, BillStatus::Refused, &ReviewerExclusion::none())
            .into_iter()
            .map(|b| b.id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "0"]);
    }

    #[test]
    fn filter_drops_excluded_submitters() {
        let bills = vec![
            bill("1", "employee@test.tld", BillStatus::Pending),
            bill("2", "me@billed.tld", BillStatus::Pending),
            bill("3", "jane.doe@x.com", BillStatus::Pending),
        ];
        let exclusion =
            ReviewerExclusion::for_reviewer(&["employee@test.tld".to_string()], "me@billed.tld");

        let kept = filtered_bills(&bills, BillStatus::Pending, &exclusion);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "3");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filtered_bills(&[], BillStatus::Pending, &ReviewerExclusion::none()).is_empty());
    }

    #[test]
    fn card_splits_dotted_local_part() {
        let card = card(&bill("1", "jane.doe@x.com", BillStatus::Pending));
        assert_eq!(card.first_name, "jane");
        assert_eq!(card.last_name, "doe");
        assert_eq!(card.display_name(), "jane doe");
        assert_eq!(card.hook(), "open-bill1");
    }

    #[test]
    fn card_without_dot_uses_whole_local_part_as_last_name() {
        let card = card(&bill("1", "acme@x.com", BillStatus::Pending));
        assert_eq!(card.first_name, "");
        assert_eq!(card.last_name, "acme");
        assert_eq!(card.display_name(), "acme");
    }

    #[test]
    fn card_formats_amount_and_date() {
        let card = card(&bill("1", "a@x", BillStatus::Pending));
        assert_eq!(card.amount, "400 €");
        assert_eq!(card.date, "4 Avr. 04");
        assert_eq!(card.expense_type, "Hôtel et logement");
    }

    #[test]
    fn cards_follow_input_order() {
        let a = bill("a", "a@x", BillStatus::Pending);
        let b = bill("b", "b@x", BillStatus::Pending);
        let ids: Vec<_> = cards(&[&b, &a]).into_iter().map(|c| c.bill_id).collect();
        assert_eq!(ids, vec![BillId::from("b"), BillId::from("a")]);
    }

    #[test]
    fn accept_sets_status_and_comment_without_touching_input() {
        let original = bill("1", "a@x", BillStatus::Pending);
        let accepted = accept_bill(&original, "ok pour moi");

        assert_eq!(accepted.status, BillStatus::Accepted);
        assert_eq!(accepted.comment_admin.as_deref(), Some("ok pour moi"));
        assert_eq!(accepted.id, original.id);
        assert_eq!(accepted.amount, original.amount);
        assert_eq!(original.status, BillStatus::Pending);
        assert_eq!(original.comment_admin, None);
    }

    #[test]
    fn refuse_sets_refused_status() {
        let original = bill("1", "a@x", BillStatus::Pending);
        let refused = refuse_bill(&original, "");
        assert_eq!(refused.status, BillStatus::Refused);
        assert_eq!(refused.comment_admin.as_deref(), Some(""));
    }
}
