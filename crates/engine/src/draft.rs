//! In-progress values of the edit screen.

use chrono::NaiveDateTime;

use crate::{Money, OccurredDate, Transaction, TransactionId, TransactionKind, coerce_amount};

/// Payment methods offered by the edit screen picker.
pub const PAYMENT_METHODS: [&str; 5] = ["微信", "支付宝", "花呗", "白条", "银行卡"];

/// Form state for creating or editing an entry.
///
/// Fields hold raw user input; coercion happens once, when the draft is turned
/// into a [`Transaction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: String,
    pub note: String,
    pub tags: Vec<String>,
    pub location: String,
    pub payment_method: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            kind: TransactionKind::Expense,
            amount: String::new(),
            note: String::new(),
            tags: Vec::new(),
            location: String::new(),
            payment_method: String::new(),
        }
    }
}

impl TransactionDraft {
    /// Draft pre-filled from an existing entry.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        let amount = if transaction.amount.is_zero() {
            String::new()
        } else {
            transaction.amount.format_plain().replace(',', "")
        };
        Self {
            kind: transaction.kind,
            amount,
            note: transaction.note.clone(),
            tags: transaction.tags.clone(),
            location: transaction.location.clone().unwrap_or_default(),
            payment_method: transaction.payment_method.clone().unwrap_or_default(),
        }
    }

    /// Removes `tag` when selected, appends it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(idx) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(idx);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Amount the draft would be saved with.
    pub fn amount(&self) -> Money {
        if self.kind == TransactionKind::Note {
            Money::ZERO
        } else {
            coerce_amount(&self.amount)
        }
    }

    /// Builds the entry to commit.
    ///
    /// With a `target`, its id, date and time are kept; otherwise a new id is
    /// generated and the entry is stamped with `now`. Blank location and
    /// payment method become `None`.
    pub fn into_transaction(
        self,
        target: Option<&Transaction>,
        now: NaiveDateTime,
    ) -> Transaction {
        let amount = self.amount();
        let (id, occurred_date, occurred_time) = match target {
            Some(existing) => (
                existing.id.clone(),
                existing.occurred_date.clone(),
                existing.occurred_time.clone(),
            ),
            None => (
                TransactionId::generate(),
                OccurredDate::from_date(now.date()),
                now.format("%H:%M").to_string(),
            ),
        };
        Transaction {
            id,
            kind: self.kind,
            amount,
            note: self.note,
            tags: self.tags,
            occurred_date,
            occurred_time,
            location: non_blank(self.location),
            payment_method: non_blank(self.payment_method),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::seed;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 21)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn new_draft_defaults_to_expense() {
        let draft = TransactionDraft::default();
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.amount(), Money::ZERO);
    }

    #[test]
    fn toggling_a_tag_twice_removes_it() {
        let mut draft = TransactionDraft::default();
        draft.toggle_tag("餐饮");
        draft.toggle_tag("交通");
        assert_eq!(draft.tags, ["餐饮", "交通"]);
        draft.toggle_tag("餐饮");
        assert_eq!(draft.tags, ["交通"]);
        assert!(!draft.has_tag("餐饮"));
    }

    #[test]
    fn fresh_entry_gets_new_id_and_timestamp() {
        let draft = TransactionDraft {
            amount: "10".to_string(),
            location: "   ".to_string(),
            payment_method: " 微信 ".to_string(),
            ..TransactionDraft::default()
        };
        let saved = draft.into_transaction(None, now());
        assert_eq!(saved.amount, Money::new(1000));
        assert_eq!(saved.occurred_date.as_str(), "2025年8月21日");
        assert_eq!(saved.occurred_time, "14:05");
        assert_eq!(saved.location, None);
        assert_eq!(saved.payment_method.as_deref(), Some("微信"));
        assert!(!saved.id.as_str().is_empty());
    }

    #[test]
    fn edit_keeps_id_date_and_time() {
        let seeded = seed::mock_transactions();
        let existing = &seeded[0];
        let mut draft = TransactionDraft::from_transaction(existing);
        assert_eq!(draft.amount, "42.50");
        assert_eq!(draft.location, "市中心");
        draft.note = "改过了".to_string();
        draft.amount = "not a number".to_string();

        let saved = draft.into_transaction(Some(existing), now());
        assert_eq!(saved.id, existing.id);
        assert_eq!(saved.occurred_date, existing.occurred_date);
        assert_eq!(saved.occurred_time, existing.occurred_time);
        assert_eq!(saved.note, "改过了");
        assert_eq!(saved.amount, Money::ZERO);
    }

    #[test]
    fn large_amounts_prefill_without_grouping() {
        let seeded = seed::mock_transactions();
        let income = &seeded[1];
        assert_eq!(TransactionDraft::from_transaction(income).amount, "2800.00");
    }

    #[test]
    fn note_drafts_save_zero_amount() {
        let draft = TransactionDraft {
            kind: TransactionKind::Note,
            amount: "99".to_string(),
            ..TransactionDraft::default()
        };
        assert_eq!(draft.into_transaction(None, now()).amount, Money::ZERO);
    }

    #[test]
    fn third_decimal_rounds_instead_of_zeroing() {
        let draft = TransactionDraft {
            amount: "12.345".to_string(),
            ..TransactionDraft::default()
        };
        assert_eq!(draft.amount(), Money::new(1235));
        assert_eq!(draft.into_transaction(None, now()).amount, Money::new(1235));
    }
}
