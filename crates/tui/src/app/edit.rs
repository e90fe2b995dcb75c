use engine::{PAYMENT_METHODS, QUICK_TAGS, Transaction, TransactionDraft, recent_locations};

/// Locations from earlier entries offered by the picker.
pub const RECENT_LOCATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Kind,
    Amount,
    Note,
    Tags,
    Location,
    Payment,
}

impl EditField {
    const ORDER: [EditField; 6] = [
        EditField::Kind,
        EditField::Amount,
        EditField::Note,
        EditField::Tags,
        EditField::Location,
        EditField::Payment,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "类型",
            Self::Amount => "金额",
            Self::Note => "备注",
            Self::Tags => "标签",
            Self::Location => "地点",
            Self::Payment => "支付方式",
        }
    }
}

/// Edit screen form: the draft plus cursor and suggestion state.
#[derive(Debug, Clone)]
pub struct EditState {
    pub draft: TransactionDraft,
    pub focus: EditField,
    pub tag_cursor: usize,
    pub place_cursor: usize,
    pub suggested_tags: Vec<String>,
    pub tags_loading: bool,
    pub suggested_places: Vec<String>,
    pub places_requested: bool,
    pub error: Option<String>,
}

impl EditState {
    pub fn open(target: Option<&Transaction>) -> Self {
        let draft = target
            .map(TransactionDraft::from_transaction)
            .unwrap_or_default();
        Self {
            draft,
            focus: EditField::Amount,
            tag_cursor: 0,
            place_cursor: 0,
            suggested_tags: Vec::new(),
            tags_loading: false,
            suggested_places: Vec::new(),
            places_requested: false,
            error: None,
        }
    }

    /// Quick tags, then suggestions, then anything else already on the draft.
    pub fn tag_options(&self) -> Vec<String> {
        let mut options: Vec<String> = QUICK_TAGS.iter().map(ToString::to_string).collect();
        for tag in self.suggested_tags.iter().chain(&self.draft.tags) {
            if !options.contains(tag) {
                options.push(tag.clone());
            }
        }
        options
    }

    /// Recent locations from the store followed by suggested places.
    pub fn location_options(&self, transactions: &[Transaction]) -> Vec<String> {
        let mut options: Vec<String> =
            recent_locations(transactions, &self.draft.location, RECENT_LOCATIONS)
                .into_iter()
                .map(ToString::to_string)
                .collect();
        for place in &self.suggested_places {
            if !options.contains(place) && place.trim() != self.draft.location.trim() {
                options.push(place.clone());
            }
        }
        options
    }

    pub fn toggle_tag_at_cursor(&mut self) {
        let options = self.tag_options();
        if let Some(tag) = options.get(self.tag_cursor) {
            self.draft.toggle_tag(tag);
        }
    }

    pub fn move_tag_cursor(&mut self, forward: bool) {
        let len = self.tag_options().len();
        self.tag_cursor = step(self.tag_cursor, len, forward);
    }

    pub fn move_place_cursor(&mut self, forward: bool, transactions: &[Transaction]) {
        let len = self.location_options(transactions).len();
        self.place_cursor = step(self.place_cursor, len, forward);
    }

    pub fn choose_place_at_cursor(&mut self, transactions: &[Transaction]) {
        let options = self.location_options(transactions);
        if let Some(place) = options.get(self.place_cursor) {
            self.draft.location = place.clone();
            self.place_cursor = 0;
        }
    }

    /// Steps through the payment methods; an unknown value restarts the cycle.
    pub fn cycle_payment(&mut self, forward: bool) {
        let current = PAYMENT_METHODS
            .iter()
            .position(|m| *m == self.draft.payment_method);
        let len = PAYMENT_METHODS.len();
        let next = match (current, forward) {
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.draft.payment_method = PAYMENT_METHODS[next].to_string();
    }

    /// Accepts digits and one decimal separator.
    pub fn push_amount_char(&mut self, ch: char) {
        let has_separator = self.draft.amount.contains(['.', ',']);
        match ch {
            '0'..='9' => self.draft.amount.push(ch),
            '.' | ',' if !has_separator => self.draft.amount.push('.'),
            _ => {}
        }
    }
}

fn step(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use engine::{Money, OccurredDate, TransactionId, TransactionKind};

    use super::*;

    fn at(location: &str) -> Transaction {
        Transaction {
            id: TransactionId::from(location),
            kind: TransactionKind::Expense,
            amount: Money::new(100),
            note: String::new(),
            tags: Vec::new(),
            occurred_date: OccurredDate::new("2025-08-20"),
            occurred_time: "12:00".to_string(),
            location: Some(location.to_string()),
            payment_method: None,
        }
    }

    #[test]
    fn new_entry_starts_on_amount_as_expense() {
        let edit = EditState::open(None);
        assert_eq!(edit.focus, EditField::Amount);
        assert_eq!(edit.draft.kind, TransactionKind::Expense);
        assert!(edit.draft.amount.is_empty());
    }

    #[test]
    fn focus_wraps_around() {
        assert_eq!(EditField::Payment.next(), EditField::Kind);
        assert_eq!(EditField::Kind.prev(), EditField::Payment);
    }

    #[test]
    fn tag_options_append_suggestions_and_extras_once() {
        let mut edit = EditState::open(None);
        edit.suggested_tags = vec!["餐饮".to_string(), "火锅".to_string()];
        edit.draft.tags = vec!["团队".to_string(), "火锅".to_string()];
        let options = edit.tag_options();
        assert_eq!(options.len(), QUICK_TAGS.len() + 2);
        assert_eq!(&options[QUICK_TAGS.len()..], ["火锅", "团队"]);

        edit.tag_cursor = 0;
        edit.toggle_tag_at_cursor();
        assert!(edit.draft.has_tag("餐饮"));
        edit.toggle_tag_at_cursor();
        assert!(!edit.draft.has_tag("餐饮"));
    }

    #[test]
    fn location_options_skip_current_and_cap_recent() {
        let store = vec![at("公司"), at("市中心"), at("机场"), at("健身房"), at("公司")];
        let mut edit = EditState::open(None);
        edit.draft.location = "公司".to_string();
        edit.suggested_places = vec!["星巴克".to_string(), "机场".to_string()];
        assert_eq!(
            edit.location_options(&store),
            ["市中心", "机场", "健身房", "星巴克"]
        );

        edit.place_cursor = 3;
        edit.choose_place_at_cursor(&store);
        assert_eq!(edit.draft.location, "星巴克");
    }

    #[test]
    fn payment_cycles_both_ways() {
        let mut edit = EditState::open(None);
        edit.cycle_payment(true);
        assert_eq!(edit.draft.payment_method, "微信");
        edit.cycle_payment(false);
        assert_eq!(edit.draft.payment_method, "银行卡");
        edit.draft.payment_method = "维萨卡 *4242".to_string();
        edit.cycle_payment(false);
        assert_eq!(edit.draft.payment_method, "银行卡");
    }

    #[test]
    fn amount_accepts_one_separator() {
        let mut edit = EditState::open(None);
        for ch in "12,5.0x".chars() {
            edit.push_amount_char(ch);
        }
        assert_eq!(edit.draft.amount, "12.50");
    }
}
