use chrono::{NaiveDate, NaiveDateTime};

use engine::{
    Action, GRID_CELLS, Money, MonthPosition, OccurredDate, Outcome, Screen, Session, Transaction,
    TransactionDraft, TransactionId, TransactionKind, TransactionStore, WeekStart, YearMonth,
    group_by_date, month_grid, month_totals, sum_by_kind, totals,
};

fn entry(id: &str, kind: TransactionKind, amount: i64, date: &str) -> Transaction {
    Transaction {
        id: TransactionId::from(id),
        kind,
        amount: Money::new(amount),
        note: String::new(),
        tags: Vec::new(),
        occurred_date: OccurredDate::new(date),
        occurred_time: "12:00".to_string(),
        location: None,
        payment_method: None,
    }
}

fn two_entry_store() -> TransactionStore {
    TransactionStore::from(vec![
        entry("t1", TransactionKind::Expense, 42_50, "2025-08-20"),
        entry("t2", TransactionKind::Income, 2_800_00, "2025-08-20"),
    ])
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 21)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

#[test]
fn totals_of_salary_and_lunch() {
    let store = two_entry_store();
    let t = totals(store.transactions());
    assert_eq!(t.income, Money::new(2_800_00));
    assert_eq!(t.expense, Money::new(42_50));
    assert_eq!(t.net, Money::new(2_757_50));
}

#[test]
fn insert_then_group_by_date() {
    let mut store = two_entry_store();
    store.insert(entry("t5", TransactionKind::Expense, 10_00, "2025-08-21"));

    let groups = group_by_date(store.transactions());
    let days: Vec<_> = groups
        .days_desc()
        .map(|(date, entries)| (date.to_string(), entries.len()))
        .collect();
    assert_eq!(
        days,
        [("2025-08-21".to_string(), 1), ("2025-08-20".to_string(), 2)]
    );
}

#[test]
fn kind_sums_cover_every_monetary_entry() {
    let ts = vec![
        entry("a", TransactionKind::Income, 100, "2025-08-01"),
        entry("b", TransactionKind::Expense, 250, "2025-08-02"),
        entry("c", TransactionKind::Note, 1_000, "2025-08-03"),
        entry("d", TransactionKind::Expense, 50, "??"),
    ];
    let monetary: Money = ts
        .iter()
        .filter(|t| t.kind != TransactionKind::Note)
        .map(|t| t.amount)
        .sum();
    assert_eq!(
        sum_by_kind(&ts, TransactionKind::Income) + sum_by_kind(&ts, TransactionKind::Expense),
        monetary
    );
}

#[test]
fn january_grid_rolls_back_into_previous_year() {
    let january = YearMonth::new(2025, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let grid = month_grid(january, today, WeekStart::Sunday, &[]);
    assert_eq!(grid.cells().len(), GRID_CELLS);
    assert_eq!(january.prev().days_in_month(), 31);
    assert_eq!(grid.cells()[0].position, MonthPosition::Previous);
    assert_eq!(grid.cells()[0].day, 29);
    assert!(grid.day(15).unwrap().is_today);
}

#[test]
fn mock_data_month_summary() {
    let store = TransactionStore::with_mock_data();
    let august = YearMonth::new(2025, 8).unwrap();
    let t = month_totals(august, store.transactions());
    assert_eq!(t.income, Money::new(2_800_00));
    assert_eq!(t.expense, Money::new(42_50 + 15_99));

    let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
    let grid = month_grid(august, today, WeekStart::Sunday, store.transactions());
    let active: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| c.has_activity)
        .map(|c| c.day)
        .collect();
    assert_eq!(active, [19, 20]);
}

#[test]
fn edit_flow_end_to_end() {
    let session = Session::new(two_entry_store());

    let (session, _) = session.apply(Action::Add);
    let draft = TransactionDraft {
        kind: TransactionKind::Expense,
        amount: "10".to_string(),
        note: "午饭".to_string(),
        ..TransactionDraft::default()
    };
    let (session, outcome) = session.apply(Action::Save { draft, now: now() });
    assert!(matches!(outcome, Outcome::Inserted(_)));
    assert_eq!(session.store().len(), 3);
    let fresh = &session.transactions()[0];
    assert_ne!(fresh.id.as_str(), "t1");
    assert_ne!(fresh.id.as_str(), "t2");
    assert_eq!(fresh.occurred_date.as_str(), "2025年8月21日");

    let (session, _) = session.apply(Action::Select(TransactionId::from("t1")));
    assert_eq!(session.screen(), Screen::Edit);
    let mut draft = TransactionDraft::from_transaction(session.editing_target().unwrap());
    draft.toggle_tag("餐饮");
    let (session, outcome) = session.apply(Action::Save { draft, now: now() });
    assert_eq!(outcome, Outcome::Replaced(TransactionId::from("t1")));
    assert_eq!(session.store().len(), 3);
    assert_eq!(session.transactions()[1].tags, ["餐饮"]);
    assert_eq!(session.transactions()[1].occurred_date.as_str(), "2025-08-20");

    let groups = group_by_date(session.transactions());
    assert_eq!(groups.len(), 2);
}
