//! Totals and groupings over a slice of transactions.
//!
//! Every function here is pure and recomputed on each render: no caching,
//! no clock reads. Entries whose date does not parse are left out of
//! anything keyed by date but still count in the kind sums.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashSet},
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Money, Transaction, TransactionKind, YearMonth, transactions::parse_time};

/// Income, expense and their difference over some set of entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

impl Totals {
    pub(crate) fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expense += transaction.amount,
            TransactionKind::Note => return,
        }
        self.net = self.income - self.expense;
    }
}

/// Sum of `amount` over the entries of `kind`.
///
/// Note entries never contribute, whatever their stored amount.
pub fn sum_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Money {
    if kind == TransactionKind::Note {
        return Money::ZERO;
    }
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    totals_of(transactions.iter())
}

fn totals_of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();
    for transaction in transactions {
        totals.add(transaction);
    }
    totals
}

/// Totals for the entries of a single day.
pub fn daily_summary(transactions: &[Transaction]) -> Totals {
    totals(transactions)
}

/// Totals restricted to entries dated inside `month`.
pub fn month_totals(month: YearMonth, transactions: &[Transaction]) -> Totals {
    totals_of(
        transactions
            .iter()
            .filter(|t| t.date().is_some_and(|date| month.contains(date))),
    )
}

/// Entries partitioned by calendar day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateGroups {
    groups: BTreeMap<NaiveDate, Vec<Transaction>>,
    skipped: usize,
}

impl DateGroups {
    /// Days with their entries, most recent day first.
    pub fn days_desc(&self) -> impl Iterator<Item = (NaiveDate, &[Transaction])> {
        self.groups
            .iter()
            .rev()
            .map(|(date, entries)| (*date, entries.as_slice()))
    }

    pub fn get(&self, date: NaiveDate) -> Option<&[Transaction]> {
        self.groups.get(&date).map(Vec::as_slice)
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Entries left out because their date did not parse.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Groups entries by their parsed calendar day, keeping input order inside
/// each day.
pub fn group_by_date(transactions: &[Transaction]) -> DateGroups {
    let mut out = DateGroups::default();
    for transaction in transactions {
        match transaction.date() {
            Some(date) => out
                .groups
                .entry(date)
                .or_default()
                .push(transaction.clone()),
            None => {
                tracing::debug!(
                    id = %transaction.id,
                    date = transaction.occurred_date.as_str(),
                    "skipping entry with unparseable date"
                );
                out.skipped += 1;
            }
        }
    }
    out
}

/// Orders entries by date then time, newest first.
///
/// This is a view-side ordering, the store keeps insertion order. Entries
/// whose date does not parse go last, and so does an unparseable time within
/// its day. The sort is stable.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|t| Reverse((t.date(), parse_time(&t.occurred_time))));
}

/// Distinct locations in listing order, skipping `exclude`.
pub fn recent_locations<'a>(
    transactions: &'a [Transaction],
    exclude: &str,
    limit: usize,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter_map(|t| t.location.as_deref())
        .map(str::trim)
        .filter(|location| !location.is_empty() && *location != exclude.trim())
        .filter(|location| seen.insert(*location))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OccurredDate, TransactionId};

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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sums_are_zero_for_empty_input() {
        assert_eq!(sum_by_kind(&[], TransactionKind::Income), Money::ZERO);
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn note_entries_never_count() {
        let ts = [
            entry("n", TransactionKind::Note, 999, "2025-08-20"),
            entry("e", TransactionKind::Expense, 100, "2025-08-20"),
        ];
        assert_eq!(sum_by_kind(&ts, TransactionKind::Note), Money::ZERO);
        let t = totals(&ts);
        assert_eq!(t.income + t.expense, Money::new(100));
    }

    #[test]
    fn net_is_income_minus_expense() {
        let ts = [
            entry("a", TransactionKind::Income, 1_000, "2025-08-20"),
            entry("b", TransactionKind::Expense, 2_500, "2025-08-21"),
            entry("c", TransactionKind::Expense, 250, "garbage"),
        ];
        let t = totals(&ts);
        assert_eq!(t.income, Money::new(1_000));
        assert_eq!(t.expense, Money::new(2_750));
        assert_eq!(t.net, t.income - t.expense);
        assert_eq!(t.net, Money::new(-1_750));
    }

    #[test]
    fn grouping_partitions_parseable_entries() {
        let ts = [
            entry("a", TransactionKind::Expense, 1, "2025年8月20日"),
            entry("b", TransactionKind::Income, 2, "2025-08-21"),
            entry("c", TransactionKind::Note, 0, "not a date"),
            entry("d", TransactionKind::Expense, 3, "2025/8/20"),
        ];
        let groups = group_by_date(&ts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.skipped(), 1);

        let mut seen: Vec<&str> = groups
            .days_desc()
            .flat_map(|(_, entries)| entries.iter().map(|t| t.id.as_str()))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, ["a", "b", "d"]);

        let ids: Vec<_> = groups
            .get(day(2025, 8, 20))
            .unwrap()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn days_are_listed_most_recent_first() {
        let ts = [
            entry("a", TransactionKind::Expense, 1, "2025-08-19"),
            entry("b", TransactionKind::Expense, 1, "2025-09-01"),
            entry("c", TransactionKind::Expense, 1, "2024-12-31"),
        ];
        let days: Vec<_> = group_by_date(&ts).days_desc().map(|(d, _)| d).collect();
        assert_eq!(days, [day(2025, 9, 1), day(2025, 8, 19), day(2024, 12, 31)]);
    }

    #[test]
    fn malformed_dates_still_count_in_kind_sums() {
        let ts = [entry("a", TransactionKind::Expense, 500, "someday")];
        assert!(group_by_date(&ts).is_empty());
        assert_eq!(sum_by_kind(&ts, TransactionKind::Expense), Money::new(500));
    }

    #[test]
    fn month_totals_only_count_that_month() {
        let ts = [
            entry("a", TransactionKind::Income, 1_000, "2025-08-01"),
            entry("b", TransactionKind::Expense, 300, "2025-08-31"),
            entry("c", TransactionKind::Expense, 700, "2025-09-01"),
            entry("d", TransactionKind::Expense, 900, "bad"),
        ];
        let august = YearMonth::new(2025, 8).unwrap();
        let t = month_totals(august, &ts);
        assert_eq!(t.income, Money::new(1_000));
        assert_eq!(t.expense, Money::new(300));
        assert_eq!(t.net, Money::new(700));
    }

    #[test]
    fn sorts_by_date_then_time() {
        let mut ts = vec![
            entry("old", TransactionKind::Expense, 1, "2025-08-19"),
            entry("bad", TransactionKind::Expense, 1, "??"),
            entry("morning", TransactionKind::Expense, 1, "2025-08-20"),
            entry("evening", TransactionKind::Expense, 1, "2025-08-20"),
        ];
        ts[2].occurred_time = "上午 08:15".to_string();
        ts[3].occurred_time = "下午 06:30".to_string();
        sort_newest_first(&mut ts);
        let ids: Vec<_> = ts.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["evening", "morning", "old", "bad"]);
    }

    #[test]
    fn recent_locations_are_distinct_and_limited() {
        let mut ts: Vec<_> = ["市中心", "公司", "市中心", " ", "机场", "商场"]
            .iter()
            .enumerate()
            .map(|(i, loc)| {
                let mut t = entry(&i.to_string(), TransactionKind::Expense, 1, "2025-08-20");
                t.location = Some(loc.to_string());
                t
            })
            .collect();
        ts.push(entry("none", TransactionKind::Expense, 1, "2025-08-20"));

        assert_eq!(recent_locations(&ts, "", 3), ["市中心", "公司", "机场"]);
        assert_eq!(recent_locations(&ts, "公司", 3), ["市中心", "机场", "商场"]);
    }
}
