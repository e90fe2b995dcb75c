//! Month browsing: calendar months and the fixed 42-cell month grid.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, Totals, Transaction};

/// Cells in a month grid: six weeks of seven days, whatever the month.
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
    "十二月",
];

const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// A calendar month; `month` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Previous month; January rolls back to December of the previous year.
    #[must_use]
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Next month; December rolls over to January of the next year.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.next().first_day();
        next.pred_opt()
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Column of the 1st of the month, 0 being the first day of the week.
    pub fn first_weekday(self, week_start: WeekStart) -> u32 {
        let from_sunday = self.first_day().weekday().num_days_from_sunday();
        (from_sunday + 7 - week_start.offset_from_sunday()) % 7
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Chinese month name, `八月`.
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年 {}", self.year, self.month_name())
    }
}

/// First column of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn offset_from_sunday(self) -> u32 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
        }
    }

    /// Column headers, starting from this day.
    pub fn labels(self) -> [&'static str; 7] {
        let mut labels = WEEKDAY_LABELS;
        labels.rotate_left(self.offset_from_sunday() as usize);
        labels
    }
}

impl TryFrom<&str> for WeekStart {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            other => Err(EngineError::KeyNotFound(format!("week start {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MonthPosition {
    Previous,
    Current,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub position: MonthPosition,
    pub is_today: bool,
    pub has_activity: bool,
    /// Income and expense of that day; always zero outside the target month.
    pub totals: Totals,
}

impl DayCell {
    fn outside(day: u32, position: MonthPosition) -> Self {
        Self {
            day,
            position,
            is_today: false,
            has_activity: false,
            totals: Totals::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: WeekStart,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// All [`GRID_CELLS`] cells, row by row.
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Cell of a day of the target month.
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells
            .iter()
            .find(|cell| cell.position == MonthPosition::Current && cell.day == day)
    }
}

/// Builds the grid for `month`.
///
/// `today` is supplied by the caller; only a cell of the target month can be
/// flagged as today. Any entry dated in the target month, notes included,
/// marks its day as active.
pub fn month_grid(
    month: YearMonth,
    today: NaiveDate,
    week_start: WeekStart,
    transactions: &[Transaction],
) -> MonthGrid {
    let days = month.days_in_month();
    let lead = month.first_weekday(week_start);
    let prev_days = month.prev().days_in_month();

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for i in (0..lead).rev() {
        cells.push(DayCell::outside(prev_days - i, MonthPosition::Previous));
    }
    let first_current = cells.len();
    for day in 1..=days {
        cells.push(DayCell {
            day,
            position: MonthPosition::Current,
            is_today: month.contains(today) && today.day() == day,
            has_activity: false,
            totals: Totals::default(),
        });
    }
    let mut next_day = 1;
    while cells.len() < GRID_CELLS {
        cells.push(DayCell::outside(next_day, MonthPosition::Next));
        next_day += 1;
    }

    for transaction in transactions {
        let Some(date) = transaction.date() else {
            continue;
        };
        if !month.contains(date) {
            continue;
        }
        let cell = &mut cells[first_current + date.day() as usize - 1];
        cell.has_activity = true;
        cell.totals.add(transaction);
    }

    MonthGrid {
        month,
        week_start,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, OccurredDate, TransactionId, TransactionKind};

    fn entry(kind: TransactionKind, amount: i64, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
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

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 21).unwrap()
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());
    }

    #[test]
    fn january_rolls_back_to_december() {
        let january = ym(2025, 1);
        assert_eq!(january.prev(), ym(2024, 12));
        assert_eq!(january.prev().days_in_month(), 31);
        assert_eq!(ym(2024, 12).next(), january);

        let grid = month_grid(january, today(), WeekStart::Sunday, &[]);
        assert_eq!(grid.cells().len(), GRID_CELLS);
        let lead: Vec<_> = grid
            .cells()
            .iter()
            .take_while(|c| c.position == MonthPosition::Previous)
            .map(|c| c.day)
            .collect();
        assert_eq!(lead, [29, 30, 31]);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2025, 2).days_in_month(), 28);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(2025, 4).days_in_month(), 30);
    }

    #[test]
    fn every_month_has_forty_two_cells() {
        for year in [1999, 2024, 2025, 2026] {
            for month in 1..=12 {
                for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                    let grid = month_grid(ym(year, month), today(), week_start, &[]);
                    assert_eq!(grid.cells().len(), GRID_CELLS);
                    assert_eq!(grid.weeks().count(), 6);
                    let current = grid
                        .cells()
                        .iter()
                        .filter(|c| c.position == MonthPosition::Current)
                        .count();
                    assert_eq!(current as u32, ym(year, month).days_in_month());
                }
            }
        }
    }

    #[test]
    fn month_starting_on_last_column_spans_six_weeks() {
        // 2025-03-01 is a Saturday.
        let grid = month_grid(ym(2025, 3), today(), WeekStart::Sunday, &[]);
        assert_eq!(grid.cells()[6].day, 1);
        assert_eq!(grid.cells()[6].position, MonthPosition::Current);
        assert_eq!(grid.cells()[36].day, 31);
        let trailing: Vec<_> = grid.cells()[37..].iter().map(|c| c.day).collect();
        assert_eq!(trailing, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn monday_start_shifts_columns() {
        // 2025-01-01 is a Wednesday.
        assert_eq!(ym(2025, 1).first_weekday(WeekStart::Sunday), 3);
        assert_eq!(ym(2025, 1).first_weekday(WeekStart::Monday), 2);
        // 2026-02-01 is a Sunday.
        assert_eq!(ym(2026, 2).first_weekday(WeekStart::Sunday), 0);
        assert_eq!(ym(2026, 2).first_weekday(WeekStart::Monday), 6);
        assert_eq!(WeekStart::Monday.labels()[0], "一");
        assert_eq!(WeekStart::Monday.labels()[6], "日");
    }

    #[test]
    fn today_is_only_flagged_inside_its_month() {
        let grid = month_grid(ym(2025, 8), today(), WeekStart::Sunday, &[]);
        let flagged: Vec<_> = grid.cells().iter().filter(|c| c.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].day, 21);

        let september = month_grid(ym(2025, 9), today(), WeekStart::Sunday, &[]);
        assert!(september.cells().iter().all(|c| !c.is_today));
    }

    #[test]
    fn activity_marks_only_days_of_the_target_month() {
        let ts = [
            entry(TransactionKind::Expense, 4250, "2025年8月20日"),
            entry(TransactionKind::Income, 280_000, "2025年8月20日"),
            entry(TransactionKind::Note, 0, "2025年8月19日"),
            entry(TransactionKind::Expense, 100, "2025年7月31日"),
            entry(TransactionKind::Expense, 100, "2025年9月1日"),
            entry(TransactionKind::Expense, 100, "broken"),
        ];
        let grid = month_grid(ym(2025, 8), today(), WeekStart::Sunday, &ts);

        let day20 = grid.day(20).unwrap();
        assert!(day20.has_activity);
        assert_eq!(day20.totals.income, Money::new(280_000));
        assert_eq!(day20.totals.expense, Money::new(4250));

        let day19 = grid.day(19).unwrap();
        assert!(day19.has_activity);
        assert_eq!(day19.totals, Totals::default());

        assert!(!grid.day(21).unwrap().has_activity);
        assert!(
            grid.cells()
                .iter()
                .filter(|c| c.position != MonthPosition::Current)
                .all(|c| !c.has_activity && c.totals == Totals::default())
        );
    }

    #[test]
    fn displays_chinese_month_header() {
        assert_eq!(ym(2025, 8).to_string(), "2025年 八月");
        assert_eq!(ym(2025, 12).month_name(), "十二月");
    }
}
