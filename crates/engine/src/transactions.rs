//! Transaction primitives.
//!
//! A `Transaction` is one income, expense or note entry. Its calendar date
//! and time are kept as the text they were recorded with and parsed on
//! demand, so an entry with a date nobody can read still lives in the store
//! and still counts towards kind totals.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Note,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Note => "note",
        }
    }

    /// Label shown next to an entry.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "收入",
            Self::Expense => "支出",
            Self::Note => "笔记",
        }
    }

    /// Next kind in the edit screen toggle order.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Expense => Self::Income,
            Self::Income => Self::Note,
            Self::Note => Self::Expense,
        }
    }

    /// Previous kind in the toggle order; undoes [`Self::cycle`].
    #[must_use]
    pub fn cycle_back(self) -> Self {
        match self {
            Self::Expense => Self::Note,
            Self::Income => Self::Expense,
            Self::Note => Self::Income,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "note" => Ok(Self::Note),
            other => Err(EngineError::KeyNotFound(format!(
                "transaction kind {other}"
            ))),
        }
    }
}

/// Opaque identifier, unique within a store for its whole lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Fresh random id for a newly created entry.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The calendar day an entry is attributed to, as recorded.
///
/// Accepted layouts are `2025年8月20日`, `2025-08-20` and `2025/8/20`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurredDate(String);

impl OccurredDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Records a date in the layout used for new entries.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!(
            "{}年{}月{}日",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the recorded text into a calendar day, `None` when malformed.
    pub fn parse(&self) -> Option<NaiveDate> {
        parse_date(&self.0)
    }
}

impl fmt::Display for OccurredDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_suffix('日') {
        let (year, rest) = rest.split_once('年')?;
        let (month, day) = rest.split_once('月')?;
        return ymd(year, month, day);
    }
    let sep = if raw.contains('-') { '-' } else { '/' };
    let mut parts = raw.split(sep);
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    ymd(year, month, day)
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    fn number(s: &str) -> Option<&str> {
        let s = s.trim();
        (!s.is_empty() && s.chars().all(|c| c.is_ascii_digit())).then_some(s)
    }
    NaiveDate::from_ymd_opt(
        number(year)?.parse().ok()?,
        number(month)?.parse().ok()?,
        number(day)?.parse().ok()?,
    )
}

/// Parses a recorded time of day.
///
/// Handles `14:05` as well as `上午 10:45` / `下午 06:30`. On the 12-hour
/// clock `上午 12` is midnight and `下午 12` is noon.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    let (meridiem, clock) = if let Some(rest) = raw.strip_prefix("下午") {
        (Some(true), rest.trim())
    } else if let Some(rest) = raw.strip_prefix("上午") {
        (Some(false), rest.trim())
    } else {
        (None, raw)
    };
    let (hour, minute) = clock.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    let hour = match meridiem {
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
        None => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub note: String,
    pub tags: Vec<String>,
    pub occurred_date: OccurredDate,
    pub occurred_time: String,
    pub location: Option<String>,
    pub payment_method: Option<String>,
}

impl Transaction {
    /// Creates an entry stamped with `now` and a fresh id.
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        note: impl Into<String>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            kind,
            amount: if kind == TransactionKind::Note {
                Money::ZERO
            } else {
                amount
            },
            note: note.into(),
            tags: Vec::new(),
            occurred_date: OccurredDate::from_date(now.date()),
            occurred_time: now.format("%H:%M").to_string(),
            location: None,
            payment_method: None,
        }
    }

    /// Calendar day of the entry, `None` when its date is malformed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.occurred_date.parse()
    }

    /// Whether the entry moves money at all.
    pub fn is_monetary(&self) -> bool {
        self.kind != TransactionKind::Note
    }
}
