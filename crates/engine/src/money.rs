use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer fen** (1/100 of a yuan).
///
/// Use this type for **all** monetary values in the engine (entry amounts,
/// daily and monthly totals) to avoid floating-point drift.
///
/// Entry amounts are never negative; the sign only shows up in derived
/// values such as a net total.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(2_800_00);
/// assert_eq!(amount.minor(), 280000);
/// assert_eq!(amount.to_string(), "¥2,800.00");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer fen.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in fen.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value, used when the sign is shown separately.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Formats the amount in yuan without the currency sign (`2,800.00`).
    #[must_use]
    pub fn format_plain(self) -> String {
        let abs = self.0.unsigned_abs();
        let yuan = abs / 100;
        let fen = abs % 100;
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{}.{fen:02}", group_thousands(yuan))
    }
}

/// Coerces user-entered amount text into a non-negative amount.
///
/// Digits past the second decimal are rounded half-up to the fen, so
/// `12.345` keeps its value as `¥12.35`. Anything else that does not parse as
/// a positive or zero amount (empty text, letters, a leading `-`, overflow)
/// becomes [`Money::ZERO`]. Amount input never produces an error.
#[must_use]
pub fn coerce_amount(input: &str) -> Money {
    parse_rounded(input)
        .filter(|amount| !amount.is_negative())
        .unwrap_or(Money::ZERO)
}

fn parse_rounded(input: &str) -> Option<Money> {
    let normalized = input.trim().replace(',', ".");
    let Some((whole, frac)) = normalized.split_once('.') else {
        return normalized.parse().ok();
    };
    if frac.len() <= 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return normalized.parse().ok();
    }
    if whole.starts_with('-') {
        return None;
    }
    let kept: Money = format!("{whole}.{}", &frac[..2]).parse().ok()?;
    let round_up = frac.as_bytes()[2] >= b'5';
    Some(if round_up { kept + Money::new(1) } else { kept })
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}¥{}", self.abs().format_plain())
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into fen.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let yuan_str = parts.next().ok_or_else(invalid)?;
        let fen_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if yuan_str.is_empty() || !yuan_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let yuan: i64 = yuan_str.parse().map_err(|_| overflow())?;

        let fen: i64 = match fen_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = yuan
            .checked_mul(100)
            .and_then(|v| v.checked_add(fen))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_yuan_with_grouping() {
        assert_eq!(Money::new(0).to_string(), "¥0.00");
        assert_eq!(Money::new(1).to_string(), "¥0.01");
        assert_eq!(Money::new(4250).to_string(), "¥42.50");
        assert_eq!(Money::new(280_000).to_string(), "¥2,800.00");
        assert_eq!(Money::new(123_456_789).to_string(), "¥1,234,567.89");
        assert_eq!(Money::new(-4250).to_string(), "-¥42.50");
        assert_eq!(Money::new(-4250).format_plain(), "-42.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
        assert_eq!("7.".parse::<Money>().unwrap().minor(), 700);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("0.001".parse::<Money>().is_err());
    }

    #[test]
    fn coerce_turns_bad_input_into_zero() {
        assert_eq!(coerce_amount("42.50"), Money::new(4250));
        assert_eq!(coerce_amount(""), Money::ZERO);
        assert_eq!(coerce_amount("abc"), Money::ZERO);
        assert_eq!(coerce_amount("12abc"), Money::ZERO);
        assert_eq!(coerce_amount("-5"), Money::ZERO);
        assert_eq!(coerce_amount("99999999999999999999"), Money::ZERO);
        assert_eq!(coerce_amount("1.2.3"), Money::ZERO);
    }

    #[test]
    fn coerce_rounds_extra_decimals_to_fen() {
        assert_eq!(coerce_amount("12.345"), Money::new(1235));
        assert_eq!(coerce_amount("12.344"), Money::new(1234));
        assert_eq!(coerce_amount("0,999"), Money::new(100));
        assert_eq!(coerce_amount("0.001"), Money::ZERO);
        assert_eq!(coerce_amount("-0.005"), Money::ZERO);
        assert_eq!(coerce_amount("1.23x"), Money::ZERO);
    }

    #[test]
    fn sum_and_net_can_go_negative() {
        let total: Money = [Money::new(100), Money::new(250)].into_iter().sum();
        assert_eq!(total, Money::new(350));
        assert!((Money::new(100) - total).is_negative());
        assert_eq!((Money::new(100) - total).abs(), Money::new(250));
    }
}
