use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer centavos**.
///
/// All report lines are computed in this type so that sums, the closing
/// balance and the reconciliation total never drift the way binary floats do.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(1_330_00);
/// assert_eq!(amount.cents(), 133000);
/// assert_eq!(amount.to_string(), "R$ 1.330,00");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Converts a decimal amount (as stored by external collaborators) into
    /// cents, rounding half away from zero at the second decimal.
    ///
    /// Returns `None` for NaN, infinities and values that do not fit.
    #[must_use]
    pub fn try_from_f64(value: f64) -> Option<MoneyCents> {
        if !value.is_finite() {
            return None;
        }
        // `f64::round` rounds half away from zero.
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(MoneyCents(cents as i64))
    }

    /// Returns the amount as a decimal number.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `pct` percent of the amount, rounded to whole cents half away from zero.
    ///
    /// ```rust
    /// use engine::MoneyCents;
    ///
    /// assert_eq!(MoneyCents::new(50_000).percent_rounded(10), Some(MoneyCents::new(5_000)));
    /// assert_eq!(MoneyCents::new(5).percent_rounded(10), Some(MoneyCents::new(1)));
    /// assert_eq!(MoneyCents::new(-5).percent_rounded(10), Some(MoneyCents::new(-1)));
    /// ```
    #[must_use]
    pub fn percent_rounded(self, pct: i64) -> Option<MoneyCents> {
        let scaled = self.0.checked_mul(pct)?;
        let quotient = scaled / 100;
        let remainder = scaled % 100;
        let rounded = if remainder.abs() * 2 >= 100 {
            quotient.checked_add(scaled.signum())?
        } else {
            quotient
        };
        Some(MoneyCents(rounded))
    }

    /// Formats the amount the Brazilian way without the currency symbol,
    /// e.g. `1.234,56`.
    #[must_use]
    pub fn format_plain(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{}", Self::format_abs(self.0.unsigned_abs()))
    }

    fn format_abs(abs: u64) -> String {
        let reais = (abs / 100).to_string();
        let cents = abs % 100;

        let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
        for (i, digit) in reais.chars().enumerate() {
            if i > 0 && (reais.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }
        format!("{grouped},{cents:02}")
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}R$ {}", Self::format_abs(self.0.unsigned_abs()))
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidInput("empty amount".to_string());
        let invalid = || EngineError::InvalidInput("invalid amount".to_string());
        let overflow = || EngineError::InvalidInput("amount too large".to_string());

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
        let reais_str = parts.next().ok_or_else(invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if reais_str.is_empty() || !reais_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let reais: i64 = reais_str.parse().map_err(|_| overflow())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidInput("too many decimals".to_string())),
                }
            }
        };

        let total = reais
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_brl() {
        assert_eq!(MoneyCents::new(0).to_string(), "R$ 0,00");
        assert_eq!(MoneyCents::new(1).to_string(), "R$ 0,01");
        assert_eq!(MoneyCents::new(1050).to_string(), "R$ 10,50");
        assert_eq!(MoneyCents::new(123_456_78).to_string(), "R$ 123.456,78");
        assert_eq!(MoneyCents::new(-81_000).to_string(), "-R$ 810,00");
        assert_eq!(MoneyCents::new(1_000_000_00).format_plain(), "1.000.000,00");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn from_f64_rounds_half_away_from_zero() {
        assert_eq!(MoneyCents::try_from_f64(500.0), Some(MoneyCents::new(50_000)));
        assert_eq!(MoneyCents::try_from_f64(0.125), Some(MoneyCents::new(13)));
        assert_eq!(MoneyCents::try_from_f64(-0.125), Some(MoneyCents::new(-13)));
        assert_eq!(MoneyCents::try_from_f64(f64::NAN), None);
        assert_eq!(MoneyCents::try_from_f64(f64::INFINITY), None);
        assert_eq!(MoneyCents::try_from_f64(f64::MAX), None);
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(MoneyCents::new(12_345).percent_rounded(10), Some(MoneyCents::new(1_235)));
        assert_eq!(MoneyCents::new(12_344).percent_rounded(10), Some(MoneyCents::new(1_234)));
        assert_eq!(MoneyCents::new(-12_345).percent_rounded(10), Some(MoneyCents::new(-1_235)));
        assert_eq!(MoneyCents::ZERO.percent_rounded(10), Some(MoneyCents::ZERO));
        assert_eq!(MoneyCents::new(i64::MAX).percent_rounded(10), None);
    }

    #[test]
    fn arithmetic_reports_overflow_instead_of_wrapping() {
        let max = MoneyCents::new(i64::MAX);
        assert_eq!(max.checked_add(MoneyCents::new(1)), None);
        assert_eq!(MoneyCents::new(i64::MIN).checked_sub(MoneyCents::new(1)), None);
        assert_eq!(
            MoneyCents::new(150).checked_sub(MoneyCents::new(200)),
            Some(MoneyCents::new(-50))
        );
    }
}
