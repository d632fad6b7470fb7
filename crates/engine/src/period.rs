//! Reporting period of a monthly map: one calendar month of one year.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::MapError;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, MapError> {
        if !(1..=12).contains(&month) {
            return Err(MapError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        // Both bounds of the half-open range must be representable.
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(year + 1, 1, 1).is_none()
        {
            return Err(MapError::InvalidPeriod(format!("year out of range: {year}")));
        }
        Ok(Self { month, year })
    }

    /// The period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Portuguese name of the month, as printed in the report header.
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// First day of the period (inclusive bound).
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following period (exclusive bound).
    pub fn next_first_day(self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}
