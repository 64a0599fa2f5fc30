//! Calendar dates written as `DD/MM/YYYY`.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// `chrono` format string matching the persisted `DD/MM/YYYY` layout.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A timezone-free calendar date attached to bills and installments.
///
/// Ordering is chronological (proleptic Gregorian), never textual, so
/// `05/01/2024` sorts after `20/12/2023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillDate(NaiveDate);

impl BillDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_dmy(day: u32, month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in the local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses `DD/MM/YYYY` by splitting on `/`.
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        let trimmed = text.trim();
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() != 3 {
            return Err(DateParseError::Shape(trimmed.to_string()));
        }
        let day: u32 = parse_component(parts[0], trimmed)?;
        let month: u32 = parse_component(parts[1], trimmed)?;
        let year: i32 = parse_component(parts[2], trimmed)?;
        Self::from_dmy(day, month, year)
            .ok_or_else(|| DateParseError::NoSuchDate(trimmed.to_string()))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Days since 01/01/0001, usable as a plain integer sort key.
    pub fn day_number(&self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Orders `a` before `b` when `a` is more recent (descending sort).
    pub fn most_recent_first(a: &BillDate, b: &BillDate) -> Ordering {
        b.cmp(a)
    }
}

fn parse_component<T: FromStr>(part: &str, whole: &str) -> Result<T, DateParseError> {
    part.trim()
        .parse()
        .map_err(|_| DateParseError::Component(whole.to_string()))
}

impl fmt::Display for BillDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for BillDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for BillDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for BillDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BillDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        BillDate::parse(&raw).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised while reading a `DD/MM/YYYY` string.
pub enum DateParseError {
    Shape(String),
    Component(String),
    NoSuchDate(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::Shape(raw) => {
                write!(f, "date `{raw}` must look like DD/MM/YYYY")
            }
            DateParseError::Component(raw) => {
                write!(f, "date `{raw}` contains a non-numeric component")
            }
            DateParseError::NoSuchDate(raw) => write!(f, "date `{raw}` does not exist"),
        }
    }
}

impl std::error::Error for DateParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded_forms() {
        let padded = BillDate::parse("05/01/2024").unwrap();
        let loose = BillDate::parse("5/1/2024").unwrap();
        assert_eq!(padded, loose);
        assert_eq!(padded.to_string(), "05/01/2024");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            BillDate::parse("2024-01-05"),
            Err(DateParseError::Shape(_))
        ));
        assert!(matches!(
            BillDate::parse("aa/01/2024"),
            Err(DateParseError::Component(_))
        ));
        assert!(matches!(
            BillDate::parse("31/02/2024"),
            Err(DateParseError::NoSuchDate(_))
        ));
    }

    #[test]
    fn compares_by_calendar_not_text() {
        let january = BillDate::parse("05/01/2024").unwrap();
        let december = BillDate::parse("20/12/2023").unwrap();
        assert!(january > december);
        assert!("05/01/2024" < "20/12/2023");
        assert_eq!(
            BillDate::most_recent_first(&january, &december),
            Ordering::Less
        );
        assert_eq!(january.day_number() - december.day_number(), 16);
    }

    #[test]
    fn serializes_as_dd_mm_yyyy_string() {
        let date = BillDate::from_dmy(1, 6, 2024).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"01/06/2024\"");
        let back: BillDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<BillDate>("\"32/01/2024\"").is_err());
    }
}
