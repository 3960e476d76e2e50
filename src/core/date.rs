//! Date scoping for registry queries.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::LookupError;

/// Wire format of the `date` query parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The calendar day a registry query is evaluated for.
///
/// Parse user input with [`str::parse`] before calling the client; a
/// malformed string is a permanent [`LookupError::InvalidDate`] and is
/// never replaced with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupDate(NaiveDate);

impl LookupDate {
    /// Today according to the local process clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Use `date` when given, today otherwise.
    pub fn or_today(date: Option<Self>) -> Self {
        date.unwrap_or_else(Self::today)
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for LookupDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for LookupDate {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|e| LookupError::InvalidDate(format!("'{s}' ({e}), use YYYY-MM-DD")))
    }
}

impl fmt::Display for LookupDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let d: LookupDate = "2020-10-07".parse().unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2020, 10, 7).unwrap());
        assert_eq!(d.to_string(), "2020-10-07");
    }

    #[test]
    fn structured_date_formats_with_padding() {
        let d = LookupDate::from(NaiveDate::from_ymd_opt(2021, 3, 8).unwrap());
        assert_eq!(d.to_string(), "2021-03-08");
    }

    #[test]
    fn day_first_format_rejected() {
        let err = "07-10-2020".parse::<LookupDate>().unwrap_err();
        assert!(err.is_permanent());
        assert!(matches!(err, LookupError::InvalidDate(_)));
    }

    #[test]
    fn impossible_date_rejected() {
        assert!("2021-02-30".parse::<LookupDate>().is_err());
        assert!("".parse::<LookupDate>().is_err());
    }

    #[test]
    fn explicit_date_wins_over_today() {
        let d: LookupDate = "2020-01-01".parse().unwrap();
        assert_eq!(LookupDate::or_today(Some(d)), d);
    }
}
