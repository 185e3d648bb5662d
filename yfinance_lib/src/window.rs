//! Resolves a named range or an explicit start/end pair into the epoch
//! second boundaries the provider expects as `period1`/`period2`.

use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::YFinanceError;

pub const VALID_RANGES: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Range used when neither a range nor a start date is given.
pub const DEFAULT_RANGE: &str = "1mo";

/// Named look-back windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeToken {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl RangeToken {
    /// Start of the window ending at `now`.
    pub fn start_from(&self, now: NaiveDateTime) -> NaiveDateTime {
        let months = |n: u32| now.checked_sub_months(Months::new(n)).unwrap_or_else(earliest);
        match self {
            RangeToken::OneDay => now - Duration::days(1),
            RangeToken::FiveDays => now - Duration::days(5),
            RangeToken::OneMonth => months(1),
            RangeToken::ThreeMonths => months(3),
            RangeToken::SixMonths => months(6),
            RangeToken::OneYear => months(12),
            RangeToken::TwoYears => months(24),
            RangeToken::FiveYears => months(60),
            RangeToken::TenYears => months(120),
            RangeToken::YearToDate => NaiveDate::from_ymd_opt(now.year(), 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_else(earliest),
            RangeToken::Max => earliest(),
        }
    }
}

fn earliest() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

impl std::fmt::Display for RangeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RangeToken::OneDay => "1d",
                RangeToken::FiveDays => "5d",
                RangeToken::OneMonth => "1mo",
                RangeToken::ThreeMonths => "3mo",
                RangeToken::SixMonths => "6mo",
                RangeToken::OneYear => "1y",
                RangeToken::TwoYears => "2y",
                RangeToken::FiveYears => "5y",
                RangeToken::TenYears => "10y",
                RangeToken::YearToDate => "ytd",
                RangeToken::Max => "max",
            }
        )
    }
}

impl FromStr for RangeToken {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(RangeToken::OneDay),
            "5d" => Ok(RangeToken::FiveDays),
            "1mo" => Ok(RangeToken::OneMonth),
            "3mo" => Ok(RangeToken::ThreeMonths),
            "6mo" => Ok(RangeToken::SixMonths),
            "1y" => Ok(RangeToken::OneYear),
            "2y" => Ok(RangeToken::TwoYears),
            "5y" => Ok(RangeToken::FiveYears),
            "10y" => Ok(RangeToken::TenYears),
            "ytd" => Ok(RangeToken::YearToDate),
            "max" => Ok(RangeToken::Max),
            _ => Err(()),
        }
    }
}

/// Validate a range token against [`VALID_RANGES`].
pub fn validate_range(input: &str) -> Result<RangeToken, YFinanceError> {
    input
        .parse()
        .map_err(|_| YFinanceError::InvalidRange(input.to_string()))
}

/// A window boundary as a caller may supply it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Must be exactly `yyyy-mm-dd`.
    Text(String),
}

impl DateInput {
    /// The boundary as a naive UTC date-time; dates map to midnight.
    pub fn to_datetime(&self) -> Result<NaiveDateTime, YFinanceError> {
        match self {
            DateInput::Date(date) => date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| YFinanceError::InvalidDateFormat(date.to_string())),
            DateInput::DateTime(dt) => Ok(*dt),
            DateInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.len() != 10 {
                    return Err(YFinanceError::InvalidDateFormat(text.clone()));
                }
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .ok_or_else(|| YFinanceError::InvalidDateFormat(text.clone()))
            }
        }
    }
}

impl std::fmt::Display for DateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateInput::Date(date) => write!(f, "{}", date),
            DateInput::DateTime(dt) => write!(f, "{}", dt),
            DateInput::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

/// Resolved window in Unix epoch seconds. Always `period1 < period2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EpochWindow {
    pub period1: i64,
    pub period2: i64,
}

/// The caller's window request, before resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub range: Option<String>,
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
}

impl DateWindow {
    pub fn range(range: &str) -> Self {
        Self {
            range: Some(range.to_string()),
            ..Self::default()
        }
    }

    pub fn between(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Self {
        Self {
            range: None,
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// From `start` up to now.
    pub fn since(start: impl Into<DateInput>) -> Self {
        Self {
            range: None,
            start: Some(start.into()),
            end: None,
        }
    }

    pub fn resolve(&self) -> Result<EpochWindow, YFinanceError> {
        self.resolve_at(Utc::now().naive_utc())
    }

    /// Resolve against a fixed `now`.
    ///
    /// An explicit start wins over a range. A range token is validated
    /// whenever present, even if a start date overrides it.
    ///
    /// # Arguments
    /// * `now` - Instant that named ranges and an open end are measured from
    ///
    /// # Returns
    /// * `Ok(EpochWindow)` - `period1 < period2`, both in epoch seconds
    /// * `Err(YFinanceError)` - Invalid range token, unparseable date, an end
    ///   without a start, or an empty or inverted window
    pub fn resolve_at(&self, now: NaiveDateTime) -> Result<EpochWindow, YFinanceError> {
        let token = match self.range.as_deref() {
            Some(range) => Some(validate_range(range)?),
            None => None,
        };

        let (start, end) = match (&self.start, &self.end) {
            (Some(start), Some(end)) => (start.to_datetime()?, end.to_datetime()?),
            (Some(start), None) => (start.to_datetime()?, now),
            (None, Some(end)) => {
                return Err(YFinanceError::InvalidWindow(format!(
                    "end {} given without a start",
                    end
                )))
            }
            (None, None) => {
                let token = match token {
                    Some(token) => token,
                    None => validate_range(DEFAULT_RANGE)?,
                };
                (token.start_from(now), now)
            }
        };

        let window = EpochWindow {
            period1: start.and_utc().timestamp(),
            period2: end.and_utc().timestamp(),
        };
        if window.period1 >= window.period2 {
            return Err(YFinanceError::InvalidWindow(format!(
                "start {} is not before end {}",
                start, end
            )));
        }
        Ok(window)
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.start, &self.end, &self.range) {
            (Some(start), Some(end), _) => write!(f, "{}..{}", start, end),
            (Some(start), None, _) => write!(f, "{}..now", start),
            (None, _, Some(range)) => write!(f, "range {}", range),
            (None, _, None) => write!(f, "range {}", DEFAULT_RANGE),
        }
    }
}

/// Resolve `range` or `(start, end)` into epoch boundaries, as of now.
pub fn resolve(
    range: Option<&str>,
    start: Option<DateInput>,
    end: Option<DateInput>,
) -> Result<EpochWindow, YFinanceError> {
    DateWindow {
        range: range.map(str::to_string),
        start,
        end,
    }
    .resolve()
}

/// Decode provider epoch seconds into a naive date-time, seconds resolution.
pub fn epoch_to_datetime(seconds: i64) -> NaiveDateTime {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 12, 9)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    fn ts(y: i32, m: u32, d: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp()
    }

    #[test]
    fn default_is_one_month() {
        let window = DateWindow::default().resolve_at(now()).unwrap();
        let expected = DateWindow::range("1mo").resolve_at(now()).unwrap();
        assert_eq!(window, expected);
        assert_eq!(window.period2, now().and_utc().timestamp());
        assert_eq!(window.period1, ts(2022, 11, 9) + 15 * 3600);
    }

    #[test]
    fn all_valid_ranges_resolve() {
        for token in VALID_RANGES {
            let window = DateWindow::range(token).resolve_at(now()).unwrap();
            assert!(window.period1 < window.period2, "range {}", token);
        }
    }

    #[test]
    fn one_day_range() {
        let window = DateWindow::range("1d").resolve_at(now()).unwrap();
        assert_eq!(window.period2 - window.period1, 86_400);
    }

    #[test]
    fn ytd_starts_january_first() {
        let window = DateWindow::range("ytd").resolve_at(now()).unwrap();
        assert_eq!(window.period1, ts(2022, 1, 1));
    }

    #[test]
    fn max_starts_in_1900() {
        let window = DateWindow::range("max").resolve_at(now()).unwrap();
        assert_eq!(window.period1, ts(1900, 1, 1));
        assert!(window.period1 < 0);
    }

    #[test]
    fn unknown_range_rejected() {
        let err = DateWindow::range("2mo").resolve_at(now()).unwrap_err();
        assert!(matches!(err, YFinanceError::InvalidRange(ref r) if r == "2mo"));
        assert!(validate_range("1M").is_err());
    }

    #[test]
    fn explicit_window_overrides_range() {
        let window = DateWindow {
            range: Some("5d".to_string()),
            start: Some("2000-01-01".into()),
            end: Some("2022-12-31".into()),
        }
        .resolve_at(now())
        .unwrap();
        assert_eq!(
            window,
            EpochWindow {
                period1: 946684800,
                period2: 1672444800
            }
        );
    }

    #[test]
    fn start_without_end_runs_to_now() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let window = DateWindow::since(date).resolve_at(now()).unwrap();
        assert_eq!(window.period1, ts(2022, 1, 3));
        assert_eq!(window.period2, now().and_utc().timestamp());
    }

    #[test]
    fn accepts_date_datetime_and_text() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let dt = date.and_hms_opt(9, 30, 0).unwrap();
        let a = DateWindow::between(date, "2021-07-01").resolve_at(now()).unwrap();
        let b = DateWindow::between(dt, "2021-07-01").resolve_at(now()).unwrap();
        assert_eq!(a.period1, ts(2021, 6, 1));
        assert_eq!(b.period1, ts(2021, 6, 1) + 9 * 3600 + 30 * 60);
        assert_eq!(a.period2, b.period2);
    }

    #[test]
    fn malformed_dates_rejected() {
        for bad in ["2021/06/01", "2021-6-1", "June 1st", "2021-13-01", "", "2021-06-01T00:00"] {
            let err = DateWindow::since(bad).resolve_at(now()).unwrap_err();
            assert!(
                matches!(err, YFinanceError::InvalidDateFormat(_)),
                "{} gave {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn inverted_window_rejected() {
        let err = DateWindow::between("2022-12-31", "2000-01-01")
            .resolve_at(now())
            .unwrap_err();
        assert!(matches!(err, YFinanceError::InvalidWindow(_)));

        let err = DateWindow::between("2022-01-01", "2022-01-01")
            .resolve_at(now())
            .unwrap_err();
        assert!(matches!(err, YFinanceError::InvalidWindow(_)));
    }

    #[test]
    fn end_without_start_rejected() {
        let window = DateWindow {
            end: Some("2022-01-01".into()),
            ..DateWindow::default()
        };
        assert!(matches!(
            window.resolve_at(now()),
            Err(YFinanceError::InvalidWindow(_))
        ));
    }

    #[test]
    fn free_function_resolves_explicit_window() {
        let window = resolve(None, Some("2000-01-01".into()), Some("2022-12-31".into())).unwrap();
        assert_eq!(window.period1, 946684800);
    }

    #[test]
    fn window_display() {
        assert_eq!(DateWindow::range("5y").to_string(), "range 5y");
        assert_eq!(DateWindow::default().to_string(), "range 1mo");
        assert_eq!(
            DateWindow::between("2000-01-01", "2022-12-31").to_string(),
            "2000-01-01..2022-12-31"
        );
    }

    #[test]
    fn epoch_decoding() {
        let dt = epoch_to_datetime(1670598513);
        assert_eq!(dt.to_string(), "2022-12-09 15:08:33");
        assert_eq!(epoch_to_datetime(0).to_string(), "1970-01-01 00:00:00");
    }
}
