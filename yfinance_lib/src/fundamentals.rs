//! Financial-statement normalization for the fundamentals timeseries endpoint.
//!
//! A request names either a whole statement or one line item. Statement
//! requests produce a [`FundamentalTable`] whose item series keep their own
//! timestamps; item requests produce a single [`FundamentalSeries`].

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use yfinance_api::types::{ReportedValue, TimeseriesDataPoint, TimeseriesResponse};

use crate::error::YFinanceError;
use crate::fundamental_catalog::{CatalogEntry, FundamentalCatalog};
use crate::window::{epoch_to_datetime, DateWindow};

pub const VALID_FUNDAMENTAL_INTERVALS: &[&str] = &["annual", "quarterly", "monthly"];

/// Reporting period of a fundamentals series. Also the type-name prefix the
/// provider expects, e.g. `quarterlyInterestExpense`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FundamentalInterval {
    Annual,
    Quarterly,
    Monthly,
}

impl FundamentalInterval {
    pub fn prefix(&self) -> &'static str {
        match self {
            FundamentalInterval::Annual => "annual",
            FundamentalInterval::Quarterly => "quarterly",
            FundamentalInterval::Monthly => "monthly",
        }
    }

    /// Provider type name for `item` at this interval.
    pub fn type_name(&self, item: &str) -> String {
        format!("{}{}", self.prefix(), item)
    }
}

impl std::fmt::Display for FundamentalInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for FundamentalInterval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(FundamentalInterval::Annual),
            "quarterly" => Ok(FundamentalInterval::Quarterly),
            "monthly" => Ok(FundamentalInterval::Monthly),
            _ => Err(()),
        }
    }
}

pub fn parse_fundamental_interval(input: &str) -> Result<FundamentalInterval, YFinanceError> {
    input.parse().map_err(|_| YFinanceError::InvalidInterval {
        interval: input.to_string(),
        valid: VALID_FUNDAMENTAL_INTERVALS.join(", "),
    })
}

/// One reported value. `None` marks a period the provider listed without a value.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// A single line item as a (timestamp, value) table.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FundamentalSeries {
    pub symbol: String,
    pub item: String,
    pub interval: FundamentalInterval,
    pub points: Vec<TimeSeriesPoint>,
}

/// Every reported line item of one statement. Series are not aligned
/// across items.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FundamentalTable {
    pub symbol: String,
    pub statement: String,
    pub interval: FundamentalInterval,
    pub items: BTreeMap<String, Vec<TimeSeriesPoint>>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Fundamentals {
    Statement(FundamentalTable),
    Item(FundamentalSeries),
}

impl Fundamentals {
    pub fn symbol(&self) -> &str {
        match self {
            Fundamentals::Statement(table) => &table.symbol,
            Fundamentals::Item(series) => &series.symbol,
        }
    }

    /// Flatten into `(item, point)` pairs, items in name order.
    pub fn rows(&self) -> Vec<(&str, &TimeSeriesPoint)> {
        match self {
            Fundamentals::Statement(table) => table
                .items
                .iter()
                .flat_map(|(item, points)| points.iter().map(move |p| (item.as_str(), p)))
                .collect(),
            Fundamentals::Item(series) => series
                .points
                .iter()
                .map(|p| (series.item.as_str(), p))
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FundamentalRequest {
    pub symbol: String,
    /// A statement name, a line item, or an alias of either.
    pub item: String,
    pub interval: FundamentalInterval,
    pub window: DateWindow,
}

impl FundamentalRequest {
    pub fn new(symbol: &str, item: &str, interval: FundamentalInterval, window: DateWindow) -> Self {
        Self {
            symbol: symbol.to_string(),
            item: item.to_string(),
            interval,
            window,
        }
    }
}

/// Look up a statement or item, failing with the nearest statement's members.
///
/// # Arguments
/// * `catalog` - Catalog to search
/// * `item` - Statement name, line item, or alias (case-sensitive)
///
/// # Returns
/// * `Ok(CatalogEntry)` - The statement or item the name refers to
/// * `Err(YFinanceError::UnknownFundamentalItem)` - No match; carries the
///   closest statement and its items
pub fn lookup<'a>(
    catalog: &'a FundamentalCatalog,
    item: &str,
) -> Result<CatalogEntry<'a>, YFinanceError> {
    catalog.resolve(item).ok_or_else(|| {
        let nearest = catalog.nearest_statement(item);
        YFinanceError::UnknownFundamentalItem {
            item: item.to_string(),
            statement: nearest.name.clone(),
            members: nearest.items.clone(),
        }
    })
}

/// Provider type names to request for `entry`.
pub fn type_names(entry: &CatalogEntry<'_>, interval: FundamentalInterval) -> Vec<String> {
    entry
        .items()
        .into_iter()
        .map(|item| interval.type_name(item))
        .collect()
}

/// Resolve a reported value, preferring the raw number over the formatted string.
pub fn resolve_value(value: &ReportedValue) -> Option<f64> {
    match value {
        ReportedValue::Raw { raw, .. } => Some(*raw),
        ReportedValue::Number(n) => Some(*n),
        ReportedValue::Formatted { fmt } => parse_formatted(fmt),
    }
}

/// Parse display strings such as `8.07M`, `-1.2B` or `1,234`.
pub fn parse_formatted(fmt: &str) -> Option<f64> {
    let cleaned: String = fmt.trim().chars().filter(|c| *c != ',').collect();
    let (number, scale) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1e3),
        Some('M') => (&cleaned[..cleaned.len() - 1], 1e6),
        Some('B') => (&cleaned[..cleaned.len() - 1], 1e9),
        Some('T') => (&cleaned[..cleaned.len() - 1], 1e12),
        _ => (cleaned.as_str(), 1.0),
    };
    match number.parse::<f64>() {
        Ok(n) => Some(n * scale),
        Err(_) => {
            tracing::warn!("Unparseable formatted value '{}'", fmt);
            None
        }
    }
}

fn point_timestamp(point: &TimeseriesDataPoint) -> Option<NaiveDateTime> {
    point
        .as_of_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn to_points(
    key: &str,
    raw_points: &[Option<TimeseriesDataPoint>],
    timestamps: &[i64],
) -> Vec<TimeSeriesPoint> {
    let mut points = Vec::with_capacity(raw_points.len());
    for (i, raw) in raw_points.iter().enumerate() {
        let fallback = timestamps.get(i).map(|ts| epoch_to_datetime(*ts));
        let (timestamp, value) = match raw {
            Some(point) => (
                point_timestamp(point).or(fallback),
                point.reported_value.as_ref().and_then(resolve_value),
            ),
            None => (fallback, None),
        };
        match timestamp {
            Some(timestamp) => points.push(TimeSeriesPoint { timestamp, value }),
            None => tracing::warn!("Dropping {}[{}]: no timestamp", key, i),
        }
    }
    points
}

/// Decode a raw timeseries document and normalize it for `entry`.
pub fn normalize_fundamentals(
    raw: Value,
    request: &FundamentalRequest,
    entry: &CatalogEntry<'_>,
) -> Result<Fundamentals, YFinanceError> {
    let response: TimeseriesResponse = serde_json::from_value(raw)?;
    from_timeseries(response, request, entry)
}

/// Normalize an already-decoded timeseries response.
///
/// Series for items outside `entry` or at another interval are ignored.
pub fn from_timeseries(
    response: TimeseriesResponse,
    request: &FundamentalRequest,
    entry: &CatalogEntry<'_>,
) -> Result<Fundamentals, YFinanceError> {
    if let Some(error) = &response.timeseries.error {
        tracing::debug!("Timeseries error for {}: {}", request.symbol, error);
    }
    let wanted = entry.items();
    let prefix = request.interval.prefix();
    let mut items: BTreeMap<String, Vec<TimeSeriesPoint>> = BTreeMap::new();

    for result in response.timeseries.result.unwrap_or_default() {
        for (key, raw_points) in &result.series {
            let item = match key.strip_prefix(prefix) {
                Some(item) if wanted.contains(&item) => item,
                _ => {
                    tracing::debug!("Ignoring series {} for {}", key, request.symbol);
                    continue;
                }
            };
            let points = to_points(key, raw_points, &result.timestamp);
            if !points.is_empty() {
                items.entry(item.to_string()).or_default().extend(points);
            }
        }
    }
    for points in items.values_mut() {
        points.sort_by_key(|p| p.timestamp);
    }

    let no_data = || YFinanceError::NoData {
        symbol: request.symbol.clone(),
        window: request.window.to_string(),
    };

    match entry {
        CatalogEntry::Statement(statement) => {
            if items.is_empty() {
                return Err(no_data());
            }
            Ok(Fundamentals::Statement(FundamentalTable {
                symbol: request.symbol.clone(),
                statement: statement.name.clone(),
                interval: request.interval,
                items,
            }))
        }
        CatalogEntry::Item { item, .. } => {
            let points = items.remove(*item).ok_or_else(no_data)?;
            Ok(Fundamentals::Item(FundamentalSeries {
                symbol: request.symbol.clone(),
                item: item.to_string(),
                interval: request.interval,
                points,
            }))
        }
    }
}
