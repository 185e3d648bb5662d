//! Price bar normalization for the chart endpoint.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use yfinance_api::types::{ChartResponse, QuoteIndicator};
use yfinance_api::ChartInterval;

use crate::error::YFinanceError;
use crate::window::{epoch_to_datetime, DateWindow};

pub const VALID_INTERVALS: &[&str] = &[
    "1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "1d", "5d", "1wk", "1mo", "3mo",
];

/// Parse a bar size token, e.g. `1d` or `90m`.
pub fn parse_interval(input: &str) -> Result<ChartInterval, YFinanceError> {
    input.parse().map_err(|_| YFinanceError::InvalidInterval {
        interval: input.to_string(),
        valid: VALID_INTERVALS.join(", "),
    })
}

/// What to fetch from the chart endpoint and how to shape it.
#[derive(Clone, Debug)]
pub struct PriceRequest {
    pub symbol: String,
    pub window: DateWindow,
    pub interval: ChartInterval,
    pub include_pre_post: bool,
    /// Scale OHLC by `adjclose / close`. Ignored for intraday bars.
    pub autoadjust: bool,
}

impl PriceRequest {
    /// Daily bars over the default window, adjusted.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            window: DateWindow::default(),
            interval: ChartInterval::OneDay,
            include_pre_post: false,
            autoadjust: true,
        }
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_interval(mut self, interval: ChartInterval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_pre_post(mut self, include_pre_post: bool) -> Self {
        self.include_pre_post = include_pre_post;
        self
    }

    pub fn with_autoadjust(mut self, autoadjust: bool) -> Self {
        self.autoadjust = autoadjust;
        self
    }
}

/// One OHLCV row. Gap bars carry `None` in every price field.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PriceBar {
    pub ticker: String,
    pub timestamp: NaiveDateTime,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adjclose: Option<f64>,
    pub volume: Option<u64>,
}

/// Normalized bars for one symbol, ascending by timestamp.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub interval: String,
    pub currency: Option<String>,
    pub exchange_timezone: Option<String>,
    /// Whether OHLC were scaled by the adjusted-close ratio.
    pub adjusted: bool,
    pub bars: Vec<PriceBar>,
}

/// Column-oriented view of a [`PriceSeries`]. Every column has one entry per bar.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct PriceColumns {
    pub ticker: Vec<String>,
    pub timestamp: Vec<NaiveDateTime>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub adjclose: Vec<Option<f64>>,
    pub volume: Vec<Option<u64>>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn to_columns(&self) -> PriceColumns {
        let mut columns = PriceColumns::default();
        for bar in &self.bars {
            columns.ticker.push(bar.ticker.clone());
            columns.timestamp.push(bar.timestamp);
            columns.open.push(bar.open);
            columns.high.push(bar.high);
            columns.low.push(bar.low);
            columns.close.push(bar.close);
            columns.adjclose.push(bar.adjclose);
            columns.volume.push(bar.volume);
        }
        columns
    }
}

/// Decode a raw chart document and normalize it.
pub fn normalize_chart(raw: Value, request: &PriceRequest) -> Result<PriceSeries, YFinanceError> {
    let response: ChartResponse = serde_json::from_value(raw)?;
    from_chart(response, request)
}

/// Normalize an already-decoded chart response.
pub fn from_chart(
    response: ChartResponse,
    request: &PriceRequest,
) -> Result<PriceSeries, YFinanceError> {
    let no_data = || YFinanceError::NoData {
        symbol: request.symbol.clone(),
        window: request.window.to_string(),
    };

    if let Some(error) = &response.chart.error {
        tracing::debug!("Chart error for {}: {}", request.symbol, error);
    }
    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(no_data)?;
    let timestamps = match result.timestamp {
        Some(timestamps) if !timestamps.is_empty() => timestamps,
        _ => return Err(no_data()),
    };

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_else(QuoteIndicator::default);
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose);

    let bars: Vec<PriceBar> = timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| PriceBar {
            ticker: request.symbol.clone(),
            timestamp: epoch_to_datetime(*ts),
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            adjclose: adjclose.as_deref().and_then(|a| at(a, i)),
            volume: at(&quote.volume, i),
        })
        .collect();

    let mut series = PriceSeries {
        ticker: request.symbol.clone(),
        interval: request.interval.to_string(),
        currency: result.meta.currency,
        exchange_timezone: result.meta.exchange_timezone_name,
        adjusted: false,
        bars,
    };

    if request.autoadjust {
        if request.interval.is_intraday() {
            tracing::debug!(
                "Skipping price adjustment for {} at intraday interval {}",
                request.symbol,
                request.interval
            );
        } else if adjclose.is_none() {
            tracing::debug!("No adjusted close for {}, bars left unadjusted", request.symbol);
        } else {
            adjust(&mut series.bars);
            series.adjusted = true;
        }
    }

    Ok(series)
}

/// Positional lookup; arrays shorter than the timestamp array pad with `None`.
fn at<T: Copy>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).copied().flatten()
}

/// Scale open, high, low and close by `adjclose / close`. Volume is untouched.
pub fn adjust(bars: &mut [PriceBar]) {
    for bar in bars.iter_mut() {
        let ratio = match (bar.adjclose, bar.close) {
            (Some(adj), Some(close)) if adj != 0.0 && close != 0.0 => adj / close,
            _ => continue,
        };
        bar.open = bar.open.map(|v| v * ratio);
        bar.high = bar.high.map(|v| v * ratio);
        bar.low = bar.low.map(|v| v * ratio);
        bar.close = bar.close.map(|v| v * ratio);
    }
}
