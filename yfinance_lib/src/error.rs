//! Error types for the normalization layer.

use thiserror::Error;

use crate::fundamental_catalog::CatalogError;

/// Everything a single-symbol call can fail with.
///
/// Transport failures are passed through unchanged. Caller-input errors are
/// raised before any request is made. "No such data" outcomes are kept
/// apart from transport failures so batch callers can tell a symbol without
/// coverage from an unreachable service.
#[derive(Error, Debug)]
pub enum YFinanceError {
    /// The transport could not deliver a document.
    #[error("Transport error: {0}")]
    Transport(#[from] yfinance_api::Error),
    #[error("Invalid range '{0}'. Valid ranges: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max")]
    InvalidRange(String),
    #[error("Invalid date '{0}'. Expected a date, a date-time, or a yyyy-mm-dd string")]
    InvalidDateFormat(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Invalid interval '{interval}'. Valid intervals: {valid}")]
    InvalidInterval { interval: String, valid: String },
    #[error("Unknown fundamental item '{item}'. Closest statement '{statement}' contains: {}", .members.join(", "))]
    UnknownFundamentalItem {
        item: String,
        statement: String,
        members: Vec<String>,
    },
    #[error("No data for {symbol} ({window})")]
    NoData { symbol: String, window: String },
    #[error("No ESG data for {0}")]
    NoEsgData(String),
    /// The document decoded but did not match the endpoint's schema.
    #[error("Unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Invalid fundamental catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl YFinanceError {
    /// True for outcomes meaning "the provider has nothing for this symbol".
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            YFinanceError::NoData { .. } | YFinanceError::NoEsgData(_)
        )
    }

    /// True for malformed caller input, detected before any request.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            YFinanceError::InvalidRange(_)
                | YFinanceError::InvalidDateFormat(_)
                | YFinanceError::InvalidWindow(_)
                | YFinanceError::InvalidInterval { .. }
                | YFinanceError::UnknownFundamentalItem { .. }
        )
    }
}
