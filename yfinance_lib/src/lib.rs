//! Normalization layer for the provider's finance endpoints.
//!
//! Turns raw chart, fundamentals, option-chain, ESG and quote-summary
//! documents into flat records. [`YFinance`] wires these normalizers to any
//! [`JsonSource`](yfinance_api::JsonSource), by default the HTTP client from
//! `yfinance_api`.

pub mod client;
pub mod error;
pub mod esg;
pub mod fundamental_catalog;
pub mod fundamentals;
pub mod options;
pub mod prices;
pub mod quote_summary;
pub mod window;

pub use yfinance_api;
pub use yfinance_api::types;
pub use yfinance_api::{ChartInterval, Endpoint, JsonSource, Request};

pub use client::{ClientConfig, YFinance};
pub use error::YFinanceError;
pub use esg::{EsgRecord, EsgScores};
pub use fundamental_catalog::{catalog, CatalogEntry, CatalogError, FundamentalCatalog};
pub use fundamentals::{
    FundamentalInterval, FundamentalRequest, FundamentalSeries, FundamentalTable, Fundamentals,
    TimeSeriesPoint,
};
pub use options::{OptionChain, OptionChainPage, OptionContract};
pub use prices::{PriceBar, PriceColumns, PriceRequest, PriceSeries};
pub use window::{DateInput, DateWindow, EpochWindow, RangeToken};
