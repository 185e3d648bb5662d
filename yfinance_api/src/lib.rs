//! Transport layer for the provider's unofficial finance endpoints: URL
//! construction, query builders, raw payload schemas and the HTTP client.

mod client;
mod endpoint;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::{Client, ClientOptions};
pub use self::endpoint::{Endpoint, JsonSource, Request};
pub use self::errors::Error;
pub use self::query::{
    ChartInterval, ChartQuery, EsgQuery, FundamentalsQuery, OptionsQuery, Query, QueryCommon,
    QuoteSummaryQuery, WindowedQuery, QUOTE_SUMMARY_MODULES,
};
