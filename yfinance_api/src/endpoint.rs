//! Provider endpoints and the transport-agnostic request description.

use std::future::Future;

use url::Url;

use crate::{query::Query, Error};

/// The provider endpoints consumed by the normalizers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Price bars (`/v8/finance/chart/{symbol}`).
    Chart,
    /// General metadata grouped into modules (`/v10/finance/quoteSummary/{symbol}`).
    QuoteSummary,
    /// Financial-statement line items (`/ws/fundamentals-timeseries/...`).
    FundamentalsTimeseries,
    /// Option chain for one expiration (`/v7/finance/options/{symbol}`).
    Options,
    /// ESG score history (`/v1/finance/esgChart`).
    Esg,
}

impl Endpoint {
    fn segments<'a>(&self, symbol: &'a str) -> Vec<&'a str> {
        match self {
            Endpoint::Chart => vec!["v8", "finance", "chart", symbol],
            Endpoint::QuoteSummary => vec!["v10", "finance", "quoteSummary", symbol],
            Endpoint::FundamentalsTimeseries => vec![
                "ws",
                "fundamentals-timeseries",
                "v1",
                "finance",
                "timeseries",
                symbol,
            ],
            Endpoint::Options => vec!["v7", "finance", "options", symbol],
            Endpoint::Esg => vec!["v1", "finance", "esgChart"],
        }
    }

    /// Whether the symbol must also travel as a `symbol` query parameter.
    pub fn symbol_param(&self) -> bool {
        matches!(self, Endpoint::Esg | Endpoint::FundamentalsTimeseries)
    }

    /// Builds the endpoint URL under `base`, percent-encoding the symbol.
    pub fn url(&self, base: &Url, symbol: &str) -> Result<Url, Error> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", base);
                Error::RequestFailed
            })?;
            segments.pop_if_empty();
            for segment in self.segments(symbol) {
                segments.push(segment);
            }
        }
        if self.symbol_param() {
            url.query_pairs_mut().append_pair("symbol", symbol);
        }
        Ok(url)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Endpoint::Chart => "chart",
                Endpoint::QuoteSummary => "quoteSummary",
                Endpoint::FundamentalsTimeseries => "fundamentals-timeseries",
                Endpoint::Options => "options",
                Endpoint::Esg => "esgChart",
            }
        )
    }
}

/// One call against one endpoint for one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub endpoint: Endpoint,
    pub symbol: String,
    pub params: Vec<(String, String)>,
}

impl Request {
    pub fn new(endpoint: Endpoint, symbol: &str, query: &impl Query) -> Self {
        Self {
            endpoint,
            symbol: symbol.to_string(),
            params: query.params(),
        }
    }

    /// Looks up the first value of a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The single capability the normalizers need from a transport: fetch one
/// decoded JSON document, or fail with a transport [`Error`].
pub trait JsonSource {
    fn fetch_json(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;
}
