//! Entry point tying the transport to the normalizers.

use std::time::Duration;

use serde_json::Value;
use yfinance_api::{
    ChartQuery, Client, ClientOptions, Endpoint, EsgQuery, FundamentalsQuery, JsonSource,
    OptionsQuery, QuoteSummaryQuery, Request, WindowedQuery,
};

use crate::error::YFinanceError;
use crate::esg::{normalize_esg, EsgScores};
use crate::fundamental_catalog::catalog;
use crate::fundamentals::{lookup, normalize_fundamentals, type_names, FundamentalRequest, Fundamentals};
use crate::options::{normalize_options, OptionChain, OptionChainPage};
use crate::prices::{normalize_chart, PriceRequest, PriceSeries};
use crate::quote_summary::select_modules;

/// Transport settings read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub use_crumb: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let options = ClientOptions::default();
        Self {
            base_url: options.base_url,
            timeout_secs: options.timeout.as_secs(),
            use_crumb: options.use_crumb,
        }
    }
}

impl ClientConfig {
    /// Reads `YFINANCE_BASE_URL`, `YFINANCE_TIMEOUT_SECS` and `YFINANCE_CRUMB`,
    /// falling back to defaults for unset or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("YFINANCE_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: env_u64("YFINANCE_TIMEOUT_SECS", defaults.timeout_secs),
            use_crumb: env_bool("YFINANCE_CRUMB", defaults.use_crumb),
        }
    }

    pub fn to_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            use_crumb: self.use_crumb,
            ..ClientOptions::default()
        }
    }
}

/// Fetches one endpoint per call and returns normalized records.
///
/// Caller input is validated before any request is sent. Every call covers
/// one symbol; batch callers handle failures per symbol.
pub struct YFinance<S = Client> {
    source: S,
}

impl YFinance<Client> {
    /// Client configured from the environment.
    pub fn from_env() -> Result<Self, YFinanceError> {
        let config = ClientConfig::from_env();
        tracing::debug!("Using provider at {}", config.base_url);
        Ok(Self::new(Client::with_options(config.to_options())?))
    }
}

impl<S: JsonSource> YFinance<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn fetch(&self, request: Request) -> Result<Value, YFinanceError> {
        tracing::debug!("Fetching {} for {}", request.endpoint, request.symbol);
        Ok(self.source.fetch_json(&request).await?)
    }

    /// OHLCV bars for one symbol.
    pub async fn get_prices(&self, request: &PriceRequest) -> Result<PriceSeries, YFinanceError> {
        let window = request.window.resolve()?;
        let query = ChartQuery::default()
            .with_period(window.period1, window.period2)
            .with_interval(request.interval)
            .with_pre_post(request.include_pre_post);
        let raw = self
            .fetch(Request::new(Endpoint::Chart, &request.symbol, &query))
            .await?;
        normalize_chart(raw, request)
    }

    /// A statement table or a single line item.
    pub async fn get_fundamental(
        &self,
        request: &FundamentalRequest,
    ) -> Result<Fundamentals, YFinanceError> {
        let entry = lookup(catalog()?, &request.item)?;
        let window = request.window.resolve()?;
        let query = FundamentalsQuery::default()
            .with_types(&type_names(&entry, request.interval))
            .with_period(window.period1, window.period2);
        let raw = self
            .fetch(Request::new(
                Endpoint::FundamentalsTimeseries,
                &request.symbol,
                &query,
            ))
            .await?;
        normalize_fundamentals(raw, request, &entry)
    }

    /// One expiration's contracts; the nearest expiration when `expiration` is `None`.
    pub async fn get_option_page(
        &self,
        symbol: &str,
        expiration: Option<i64>,
    ) -> Result<OptionChainPage, YFinanceError> {
        let query = match expiration {
            Some(date) => OptionsQuery::default().with_expiration(date),
            None => OptionsQuery::default(),
        };
        let raw = self
            .fetch(Request::new(Endpoint::Options, symbol, &query))
            .await?;
        normalize_options(raw, symbol)
    }

    /// Contracts for every listed expiration, fetched one after another.
    pub async fn get_options(&self, symbol: &str) -> Result<OptionChain, YFinanceError> {
        let first = self.get_option_page(symbol, None).await?;
        let remaining = first.remaining_expirations();
        let mut chains = vec![first.chain];
        for expiration in remaining {
            let page = self.get_option_page(symbol, Some(expiration)).await?;
            chains.push(page.chain);
        }
        let chain = OptionChain::combine(chains);
        tracing::debug!("{} option contracts for {}", chain.len(), symbol);
        Ok(chain)
    }

    /// Company and peer-group ESG scores.
    pub async fn get_esg(&self, symbol: &str) -> Result<EsgScores, YFinanceError> {
        let raw = self
            .fetch(Request::new(Endpoint::Esg, symbol, &EsgQuery))
            .await?;
        normalize_esg(raw, symbol)
    }

    /// Raw quote-summary modules. An empty `modules` asks for every module;
    /// a single module comes back as that module's object.
    pub async fn get_quote_summary(
        &self,
        symbol: &str,
        modules: &[String],
    ) -> Result<Value, YFinanceError> {
        let query = QuoteSummaryQuery::default().with_modules(modules);
        let raw = self
            .fetch(Request::new(Endpoint::QuoteSummary, symbol, &query))
            .await?;
        select_modules(raw, symbol, modules)
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}
