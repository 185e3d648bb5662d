//! HTTP client for the provider's JSON endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use url::Url;

use crate::{
    endpoint::{Endpoint, JsonSource, Request},
    query::{ChartQuery, EsgQuery, FundamentalsQuery, OptionsQuery, Query, QuoteSummaryQuery},
    types::{
        ChartResponse, EsgChartResponse, OptionChainResponse, QuoteSummaryResponse,
        TimeseriesResponse,
    },
    user_agent::get_user_agent,
    Error,
};

/// Connection settings for [`Client`].
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Base URL for the JSON endpoints.
    pub base_url: String,
    /// Page visited once to obtain session cookies before asking for a crumb.
    pub cookie_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to acquire a crumb and append it to every request.
    pub use_crumb: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            timeout: Duration::from_secs(30),
            use_crumb: true,
        }
    }
}

/// HTTP client for the provider's unofficial JSON API.
///
/// Sends requests with a randomized browser user agent and keeps session
/// cookies. The crumb token is fetched on first use and reused for the
/// lifetime of the client.
pub struct Client {
    base_api_url: Url,
    cookie_url: String,
    use_crumb: bool,
    http: reqwest::Client,
    crumb: OnceCell<String>,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Result<Self, Error> {
        Self::with_options(ClientOptions::default())
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_options(ClientOptions {
            base_url: base_url.to_string(),
            cookie_url: base_url.to_string(),
            ..ClientOptions::default()
        })
    }

    pub fn with_options(options: ClientOptions) -> Result<Self, Error> {
        let base_api_url = Url::parse(&options.base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", options.base_url, e);
            Error::RequestFailed
        })?;
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .cookie_store(true)
            .timeout(options.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_api_url,
            cookie_url: options.cookie_url,
            use_crumb: options.use_crumb,
            http,
            crumb: OnceCell::new(),
        })
    }

    async fn crumb(&self) -> Result<&str, Error> {
        let crumb = self
            .crumb
            .get_or_try_init(|| async {
                // The cookie page answers 404 but still sets the session cookie.
                if let Err(e) = self.http.get(&self.cookie_url).send().await {
                    tracing::warn!("Cookie request failed: {}", e);
                }

                let mut url = self.base_api_url.clone();
                url.set_path("/v1/test/getcrumb");
                let (status, body) = self.get_text(url).await?;
                if !status.is_success() {
                    let snippet = truncate_body(&body);
                    tracing::error!("Crumb request failed with status {}: {}", status, snippet);
                    return Err(Error::HttpStatus {
                        status: status.as_u16(),
                        body: snippet,
                    });
                }
                let crumb = body.trim().to_string();
                if crumb.is_empty() || crumb.contains('<') {
                    tracing::error!("Crumb response was not a token: {}", truncate_body(&body));
                    return Err(Error::MalformedBody("invalid crumb".to_string()));
                }
                tracing::debug!("Acquired session crumb");
                Ok(crumb)
            })
            .await?;
        Ok(crumb.as_str())
    }

    async fn get_text(&self, url: Url) -> Result<(reqwest::StatusCode, String), Error> {
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;
        Ok((status, body))
    }

    fn get_url(&self, request: &Request, crumb: Option<&str>) -> Result<Url, Error> {
        let mut url = request.endpoint.url(&self.base_api_url, &request.symbol)?;
        if !request.params.is_empty() || crumb.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.params {
                pairs.append_pair(name, value);
            }
            if let Some(crumb) = crumb {
                pairs.append_pair("crumb", crumb);
            }
        }
        Ok(url)
    }

    async fn get<T>(&self, request: &Request) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let crumb = if self.use_crumb {
            Some(self.crumb().await?)
        } else {
            None
        };
        let url = self.get_url(request, crumb)?;
        tracing::debug!("GET {} {}", request.endpoint, url);

        let (status, body) = self.get_text(url).await?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::MalformedBody(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches one endpoint and returns the decoded, untyped document.
    pub async fn fetch_json(&self, request: &Request) -> Result<serde_json::Value, Error> {
        self.get::<serde_json::Value>(request).await
    }

    /// Fetches price bars for one symbol.
    pub async fn get_chart(&self, symbol: &str, query: &ChartQuery) -> Result<ChartResponse, Error> {
        self.get_typed(Endpoint::Chart, symbol, query).await
    }

    /// Fetches financial-statement line items for one symbol.
    pub async fn get_fundamentals(
        &self,
        symbol: &str,
        query: &FundamentalsQuery,
    ) -> Result<TimeseriesResponse, Error> {
        self.get_typed(Endpoint::FundamentalsTimeseries, symbol, query)
            .await
    }

    /// Fetches the option chain for one expiration.
    pub async fn get_options(
        &self,
        symbol: &str,
        query: &OptionsQuery,
    ) -> Result<OptionChainResponse, Error> {
        self.get_typed(Endpoint::Options, symbol, query).await
    }

    /// Fetches the ESG score history.
    pub async fn get_esg(&self, symbol: &str) -> Result<EsgChartResponse, Error> {
        self.get_typed(Endpoint::Esg, symbol, &EsgQuery).await
    }

    /// Fetches quote-summary modules.
    pub async fn get_quote_summary(
        &self,
        symbol: &str,
        query: &QuoteSummaryQuery,
    ) -> Result<QuoteSummaryResponse, Error> {
        self.get_typed(Endpoint::QuoteSummary, symbol, query).await
    }

    async fn get_typed<T, Q>(&self, endpoint: Endpoint, symbol: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        self.get::<T>(&Request::new(endpoint, symbol, query)).await
    }
}

impl JsonSource for Client {
    async fn fetch_json(&self, request: &Request) -> Result<serde_json::Value, Error> {
        Client::fetch_json(self, request).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
