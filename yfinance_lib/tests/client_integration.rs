use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yfinance_lib::yfinance_api::{Client, ClientOptions, Error};
use yfinance_lib::{
    ChartInterval, DateWindow, Endpoint, FundamentalInterval, FundamentalRequest, Fundamentals,
    JsonSource, PriceRequest, Request, YFinance, YFinanceError,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../yfinance_api/tests/fixtures/{}", name)).unwrap()
}

fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&load_fixture(name)).unwrap()
}

fn yfinance(uri: &str) -> YFinance {
    let client = Client::with_options(ClientOptions {
        base_url: uri.to_string(),
        cookie_url: uri.to_string(),
        timeout: Duration::from_secs(5),
        use_crumb: false,
    })
    .unwrap();
    YFinance::new(client)
}

/// Serves canned documents keyed by endpoint and records every request.
#[derive(Default)]
struct FakeSource {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<Request>>,
}

impl FakeSource {
    fn with(mut self, key: &str, body: Value) -> Self {
        self.responses.insert(key.to_string(), body);
        self
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl JsonSource for FakeSource {
    async fn fetch_json(&self, request: &Request) -> Result<Value, Error> {
        self.requests.lock().unwrap().push(request.clone());
        let key = match request.param("date") {
            Some(date) => format!("{}:{}", request.endpoint, date),
            None => request.endpoint.to_string(),
        };
        self.responses
            .get(&key)
            .cloned()
            .ok_or(Error::HttpStatus {
                status: 404,
                body: format!("no fixture for {}", key),
            })
    }
}

#[tokio::test]
async fn prices_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("interval", "90m"))
        .and(query_param("includePrePost", "false"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("chart_aapl_90m.json")),
        )
        .mount(&mock_server)
        .await;

    let yf = yfinance(&mock_server.uri());
    let request = PriceRequest::new("AAPL")
        .with_window(DateWindow::range("1d"))
        .with_interval(ChartInterval::NinetyMinutes);
    let series = yf.get_prices(&request).await.unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.bars[1].volume, Some(0));
    assert_eq!(series.currency.as_deref(), Some("USD"));
    assert_eq!(series.exchange_timezone.as_deref(), Some("America/New_York"));
}

#[tokio::test]
async fn prices_transport_error_is_not_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(load_fixture("chart_not_found.json")),
        )
        .mount(&mock_server)
        .await;

    let yf = yfinance(&mock_server.uri());
    let err = yf.get_prices(&PriceRequest::new("NOPE")).await.unwrap_err();
    assert!(!err.is_no_data());
    match err {
        YFinanceError::Transport(Error::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn invalid_input_fails_before_any_request() {
    let source = FakeSource::default();
    let yf = YFinance::new(source);

    let request = PriceRequest::new("AAPL").with_window(DateWindow::range("7d"));
    let err = yf.get_prices(&request).await.unwrap_err();
    assert!(matches!(err, YFinanceError::InvalidRange(_)));

    let request = PriceRequest::new("AAPL").with_window(DateWindow::since("01/02/2020"));
    let err = yf.get_prices(&request).await.unwrap_err();
    assert!(matches!(err, YFinanceError::InvalidDateFormat(_)));

    let request = FundamentalRequest::new(
        "AAPL",
        "NotARealItem",
        FundamentalInterval::Quarterly,
        DateWindow::range("5y"),
    );
    let err = yf.get_fundamental(&request).await.unwrap_err();
    assert!(matches!(err, YFinanceError::UnknownFundamentalItem { .. }));
    assert!(err.is_invalid_input());

    assert!(yf.source().requests().is_empty());
}

#[tokio::test]
async fn fundamental_item_request() {
    let source = FakeSource::default().with(
        "fundamentals-timeseries",
        fixture_json("fundamentals_interest_expense.json"),
    );
    let yf = YFinance::new(source);

    let request = FundamentalRequest::new(
        "AAPL",
        "InterestExpense",
        FundamentalInterval::Quarterly,
        DateWindow::between("2000-01-01", "2022-12-31"),
    );
    let result = yf.get_fundamental(&request).await.unwrap();
    match result {
        Fundamentals::Item(series) => assert_eq!(series.points.len(), 5),
        other => panic!("expected item series, got {:?}", other),
    }

    let sent = yf.source().requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].endpoint, Endpoint::FundamentalsTimeseries);
    assert_eq!(sent[0].param("type"), Some("quarterlyInterestExpense"));
    assert_eq!(sent[0].param("period1"), Some("946684800"));
    assert_eq!(sent[0].param("period2"), Some("1672444800"));
}

#[tokio::test]
async fn fundamental_statement_requests_every_member() {
    let source = FakeSource::default().with(
        "fundamentals-timeseries",
        fixture_json("fundamentals_income_statement.json"),
    );
    let yf = YFinance::new(source);

    let request = FundamentalRequest::new(
        "NFLX",
        "incomestatement",
        FundamentalInterval::Quarterly,
        DateWindow::range("5y"),
    );
    let table = match yf.get_fundamental(&request).await.unwrap() {
        Fundamentals::Statement(table) => table,
        other => panic!("expected statement table, got {:?}", other),
    };
    assert_eq!(table.items.len(), 2);

    let types = yf.source().requests()[0].param("type").unwrap().to_string();
    assert!(types.contains("quarterlyInterestExpense"));
    assert!(types.contains("quarterlyTaxRateForCalcs"));
    assert!(!types.contains("quarterlyCashDividendsPaid"));
}

#[tokio::test]
async fn options_fetch_every_expiration() {
    let source = FakeSource::default()
        .with("options", fixture_json("options_aapl.json"))
        .with("options:1671148800", fixture_json("options_aapl_next.json"));
    let yf = YFinance::new(source);

    let chain = yf.get_options("AAPL").await.unwrap();
    assert_eq!(chain.calls.len(), 3);
    assert_eq!(chain.puts.len(), 2);

    let sent = yf.source().requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].param("date"), None);
    assert_eq!(sent[1].param("date"), Some("1671148800"));
}

#[tokio::test]
async fn options_without_contracts_is_empty() {
    let source = FakeSource::default().with("options", fixture_json("options_no_contracts.json"));
    let yf = YFinance::new(source);

    let chain = yf.get_options("XYZW").await.unwrap();
    assert!(chain.is_empty());
    assert_eq!(yf.source().requests().len(), 1);
}

#[tokio::test]
async fn esg_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/finance/esgChart"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("esg_aapl.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/esgChart"))
        .and(query_param("symbol", "XYZW"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("esg_not_covered.json")),
        )
        .mount(&mock_server)
        .await;

    let yf = yfinance(&mock_server.uri());
    let esg = yf.get_esg("AAPL").await.unwrap();
    assert_eq!(esg.scores.len(), 4);
    assert_eq!(esg.peer_scores.len(), 4);

    let err = yf.get_esg("XYZW").await.unwrap_err();
    assert!(matches!(err, YFinanceError::NoEsgData(ref s) if s == "XYZW"));
}

#[tokio::test]
async fn quote_summary_selected_modules() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .and(query_param("modules", "price,fundProfile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("quote_summary_aapl.json")),
        )
        .mount(&mock_server)
        .await;

    let yf = yfinance(&mock_server.uri());
    let modules = vec!["price".to_string(), "fundProfile".to_string()];
    let out = yf.get_quote_summary("AAPL", &modules).await.unwrap();

    let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["price"]);
    assert_eq!(out["price"]["currency"], "USD");
}

#[tokio::test]
async fn quote_summary_single_module_is_unwrapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .and(query_param("modules", "quoteType"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("quote_summary_aapl.json")),
        )
        .mount(&mock_server)
        .await;

    let yf = yfinance(&mock_server.uri());
    let out = yf
        .get_quote_summary("AAPL", &["quoteType".to_string()])
        .await
        .unwrap();

    assert_eq!(out["exchange"], "NMS");
    assert_eq!(out["quoteType"], "EQUITY");
    assert_eq!(out["symbol"], "AAPL");
}

#[tokio::test]
async fn batch_failures_are_per_symbol() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/finance/esgChart"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("esg_aapl.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/esgChart"))
        .and(query_param("symbol", "DOWN"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let yf = yfinance(&mock_server.uri());
    let mut ok = 0;
    let mut failed = Vec::new();
    for symbol in ["DOWN", "AAPL"] {
        match yf.get_esg(symbol).await {
            Ok(_) => ok += 1,
            Err(e) => failed.push((symbol, e)),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(failed.len(), 1);
    assert!(matches!(
        failed[0].1,
        YFinanceError::Transport(Error::HttpStatus { status: 503, .. })
    ));
}
