use url::Url;
use yfinance_api::{
    ChartInterval, ChartQuery, Endpoint, EsgQuery, FundamentalsQuery, OptionsQuery, Query,
    QuoteSummaryQuery, Request, WindowedQuery,
};

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

#[test]
fn chart_query_defaults() {
    let url = ChartQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("interval=1d"));
    assert!(query.contains("includePrePost=false"));
    assert!(query.contains("events=div%2Csplits"));
    assert!(!query.contains("period1"));
}

#[test]
fn chart_query_window_precedes_interval() {
    let params = ChartQuery::default()
        .with_period(100, 200)
        .with_interval(ChartInterval::OneWeek)
        .params();
    assert_eq!(params[0], ("period1".to_string(), "100".to_string()));
    assert_eq!(params[1], ("period2".to_string(), "200".to_string()));
    assert_eq!(params[2], ("interval".to_string(), "1wk".to_string()));
}

#[test]
fn fundamentals_query_joins_types() {
    let url = FundamentalsQuery::default()
        .with_type("annualEBIT")
        .with_type("annualInterestExpense")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("type=annualEBIT%2CannualInterestExpense"));
}

#[test]
fn options_query_without_date_has_no_params() {
    assert!(OptionsQuery::default().params().is_empty());
    assert!(EsgQuery.params().is_empty());
}

#[test]
fn quote_summary_query_keeps_request_order() {
    let params = QuoteSummaryQuery::default()
        .with_module("summaryDetail")
        .with_module("assetProfile")
        .params();
    assert_eq!(params[0].1, "summaryDetail,assetProfile");
}

#[test]
fn request_exposes_params_by_name() {
    let request = Request::new(
        Endpoint::Chart,
        "AAPL",
        &ChartQuery::default().with_period(1, 2),
    );
    assert_eq!(request.param("period1"), Some("1"));
    assert_eq!(request.param("interval"), Some("1d"));
    assert_eq!(request.param("crumb"), None);
}
