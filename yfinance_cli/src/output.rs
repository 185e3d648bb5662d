use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use yfinance_lib::{EsgScores, Fundamentals, OptionChain, OptionContract, PriceSeries};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            "xml" => OutputFormat::Xml,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct PriceRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Timestamp")]
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Adj Close")]
    #[serde(rename = "Adj Close")]
    adjclose: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
}

#[derive(Tabled, Serialize)]
pub struct FundamentalRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Item")]
    #[serde(rename = "Item")]
    item: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
pub struct OptionRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    side: String,
    #[tabled(rename = "Contract")]
    #[serde(rename = "Contract")]
    contract: String,
    #[tabled(rename = "Expiration")]
    #[serde(rename = "Expiration")]
    expiration: String,
    #[tabled(rename = "Strike")]
    #[serde(rename = "Strike")]
    strike: f64,
    #[tabled(rename = "Last")]
    #[serde(rename = "Last")]
    last_price: f64,
    #[tabled(rename = "Bid")]
    #[serde(rename = "Bid")]
    bid: f64,
    #[tabled(rename = "Ask")]
    #[serde(rename = "Ask")]
    ask: f64,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: u64,
    #[tabled(rename = "Open Int")]
    #[serde(rename = "Open Int")]
    open_interest: u64,
    #[tabled(rename = "IV")]
    #[serde(rename = "IV")]
    implied_volatility: String,
    #[tabled(rename = "ITM")]
    #[serde(rename = "ITM")]
    in_the_money: bool,
}

#[derive(Tabled, Serialize)]
pub struct EsgRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Series")]
    #[serde(rename = "Series")]
    series: String,
    #[tabled(rename = "Month")]
    #[serde(rename = "Month")]
    month: String,
    #[tabled(rename = "ESG")]
    #[serde(rename = "ESG")]
    esg: String,
    #[tabled(rename = "Environment")]
    #[serde(rename = "Environment")]
    environment: String,
    #[tabled(rename = "Social")]
    #[serde(rename = "Social")]
    social: String,
    #[tabled(rename = "Governance")]
    #[serde(rename = "Governance")]
    governance: String,
}

#[derive(Tabled, Serialize)]
pub struct SummaryRow {
    #[tabled(rename = "Module")]
    #[serde(rename = "Module")]
    module: String,
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

pub fn build_price_rows(series: &[PriceSeries]) -> Vec<PriceRow> {
    series
        .iter()
        .flat_map(|s| s.bars.iter())
        .map(|b| PriceRow {
            ticker: b.ticker.clone(),
            timestamp: b.timestamp.to_string(),
            open: format_opt(b.open),
            high: format_opt(b.high),
            low: format_opt(b.low),
            close: format_opt(b.close),
            adjclose: format_opt(b.adjclose),
            volume: b.volume.map(|v| v.to_string()).unwrap_or_default(),
        })
        .collect()
}

pub fn build_fundamental_rows(fundamentals: &Fundamentals) -> Vec<FundamentalRow> {
    fundamentals
        .rows()
        .into_iter()
        .map(|(item, point)| FundamentalRow {
            symbol: fundamentals.symbol().to_string(),
            item: item.to_string(),
            date: point.timestamp.date().to_string(),
            value: point.value.map(format_amount).unwrap_or_default(),
        })
        .collect()
}

fn option_row(symbol: &str, side: &str, c: &OptionContract) -> OptionRow {
    OptionRow {
        symbol: symbol.to_string(),
        side: side.to_string(),
        contract: c.contract_symbol.clone(),
        expiration: c.expiration.date().to_string(),
        strike: c.strike,
        last_price: c.last_price,
        bid: c.bid,
        ask: c.ask,
        volume: c.volume,
        open_interest: c.open_interest,
        implied_volatility: format!("{:.2}%", c.implied_volatility * 100.0),
        in_the_money: c.in_the_money,
    }
}

pub fn build_option_rows(chains: &[(String, OptionChain)]) -> Vec<OptionRow> {
    let mut rows = Vec::new();
    for (symbol, chain) in chains {
        rows.extend(chain.calls.iter().map(|c| option_row(symbol, "call", c)));
        rows.extend(chain.puts.iter().map(|c| option_row(symbol, "put", c)));
    }
    rows
}

pub fn build_esg_rows(scores: &[EsgScores], include_peers: bool) -> Vec<EsgRow> {
    let mut rows = Vec::new();
    for s in scores {
        for r in &s.scores {
            rows.push(EsgRow {
                symbol: r.symbol.clone(),
                series: "company".to_string(),
                month: r.timestamp.format("%Y-%m").to_string(),
                esg: format_number(r.esg_score.as_ref()),
                environment: format_number(r.environment_score.as_ref()),
                social: format_number(r.social_score.as_ref()),
                governance: format_number(r.governance_score.as_ref()),
            });
        }
        if include_peers {
            let label = match &s.peer_group {
                Some(group) => format!("peers: {}", group),
                None => "peers".to_string(),
            };
            for r in &s.peer_scores {
                rows.push(EsgRow {
                    symbol: r.symbol.clone(),
                    series: label.clone(),
                    month: r.timestamp.format("%Y-%m").to_string(),
                    esg: format_opt(r.esg_score),
                    environment: format_opt(r.environment_score),
                    social: format_opt(r.social_score),
                    governance: format_opt(r.governance_score),
                });
            }
        }
    }
    rows
}

/// One row per field of each module. Provider `{raw, fmt}` pairs show `fmt`.
pub fn build_summary_rows(summary: &Value) -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    let Some(modules) = summary.as_object() else {
        return rows;
    };
    for (module, body) in modules {
        match body.as_object() {
            Some(fields) => {
                for (field, value) in fields {
                    rows.push(SummaryRow {
                        module: module.clone(),
                        field: field.clone(),
                        value: display_value(value),
                    });
                }
            }
            None => rows.push(SummaryRow {
                module: module.clone(),
                field: String::new(),
                value: display_value(body),
            }),
        }
    }
    rows
}

// -- Generic output --

pub fn print_table<T: Tabled>(rows: &[T]) {
    println!("{}", Table::new(rows));
}

pub fn print_markdown<T: Tabled>(rows: &[T]) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_xml<T: Serialize>(root_tag: &str, item_tag: &str, items: &[T]) -> Result<()> {
    println!("{}", xml_output::items_to_xml(root_tag, item_tag, items)?);
    Ok(())
}

/// Table, markdown and CSV use `rows`; JSON and XML use the normalized records.
pub fn print_records<R, T>(
    format: &OutputFormat,
    rows: &[R],
    records: &[T],
    root_tag: &str,
    item_tag: &str,
) -> Result<()>
where
    R: Tabled + Serialize,
    T: Serialize,
{
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Markdown => print_markdown(rows),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Json => print_json(&records),
        OutputFormat::Xml => print_xml(root_tag, item_tag, records)?,
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_number(value: Option<&serde_json::Number>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Compact magnitude for statement values, e.g. `672.00M`.
fn format_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{}", value)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("fmt").and_then(Value::as_str) {
            Some(fmt) => fmt.to_string(),
            None if map.is_empty() => String::new(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}
