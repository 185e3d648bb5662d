use anyhow::{bail, Result};
use clap::Args;
use serde_json::{Map, Value};
use yfinance_lib::yfinance_api::QUOTE_SUMMARY_MODULES;
use yfinance_lib::YFinance;

use crate::output::{
    build_summary_rows, print_csv, print_json, print_markdown, print_table, OutputFormat,
};
use crate::xml_output;

#[derive(Args)]
pub struct SummaryArgs {
    /// Ticker symbol (e.g. AAPL)
    pub symbol: String,

    /// Module to include (repeatable, e.g. --module price --module assetProfile).
    /// All modules when omitted
    #[arg(long = "module")]
    pub modules: Vec<String>,
}

pub async fn run(args: &SummaryArgs, yf: &YFinance, format: &OutputFormat) -> Result<()> {
    for module in &args.modules {
        if !QUOTE_SUMMARY_MODULES.contains(&module.as_str()) {
            bail!(
                "Unknown module '{}'. Valid modules: {}",
                module,
                QUOTE_SUMMARY_MODULES.join(", ")
            );
        }
    }

    let summary = yf.get_quote_summary(&args.symbol, &args.modules).await?;
    // A single module comes back unwrapped; rows and XML stay keyed by module.
    let grouped = match args.modules.as_slice() {
        [module] => Value::Object(Map::from_iter([(module.clone(), summary.clone())])),
        _ => summary.clone(),
    };

    match format {
        OutputFormat::Table => print_table(&build_summary_rows(&grouped)),
        OutputFormat::Markdown => print_markdown(&build_summary_rows(&grouped)),
        OutputFormat::Csv => print_csv(&build_summary_rows(&grouped))?,
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Xml => println!("{}", xml_output::value_to_xml("quoteSummary", &grouped)?),
    }
    Ok(())
}
