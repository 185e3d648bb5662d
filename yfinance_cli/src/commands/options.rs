use anyhow::Result;
use clap::Args;
use yfinance_lib::{DateInput, OptionChain, YFinance, YFinanceError};

use super::for_each_symbol;
use crate::output::{build_option_rows, print_records, OutputFormat};

#[derive(Args)]
pub struct OptionsArgs {
    /// Underlying ticker symbols (e.g. AAPL SPY)
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Fetch a single expiration (YYYY-MM-DD) instead of all of them
    #[arg(long)]
    pub expiration: Option<String>,
}

pub async fn run(args: &OptionsArgs, yf: &YFinance, format: &OutputFormat) -> Result<()> {
    let expiration = match &args.expiration {
        Some(date) => Some(
            DateInput::from(date.as_str())
                .to_datetime()?
                .and_utc()
                .timestamp(),
        ),
        None => None,
    };

    let chains: Vec<(String, OptionChain)> =
        for_each_symbol(&args.symbols, "option chains", |symbol| async move {
            let chain = match expiration {
                Some(date) => yf.get_option_page(&symbol, Some(date)).await?.chain,
                None => yf.get_options(&symbol).await?,
            };
            Ok::<_, YFinanceError>((symbol, chain))
        })
        .await?;

    for (symbol, chain) in &chains {
        eprintln!(
            "{}: {} calls, {} puts",
            symbol,
            chain.calls.len(),
            chain.puts.len()
        );
    }

    let records: Vec<serde_json::Value> = chains
        .iter()
        .map(|(symbol, chain)| {
            serde_json::json!({
                "symbol": symbol,
                "calls": chain.calls,
                "puts": chain.puts,
            })
        })
        .collect();
    print_records(
        format,
        &build_option_rows(&chains),
        &records,
        "options",
        "optionChain",
    )
}
