use anyhow::Result;
use clap::Args;
use yfinance_lib::YFinance;

use super::for_each_symbol;
use crate::output::{build_esg_rows, print_records, OutputFormat};

#[derive(Args)]
pub struct EsgArgs {
    /// Ticker symbols (e.g. AAPL MSFT)
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Also show the peer-group averages
    #[arg(long)]
    pub peers: bool,
}

pub async fn run(args: &EsgArgs, yf: &YFinance, format: &OutputFormat) -> Result<()> {
    let scores = for_each_symbol(&args.symbols, "ESG scores", |symbol| async move {
        yf.get_esg(&symbol).await
    })
    .await?;

    print_records(
        format,
        &build_esg_rows(&scores, args.peers),
        &scores,
        "esg",
        "scores",
    )
}
