use anyhow::Result;
use clap::Args;
use yfinance_lib::fundamentals::parse_fundamental_interval;
use yfinance_lib::{catalog, FundamentalRequest, YFinance};

use super::window_from_args;
use crate::output::{build_fundamental_rows, print_records, OutputFormat};

#[derive(Args)]
pub struct FundamentalArgs {
    /// Ticker symbol (e.g. AAPL)
    pub symbol: String,

    /// Statement (incomestatement, valuation, cashflow, balancesheet) or a
    /// line item such as InterestExpense
    #[arg(required_unless_present = "list")]
    pub item: Option<String>,

    /// Reporting period: annual, quarterly, monthly
    #[arg(long, default_value = "quarterly")]
    pub interval: String,

    /// Look-back range when no --start is given
    #[arg(long, default_value = "5y")]
    pub range: String,

    /// Start date (YYYY-MM-DD); takes precedence over --range
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub end: Option<String>,

    /// List the line items of a statement instead of fetching
    #[arg(long)]
    pub list: bool,
}

pub async fn run(args: &FundamentalArgs, yf: &YFinance, format: &OutputFormat) -> Result<()> {
    if args.list {
        return list_items(args.item.as_deref());
    }
    let item = args.item.as_deref().unwrap_or_default();

    let interval = parse_fundamental_interval(&args.interval)?;
    let window = window_from_args(
        Some(&args.range),
        args.start.as_deref(),
        args.end.as_deref(),
    )?;
    let request = FundamentalRequest::new(&args.symbol, item, interval, window);

    let fundamentals = yf.get_fundamental(&request).await?;
    let rows = build_fundamental_rows(&fundamentals);
    eprintln!("{} values for {} {}", rows.len(), args.symbol, item);

    print_records(
        format,
        &rows,
        std::slice::from_ref(&fundamentals),
        "fundamentals",
        "fundamental",
    )
}

fn list_items(statement: Option<&str>) -> Result<()> {
    let catalog = catalog()?;
    for s in catalog.statements() {
        if statement.is_some_and(|name| name != s.name) {
            continue;
        }
        println!("{} ({} items)", s.name, s.items.len());
        for item in &s.items {
            println!("  {}", item);
        }
    }
    Ok(())
}
