use anyhow::Result;
use clap::Args;
use yfinance_lib::prices::parse_interval;
use yfinance_lib::{PriceRequest, YFinance};

use super::{for_each_symbol, window_from_args};
use crate::output::{build_price_rows, print_records, OutputFormat};

#[derive(Args)]
pub struct PricesArgs {
    /// Ticker symbols (e.g. AAPL MSFT ^GSPC)
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Look-back range: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max (default 1mo)
    #[arg(long)]
    pub range: Option<String>,

    /// Start date (YYYY-MM-DD); takes precedence over --range
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub end: Option<String>,

    /// Bar size: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Include pre- and post-market bars
    #[arg(long)]
    pub prepost: bool,

    /// Report raw prices instead of dividend- and split-adjusted ones
    #[arg(long)]
    pub no_adjust: bool,
}

pub async fn run(args: &PricesArgs, yf: &YFinance, format: &OutputFormat) -> Result<()> {
    let interval = parse_interval(&args.interval)?;
    let window = window_from_args(
        args.range.as_deref(),
        args.start.as_deref(),
        args.end.as_deref(),
    )?;
    if interval.is_intraday() && !args.no_adjust {
        tracing::debug!("Intraday interval {}: prices are not adjusted", interval);
    }

    let series = for_each_symbol(&args.symbols, "prices", |symbol| {
        let request = PriceRequest::new(&symbol)
            .with_window(window.clone())
            .with_interval(interval)
            .with_pre_post(args.prepost)
            .with_autoadjust(!args.no_adjust);
        async move { yf.get_prices(&request).await }
    })
    .await?;

    let bars: usize = series.iter().map(|s| s.len()).sum();
    eprintln!("{} bars for {} symbol(s) ({})", bars, series.len(), window);

    print_records(format, &build_price_rows(&series), &series, "prices", "series")
}
