mod commands;
mod output;
mod xml_output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use yfinance_lib::YFinance;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "yfinance")]
#[command(about = "Fetch prices, fundamentals, options and ESG scores from Yahoo Finance")]
struct Cli {
    /// Output format: table, json, csv, markdown, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OHLCV price bars
    Prices(commands::prices::PricesArgs),
    /// Financial statement tables or single line items
    Fundamental(commands::fundamentals::FundamentalArgs),
    /// Option chains across all expirations
    Options(commands::options::OptionsArgs),
    /// ESG scores with peer-group averages
    Esg(commands::esg::EsgArgs),
    /// Raw quote-summary modules
    Summary(commands::summary::SummaryArgs),
}

/// Default levels for the binary and the library crates it drives.
const LOG_DIRECTIVES: &[&str] = &["yfinance=info", "yfinance_lib=info", "yfinance_api=warn"];

fn log_filter(mut filter: EnvFilter) -> Result<EnvFilter> {
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env())?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let yf = YFinance::from_env()?;

    match &cli.command {
        Commands::Prices(args) => commands::prices::run(args, &yf, &format).await?,
        Commands::Fundamental(args) => commands::fundamentals::run(args, &yf, &format).await?,
        Commands::Options(args) => commands::options::run(args, &yf, &format).await?,
        Commands::Esg(args) => commands::esg::run(args, &yf, &format).await?,
        Commands::Summary(args) => commands::summary::run(args, &yf, &format).await?,
    }

    Ok(())
}
