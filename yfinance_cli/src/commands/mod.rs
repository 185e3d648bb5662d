//! CLI subcommand implementations.

pub mod esg;
pub mod fundamentals;
pub mod options;
pub mod prices;
pub mod summary;

use std::future::Future;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use yfinance_lib::{DateWindow, YFinanceError};

/// Run `fetch` for each symbol in order, reporting failures on stderr.
///
/// A failed symbol never stops the batch. Fails only when every symbol failed.
pub async fn for_each_symbol<T, F, Fut>(symbols: &[String], what: &str, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, YFinanceError>>,
{
    let pb = if symbols.len() > 1 {
        let pb = ProgressBar::new(symbols.len() as u64);
        pb.set_style(ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}",
        )?);
        pb.set_message(format!("fetching {}...", what));
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(symbols.len());
    let mut failed = 0usize;
    for symbol in symbols {
        match fetch(symbol.clone()).await {
            Ok(value) => results.push(value),
            Err(err) => {
                failed += 1;
                let line = if err.is_no_data() {
                    format!("  {}: {}", symbol, err)
                } else {
                    format!("  Warning: {} failed: {}", symbol, err)
                };
                match &pb {
                    Some(pb) => pb.println(line),
                    None => eprintln!("{}", line),
                }
            }
        }
        if let Some(pb) = &pb {
            pb.set_message(format!("{} ok, {} err", results.len(), failed));
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message(format!("{} ok, {} err", results.len(), failed));
    }

    if results.is_empty() && failed > 0 {
        bail!("no {} returned for any symbol", what);
    }
    Ok(results)
}

/// Build a window from CLI flags and check it before anything is fetched.
pub fn window_from_args(
    range: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateWindow> {
    let window = DateWindow {
        range: range.map(str::to_string),
        start: start.map(Into::into),
        end: end.map(Into::into),
    };
    window.resolve()?;
    Ok(window)
}
