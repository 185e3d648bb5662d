//! Option chain normalization.
//!
//! The provider returns one expiration per request. [`normalize_options`]
//! flattens one such page; [`OptionChain::combine`] merges pages the caller
//! has already fetched.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use yfinance_api::types::{ContractQuote, OptionChainResponse};

use crate::error::YFinanceError;
use crate::window::epoch_to_datetime;

/// One listed contract. Fields the provider omits (no trades yet, no
/// quote) take `0`, `false` or an empty string so every record has the same
/// shape.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    pub contract_symbol: String,
    pub strike: f64,
    pub currency: String,
    pub last_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub volume: u64,
    pub open_interest: u64,
    pub bid: f64,
    pub ask: f64,
    pub contract_size: String,
    pub expiration: NaiveDateTime,
    pub last_trade_date: NaiveDateTime,
    pub implied_volatility: f64,
    pub in_the_money: bool,
}

impl From<ContractQuote> for OptionContract {
    fn from(quote: ContractQuote) -> Self {
        Self {
            contract_symbol: quote.contract_symbol.unwrap_or_default(),
            strike: quote.strike.unwrap_or_default(),
            currency: quote.currency.unwrap_or_default(),
            last_price: quote.last_price.unwrap_or_default(),
            change: quote.change.unwrap_or_default(),
            percent_change: quote.percent_change.unwrap_or_default(),
            volume: quote.volume.unwrap_or_default(),
            open_interest: quote.open_interest.unwrap_or_default(),
            bid: quote.bid.unwrap_or_default(),
            ask: quote.ask.unwrap_or_default(),
            contract_size: quote.contract_size.unwrap_or_default(),
            expiration: epoch_to_datetime(quote.expiration.unwrap_or_default()),
            last_trade_date: epoch_to_datetime(quote.last_trade_date.unwrap_or_default()),
            implied_volatility: quote.implied_volatility.unwrap_or_default(),
            in_the_money: quote.in_the_money.unwrap_or_default(),
        }
    }
}

/// Calls and puts, each in provider order.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct OptionChain {
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    /// Append another expiration's contracts.
    pub fn extend(&mut self, other: OptionChain) {
        self.calls.extend(other.calls);
        self.puts.extend(other.puts);
    }

    /// Concatenate chains in the order given.
    pub fn combine<I>(chains: I) -> OptionChain
    where
        I: IntoIterator<Item = OptionChain>,
    {
        chains
            .into_iter()
            .fold(OptionChain::default(), |mut acc, chain| {
                acc.extend(chain);
                acc
            })
    }
}

/// One provider response: the contracts for one expiration plus the list of
/// every listed expiration.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OptionChainPage {
    pub symbol: String,
    /// Epoch seconds of every listed expiration.
    pub expiration_dates: Vec<i64>,
    /// Epoch seconds of the expiration this page covers, if any.
    pub expiration: Option<i64>,
    pub chain: OptionChain,
}

impl OptionChainPage {
    /// Listed expirations other than the one on this page.
    pub fn remaining_expirations(&self) -> Vec<i64> {
        self.expiration_dates
            .iter()
            .copied()
            .filter(|date| Some(*date) != self.expiration)
            .collect()
    }
}

pub fn normalize_options(raw: Value, symbol: &str) -> Result<OptionChainPage, YFinanceError> {
    let response: OptionChainResponse = serde_json::from_value(raw)?;
    from_option_chain(response, symbol)
}

/// Flatten an already-decoded option chain response.
///
/// A symbol with no listed contracts yields an empty chain. Only a missing
/// result block is treated as no data.
pub fn from_option_chain(
    response: OptionChainResponse,
    symbol: &str,
) -> Result<OptionChainPage, YFinanceError> {
    if let Some(error) = &response.option_chain.error {
        tracing::debug!("Option chain error for {}: {}", symbol, error);
    }
    let result = response
        .option_chain
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| YFinanceError::NoData {
            symbol: symbol.to_string(),
            window: "all expirations".to_string(),
        })?;

    let mut page = OptionChainPage {
        symbol: result
            .underlying_symbol
            .unwrap_or_else(|| symbol.to_string()),
        expiration_dates: result.expiration_dates,
        expiration: None,
        chain: OptionChain::default(),
    };
    for batch in result.options {
        if page.expiration.is_none() {
            page.expiration = batch.expiration_date;
        }
        page.chain.extend(OptionChain {
            calls: batch.calls.into_iter().map(OptionContract::from).collect(),
            puts: batch.puts.into_iter().map(OptionContract::from).collect(),
        });
    }
    Ok(page)
}
