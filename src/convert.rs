//! Pivot-based currency conversion.

use crate::rates::RateTable;
use anyhow::{Result, anyhow};
use std::str::FromStr;

/// A single conversion to perform. Parsed from the CLI either as the
/// positional `amount from to` triple or from the `--multiple`
/// "amount,from,to" form.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: &str, to: &str) -> Self {
        ConversionRequest {
            amount,
            from: from.to_uppercase(),
            to: to.to_uppercase(),
        }
    }
}

impl FromStr for ConversionRequest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [amount, from, to] = parts.as_slice() else {
            return Err(anyhow!(
                "Expected \"amount,from,to\" (e.g. 100,USD,EUR), got: {s}"
            ));
        };
        let amount: f64 = amount
            .parse()
            .map_err(|_| anyhow!("Invalid amount '{amount}' in conversion: {s}"))?;
        Ok(ConversionRequest::new(amount, from, to))
    }
}

/// Converts `amount` from one currency to another through the pivot
/// currency the table was fetched against.
///
/// Both codes are validated against the table before any arithmetic;
/// an unknown code fails with the available codes in the message.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    pivot: &str,
    rates: &RateTable,
) -> Result<f64> {
    let from_rate = lookup_rate(rates, from)?;
    let to_rate = lookup_rate(rates, to)?;

    // Rates are relative to the pivot, so direct conversions reduce to a
    // single multiply or divide; everything else is a cross rate.
    let converted = if from == pivot {
        amount * to_rate
    } else if to == pivot {
        amount / from_rate
    } else {
        amount * to_rate / from_rate
    };

    Ok(converted)
}

fn lookup_rate(rates: &RateTable, code: &str) -> Result<f64> {
    rates.rate(code).ok_or_else(|| {
        anyhow!(
            "Invalid currency code: {}. Available currencies: {}",
            code,
            rates.available_codes().join(", ")
        )
    })
}
