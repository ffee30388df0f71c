//! Interactive conversion prompt for `--interactive`.

use crate::convert;
use crate::rates::RateTable;
use crate::ui::{self, StyleType};
use anyhow::Result;
use console::Term;

/// Prompts for conversions until a blank amount is entered. Bad input
/// (unparsable amounts, unknown codes) is reported and the prompt loop
/// continues.
pub fn run(rates: &RateTable, pivot: &str) -> Result<()> {
    let term = Term::stdout();
    term.write_line(&ui::style_text(
        "Enter a blank amount to quit.",
        StyleType::Subtle,
    ))?;

    loop {
        let amount_input = prompt(&term, "Enter amount to convert: ")?;
        if amount_input.trim().is_empty() {
            return Ok(());
        }

        let amount: f64 = match amount_input.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                term.write_line(&ui::style_text(
                    &format!("Invalid amount: {}", amount_input.trim()),
                    StyleType::Error,
                ))?;
                continue;
            }
        };

        let from = prompt(&term, "Enter currency to convert from (e.g., USD): ")?
            .trim()
            .to_uppercase();
        let to = prompt(&term, "Enter currency to convert to (e.g., EUR): ")?
            .trim()
            .to_uppercase();

        if !rates.contains(&from) || !rates.contains(&to) {
            term.write_line(&ui::style_text(
                &format!(
                    "Invalid currency code. Available currencies: {}",
                    rates.available_codes().join(", ")
                ),
                StyleType::Error,
            ))?;
            continue;
        }

        let converted = convert::convert(amount, &from, &to, pivot, rates)?;
        term.write_line(&ui::conversion_line(amount, &from, converted, &to))?;
    }
}

fn prompt(term: &Term, message: &str) -> Result<String> {
    term.write_str(message)?;
    Ok(term.read_line()?)
}
