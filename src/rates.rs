//! Exchange rate snapshot types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A snapshot of exchange rates, each expressed as "1 unit of the base
/// currency equals N units of this currency". The base currency is fixed
/// at fetch time and is not recorded in the table itself; the on-disk
/// cache is this exact flat map.
///
/// A table is never mutated after construction, only replaced wholesale
/// by a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        RateTable { rates }
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Currency codes in the table, sorted for stable error messages.
    pub fn available_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        RateTable {
            rates: iter.into_iter().collect(),
        }
    }
}
