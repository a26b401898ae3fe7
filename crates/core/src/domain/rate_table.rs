// Rate Table Domain Model
//
// Immutable mapping from currency code to its rate relative to the base
// currency. Built once at startup and shared read-only afterwards.

use super::currency::{CurrencyCode, DEFAULT_BASE_CURRENCY};
use super::error::{DomainError, Result};
use std::collections::HashMap;

/// Reference rates (1 INR = rate units of code)
const DEFAULT_RATES: &[(&str, f64)] = &[("INR", 1.0), ("USD", 84.08), ("EUR", 91.51)];

/// Two-hop conversion: source -> base -> target.
///
/// No rounding is applied; the result is the raw quotient.
pub fn two_hop(amount: f64, source_rate: f64, target_rate: f64) -> f64 {
    let base_amount = amount * source_rate;
    base_amount / target_rate
}

/// Pair up the results of a source and target lookup.
///
/// Any miss becomes `RateNotFound` naming each missing code once.
pub fn require_rates(
    source: CurrencyCode,
    source_rate: Option<f64>,
    target: CurrencyCode,
    target_rate: Option<f64>,
) -> crate::Result<(f64, f64)> {
    match (source_rate, target_rate) {
        (Some(s), Some(t)) => Ok((s, t)),
        (s, t) => {
            let mut missing = Vec::with_capacity(2);
            if s.is_none() {
                missing.push(source);
            }
            if t.is_none() && !missing.contains(&target) {
                missing.push(target);
            }
            Err(crate::AppError::RateNotFound(missing))
        }
    }
}

/// Rate table (base currency always present with rate 1.0)
#[derive(Debug, Clone)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Start building a table around `base`
    pub fn builder(base: impl Into<String>) -> RateTableBuilder {
        RateTableBuilder {
            base: CurrencyCode::new(base),
            rates: Vec::new(),
        }
    }

    /// Hard-coded reference table (base INR)
    pub fn reference() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .map(|(code, rate)| (CurrencyCode::new(*code), *rate))
            .collect();

        Self {
            base: CurrencyCode::new(DEFAULT_BASE_CURRENCY),
            rates,
        }
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base
    }

    /// Exact-match lookup; `None` is a miss.
    pub fn lookup(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Synchronous conversion against this table.
    ///
    /// Empty codes resolve to the base currency. Every missing code is
    /// reported in the error.
    pub fn convert(&self, amount: f64, source: &str, target: &str) -> crate::Result<f64> {
        let source = CurrencyCode::or_base(source, &self.base);
        let target = CurrencyCode::or_base(target, &self.base);

        let source_rate = self.lookup(&source);
        let target_rate = self.lookup(&target);
        let (source_rate, target_rate) = require_rates(source, source_rate, target, target_rate)?;
        Ok(two_hop(amount, source_rate, target_rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Entries sorted by code
    pub fn entries(&self) -> Vec<(CurrencyCode, f64)> {
        let mut entries: Vec<_> = self
            .rates
            .iter()
            .map(|(code, rate)| (code.clone(), *rate))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// Builder for [`RateTable`]
#[derive(Debug)]
pub struct RateTableBuilder {
    base: CurrencyCode,
    rates: Vec<(CurrencyCode, f64)>,
}

impl RateTableBuilder {
    pub fn rate(mut self, code: impl Into<String>, rate: f64) -> Self {
        self.rates.push((CurrencyCode::new(code), rate));
        self
    }

    /// Validate and freeze the table.
    ///
    /// Later entries for the same code replace earlier ones.
    pub fn build(self) -> Result<RateTable> {
        if self.base.is_empty() {
            return Err(DomainError::EmptyBaseCurrency);
        }

        let mut rates = HashMap::with_capacity(self.rates.len() + 1);
        rates.insert(self.base.clone(), 1.0);

        for (code, rate) in self.rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(DomainError::InvalidRate {
                    code: code.to_string(),
                    rate,
                });
            }
            if code == self.base && rate != 1.0 {
                return Err(DomainError::BaseRateMismatch {
                    code: code.to_string(),
                    rate,
                });
            }
            rates.insert(code, rate);
        }

        Ok(RateTable {
            base: self.base,
            rates,
        })
    }
}
