//! Static display-currency table.
//!
//! Amounts are stored in INR. Other currencies are a fixed multiplication for
//! display only; there are no live rates here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Inr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
        }
    }

    /// Multiplier from INR
    pub fn rate(self) -> f64 {
        match self {
            Self::Inr => 1.0,
            Self::Usd => 0.012,
            Self::Eur => 0.011,
            Self::Gbp => 0.0095,
            Self::Jpy => 1.8,
        }
    }

    /// Cycle to the next currency in the table
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Symbol followed by the converted amount, or `-` when there is no amount
    pub fn format(self, amount: Option<f64>) -> String {
        match amount {
            Some(_) => format!("{}{}", self.symbol(), convert_currency(amount, self.rate())),
            None => convert_currency(None, self.rate()),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// `amount * rate` with exactly two decimals; `-` when the amount is absent.
pub fn convert_currency(amount: Option<f64>, rate: f64) -> String {
    match amount {
        Some(amount) => format!("{:.2}", amount * rate),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_currency() {
        assert_eq!(convert_currency(Some(100.0), 0.012), "1.20");
        assert_eq!(convert_currency(Some(100.0), 1.8), "180.00");
        assert_eq!(convert_currency(Some(0.0), 1.0), "0.00");
    }

    #[test]
    fn test_convert_currency_absent_amount() {
        assert_eq!(convert_currency(None, 0.012), "-");
        assert_eq!(Currency::Usd.format(None), "-");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Currency::Inr.format(Some(1520.5)), "₹1520.50");
        assert_eq!(Currency::Gbp.format(Some(1000.0)), "£9.50");
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(Currency::Inr.next(), Currency::Usd);
        assert_eq!(Currency::Jpy.next(), Currency::Inr);
    }

    #[test]
    fn test_deserialize_from_code() {
        let currency: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(currency, Currency::Eur);
    }
}
