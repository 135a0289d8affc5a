//! Display currencies

use std::fmt;

use super::money::Money;

/// A currency the amounts can be displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

/// Supported currencies, USD first
pub const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", name: "US Dollar", symbol: "$" },
    Currency { code: "EUR", name: "Euro", symbol: "€" },
    Currency { code: "GBP", name: "British Pound", symbol: "£" },
    Currency { code: "JPY", name: "Japanese Yen", symbol: "¥" },
    Currency { code: "INR", name: "Indian Rupee", symbol: "₹" },
    Currency { code: "CAD", name: "Canadian Dollar", symbol: "C$" },
    Currency { code: "AUD", name: "Australian Dollar", symbol: "A$" },
];

impl Currency {
    /// Look up a currency by ISO code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Currency> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
            .copied()
    }

    pub fn all() -> &'static [Currency] {
        CURRENCIES
    }

    /// Format an amount with this currency's symbol
    pub fn format_amount(&self, amount: Money) -> String {
        amount.format_with_symbol(self.symbol)
    }
}

impl Default for Currency {
    fn default() -> Self {
        CURRENCIES[0]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}
