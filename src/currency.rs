//! Currency conversion: input validation, rate tables and result formatting

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Why a conversion was refused before any request was made.
///
/// The `Display` text is exactly what the currency region shows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select both currencies.")]
    MissingCurrency,
    #[error("Select different currencies.")]
    SameCurrency,
    #[error("Enter a valid amount.")]
    InvalidAmount,
}

/// A conversion that passed validation and is ready to be fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ConversionRequest {
    /// Check the three raw inputs in order; the first failing check wins.
    pub fn validate(from: &str, to: &str, amount: &str) -> Result<Self, ValidationError> {
        let from = normalize_code(from);
        let to = normalize_code(to);

        if from.is_empty() || to.is_empty() {
            return Err(ValidationError::MissingCurrency);
        }
        if from == to {
            return Err(ValidationError::SameCurrency);
        }
        let amount = parse_amount(amount).ok_or(ValidationError::InvalidAmount)?;

        Ok(Self { from, to, amount })
    }
}

/// Currency codes are compared and sent upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A strictly positive, finite number, or `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Exchange rates relative to one source currency.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateTable {
    /// The provider flagged the request itself as failed (e.g. unknown source code).
    pub rejected: bool,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Rate for `code`; `None` when the table was rejected, lacks the code,
    /// or holds a zero rate.
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        if self.rejected {
            return None;
        }
        self.rates.get(code).copied().filter(|rate| *rate != 0.0)
    }
}

/// A finished conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
}

impl Conversion {
    pub fn new(request: ConversionRequest, rate: f64) -> Self {
        Self {
            from: request.from,
            to: request.to,
            amount: request.amount,
            rate,
        }
    }

    pub fn converted(&self) -> f64 {
        self.rate * self.amount
    }

    /// `"10 USD = 8.500000 EUR"`, always six decimals on the converted value.
    pub fn headline(&self) -> String {
        format!(
            "{} {} = {} {}",
            number_text(self.amount),
            self.from,
            fixed_6(self.converted()),
            self.to
        )
    }

    /// `"(Rate: 1 USD = 0.85 EUR)"`
    pub fn rate_line(&self) -> String {
        format!(
            "(Rate: 1 {} = {} {})",
            self.from,
            number_text(self.rate),
            self.to
        )
    }
}

/// Six decimals, exact ties rounded away from zero.
///
/// `{:.6}` rounds ties to even, so a value sitting exactly halfway is nudged
/// one ulp outward before formatting.
pub fn fixed_6(value: f64) -> String {
    if value.is_finite() && value != 0.0 && is_tie_at_6(value) {
        return format!("{:.6}", f64::from_bits(value.to_bits() + 1));
    }
    format!("{value:.6}")
}

/// Whether the exact decimal expansion is `d.dddddd5000...`.
fn is_tie_at_6(value: f64) -> bool {
    // 1074 digits cover every fractional bit of an f64
    let exact = format!("{:.1074}", value.abs());
    let Some(dot) = exact.find('.') else {
        return false;
    };
    let rest = &exact[dot + 7..];
    rest.starts_with('5') && rest[1..].bytes().all(|digit| digit == b'0')
}

/// Shortest round-trip text, with exponent form (`1e+21`, `1e-7`) outside
/// `[1e-6, 1e21)`.
pub fn number_text(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_order() {
        assert_eq!(
            ConversionRequest::validate("", "EUR", "abc"),
            Err(ValidationError::MissingCurrency)
        );
        assert_eq!(
            ConversionRequest::validate("EUR", "EUR", "abc"),
            Err(ValidationError::SameCurrency)
        );
        assert_eq!(
            ConversionRequest::validate("USD", "EUR", "abc"),
            Err(ValidationError::InvalidAmount)
        );
    }

    #[test]
    fn test_invalid_amounts() {
        for raw in ["", "   ", "-5", "0", "abc", "inf", "NaN", "1,5"] {
            assert_eq!(parse_amount(raw), None, "{raw:?} should be rejected");
        }
        assert_eq!(parse_amount(" 10 "), Some(10.0));
        assert_eq!(parse_amount("0.5"), Some(0.5));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
    }

    #[test]
    fn test_codes_are_normalized() {
        let request = ConversionRequest::validate(" usd", "eur ", "10").unwrap();
        assert_eq!(request.from, "USD");
        assert_eq!(request.to, "EUR");
        assert_eq!(
            ConversionRequest::validate("eur", "EUR", "1"),
            Err(ValidationError::SameCurrency)
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingCurrency.to_string(),
            "Select both currencies."
        );
        assert_eq!(
            ValidationError::SameCurrency.to_string(),
            "Select different currencies."
        );
        assert_eq!(
            ValidationError::InvalidAmount.to_string(),
            "Enter a valid amount."
        );
    }

    #[test]
    fn test_rate_lookup() {
        let table = RateTable {
            rejected: false,
            rates: HashMap::from([("EUR".to_string(), 0.85), ("XXX".to_string(), 0.0)]),
        };
        assert_eq!(table.rate_for("EUR"), Some(0.85));
        assert_eq!(table.rate_for("GBP"), None);
        assert_eq!(table.rate_for("XXX"), None);

        let rejected = RateTable {
            rejected: true,
            ..table
        };
        assert_eq!(rejected.rate_for("EUR"), None);
    }

    #[test]
    fn test_conversion_formatting() {
        let request = ConversionRequest::validate("USD", "EUR", "10").unwrap();
        let conversion = Conversion::new(request, 0.85);
        assert_eq!(conversion.headline(), "10 USD = 8.500000 EUR");
        assert_eq!(conversion.rate_line(), "(Rate: 1 USD = 0.85 EUR)");

        let request = ConversionRequest::validate("EUR", "JPY", "2.5").unwrap();
        let conversion = Conversion::new(request, 160.0);
        assert_eq!(conversion.headline(), "2.5 EUR = 400.000000 JPY");
        assert_eq!(conversion.rate_line(), "(Rate: 1 EUR = 160 JPY)");
    }

    #[test]
    fn test_exact_ties_round_up() {
        // 0.0078125 is exactly representable and sits halfway at six decimals
        assert_eq!(fixed_6(0.0078125), "0.007813");
        assert_eq!(fixed_6(0.5000005), format!("{:.6}", 0.5000005));
        assert_eq!(fixed_6(8.5), "8.500000");

        let request = ConversionRequest::validate("USD", "EUR", "1").unwrap();
        let conversion = Conversion::new(request, 0.0078125);
        assert_eq!(conversion.headline(), "1 USD = 0.007813 EUR");
    }

    #[test]
    fn test_number_text_exponents() {
        assert_eq!(number_text(10.0), "10");
        assert_eq!(number_text(0.85), "0.85");
        assert_eq!(number_text(1e21), "1e+21");
        assert_eq!(number_text(1.5e21), "1.5e+21");
        assert_eq!(number_text(1e-7), "1e-7");
        assert_eq!(number_text(0.000001), "0.000001");

        let request = ConversionRequest::validate("USD", "EUR", "1e21").unwrap();
        let conversion = Conversion::new(request, 1.0);
        assert!(conversion.headline().starts_with("1e+21 USD = "));
    }
}
