//! Utility functions for formatting and common operations
//!
//! This module provides centralized formatting utilities for consistent
//! display of currency and rate values throughout the application.

use rust_decimal::Decimal;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "₹" prefix (Indian Rupee)
    Inr,
    /// No currency symbol (for table cells, calculations display)
    None,
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal value using Indian digit grouping: the last three
/// integer digits form one group, every two digits after that form the
/// next (`12,34,567.89`).
///
/// # Examples
/// ```
/// use folio::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234567.89), 0, CurrencySymbol::Inr),
///     "₹12,34,567.89"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 12, CurrencySymbol::None),
///     "    1,234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    // Round to 2 decimal places and split
    let formatted = format!("{:.2}", abs_value);
    let parts: Vec<&str> = formatted.split('.').collect();

    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    // Indian grouping: group of 3, then groups of 2
    let digits: Vec<char> = integer_part.chars().rev().collect();
    let mut grouped = Vec::new();
    for (i, c) in digits.iter().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    let with_separators: String = grouped.into_iter().rev().collect();

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::Inr => "₹",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{}.{}", prefix, sign, with_separators, decimal_part);

    // Apply width padding (right-align); the rupee sign is multi-byte, so
    // pad on character count rather than byte length
    let char_len = result.chars().count();
    if width > 0 && char_len < width {
        format!("{}{}", " ".repeat(width - char_len), result)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as Indian Rupee with symbol: "₹12,34,567.89"
///
/// # Examples
/// ```
/// use folio::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "₹1,234.56");
/// assert_eq!(format_currency(dec!(-500)), "₹-500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Inr)
}

/// Format number only (no symbol): "1,234.56"
pub fn format_decimal_in(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}

/// Format a fractional rate as a percentage with two decimals: "12.50%"
///
/// # Examples
/// ```
/// use folio::utils::format_rate_pct;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_rate_pct(dec!(0.125)), "12.50%");
/// ```
pub fn format_rate_pct(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::from(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_basic() {
        assert_eq!(format_currency(dec!(1234.56)), "₹1,234.56");
        assert_eq!(format_currency(dec!(0.99)), "₹0.99");
        assert_eq!(format_currency(dec!(1000000)), "₹10,00,000.00");
    }

    #[test]
    fn test_format_currency_small_values() {
        assert_eq!(format_currency(dec!(0)), "₹0.00");
        assert_eq!(format_currency(dec!(1)), "₹1.00");
        assert_eq!(format_currency(dec!(123)), "₹123.00");
        assert_eq!(format_currency(dec!(999.99)), "₹999.99");
    }

    #[test]
    fn test_format_currency_indian_grouping() {
        assert_eq!(format_currency(dec!(1000)), "₹1,000.00");
        assert_eq!(format_currency(dec!(12345)), "₹12,345.00");
        assert_eq!(format_currency(dec!(123456)), "₹1,23,456.00");
        assert_eq!(format_currency(dec!(12345678.90)), "₹1,23,45,678.90");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(dec!(-1234.56)), "₹-1,234.56");
        assert_eq!(format_currency(dec!(-100000)), "₹-1,00,000.00");
    }

    #[test]
    fn test_format_with_width_counts_chars_not_bytes() {
        let result = format_currency_with_width(dec!(100), 12, CurrencySymbol::Inr);
        assert_eq!(result.chars().count(), 12);
        assert!(result.ends_with("₹100.00"));
    }

    #[test]
    fn test_format_rate_pct() {
        assert_eq!(format_rate_pct(dec!(0.071)), "7.10%");
        assert_eq!(format_rate_pct(dec!(0.2)), "20.00%");
    }
}
