//! Unit conversion helpers.

use alloy::primitives::{Address, U256};

use crate::error::{AppError, Result};

/// Decimals of every native asset handled here (MATIC, ETH).
pub const NATIVE_DECIMALS: u8 = 18;

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        // Value is less than 1, pad with zeros
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Parse a human-readable decimal amount to its base-unit integer.
///
/// Rejects empty, negative and non-decimal input, and any fractional part
/// longer than `decimals`. Nothing is rounded or truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err(AppError::InvalidAmount("Amount cannot be empty".to_string()));
    }

    if amount.starts_with('-') {
        return Err(AppError::InvalidAmount("Amount cannot be negative".to_string()));
    }

    let (integer, fraction) = match amount.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (amount, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction)
    {
        return Err(AppError::InvalidAmount(format!("Invalid amount format: {}", amount)));
    }

    let decimals = decimals as usize;
    if fraction.len() > decimals {
        return Err(AppError::InvalidAmount(format!(
            "Amount {} has more than {} fractional digits",
            amount, decimals
        )));
    }

    let overflow = || AppError::NumericOverflow(format!("Amount {} exceeds uint256", amount));

    let integer_value = if integer.is_empty() {
        U256::ZERO
    } else {
        integer.parse::<U256>().map_err(|_| overflow())?
    };

    let padded = format!("{}{}", fraction, "0".repeat(decimals - fraction.len()));
    let fraction_value =
        if padded.is_empty() { U256::ZERO } else { padded.parse::<U256>().map_err(|_| overflow())? };

    let multiplier = U256::from(10).pow(U256::from(decimals));
    integer_value
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(overflow)
}

/// Parse and validate an Ethereum address from a string.
///
/// Requires the `0x` prefix and exactly 40 hex characters. Checksum casing
/// is not enforced.
pub fn parse_address(s: &str) -> Result<Address> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(AppError::InvalidAddress("Address cannot be empty".to_string()));
    }

    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(AppError::InvalidAddress(format!("Address must start with '0x': {}", s)));
    }

    if trimmed.len() != 42 {
        return Err(AppError::InvalidAddress(format!(
            "Address must be 42 characters (0x + 40 hex chars), got {}: {}",
            trimmed.len(),
            s
        )));
    }

    trimmed
        .parse::<Address>()
        .map_err(|e| AppError::InvalidAddress(format!("Invalid address format '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn wei(eth_tenths: u64) -> U256 {
        U256::from(eth_tenths) * U256::from(100_000_000_000_000_000u64)
    }

    // ============================================================================
    // format_units Tests
    // ============================================================================

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(wei(10), 18), "1");
        assert_eq!(format_units(wei(5), 18), "0.5");
        assert_eq!(format_units(wei(15), 18), "1.5");
        assert_eq!(format_units(U256::from(1_000_000u64), 6), "1");
    }

    #[test]
    fn test_format_units_zero() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::ZERO, 0), "0");
    }

    #[test]
    fn test_format_units_small_values() {
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(100u64), 18), "0.0000000000000001");
    }

    #[test]
    fn test_format_units_no_decimals() {
        assert_eq!(format_units(U256::from(12345u64), 0), "12345");
    }

    // ============================================================================
    // parse_units Tests
    // ============================================================================

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1", 18).unwrap(), wei(10));
        assert_eq!(parse_units("1.5", 18).unwrap(), wei(15));
        assert_eq!(parse_units("0.5", 18).unwrap(), wei(5));
        assert_eq!(parse_units("100", 6).unwrap(), U256::from(100_000_000u64));
    }

    #[test]
    fn test_parse_units_decimal_edge_forms() {
        assert_eq!(parse_units(".5", 18).unwrap(), wei(5));
        assert_eq!(parse_units("1.", 18).unwrap(), wei(10));
        assert_eq!(parse_units("  1.5  ", 18).unwrap(), wei(15));
    }

    #[test]
    fn test_parse_units_full_precision() {
        let result = parse_units("1.123456789012345678", 18).unwrap();
        assert_eq!(result, U256::from(1_123_456_789_012_345_678u64));
    }

    #[test]
    fn test_parse_units_rejects_excess_decimals() {
        let result = parse_units("1.1234567", 6);
        assert!(matches!(result, Err(AppError::InvalidAmount(msg)) if msg.contains("fractional")));
    }

    #[test]
    fn test_parse_units_negative() {
        let result = parse_units("-1", 18);
        assert!(matches!(result, Err(AppError::InvalidAmount(msg)) if msg == "Amount cannot be negative"));
    }

    #[test]
    fn test_parse_units_empty() {
        assert!(matches!(parse_units("", 18), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_units("   ", 18), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_units(".", 18), Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_units_invalid_format() {
        assert!(parse_units("1.2.3", 18).is_err());
        assert!(parse_units("1.5abc", 18).is_err());
        assert!(parse_units("0x10", 18).is_err());
        assert!(parse_units("+1", 18).is_err());
        assert!(parse_units("1e18", 18).is_err());
    }

    #[test]
    fn test_parse_units_overflow() {
        let huge = "9".repeat(80);
        assert!(matches!(parse_units(&huge, 18), Err(AppError::NumericOverflow(_))));
    }

    #[test]
    fn test_parse_units_zero_decimals() {
        assert_eq!(parse_units("100", 0).unwrap(), U256::from(100u64));
        assert!(parse_units("1.5", 0).is_err());
    }

    // ============================================================================
    // parse_address Tests
    // ============================================================================

    #[test]
    fn test_parse_address_any_case() {
        let expected = address!("b685400156cF3CBE8725958DeAA61436727A30c3");
        assert_eq!(parse_address("0xb685400156cf3cbe8725958deaa61436727a30c3").unwrap(), expected);
        assert_eq!(parse_address("0xB685400156CF3CBE8725958DEAA61436727A30C3").unwrap(), expected);
    }

    #[test]
    fn test_parse_address_errors() {
        assert!(matches!(parse_address(""), Err(AppError::InvalidAddress(_))));
        assert!(matches!(
            parse_address("b685400156cf3cbe8725958deaa61436727a30c3"),
            Err(AppError::InvalidAddress(msg)) if msg.contains("0x")
        ));
        assert!(matches!(parse_address("0x1234"), Err(AppError::InvalidAddress(msg)) if msg.contains("42")));
        assert!(parse_address("0xZZ85400156cf3cbe8725958deaa61436727a30c3").is_err());
    }
}
