//! # Display Formatting
//!
//! Converts on-chain integer amounts into decimal strings for the UI and
//! shortens account addresses.
//!
//! ```rust
//! use alloy_primitives::U256;
//! use ticket_core::units::{format_units, truncate_address};
//!
//! assert_eq!(format_units(U256::from(1_500_000_000_000_000_000u128), 18), "1.5");
//! assert_eq!(format_units(U256::from(1_234_567u64), 0), "1,234,567");
//! assert_eq!(
//!     truncate_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
//!     "0x5FbD...0aa3"
//! );
//! ```

use alloy_primitives::U256;

/// Render a base-unit amount with `decimals` fractional digits.
///
/// Trailing fractional zeros are dropped and the integer part is grouped with
/// commas.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let (integer, fraction) = amount.div_rem(scale);

    let integer_with_commas = group_thousands(&integer.to_string());
    if decimals == 0 || fraction.is_zero() {
        return integer_with_commas;
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    format!("{}.{}", integer_with_commas, fraction)
}

/// Render a whole-number count such as a ticket balance.
pub fn format_count(count: U256) -> String {
    group_thousands(&count.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Format an address by showing the first `prefix_len` and last `suffix_len`
/// characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// `0x` plus four hex digits, then the last four.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units_whole_values() {
        assert_eq!(format_units(U256::from(4u64), 0), "4");
        assert_eq!(format_units(U256::ZERO, 0), "0");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(2_000_000_000_000_000_000u128), 18), "2");
    }

    #[test]
    fn test_format_units_fractions() {
        assert_eq!(format_units(U256::from(1_500_000_000_000_000_000u128), 18), "1.5");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(1_050u64), 3), "1.05");
    }

    #[test]
    fn test_format_units_groups_thousands() {
        assert_eq!(format_units(U256::from(1_234_567u64), 0), "1,234,567");
        assert_eq!(format_units(U256::from(100u64), 0), "100");
        assert_eq!(format_units(U256::from(1_234_567_890u64), 3), "1,234,567.89");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(U256::from(12u64)), "12");
        assert_eq!(format_count(U256::from(1_000u64)), "1,000");
    }

    #[test]
    fn test_format_address() {
        let addr = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
        assert_eq!(format_address(addr, 6, 4), "0x5FbD...0aa3");
        assert_eq!(format_address(addr, 4, 4), "0x5F...0aa3");
        assert_eq!(truncate_address(addr), "0x5FbD...0aa3");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("0xabc", 6, 4), "0xabc");
    }
}
