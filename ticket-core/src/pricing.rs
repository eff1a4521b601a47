//! Tiered ticket pricing replicated from the contract's rules.
//!
//! The contract charges a higher unit price for a single ticket than for a
//! bulk purchase. The front-end only needs the rule to compute the value to
//! attach to `purchaseTickets`; the contract remains the authority.

use alloy_primitives::U256;

use crate::error::LifecycleError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingTiers {
    /// Unit price while `quantity <= bulk_threshold`.
    pub single_unit_price: U256,
    /// Unit price once `quantity > bulk_threshold`.
    pub bulk_unit_price: U256,
    pub bulk_threshold: u64,
}

impl Default for PricingTiers {
    fn default() -> Self {
        Self {
            single_unit_price: U256::from(3u64),
            bulk_unit_price: U256::from(2u64),
            bulk_threshold: 1,
        }
    }
}

impl PricingTiers {
    pub fn unit_price(&self, quantity: u64) -> U256 {
        if quantity > self.bulk_threshold {
            self.bulk_unit_price
        } else {
            self.single_unit_price
        }
    }

    /// Value to attach when purchasing `quantity` tickets.
    pub fn attached_value(&self, quantity: u64) -> Result<U256, LifecycleError> {
        self.unit_price(quantity)
            .checked_mul(U256::from(quantity))
            .ok_or_else(|| LifecycleError::ValidationFailed("Ticket quantity is too large".to_string()))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.single_unit_price.is_zero() || self.bulk_unit_price.is_zero() {
            return Err("Ticket prices must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ticket_uses_single_price() {
        let pricing = PricingTiers::default();
        assert_eq!(pricing.attached_value(1).unwrap(), U256::from(3u64));
    }

    #[test]
    fn test_bulk_purchase_uses_bulk_price() {
        let pricing = PricingTiers::default();
        assert_eq!(pricing.attached_value(2).unwrap(), U256::from(4u64));
        assert_eq!(pricing.attached_value(5).unwrap(), U256::from(10u64));
        assert_eq!(pricing.attached_value(1_000).unwrap(), U256::from(2_000u64));
    }

    #[test]
    fn test_custom_threshold() {
        let pricing = PricingTiers {
            single_unit_price: U256::from(10u64),
            bulk_unit_price: U256::from(7u64),
            bulk_threshold: 3,
        };
        assert_eq!(pricing.attached_value(3).unwrap(), U256::from(30u64));
        assert_eq!(pricing.attached_value(4).unwrap(), U256::from(28u64));
    }

    #[test]
    fn test_overflow_is_a_validation_error() {
        let pricing = PricingTiers {
            single_unit_price: U256::MAX,
            bulk_unit_price: U256::MAX,
            bulk_threshold: 1,
        };
        assert!(matches!(
            pricing.attached_value(2),
            Err(LifecycleError::ValidationFailed(_))
        ));
    }
}
