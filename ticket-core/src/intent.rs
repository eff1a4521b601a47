//! Raw user input and the validated intent derived from it at submit time.

use alloy_primitives::U256;

use crate::error::LifecycleError;
use crate::pricing::PricingTiers;

/// Raw text typed into the two quantity fields.
///
/// Never coerced on keystroke; parsed only when the user submits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub tickets_to_purchase: String,
    pub tickets_to_withdraw: String,
}

impl PendingInput {
    pub fn field(&self, kind: TxKind) -> &str {
        match kind {
            TxKind::Purchase => &self.tickets_to_purchase,
            TxKind::Withdraw => &self.tickets_to_withdraw,
        }
    }

    pub fn field_mut(&mut self, kind: TxKind) -> &mut String {
        match kind {
            TxKind::Purchase => &mut self.tickets_to_purchase,
            TxKind::Withdraw => &mut self.tickets_to_withdraw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxKind {
    Purchase,
    Withdraw,
}

impl TxKind {
    pub fn name(&self) -> &'static str {
        match self {
            TxKind::Purchase => "purchase",
            TxKind::Withdraw => "withdraw",
        }
    }
}

/// Validated parameters for exactly one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionIntent {
    pub kind: TxKind,
    pub quantity: u64,
    /// Always zero for withdrawals.
    pub attached_value: U256,
}

impl TransactionIntent {
    pub fn purchase(input: &str, pricing: &PricingTiers) -> Result<Self, LifecycleError> {
        let quantity = parse_quantity(input)?;
        let attached_value = pricing.attached_value(quantity)?;
        Ok(Self {
            kind: TxKind::Purchase,
            quantity,
            attached_value,
        })
    }

    /// `tickets_owned` is the last refreshed balance, `None` if no refresh
    /// has succeeded yet. Withdrawing more than it is rejected locally.
    pub fn withdraw(input: &str, tickets_owned: Option<U256>) -> Result<Self, LifecycleError> {
        let quantity = parse_quantity(input)?;
        let Some(tickets_owned) = tickets_owned else {
            return Err(LifecycleError::ValidationFailed(
                "Balances not loaded yet; refresh first".to_string(),
            ));
        };
        if U256::from(quantity) > tickets_owned {
            return Err(LifecycleError::ValidationFailed(format!(
                "Cannot withdraw {} tickets, only {} owned",
                quantity, tickets_owned
            )));
        }
        Ok(Self {
            kind: TxKind::Withdraw,
            quantity,
            attached_value: U256::ZERO,
        })
    }
}

/// Parse a strictly positive whole number of tickets.
pub fn parse_quantity(input: &str) -> Result<u64, LifecycleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::ValidationFailed(
            "Enter the number of tickets".to_string(),
        ));
    }

    // Reject signs, decimals and exponents up front so "-1" and "1.5" get the
    // same message as "abc".
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(LifecycleError::ValidationFailed(
            "Quantity must be a positive whole number".to_string(),
        ));
    }

    let quantity: u64 = trimmed
        .parse()
        .map_err(|_| LifecycleError::ValidationFailed("Ticket quantity is too large".to_string()))?;

    if quantity == 0 {
        return Err(LifecycleError::ValidationFailed(
            "Quantity must be greater than zero".to_string(),
        ));
    }

    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_quantity_accepts_positive_integers() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 42 ").unwrap(), 42);
        assert_eq!(parse_quantity("007").unwrap(), 7);
    }

    #[test]
    fn test_parse_quantity_rejects_non_positive() {
        for input in ["0", "-1", "-100", "", "   ", "1.5", "abc", "1e3", "+2", "99999999999999999999999"] {
            let err = parse_quantity(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationFailed, "input {:?}", input);
        }
    }

    #[test]
    fn test_purchase_intent_attaches_tiered_value() {
        let pricing = PricingTiers::default();

        let one = TransactionIntent::purchase("1", &pricing).unwrap();
        assert_eq!(one.kind, TxKind::Purchase);
        assert_eq!(one.attached_value, U256::from(3u64));

        let two = TransactionIntent::purchase("2", &pricing).unwrap();
        assert_eq!(two.quantity, 2);
        assert_eq!(two.attached_value, U256::from(4u64));
    }

    #[test]
    fn test_withdraw_intent_bounded_by_owned() {
        let owned = Some(U256::from(3u64));
        let intent = TransactionIntent::withdraw("3", owned).unwrap();
        assert_eq!(intent.kind, TxKind::Withdraw);
        assert_eq!(intent.attached_value, U256::ZERO);

        let err = TransactionIntent::withdraw("4", owned).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[test]
    fn test_withdraw_intent_without_balance_asks_for_refresh() {
        let err = TransactionIntent::withdraw("1", None).unwrap_err();
        assert!(err.to_string().contains("refresh first"));

        // Input errors still take precedence
        let err = TransactionIntent::withdraw("0", None).unwrap_err();
        assert!(!err.to_string().contains("refresh first"));
    }

    #[test]
    fn test_pending_input_fields_by_kind() {
        let mut input = PendingInput {
            tickets_to_purchase: "2".to_string(),
            tickets_to_withdraw: "1".to_string(),
        };

        input.field_mut(TxKind::Withdraw).clear();

        assert_eq!(input.field(TxKind::Purchase), "2");
        assert_eq!(input.field(TxKind::Withdraw), "");
    }
}
