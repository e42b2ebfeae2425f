use rust_decimal::Decimal;

use crate::errors::EngineError;

/// Earnings not yet committed to a pending or paid withdrawal.
pub fn available_balance(total_earnings: Decimal, committed: Decimal) -> Decimal {
    total_earnings - committed
}

/// Gate for new withdrawal requests. Checked against fresh ledger state
/// inside the store's atomic unit, so two concurrent requests can never
/// both pass against the same balance.
pub fn check_withdrawal(
    amount: Decimal,
    available: Decimal,
    minimum: Decimal,
) -> Result<(), EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::Validation(format!(
            "withdrawal amount must be positive, got {amount}"
        )));
    }

    if amount < minimum {
        return Err(EngineError::BelowMinimum {
            minimum,
            requested: amount,
        });
    }

    if amount > available {
        return Err(EngineError::InsufficientBalance {
            available,
            requested: amount,
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
