use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::EngineError;
use crate::models::CommissionSplit;

/// Platform commission applied when the caller supplies no rate at all.
pub fn default_rate() -> Decimal {
    Decimal::new(1500, 2) // 15.00%
}

/// Split a transaction price into platform commission and payee earnings.
///
/// The commission side is rounded to the smallest currency unit (half away
/// from zero); earnings take the remainder, so the two always sum back to
/// the price exactly.
pub fn split(price: Decimal, rate: Option<Decimal>) -> Result<CommissionSplit, EngineError> {
    if price <= Decimal::ZERO {
        return Err(EngineError::Validation(format!(
            "price must be positive, got {price}"
        )));
    }

    let rate = rate.unwrap_or_else(default_rate);
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(EngineError::Validation(format!(
            "commission rate must be between 0 and 100, got {rate}"
        )));
    }

    let commission_amount = (price * rate / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let payee_earnings = price - commission_amount;

    Ok(CommissionSplit {
        price,
        rate,
        commission_amount,
        payee_earnings,
    })
}

/// Pick the rate to snapshot onto a new transaction.
///
/// Priority: explicit override, then the payee's assigned configuration,
/// then the system default configuration. A missing default yields 0;
/// a configuration gap must not fail the transaction.
pub fn resolve_rate(
    rate_override: Option<Decimal>,
    payee_rate: Option<Decimal>,
    configured_default: Option<Decimal>,
) -> Decimal {
    rate_override
        .or(payee_rate)
        .or(configured_default)
        .unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let split = split(Decimal::from(1000), Some(Decimal::from(15))).unwrap();

        assert_eq!(split.commission_amount, Decimal::from(150));
        assert_eq!(split.payee_earnings, Decimal::from(850));
    }

    #[test]
    fn test_split_defaults_to_fifteen_percent() {
        let split = split(Decimal::from(200), None).unwrap();

        assert_eq!(split.rate, Decimal::new(1500, 2));
        assert_eq!(split.commission_amount, Decimal::from(30));
    }

    #[test]
    fn test_split_is_exactly_complementary_under_rounding() {
        // 99.99 at 33.33% → commission 33.3267 rounds to 33.33
        let price = Decimal::new(9999, 2);
        let split = split(price, Some(Decimal::new(3333, 2))).unwrap();

        assert_eq!(split.commission_amount, Decimal::new(3333, 2));
        assert_eq!(split.commission_amount + split.payee_earnings, price);
    }

    #[test]
    fn test_split_rounds_half_away_from_zero() {
        // 1.00 at 12.5% = 0.125 → 0.13, not banker's 0.12
        let split = split(Decimal::ONE, Some(Decimal::new(125, 1))).unwrap();

        assert_eq!(split.commission_amount, Decimal::new(13, 2));
        assert_eq!(split.payee_earnings, Decimal::new(87, 2));
    }

    #[test]
    fn test_split_zero_and_full_rate() {
        let none = split(Decimal::from(500), Some(Decimal::ZERO)).unwrap();
        assert_eq!(none.commission_amount, Decimal::ZERO);
        assert_eq!(none.payee_earnings, Decimal::from(500));

        let all = split(Decimal::from(500), Some(Decimal::ONE_HUNDRED)).unwrap();
        assert_eq!(all.commission_amount, Decimal::from(500));
        assert_eq!(all.payee_earnings, Decimal::ZERO);
    }

    #[test]
    fn test_split_rejects_bad_inputs() {
        assert!(matches!(
            split(Decimal::ZERO, None),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            split(Decimal::from(-10), None),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            split(Decimal::from(100), Some(Decimal::from(101))),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            split(Decimal::from(100), Some(Decimal::from(-1))),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_rate_priority() {
        let over = Some(Decimal::from(10));
        let payee = Some(Decimal::from(20));
        let system = Some(Decimal::from(30));

        assert_eq!(resolve_rate(over, payee, system), Decimal::from(10));
        assert_eq!(resolve_rate(None, payee, system), Decimal::from(20));
        assert_eq!(resolve_rate(None, None, system), Decimal::from(30));
        assert_eq!(resolve_rate(None, None, None), Decimal::ZERO);
    }
}
