use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::SubscriptionStatus;

/// Result of splitting a transaction price into platform commission and
/// payee earnings. `commission_amount + payee_earnings == price` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionSplit {
    pub price: Decimal,
    /// Percent 0–100, captured once at transaction creation.
    pub rate: Decimal,
    pub commission_amount: Decimal,
    pub payee_earnings: Decimal,
}

/// A commission-bearing subscription: the ledger entry produced when a
/// subscriber pays for access to a payee's predictions.
///
/// The embedded split is frozen at creation; later changes to rate
/// configuration never alter existing rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub payee_id: Uuid,
    pub price: Decimal,
    pub commission_rate: Decimal,
    pub commission_amount: Decimal,
    pub payee_earnings: Decimal,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(
        subscriber_id: Uuid,
        payee_id: Uuid,
        split: &CommissionSplit,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subscriber_id,
            payee_id,
            price: split.price,
            commission_rate: split.rate,
            commission_amount: split.commission_amount,
            payee_earnings: split.payee_earnings,
            status: SubscriptionStatus::Active,
            created_at,
        }
    }
}
