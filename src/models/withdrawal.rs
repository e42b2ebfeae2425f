use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::WithdrawalStatus;

/// A payee's request to withdraw part of their available balance.
///
/// Created as `Pending`; paid, rejected and cancelled are terminal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WithdrawalRequest {
    pub id: Uuid,
    pub payee_id: Uuid,
    pub amount: Decimal,
    pub status: WithdrawalStatus,
    pub requested_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Actor that paid or rejected the request; None while pending and for
    /// payee-cancelled requests.
    pub resolved_by: Option<Uuid>,
    pub notes: Option<String>,
}

impl WithdrawalRequest {
    pub fn pending(payee_id: Uuid, amount: Decimal, requested_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payee_id,
            amount,
            status: WithdrawalStatus::Pending,
            requested_at,
            resolved_at: None,
            resolved_by: None,
            notes: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == WithdrawalStatus::Pending
    }
}

/// Per-status withdrawal totals for one payee.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WithdrawalTotals {
    pub pending: Decimal,
    pub paid: Decimal,
}

impl WithdrawalTotals {
    /// Amount unavailable for new requests: pending plus already paid.
    pub fn committed(&self) -> Decimal {
        self.pending + self.paid
    }
}

/// Earnings position reported to the payee alongside withdrawal screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub payee_id: Uuid,
    pub total_earnings: Decimal,
    pub available_balance: Decimal,
    pub pending_withdrawals: Decimal,
    pub paid_withdrawals: Decimal,
}
