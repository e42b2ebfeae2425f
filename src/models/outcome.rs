use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::OutcomeResult;

/// One prediction and its grading state.
///
/// Immutable once graded except for correction; every rating metric is
/// re-derived from the full set of these rows, never from deltas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Outcome {
    pub id: Uuid,
    pub payee_id: Uuid,
    pub result: OutcomeResult,
    /// Decimal odds; 0 means unset.
    pub odds: Decimal,
    /// Self-reported confidence (1–10 in the upstream product); optional.
    pub confidence: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Outcome {
    pub fn new(
        payee_id: Uuid,
        result: OutcomeResult,
        odds: Decimal,
        confidence: Option<i32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payee_id,
            result,
            odds,
            confidence,
            created_at,
        }
    }
}
