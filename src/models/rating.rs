use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::RatingTier;

/// Persisted rating row for one payee.
///
/// Entirely derived: created on the first grading event and fully
/// overwritten on every recomputation. No history of past snapshots is
/// kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RatingSnapshot {
    pub payee_id: Uuid,
    pub total_predictions: i32,
    pub won_predictions: i32,
    pub lost_predictions: i32,
    pub void_predictions: i32,
    /// Percent over won+lost only, 0–100.
    pub win_rate: Decimal,
    /// Mean of positive odds among graded outcomes.
    pub average_odds: Decimal,
    /// Percent return assuming a flat 100-unit stake per graded outcome.
    pub roi: Decimal,
    /// Signed: +n consecutive wins, −n consecutive losses, most recent first.
    pub current_streak: i32,
    pub best_win_streak: i32,
    pub worst_loss_streak: i32,
    /// Weighted composite, 0–100.
    pub rating_score: Decimal,
    /// 0 stars until the payee has enough history.
    pub star_rating: i16,
    pub tier: RatingTier,
    pub predictions_last_30_days: i32,
    pub win_rate_last_30_days: Decimal,
    pub subscriber_count: i64,
    pub avg_confidence: Decimal,
    pub last_computed_at: DateTime<Utc>,
}
