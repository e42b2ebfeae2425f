use sqlx::PgPool;
use uuid::Uuid;

use crate::models::RatingSnapshot;

/// Overwrite the payee's derived rating row.
pub async fn upsert_snapshot(pool: &PgPool, snapshot: &RatingSnapshot) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO rating_snapshots
            (payee_id, total_predictions, won_predictions, lost_predictions,
             void_predictions, win_rate, average_odds, roi, current_streak,
             best_win_streak, worst_loss_streak, rating_score, star_rating,
             tier, predictions_last_30_days, win_rate_last_30_days,
             subscriber_count, avg_confidence, last_computed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19)
        ON CONFLICT (payee_id) DO UPDATE SET
            total_predictions = $2,
            won_predictions = $3,
            lost_predictions = $4,
            void_predictions = $5,
            win_rate = $6,
            average_odds = $7,
            roi = $8,
            current_streak = $9,
            best_win_streak = $10,
            worst_loss_streak = $11,
            rating_score = $12,
            star_rating = $13,
            tier = $14,
            predictions_last_30_days = $15,
            win_rate_last_30_days = $16,
            subscriber_count = $17,
            avg_confidence = $18,
            last_computed_at = $19
        "#,
    )
    .bind(snapshot.payee_id)
    .bind(snapshot.total_predictions)
    .bind(snapshot.won_predictions)
    .bind(snapshot.lost_predictions)
    .bind(snapshot.void_predictions)
    .bind(snapshot.win_rate)
    .bind(snapshot.average_odds)
    .bind(snapshot.roi)
    .bind(snapshot.current_streak)
    .bind(snapshot.best_win_streak)
    .bind(snapshot.worst_loss_streak)
    .bind(snapshot.rating_score)
    .bind(snapshot.star_rating)
    .bind(snapshot.tier)
    .bind(snapshot.predictions_last_30_days)
    .bind(snapshot.win_rate_last_30_days)
    .bind(snapshot.subscriber_count)
    .bind(snapshot.avg_confidence)
    .bind(snapshot.last_computed_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the current snapshot for a payee.
pub async fn get_snapshot(
    pool: &PgPool,
    payee_id: Uuid,
) -> anyhow::Result<Option<RatingSnapshot>> {
    let snapshot = sqlx::query_as::<_, RatingSnapshot>(
        "SELECT * FROM rating_snapshots WHERE payee_id = $1",
    )
    .bind(payee_id)
    .fetch_optional(pool)
    .await?;

    Ok(snapshot)
}
