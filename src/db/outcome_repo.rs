use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Outcome;

/// Insert an outcome row.
pub async fn insert_outcome(pool: &PgPool, outcome: &Outcome) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO outcomes (id, payee_id, result, odds, confidence, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(outcome.id)
    .bind(outcome.payee_id)
    .bind(outcome.result)
    .bind(outcome.odds)
    .bind(outcome.confidence)
    .bind(outcome.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Full outcome history for a payee, oldest first.
pub async fn get_outcomes_by_payee(pool: &PgPool, payee_id: Uuid) -> anyhow::Result<Vec<Outcome>> {
    let outcomes = sqlx::query_as::<_, Outcome>(
        "SELECT * FROM outcomes WHERE payee_id = $1 ORDER BY created_at ASC",
    )
    .bind(payee_id)
    .fetch_all(pool)
    .await?;

    Ok(outcomes)
}
