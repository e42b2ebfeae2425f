use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Subscription;

/// Insert a subscription with its frozen commission split.
pub async fn insert_subscription(pool: &PgPool, sub: &Subscription) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO subscriptions
            (id, subscriber_id, payee_id, price, commission_rate,
             commission_amount, payee_earnings, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(sub.id)
    .bind(sub.subscriber_id)
    .bind(sub.payee_id)
    .bind(sub.price)
    .bind(sub.commission_rate)
    .bind(sub.commission_amount)
    .bind(sub.payee_earnings)
    .bind(sub.status)
    .bind(sub.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Count of active subscriptions to a payee.
pub async fn active_subscriber_count(pool: &PgPool, payee_id: Uuid) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM subscriptions WHERE payee_id = $1 AND status = 'active'",
    )
    .bind(payee_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Sum of payee_earnings over a payee's active subscriptions.
pub async fn total_earnings(pool: &PgPool, payee_id: Uuid) -> anyhow::Result<Decimal> {
    let row: (Decimal,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(payee_earnings), 0)
        FROM subscriptions
        WHERE payee_id = $1 AND status = 'active'
        "#,
    )
    .bind(payee_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Platform-wide commission collected over active subscriptions.
pub async fn total_commission(pool: &PgPool) -> anyhow::Result<Decimal> {
    let row: (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(commission_amount), 0) FROM subscriptions WHERE status = 'active'",
    )
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
