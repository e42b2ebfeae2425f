use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a payee, optionally tied to a commission configuration.
pub async fn create_payee(
    pool: &PgPool,
    display_name: &str,
    commission_config_id: Option<Uuid>,
) -> anyhow::Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO payees (display_name, commission_config_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(display_name)
    .bind(commission_config_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

pub async fn payee_exists(pool: &PgPool, payee_id: Uuid) -> anyhow::Result<bool> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM payees WHERE id = $1)")
        .bind(payee_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Rate from the payee's assigned commission configuration, if that
/// configuration exists and is active.
pub async fn assigned_commission_rate(
    pool: &PgPool,
    payee_id: Uuid,
) -> anyhow::Result<Option<Decimal>> {
    let row: Option<(Decimal,)> = sqlx::query_as(
        r#"
        SELECT c.commission_rate
        FROM payees p
        JOIN commission_configs c ON c.id = p.commission_config_id
        WHERE p.id = $1 AND c.is_active
        "#,
    )
    .bind(payee_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.0))
}
