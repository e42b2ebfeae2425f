use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a commission configuration or update its rate by name.
pub async fn upsert_config(
    pool: &PgPool,
    name: &str,
    commission_rate: Decimal,
    is_active: bool,
) -> anyhow::Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO commission_configs (name, commission_rate, is_active)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET commission_rate = $2, is_active = $3
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(commission_rate)
    .bind(is_active)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Rate of the active configuration named "default", if present. New
/// transactions fall back to this when the payee has no assigned
/// configuration and no override is given.
pub async fn default_commission_rate(pool: &PgPool) -> anyhow::Result<Option<Decimal>> {
    let row: Option<(Decimal,)> = sqlx::query_as(
        "SELECT commission_rate FROM commission_configs WHERE name = 'default' AND is_active",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.0))
}
