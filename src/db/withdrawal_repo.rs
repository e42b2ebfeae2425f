use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::ledger::balance;
use crate::models::{WithdrawalRequest, WithdrawalTotals};

/// Fetch a withdrawal request by id.
pub async fn get_withdrawal(
    pool: &PgPool,
    request_id: Uuid,
) -> anyhow::Result<Option<WithdrawalRequest>> {
    let request = sqlx::query_as::<_, WithdrawalRequest>(
        "SELECT * FROM withdrawal_requests WHERE id = $1",
    )
    .bind(request_id)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

/// Pending and paid amount totals for a payee.
pub async fn withdrawal_totals(pool: &PgPool, payee_id: Uuid) -> anyhow::Result<WithdrawalTotals> {
    let row: (Decimal, Decimal) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(amount) FILTER (WHERE status = 'pending'), 0),
            COALESCE(SUM(amount) FILTER (WHERE status = 'paid'), 0)
        FROM withdrawal_requests
        WHERE payee_id = $1
        "#,
    )
    .bind(payee_id)
    .fetch_one(pool)
    .await?;

    Ok(WithdrawalTotals {
        pending: row.0,
        paid: row.1,
    })
}

/// Create a pending request with the balance check and the insert inside
/// one transaction.
///
/// The payee row is taken `FOR UPDATE` first, so concurrent creators for
/// the same payee queue up and each re-checks against committed state; a
/// failed check aborts the transaction with nothing written.
pub async fn create_requested(
    pool: &PgPool,
    payee_id: Uuid,
    amount: Decimal,
    minimum: Decimal,
    requested_at: DateTime<Utc>,
) -> Result<WithdrawalRequest, EngineError> {
    let mut tx = pool.begin().await?;

    let locked: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM payees WHERE id = $1 FOR UPDATE")
            .bind(payee_id)
            .fetch_optional(&mut *tx)
            .await?;

    if locked.is_none() {
        return Err(EngineError::NotFound(format!("payee {payee_id}")));
    }

    let (earnings,): (Decimal,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(payee_earnings), 0)
        FROM subscriptions
        WHERE payee_id = $1 AND status = 'active'
        "#,
    )
    .bind(payee_id)
    .fetch_one(&mut *tx)
    .await?;

    let (committed,): (Decimal,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(amount), 0)
        FROM withdrawal_requests
        WHERE payee_id = $1 AND status IN ('pending', 'paid')
        "#,
    )
    .bind(payee_id)
    .fetch_one(&mut *tx)
    .await?;

    let available = balance::available_balance(earnings, committed);
    balance::check_withdrawal(amount, available, minimum)?;

    let request = WithdrawalRequest::pending(payee_id, amount, requested_at);

    sqlx::query(
        r#"
        INSERT INTO withdrawal_requests (id, payee_id, amount, status, requested_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(request.id)
    .bind(request.payee_id)
    .bind(request.amount)
    .bind(request.status)
    .bind(request.requested_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(request)
}

/// Apply a terminal transition only if the row is still pending.
/// Returns whether a row was updated.
pub async fn apply_transition(pool: &PgPool, updated: &WithdrawalRequest) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE withdrawal_requests
        SET status = $2, resolved_at = $3, resolved_by = $4, notes = $5
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(updated.id)
    .bind(updated.status)
    .bind(updated.resolved_at)
    .bind(updated.resolved_by)
    .bind(&updated.notes)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
