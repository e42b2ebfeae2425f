pub mod config_repo;
pub mod outcome_repo;
pub mod payee_repo;
pub mod rating_repo;
pub mod subscription_repo;
pub mod withdrawal_repo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::{Outcome, RatingSnapshot, Subscription, WithdrawalRequest, WithdrawalTotals};
use crate::store::LedgerStore;

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Postgres-backed ledger store: the engine runs directly against a pool.
#[async_trait]
impl LedgerStore for PgPool {
    async fn payee_exists(&self, payee_id: Uuid) -> Result<bool, EngineError> {
        Ok(payee_repo::payee_exists(self, payee_id).await?)
    }

    async fn outcomes_for_payee(&self, payee_id: Uuid) -> Result<Vec<Outcome>, EngineError> {
        Ok(outcome_repo::get_outcomes_by_payee(self, payee_id).await?)
    }

    async fn insert_outcome(&self, outcome: &Outcome) -> Result<(), EngineError> {
        Ok(outcome_repo::insert_outcome(self, outcome).await?)
    }

    async fn active_subscriber_count(&self, payee_id: Uuid) -> Result<i64, EngineError> {
        Ok(subscription_repo::active_subscriber_count(self, payee_id).await?)
    }

    async fn save_rating_snapshot(&self, snapshot: &RatingSnapshot) -> Result<(), EngineError> {
        Ok(rating_repo::upsert_snapshot(self, snapshot).await?)
    }

    async fn rating_snapshot(
        &self,
        payee_id: Uuid,
    ) -> Result<Option<RatingSnapshot>, EngineError> {
        Ok(rating_repo::get_snapshot(self, payee_id).await?)
    }

    async fn payee_commission_rate(
        &self,
        payee_id: Uuid,
    ) -> Result<Option<Decimal>, EngineError> {
        Ok(payee_repo::assigned_commission_rate(self, payee_id).await?)
    }

    async fn default_commission_rate(&self) -> Result<Option<Decimal>, EngineError> {
        Ok(config_repo::default_commission_rate(self).await?)
    }

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<(), EngineError> {
        Ok(subscription_repo::insert_subscription(self, subscription).await?)
    }

    async fn total_earnings(&self, payee_id: Uuid) -> Result<Decimal, EngineError> {
        Ok(subscription_repo::total_earnings(self, payee_id).await?)
    }

    async fn withdrawal_totals(&self, payee_id: Uuid) -> Result<WithdrawalTotals, EngineError> {
        Ok(withdrawal_repo::withdrawal_totals(self, payee_id).await?)
    }

    async fn total_commission(&self) -> Result<Decimal, EngineError> {
        Ok(subscription_repo::total_commission(self).await?)
    }

    async fn create_withdrawal(
        &self,
        payee_id: Uuid,
        amount: Decimal,
        minimum: Decimal,
        requested_at: DateTime<Utc>,
    ) -> Result<WithdrawalRequest, EngineError> {
        withdrawal_repo::create_requested(self, payee_id, amount, minimum, requested_at).await
    }

    async fn withdrawal(
        &self,
        request_id: Uuid,
    ) -> Result<Option<WithdrawalRequest>, EngineError> {
        Ok(withdrawal_repo::get_withdrawal(self, request_id).await?)
    }

    async fn store_resolved_withdrawal(
        &self,
        updated: &WithdrawalRequest,
    ) -> Result<bool, EngineError> {
        Ok(withdrawal_repo::apply_transition(self, updated).await?)
    }
}
