pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::{Outcome, RatingSnapshot, Subscription, WithdrawalRequest, WithdrawalTotals};

/// Durable record of graded outcomes, commission-bearing subscriptions and
/// withdrawal requests. The engine owns the rules; implementations own
/// persistence and the two atomicity contracts called out below.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn payee_exists(&self, payee_id: Uuid) -> Result<bool, EngineError>;

    /// Full outcome history for a payee, pending rows included.
    async fn outcomes_for_payee(&self, payee_id: Uuid) -> Result<Vec<Outcome>, EngineError>;

    async fn insert_outcome(&self, outcome: &Outcome) -> Result<(), EngineError>;

    /// Count of currently-active subscriptions to this payee.
    async fn active_subscriber_count(&self, payee_id: Uuid) -> Result<i64, EngineError>;

    /// Overwrite the payee's single derived rating row.
    async fn save_rating_snapshot(&self, snapshot: &RatingSnapshot) -> Result<(), EngineError>;

    async fn rating_snapshot(&self, payee_id: Uuid)
        -> Result<Option<RatingSnapshot>, EngineError>;

    /// Commission rate assigned to this payee, if any.
    async fn payee_commission_rate(&self, payee_id: Uuid)
        -> Result<Option<Decimal>, EngineError>;

    /// System default commission rate, if one is configured.
    async fn default_commission_rate(&self) -> Result<Option<Decimal>, EngineError>;

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<(), EngineError>;

    /// Sum of payee_earnings over the payee's active subscriptions.
    async fn total_earnings(&self, payee_id: Uuid) -> Result<Decimal, EngineError>;

    /// Summed amounts per withdrawal status bucket for the payee.
    async fn withdrawal_totals(&self, payee_id: Uuid) -> Result<WithdrawalTotals, EngineError>;

    /// Platform-wide commission collected over active subscriptions.
    async fn total_commission(&self) -> Result<Decimal, EngineError>;

    /// Insert a pending withdrawal request after re-checking the balance
    /// against freshly committed state.
    ///
    /// Contract: the balance check (`ledger::balance::check_withdrawal`)
    /// and the insert must execute as one atomic unit per payee, so two
    /// concurrent requests can never both pass against the same balance.
    /// A failed check writes nothing.
    async fn create_withdrawal(
        &self,
        payee_id: Uuid,
        amount: Decimal,
        minimum: Decimal,
        requested_at: DateTime<Utc>,
    ) -> Result<WithdrawalRequest, EngineError>;

    async fn withdrawal(&self, request_id: Uuid)
        -> Result<Option<WithdrawalRequest>, EngineError>;

    /// Persist a terminal transition with compare-and-set semantics: the
    /// write applies only if the stored row is still pending. Returns
    /// whether it applied.
    async fn store_resolved_withdrawal(
        &self,
        updated: &WithdrawalRequest,
    ) -> Result<bool, EngineError>;
}
