use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::ledger::balance;
use crate::models::{Outcome, RatingSnapshot, Subscription, WithdrawalRequest, WithdrawalTotals};

use super::LedgerStore;

/// In-memory ledger store.
///
/// One mutex guards all state, which makes the create-withdrawal
/// check-and-insert trivially atomic: whoever holds the lock sees every
/// previously committed request. Used by the test suite and by embedders
/// that do not need durability.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    /// payee id → assigned commission rate (None = unassigned).
    payees: HashMap<Uuid, Option<Decimal>>,
    default_commission_rate: Option<Decimal>,
    outcomes: HashMap<Uuid, Vec<Outcome>>,
    subscriptions: Vec<Subscription>,
    ratings: HashMap<Uuid, RatingSnapshot>,
    withdrawals: HashMap<Uuid, WithdrawalRequest>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payee, optionally with an assigned commission rate.
    pub async fn register_payee(&self, commission_rate: Option<Decimal>) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().await.payees.insert(id, commission_rate);
        id
    }

    /// Assign or clear a payee's commission rate. Existing subscriptions
    /// keep the rate they were created with.
    pub async fn set_payee_commission_rate(&self, payee_id: Uuid, rate: Option<Decimal>) {
        self.inner.lock().await.payees.insert(payee_id, rate);
    }

    pub async fn set_default_commission_rate(&self, rate: Option<Decimal>) {
        self.inner.lock().await.default_commission_rate = rate;
    }
}

fn earnings_of(inner: &Inner, payee_id: Uuid) -> Decimal {
    inner
        .subscriptions
        .iter()
        .filter(|s| s.payee_id == payee_id && s.status.earns())
        .map(|s| s.payee_earnings)
        .sum()
}

fn withdrawal_totals_of(inner: &Inner, payee_id: Uuid) -> WithdrawalTotals {
    let mut totals = WithdrawalTotals::default();
    for request in inner.withdrawals.values() {
        if request.payee_id != payee_id {
            continue;
        }
        match request.status {
            crate::models::WithdrawalStatus::Pending => totals.pending += request.amount,
            crate::models::WithdrawalStatus::Paid => totals.paid += request.amount,
            _ => {}
        }
    }
    totals
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn payee_exists(&self, payee_id: Uuid) -> Result<bool, EngineError> {
        Ok(self.inner.lock().await.payees.contains_key(&payee_id))
    }

    async fn outcomes_for_payee(&self, payee_id: Uuid) -> Result<Vec<Outcome>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner.outcomes.get(&payee_id).cloned().unwrap_or_default())
    }

    async fn insert_outcome(&self, outcome: &Outcome) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        inner
            .outcomes
            .entry(outcome.payee_id)
            .or_default()
            .push(outcome.clone());
        Ok(())
    }

    async fn active_subscriber_count(&self, payee_id: Uuid) -> Result<i64, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.payee_id == payee_id && s.status.earns())
            .count() as i64)
    }

    async fn save_rating_snapshot(&self, snapshot: &RatingSnapshot) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        inner.ratings.insert(snapshot.payee_id, snapshot.clone());
        Ok(())
    }

    async fn rating_snapshot(
        &self,
        payee_id: Uuid,
    ) -> Result<Option<RatingSnapshot>, EngineError> {
        Ok(self.inner.lock().await.ratings.get(&payee_id).cloned())
    }

    async fn payee_commission_rate(
        &self,
        payee_id: Uuid,
    ) -> Result<Option<Decimal>, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner.payees.get(&payee_id).copied().flatten())
    }

    async fn default_commission_rate(&self) -> Result<Option<Decimal>, EngineError> {
        Ok(self.inner.lock().await.default_commission_rate)
    }

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        inner.subscriptions.push(subscription.clone());
        Ok(())
    }

    async fn total_earnings(&self, payee_id: Uuid) -> Result<Decimal, EngineError> {
        let inner = self.inner.lock().await;
        Ok(earnings_of(&inner, payee_id))
    }

    async fn withdrawal_totals(&self, payee_id: Uuid) -> Result<WithdrawalTotals, EngineError> {
        let inner = self.inner.lock().await;
        Ok(withdrawal_totals_of(&inner, payee_id))
    }

    async fn total_commission(&self) -> Result<Decimal, EngineError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.status.earns())
            .map(|s| s.commission_amount)
            .sum())
    }

    async fn create_withdrawal(
        &self,
        payee_id: Uuid,
        amount: Decimal,
        minimum: Decimal,
        requested_at: DateTime<Utc>,
    ) -> Result<WithdrawalRequest, EngineError> {
        // Check and insert under one lock: a concurrent request observes
        // either nothing or the fully committed pending row.
        let mut inner = self.inner.lock().await;

        let earnings = earnings_of(&inner, payee_id);
        let committed = withdrawal_totals_of(&inner, payee_id).committed();
        let available = balance::available_balance(earnings, committed);

        balance::check_withdrawal(amount, available, minimum)?;

        let request = WithdrawalRequest::pending(payee_id, amount, requested_at);
        inner.withdrawals.insert(request.id, request.clone());

        Ok(request)
    }

    async fn withdrawal(
        &self,
        request_id: Uuid,
    ) -> Result<Option<WithdrawalRequest>, EngineError> {
        Ok(self.inner.lock().await.withdrawals.get(&request_id).cloned())
    }

    async fn store_resolved_withdrawal(
        &self,
        updated: &WithdrawalRequest,
    ) -> Result<bool, EngineError> {
        let mut inner = self.inner.lock().await;

        match inner.withdrawals.get_mut(&updated.id) {
            Some(stored) if stored.is_pending() => {
                *stored = updated.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommissionSplit, WithdrawalStatus};

    fn subscription(payee_id: Uuid, earnings: i64) -> Subscription {
        let split = CommissionSplit {
            price: Decimal::from(earnings),
            rate: Decimal::ZERO,
            commission_amount: Decimal::ZERO,
            payee_earnings: Decimal::from(earnings),
        };
        Subscription::new(Uuid::new_v4(), payee_id, &split, Utc::now())
    }

    #[tokio::test]
    async fn test_create_withdrawal_checks_fresh_balance() {
        let store = MemoryStore::new();
        let payee = store.register_payee(None).await;
        store.insert_subscription(&subscription(payee, 1000)).await.unwrap();

        let first = store
            .create_withdrawal(payee, Decimal::from(700), Decimal::ONE, Utc::now())
            .await
            .unwrap();
        assert_eq!(first.status, WithdrawalStatus::Pending);

        // The pending 700 is committed; a second 700 must fail.
        let second = store
            .create_withdrawal(payee, Decimal::from(700), Decimal::ONE, Utc::now())
            .await;
        assert!(matches!(
            second,
            Err(EngineError::InsufficientBalance { .. })
        ));

        let totals = store.withdrawal_totals(payee).await.unwrap();
        assert_eq!(totals.pending, Decimal::from(700));
        assert_eq!(totals.paid, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_store_resolved_withdrawal_is_compare_and_set() {
        let store = MemoryStore::new();
        let payee = store.register_payee(None).await;
        store.insert_subscription(&subscription(payee, 1000)).await.unwrap();

        let request = store
            .create_withdrawal(payee, Decimal::from(500), Decimal::ONE, Utc::now())
            .await
            .unwrap();

        let mut paid = request.clone();
        paid.status = WithdrawalStatus::Paid;

        assert!(store.store_resolved_withdrawal(&paid).await.unwrap());
        // Second terminal write loses the race
        assert!(!store.store_resolved_withdrawal(&paid).await.unwrap());
    }
}
