use std::sync::Arc;

use metrics::counter;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::ledger::{balance, commission, withdrawal};
use crate::models::{
    BalanceSummary, CommissionSplit, Outcome, RatingSnapshot, Subscription, WithdrawalDecision,
    WithdrawalRequest,
};
use crate::rating::{aggregator, scorer};
use crate::store::LedgerStore;

/// The operation surface exposed to collaborators: rating recomputation,
/// commission splitting and the withdrawal ledger, over any `LedgerStore`.
#[derive(Clone)]
pub struct Engine<S> {
    store: S,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl<S: LedgerStore> Engine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Build with an explicit time source; tests pin the clock to make
    /// 30-day windows and timestamps deterministic.
    pub fn with_clock(store: S, config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Rating
    // -----------------------------------------------------------------------

    /// Recompute and persist the payee's rating snapshot from their full
    /// graded history.
    ///
    /// A pure function of stored history plus the injected clock: calling
    /// it twice with no intervening history change writes the same row.
    /// Concurrent recomputations race harmlessly (last writer wins).
    pub async fn recompute_rating(&self, payee_id: Uuid) -> Result<RatingSnapshot, EngineError> {
        self.ensure_payee(payee_id).await?;

        let outcomes = self.store.outcomes_for_payee(payee_id).await?;
        let subscriber_count = self.store.active_subscriber_count(payee_id).await?;
        let now = self.clock.now();

        let summary = aggregator::summarize(&outcomes, now);
        let score = scorer::rating_score(&summary);

        let snapshot = RatingSnapshot {
            payee_id,
            total_predictions: summary.total,
            won_predictions: summary.won,
            lost_predictions: summary.lost,
            void_predictions: summary.voided,
            win_rate: summary.win_rate,
            average_odds: summary.average_odds,
            roi: summary.roi,
            current_streak: summary.current_streak,
            best_win_streak: summary.best_win_streak,
            worst_loss_streak: summary.worst_loss_streak,
            rating_score: score,
            star_rating: scorer::star_rating(score, summary.total),
            tier: scorer::tier(score, summary.total),
            predictions_last_30_days: summary.last_30_days.total,
            win_rate_last_30_days: summary.last_30_days.win_rate,
            subscriber_count,
            avg_confidence: summary.avg_confidence,
            last_computed_at: now,
        };

        self.store.save_rating_snapshot(&snapshot).await?;
        counter!("ratings_recomputed_total").increment(1);

        tracing::debug!(
            payee_id = %payee_id,
            score = %score,
            tier = %snapshot.tier,
            total = snapshot.total_predictions,
            "Rating snapshot recomputed"
        );

        Ok(snapshot)
    }

    /// The grading trigger: persist a freshly graded outcome and fold it
    /// into the payee's rating in one call.
    pub async fn record_graded_outcome(
        &self,
        outcome: Outcome,
    ) -> Result<RatingSnapshot, EngineError> {
        if !outcome.result.is_graded() {
            return Err(EngineError::Validation(
                "outcome must be graded (won/lost/void)".into(),
            ));
        }

        self.ensure_payee(outcome.payee_id).await?;
        let payee_id = outcome.payee_id;
        self.store.insert_outcome(&outcome).await?;

        self.recompute_rating(payee_id).await
    }

    // -----------------------------------------------------------------------
    // Commission
    // -----------------------------------------------------------------------

    /// Split a price into commission and payee earnings. Pure; fails only
    /// on non-positive price or a rate outside [0, 100].
    pub fn split_commission(
        &self,
        price: Decimal,
        rate: Option<Decimal>,
    ) -> Result<CommissionSplit, EngineError> {
        commission::split(price, rate)
    }

    /// The subscription trigger: snapshot the commission rate by priority
    /// (override → payee configuration → system default → 0), split the
    /// price and persist the ledger entry.
    pub async fn create_subscription(
        &self,
        subscriber_id: Uuid,
        payee_id: Uuid,
        price: Decimal,
        rate_override: Option<Decimal>,
    ) -> Result<Subscription, EngineError> {
        self.ensure_payee(payee_id).await?;

        let payee_rate = self.store.payee_commission_rate(payee_id).await?;
        let configured_default = self.store.default_commission_rate().await?;
        let rate = commission::resolve_rate(rate_override, payee_rate, configured_default);

        let split = commission::split(price, Some(rate))?;
        let subscription = Subscription::new(subscriber_id, payee_id, &split, self.clock.now());

        self.store.insert_subscription(&subscription).await?;
        counter!("subscriptions_recorded_total").increment(1);

        tracing::info!(
            payee_id = %payee_id,
            price = %price,
            rate = %rate,
            earnings = %subscription.payee_earnings,
            "Subscription recorded"
        );

        Ok(subscription)
    }

    /// Platform-wide commission collected over active subscriptions.
    pub async fn total_commission(&self) -> Result<Decimal, EngineError> {
        self.store.total_commission().await
    }

    // -----------------------------------------------------------------------
    // Withdrawals
    // -----------------------------------------------------------------------

    /// Create a pending withdrawal request. The store executes the balance
    /// check and the insert as one atomic unit, so the global invariant
    /// (available balance never negative) holds under concurrency.
    pub async fn request_withdrawal(
        &self,
        payee_id: Uuid,
        amount: Decimal,
    ) -> Result<WithdrawalRequest, EngineError> {
        self.ensure_payee(payee_id).await?;

        let result = self
            .store
            .create_withdrawal(
                payee_id,
                amount,
                self.config.min_withdrawal_limit,
                self.clock.now(),
            )
            .await;

        match &result {
            Ok(request) => {
                counter!("withdrawal_requests_total").increment(1);
                tracing::info!(
                    payee_id = %payee_id,
                    request_id = %request.id,
                    amount = %amount,
                    "Withdrawal request created"
                );
            }
            Err(e) => {
                counter!("withdrawal_requests_denied").increment(1);
                tracing::warn!(
                    payee_id = %payee_id,
                    amount = %amount,
                    reason = %e,
                    "Withdrawal request denied"
                );
            }
        }

        result
    }

    /// Mark a pending request paid or rejected on behalf of an authorizing
    /// actor. Rejection requires notes. At most one terminal transition
    /// ever applies, even under concurrent resolvers.
    pub async fn resolve_withdrawal(
        &self,
        request_id: Uuid,
        actor_id: Uuid,
        decision: WithdrawalDecision,
        notes: Option<String>,
    ) -> Result<WithdrawalRequest, EngineError> {
        let request = self.load_withdrawal(request_id).await?;
        let updated = withdrawal::resolve(&request, decision, actor_id, notes, self.clock.now())?;

        self.commit_transition(updated, request_id).await.map(|r| {
            counter!("withdrawals_resolved_total").increment(1);
            tracing::info!(
                request_id = %request_id,
                actor_id = %actor_id,
                decision = %decision,
                amount = %r.amount,
                "Withdrawal resolved"
            );
            r
        })
    }

    /// Cancel a pending request; only its owning payee may do so.
    pub async fn cancel_withdrawal(
        &self,
        request_id: Uuid,
        payee_id: Uuid,
    ) -> Result<WithdrawalRequest, EngineError> {
        let request = self.load_withdrawal(request_id).await?;
        let updated = withdrawal::cancel(&request, payee_id, self.clock.now())?;

        self.commit_transition(updated, request_id).await.map(|r| {
            tracing::info!(
                request_id = %request_id,
                payee_id = %payee_id,
                amount = %r.amount,
                "Withdrawal cancelled"
            );
            r
        })
    }

    /// Current earnings position for a payee.
    pub async fn get_balance(&self, payee_id: Uuid) -> Result<BalanceSummary, EngineError> {
        self.ensure_payee(payee_id).await?;

        let total_earnings = self.store.total_earnings(payee_id).await?;
        let totals = self.store.withdrawal_totals(payee_id).await?;

        Ok(BalanceSummary {
            payee_id,
            total_earnings,
            available_balance: balance::available_balance(total_earnings, totals.committed()),
            pending_withdrawals: totals.pending,
            paid_withdrawals: totals.paid,
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn ensure_payee(&self, payee_id: Uuid) -> Result<(), EngineError> {
        if self.store.payee_exists(payee_id).await? {
            Ok(())
        } else {
            Err(EngineError::NotFound(format!("payee {payee_id}")))
        }
    }

    async fn load_withdrawal(&self, request_id: Uuid) -> Result<WithdrawalRequest, EngineError> {
        self.store
            .withdrawal(request_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("withdrawal request {request_id}")))
    }

    /// Persist a terminal transition; if the compare-and-set loses to a
    /// concurrent writer, report the freshly committed status instead.
    async fn commit_transition(
        &self,
        updated: WithdrawalRequest,
        request_id: Uuid,
    ) -> Result<WithdrawalRequest, EngineError> {
        if self.store.store_resolved_withdrawal(&updated).await? {
            return Ok(updated);
        }

        let current = self.load_withdrawal(request_id).await?;
        Err(EngineError::StateConflict {
            current: current.status,
        })
    }
}
