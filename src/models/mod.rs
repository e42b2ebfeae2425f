pub mod outcome;
pub mod rating;
pub mod subscription;
pub mod withdrawal;

pub use outcome::Outcome;
pub use rating::RatingSnapshot;
pub use subscription::{CommissionSplit, Subscription};
pub use withdrawal::{BalanceSummary, WithdrawalRequest, WithdrawalTotals};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OutcomeResult
// ---------------------------------------------------------------------------

/// Grading state of a prediction. `Pending` outcomes exist in storage but
/// are invisible to every rating metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "outcome_result", rename_all = "lowercase")]
pub enum OutcomeResult {
    Pending,
    Won,
    Lost,
    Void,
}

impl OutcomeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeResult::Pending => "pending",
            OutcomeResult::Won => "won",
            OutcomeResult::Lost => "lost",
            OutcomeResult::Void => "void",
        }
    }

    /// Graded means a real-world result is known (won/lost/void).
    pub fn is_graded(&self) -> bool {
        !matches!(self, OutcomeResult::Pending)
    }

    /// Decisive outcomes form the won/lost subsequence used for streaks
    /// and the win-rate denominator; void is neither a win nor a break.
    pub fn is_decisive(&self) -> bool {
        matches!(self, OutcomeResult::Won | OutcomeResult::Lost)
    }
}

impl fmt::Display for OutcomeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WithdrawalStatus
// ---------------------------------------------------------------------------

/// Withdrawal request lifecycle. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "withdrawal_status", rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Paid,
    Rejected,
    Cancelled,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Paid => "paid",
            WithdrawalStatus::Rejected => "rejected",
            WithdrawalStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, WithdrawalStatus::Pending)
    }

    /// Committed amounts reduce the available balance: money already paid
    /// out or promised to a pending request.
    pub fn commits_balance(&self) -> bool {
        matches!(self, WithdrawalStatus::Pending | WithdrawalStatus::Paid)
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WithdrawalDecision
// ---------------------------------------------------------------------------

/// Terminal decision an authorizing actor can take on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalDecision {
    Paid,
    Rejected,
}

impl fmt::Display for WithdrawalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawalDecision::Paid => write!(f, "paid"),
            WithdrawalDecision::Rejected => write!(f, "rejected"),
        }
    }
}

// ---------------------------------------------------------------------------
// SubscriptionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        }
    }

    /// Only active subscriptions contribute earnings to the ledger.
    pub fn earns(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RatingTier
// ---------------------------------------------------------------------------

/// Public-facing performance tier derived from the rating score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "rating_tier", rename_all = "snake_case")]
pub enum RatingTier {
    NewTipster,
    Beginner,
    Average,
    Good,
    Professional,
    Expert,
    Elite,
}

impl RatingTier {
    /// Display label shown to subscribers.
    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::NewTipster => "New Tipster",
            RatingTier::Beginner => "Beginner",
            RatingTier::Average => "Average",
            RatingTier::Good => "Good",
            RatingTier::Professional => "Professional",
            RatingTier::Expert => "Expert",
            RatingTier::Elite => "Elite",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
