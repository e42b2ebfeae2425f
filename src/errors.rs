use rust_decimal::Decimal;

use crate::models::WithdrawalStatus;

/// Engine-level failures. Every variant carries enough context for the
/// caller to render a user-facing message; none are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or out-of-range input, rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("amount {requested} is below the minimum withdrawal of {minimum}")]
    BelowMinimum { minimum: Decimal, requested: Decimal },

    #[error("amount {requested} exceeds available balance of {available}")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    /// A terminal transition was attempted on a request that is not pending.
    #[error("withdrawal request is {current}, only pending requests can change state")]
    StateConflict { current: WithdrawalStatus },

    #[error("withdrawal request belongs to a different payee")]
    NotOwner,

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for EngineError {
    fn from(e: sqlx::Error) -> Self {
        EngineError::Internal(e.into())
    }
}
