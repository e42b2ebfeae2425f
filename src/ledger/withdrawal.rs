use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::{WithdrawalDecision, WithdrawalRequest, WithdrawalStatus};

/// Apply an authorizing actor's decision to a pending request.
///
/// Returns the resolved copy; the caller persists it with compare-and-set
/// semantics so a concurrent resolver cannot apply a second terminal
/// transition. Rejection requires a reason.
pub fn resolve(
    request: &WithdrawalRequest,
    decision: WithdrawalDecision,
    actor_id: Uuid,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<WithdrawalRequest, EngineError> {
    if !request.is_pending() {
        return Err(EngineError::StateConflict {
            current: request.status,
        });
    }

    let status = match decision {
        WithdrawalDecision::Paid => WithdrawalStatus::Paid,
        WithdrawalDecision::Rejected => {
            if notes.as_deref().map_or(true, |n| n.trim().is_empty()) {
                return Err(EngineError::Validation(
                    "rejecting a withdrawal requires a reason".into(),
                ));
            }
            WithdrawalStatus::Rejected
        }
    };

    Ok(WithdrawalRequest {
        status,
        resolved_at: Some(now),
        resolved_by: Some(actor_id),
        notes,
        ..request.clone()
    })
}

/// Cancel a pending request on behalf of the payee who made it.
pub fn cancel(
    request: &WithdrawalRequest,
    payee_id: Uuid,
    now: DateTime<Utc>,
) -> Result<WithdrawalRequest, EngineError> {
    if request.payee_id != payee_id {
        return Err(EngineError::NotOwner);
    }

    if !request.is_pending() {
        return Err(EngineError::StateConflict {
            current: request.status,
        });
    }

    Ok(WithdrawalRequest {
        status: WithdrawalStatus::Cancelled,
        resolved_at: Some(now),
        notes: Some("cancelled by payee".into()),
        ..request.clone()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
