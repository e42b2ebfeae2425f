use rust_decimal::Decimal;
use std::env;

const DEFAULT_MIN_WITHDRAWAL: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Engine-level knobs supplied by the embedding application.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Smallest withdrawal a payee may request.
    pub min_withdrawal_limit: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_withdrawal_limit: DEFAULT_MIN_WITHDRAWAL,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            min_withdrawal_limit: env::var("MIN_WITHDRAWAL_LIMIT")
                .unwrap_or_else(|_| "1000".into())
                .parse()
                .unwrap_or(DEFAULT_MIN_WITHDRAWAL),
        }
    }
}
