use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use tipledger::{Engine, EngineConfig, FixedClock, MemoryStore};

/// Opt-in test logging: RUST_LOG=debug cargo test
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        min_withdrawal_limit: Decimal::ONE_HUNDRED,
    }
}

#[allow(dead_code)]
pub fn engine() -> Engine<MemoryStore> {
    Engine::new(MemoryStore::new(), test_config())
}

/// Engine with a pinned clock for deterministic windows and timestamps.
#[allow(dead_code)]
pub fn engine_at(now: DateTime<Utc>) -> Engine<MemoryStore> {
    Engine::with_clock(MemoryStore::new(), test_config(), Arc::new(FixedClock(now)))
}

/// Payee with a 0% commission rate and one active subscription, so their
/// total earnings equal `earnings` exactly.
#[allow(dead_code)]
pub async fn seed_payee_with_earnings(engine: &Engine<MemoryStore>, earnings: i64) -> Uuid {
    let payee = engine.store().register_payee(Some(Decimal::ZERO)).await;

    engine
        .create_subscription(Uuid::new_v4(), payee, Decimal::from(earnings), None)
        .await
        .expect("seed subscription should succeed");

    payee
}
