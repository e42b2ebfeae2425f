//! Tipster performance rating and commission-earnings ledger engine.
//!
//! Derives a reputation score for a prediction-maker from their graded
//! track record and keeps a consistent ledger of commission-split earnings
//! and withdrawal requests against it. Transport, auth and payment rails
//! live in the embedding application; they call in through
//! [`engine::Engine`] over any [`store::LedgerStore`].

pub mod clock;
pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod rating;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::EngineError;
pub use store::{LedgerStore, MemoryStore};
