pub mod balance;
pub mod commission;
pub mod withdrawal;

pub use balance::{available_balance, check_withdrawal};
pub use commission::{resolve_rate, split};
