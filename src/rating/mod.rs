pub mod aggregator;
pub mod scorer;

pub use aggregator::{summarize, OutcomeSummary, WindowStats};
pub use scorer::{rating_score, star_rating, tier};
