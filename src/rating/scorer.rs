use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::RatingTier;

use super::aggregator::OutcomeSummary;

/// History required before stars and tiers mean anything.
const MIN_RATED_PREDICTIONS: i32 = 5;

/// Weighted composite score, 0–100.
///
/// Five capped terms: win rate (40), experience (25), odds quality (20),
/// best streak (10), recent activity (5). Every term is clamped to its
/// weight before summing, and the sum is clamped once more so no input
/// combination can leave the 0–100 range.
pub fn rating_score(summary: &OutcomeSummary) -> Decimal {
    let win_rate_score = summary.win_rate * Decimal::new(40, 2);

    let experience_score =
        (Decimal::from(summary.total) / Decimal::ONE_HUNDRED * Decimal::from(25))
            .min(Decimal::from(25));

    let odds_score =
        (summary.average_odds / Decimal::from(5) * Decimal::from(20)).min(Decimal::from(20));

    let streak_score = (Decimal::from(summary.best_win_streak) / Decimal::from(10)
        * Decimal::from(10))
    .min(Decimal::from(10));

    let activity_score = (Decimal::from(summary.last_30_days.total) / Decimal::from(20)
        * Decimal::from(5))
    .min(Decimal::from(5));

    let score = win_rate_score + experience_score + odds_score + streak_score + activity_score;

    score
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// 0–5 stars. Zero until the payee has enough graded history, then one
/// star per 20 score points, never below one.
pub fn star_rating(score: Decimal, total_predictions: i32) -> i16 {
    if total_predictions < MIN_RATED_PREDICTIONS {
        return 0;
    }

    let stars = (score / Decimal::from(20)).ceil().to_i16().unwrap_or(0);
    stars.clamp(1, 5)
}

/// Tier label; thresholds checked highest-first, first match wins.
pub fn tier(score: Decimal, total_predictions: i32) -> RatingTier {
    if total_predictions < MIN_RATED_PREDICTIONS {
        return RatingTier::NewTipster;
    }

    if score >= Decimal::from(90) {
        RatingTier::Elite
    } else if score >= Decimal::from(80) {
        RatingTier::Expert
    } else if score >= Decimal::from(70) {
        RatingTier::Professional
    } else if score >= Decimal::from(60) {
        RatingTier::Good
    } else if score >= Decimal::from(50) {
        RatingTier::Average
    } else {
        RatingTier::Beginner
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::aggregator::WindowStats;

    fn summary(win_rate: i64, total: i32, avg_odds: Decimal, best_streak: i32, recent: i32) -> OutcomeSummary {
        OutcomeSummary {
            total,
            won: 0,
            lost: 0,
            voided: 0,
            win_rate: Decimal::from(win_rate),
            average_odds: avg_odds,
            roi: Decimal::ZERO,
            current_streak: 0,
            best_win_streak: best_streak,
            worst_loss_streak: 0,
            last_30_days: WindowStats {
                total: recent,
                won: 0,
                lost: 0,
                win_rate: Decimal::ZERO,
            },
            avg_confidence: Decimal::ZERO,
        }
    }

    #[test]
    fn test_perfect_inputs_score_exactly_100() {
        // 100% win rate, 100+ predictions, odds ≥ 5, 10+ streak, 20+ recent
        let s = summary(100, 150, Decimal::from(6), 12, 25);
        assert_eq!(rating_score(&s), Decimal::from(100));
    }

    #[test]
    fn test_each_term_is_capped() {
        // Oversized inputs must not push any term past its weight
        let s = summary(100, 10_000, Decimal::from(50), 500, 400);
        assert_eq!(rating_score(&s), Decimal::from(100));
    }

    #[test]
    fn test_zero_history_scores_zero() {
        let s = summary(0, 0, Decimal::ZERO, 0, 0);
        assert_eq!(rating_score(&s), Decimal::ZERO);
    }

    #[test]
    fn test_score_never_exceeds_100_for_random_inputs() {
        // Cheap LCG so the sweep is deterministic
        let mut seed: u64 = 0x5DEECE66D;
        let mut next = |bound: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % bound
        };

        for _ in 0..1_000 {
            let s = summary(
                next(101) as i64,
                next(5_000) as i32,
                Decimal::from(next(100)),
                next(200) as i32,
                next(300) as i32,
            );
            let score = rating_score(&s);
            assert!(score <= Decimal::from(100), "score {score} exceeded 100");
            assert!(score >= Decimal::ZERO, "score {score} below 0");
        }
    }

    #[test]
    fn test_star_rating_requires_history() {
        assert_eq!(star_rating(Decimal::from(95), 4), 0);
        assert_eq!(star_rating(Decimal::from(95), 5), 5);
    }

    #[test]
    fn test_star_rating_buckets() {
        assert_eq!(star_rating(Decimal::from(1), 10), 1);
        assert_eq!(star_rating(Decimal::from(20), 10), 1);
        assert_eq!(star_rating(Decimal::new(2001, 2), 10), 2); // 20.01
        assert_eq!(star_rating(Decimal::from(60), 10), 3);
        assert_eq!(star_rating(Decimal::from(100), 10), 5);
        // Score 0 with enough history still shows a single star
        assert_eq!(star_rating(Decimal::ZERO, 10), 1);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier(Decimal::from(90), 10), RatingTier::Elite);
        assert_eq!(tier(Decimal::new(8999, 2), 10), RatingTier::Expert); // 89.99
        assert_eq!(tier(Decimal::from(80), 10), RatingTier::Expert);
        assert_eq!(tier(Decimal::from(70), 10), RatingTier::Professional);
        assert_eq!(tier(Decimal::from(60), 10), RatingTier::Good);
        assert_eq!(tier(Decimal::from(50), 10), RatingTier::Average);
        assert_eq!(tier(Decimal::from(49), 10), RatingTier::Beginner);
    }

    #[test]
    fn test_new_tipster_regardless_of_score() {
        assert_eq!(tier(Decimal::from(99), 4), RatingTier::NewTipster);
        assert_eq!(tier(Decimal::ZERO, 0), RatingTier::NewTipster);
    }
}
