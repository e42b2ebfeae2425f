use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Outcome, OutcomeResult};

/// Flat stake assumed per graded outcome for ROI purposes.
const UNIT_STAKE: Decimal = Decimal::ONE_HUNDRED;

/// Days covered by the recent-form window.
const RECENT_WINDOW_DAYS: i64 = 30;

/// Aggregated track-record metrics for one payee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub total: i32,
    pub won: i32,
    pub lost: i32,
    pub voided: i32,
    /// Percent over won+lost only; void is excluded from the denominator.
    pub win_rate: Decimal,
    pub average_odds: Decimal,
    pub roi: Decimal,
    pub current_streak: i32,
    pub best_win_streak: i32,
    pub worst_loss_streak: i32,
    pub last_30_days: WindowStats,
    pub avg_confidence: Decimal,
}

/// Counts and win rate restricted to the last 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowStats {
    pub total: i32,
    pub won: i32,
    pub lost: i32,
    pub win_rate: Decimal,
}

/// Compute every track-record metric from the full outcome history.
///
/// A full pass every time: deterministic, order-independent (the history is
/// re-sorted by `created_at` internally) and safe to call redundantly.
/// Pending outcomes are dropped before anything is counted.
pub fn summarize(outcomes: &[Outcome], now: DateTime<Utc>) -> OutcomeSummary {
    let mut graded: Vec<&Outcome> = outcomes.iter().filter(|o| o.result.is_graded()).collect();
    graded.sort_by_key(|o| o.created_at);

    let won = count_result(&graded, OutcomeResult::Won);
    let lost = count_result(&graded, OutcomeResult::Lost);
    let voided = count_result(&graded, OutcomeResult::Void);

    // Streaks only see the won/lost subsequence; void neither breaks nor
    // extends a run.
    let decisive: Vec<&Outcome> = graded
        .iter()
        .copied()
        .filter(|o| o.result.is_decisive())
        .collect();

    let window_start = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent: Vec<&Outcome> = graded
        .iter()
        .copied()
        .filter(|o| o.created_at >= window_start)
        .collect();
    let recent_won = count_result(&recent, OutcomeResult::Won);
    let recent_lost = count_result(&recent, OutcomeResult::Lost);

    OutcomeSummary {
        total: graded.len() as i32,
        won,
        lost,
        voided,
        win_rate: win_rate(won, lost),
        average_odds: average_odds(&graded),
        roi: roi(&graded),
        current_streak: current_streak(&decisive),
        best_win_streak: longest_run(&decisive, OutcomeResult::Won),
        worst_loss_streak: longest_run(&decisive, OutcomeResult::Lost),
        last_30_days: WindowStats {
            total: recent.len() as i32,
            won: recent_won,
            lost: recent_lost,
            win_rate: win_rate(recent_won, recent_lost),
        },
        avg_confidence: avg_confidence(&graded),
    }
}

fn count_result(outcomes: &[&Outcome], result: OutcomeResult) -> i32 {
    outcomes.iter().filter(|o| o.result == result).count() as i32
}

// ---------------------------------------------------------------------------
// Win rate
// ---------------------------------------------------------------------------

/// `won / (won + lost) * 100`; 0 for a void-only or empty history.
pub fn win_rate(won: i32, lost: i32) -> Decimal {
    let decisive = won + lost;
    if decisive == 0 {
        return Decimal::ZERO;
    }

    round2(Decimal::from(won) / Decimal::from(decisive) * Decimal::ONE_HUNDRED)
}

// ---------------------------------------------------------------------------
// Average odds
// ---------------------------------------------------------------------------

/// Mean of `odds` over graded outcomes with positive odds; 0 if none.
pub fn average_odds(graded: &[&Outcome]) -> Decimal {
    let priced: Vec<Decimal> = graded
        .iter()
        .map(|o| o.odds)
        .filter(|odds| *odds > Decimal::ZERO)
        .collect();

    if priced.is_empty() {
        return Decimal::ZERO;
    }

    round2(priced.iter().copied().sum::<Decimal>() / Decimal::from(priced.len() as i64))
}

// ---------------------------------------------------------------------------
// ROI
// ---------------------------------------------------------------------------

/// Percent return on a flat 100-unit stake per graded outcome.
///
/// Every graded outcome consumes stake, void included with zero return.
/// That understates performance for void-heavy histories, but it is the
/// behavior historical ratings were computed with, so it stays.
pub fn roi(graded: &[&Outcome]) -> Decimal {
    if graded.is_empty() {
        return Decimal::ZERO;
    }

    let total_stake = Decimal::from(graded.len() as i64) * UNIT_STAKE;
    let total_return: Decimal = graded
        .iter()
        .filter(|o| o.result == OutcomeResult::Won)
        .map(|o| UNIT_STAKE * o.odds)
        .sum();

    round2((total_return - total_stake) / total_stake * Decimal::ONE_HUNDRED)
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

/// Signed run length at the most recent end of the won/lost subsequence:
/// +n for n consecutive wins, −n for n consecutive losses.
///
/// `decisive` must be ordered oldest-first and contain only won/lost.
pub fn current_streak(decisive: &[&Outcome]) -> i32 {
    let mut newest_first = decisive.iter().rev();

    let Some(latest) = newest_first.next() else {
        return 0;
    };

    let step = if latest.result == OutcomeResult::Won { 1 } else { -1 };
    let mut streak = step;

    for outcome in newest_first {
        if outcome.result != latest.result {
            break;
        }
        streak += step;
    }

    streak
}

/// Longest run of consecutive `target` results in the won/lost subsequence.
pub fn longest_run(decisive: &[&Outcome], target: OutcomeResult) -> i32 {
    let mut best = 0;
    let mut run = 0;

    for outcome in decisive {
        if outcome.result == target {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Mean of positive confidence values over graded outcomes; 0 if none set.
pub fn avg_confidence(graded: &[&Outcome]) -> Decimal {
    let levels: Vec<i32> = graded
        .iter()
        .filter_map(|o| o.confidence)
        .filter(|c| *c > 0)
        .collect();

    if levels.is_empty() {
        return Decimal::ZERO;
    }

    round2(Decimal::from(levels.iter().sum::<i32>()) / Decimal::from(levels.len() as i64))
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    /// Outcomes spaced one day apart, oldest first, ending yesterday.
    fn make_history(results: &[OutcomeResult]) -> Vec<Outcome> {
        let payee = Uuid::new_v4();
        let base = Utc::now() - Duration::days(results.len() as i64);

        results
            .iter()
            .enumerate()
            .map(|(i, &result)| {
                Outcome::new(
                    payee,
                    result,
                    Decimal::new(20, 1), // 2.0
                    None,
                    base + Duration::days(i as i64),
                )
            })
            .collect()
    }

    use crate::models::OutcomeResult::{Lost, Pending, Void, Won};

    #[test]
    fn test_counts_and_win_rate_exclude_void() {
        // 7 won, 3 lost, 2 void → win rate over decisive only
        let mut results = vec![Won; 7];
        results.extend(vec![Lost; 3]);
        results.extend(vec![Void; 2]);
        let summary = summarize(&make_history(&results), Utc::now());

        assert_eq!(summary.total, 12);
        assert_eq!(summary.won, 7);
        assert_eq!(summary.lost, 3);
        assert_eq!(summary.voided, 2);
        assert_eq!(summary.win_rate, Decimal::from(70));
    }

    #[test]
    fn test_pending_outcomes_are_invisible() {
        let summary = summarize(&make_history(&[Won, Pending, Lost, Pending]), Utc::now());

        assert_eq!(summary.total, 2);
        assert_eq!(summary.win_rate, Decimal::from(50));
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(&[], Utc::now());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.win_rate, Decimal::ZERO);
        assert_eq!(summary.average_odds, Decimal::ZERO);
        assert_eq!(summary.roi, Decimal::ZERO);
        assert_eq!(summary.current_streak, 0);
    }

    #[test]
    fn test_void_only_history_has_zero_win_rate() {
        let summary = summarize(&make_history(&[Void, Void]), Utc::now());

        assert_eq!(summary.total, 2);
        assert_eq!(summary.win_rate, Decimal::ZERO);
    }

    #[test]
    fn test_streak_walkthrough() {
        // oldest → newest: W W L W W W L
        let summary = summarize(
            &make_history(&[Won, Won, Lost, Won, Won, Won, Lost]),
            Utc::now(),
        );

        assert_eq!(summary.best_win_streak, 3);
        assert_eq!(summary.worst_loss_streak, 1);
        assert_eq!(summary.current_streak, -1);
    }

    #[test]
    fn test_current_streak_positive() {
        let summary = summarize(&make_history(&[Lost, Won, Won, Won]), Utc::now());
        assert_eq!(summary.current_streak, 3);
    }

    #[test]
    fn test_void_does_not_break_streaks() {
        // The void in the middle is invisible: W V W is a 2-win run.
        let summary = summarize(&make_history(&[Won, Void, Won]), Utc::now());

        assert_eq!(summary.best_win_streak, 2);
        assert_eq!(summary.current_streak, 2);
    }

    #[test]
    fn test_roi_with_flat_stake() {
        // 1 won at 3.0 (returns 300) + 1 void (stake only) over 200 staked
        let payee = Uuid::new_v4();
        let now = Utc::now();
        let outcomes = vec![
            Outcome::new(payee, Won, Decimal::from(3), None, now - Duration::days(2)),
            Outcome::new(payee, Void, Decimal::from(2), None, now - Duration::days(1)),
        ];

        let summary = summarize(&outcomes, now);
        assert_eq!(summary.roi, Decimal::from(50));
    }

    #[test]
    fn test_roi_all_lost() {
        let summary = summarize(&make_history(&[Lost, Lost]), Utc::now());
        assert_eq!(summary.roi, Decimal::from(-100));
    }

    #[test]
    fn test_average_odds_skips_unset() {
        let payee = Uuid::new_v4();
        let now = Utc::now();
        let outcomes = vec![
            Outcome::new(payee, Won, Decimal::from(3), None, now - Duration::days(3)),
            Outcome::new(payee, Lost, Decimal::ZERO, None, now - Duration::days(2)),
            Outcome::new(payee, Lost, Decimal::from(2), None, now - Duration::days(1)),
        ];

        let summary = summarize(&outcomes, now);
        assert_eq!(summary.average_odds, Decimal::new(250, 2));
    }

    #[test]
    fn test_thirty_day_window() {
        let payee = Uuid::new_v4();
        let now = Utc::now();
        let outcomes = vec![
            // Old form: two losses well outside the window
            Outcome::new(payee, Lost, Decimal::from(2), None, now - Duration::days(90)),
            Outcome::new(payee, Lost, Decimal::from(2), None, now - Duration::days(60)),
            // Recent form: two wins
            Outcome::new(payee, Won, Decimal::from(2), None, now - Duration::days(10)),
            Outcome::new(payee, Won, Decimal::from(2), None, now - Duration::days(1)),
        ];

        let summary = summarize(&outcomes, now);
        assert_eq!(summary.win_rate, Decimal::from(50));
        assert_eq!(summary.last_30_days.total, 2);
        assert_eq!(summary.last_30_days.won, 2);
        assert_eq!(summary.last_30_days.win_rate, Decimal::from(100));
    }

    #[test]
    fn test_avg_confidence_ignores_unset() {
        let payee = Uuid::new_v4();
        let now = Utc::now();
        let outcomes = vec![
            Outcome::new(payee, Won, Decimal::from(2), Some(8), now - Duration::days(2)),
            Outcome::new(payee, Lost, Decimal::from(2), None, now - Duration::days(1)),
            Outcome::new(payee, Lost, Decimal::from(2), Some(6), now),
        ];

        let summary = summarize(&outcomes, now);
        assert_eq!(summary.avg_confidence, Decimal::from(7));
    }

    #[test]
    fn test_summarize_is_order_independent() {
        let mut outcomes = make_history(&[Won, Won, Lost, Won, Void, Lost]);
        let now = Utc::now();
        let forward = summarize(&outcomes, now);

        outcomes.reverse();
        let reversed = summarize(&outcomes, now);

        assert_eq!(forward, reversed);
    }
}
