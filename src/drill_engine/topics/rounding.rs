//! Rounding-to-the-hundred drill (`RH-`), answered by picking one of two
//! neighbouring hundreds.

use rand::Rng;

use crate::drill_engine::{
    difficulty::TierRanges,
    error::Result,
    helpers::{html_text, problem},
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::random_int,
};

/// Lower and upper multiples of 100 around `n` (equal when `n` is one).
pub fn neighbours(n: i64) -> (i64, i64) {
    let low = n.div_euclid(100) * 100;
    let high = if n.rem_euclid(100) == 0 { low } else { low + 100 };
    (low, high)
}

/// Round half up: 49 past the hundred goes down, 50 goes up.
pub fn nearest_hundred(n: i64) -> i64 {
    let (low, high) = neighbours(n);
    if n - low <= 49 { low } else { high }
}

pub fn rounding_problem(problem_id: String, difficulty: DifficultyTier, n: i64) -> Problem {
    let (low, high) = neighbours(n);
    let mut choices = vec![low, high];
    choices.dedup();
    let answer = nearest_hundred(n);
    let text = format!("Round {n} to the nearest hundred.");
    let html = html_text(&text);
    problem(
        problem_id,
        DrillKind::Rounding,
        difficulty,
        text,
        html,
        answer as f64,
        CheckPolicy::Exact,
        format!("{n} rounds to {answer}."),
        choices,
    )
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let n = random_int(rng, ranges.rounding_number);
    Ok(rounding_problem(problem_id, difficulty, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_rounds_up() {
        assert_eq!(nearest_hundred(4549), 4500);
        assert_eq!(nearest_hundred(4550), 4600);
        assert_eq!(nearest_hundred(4599), 4600);
    }

    #[test]
    fn exact_hundred_has_one_choice() {
        let p = rounding_problem("RH-TEST".into(), DifficultyTier::Medium, 3200);
        assert_eq!(p.choices, vec![3200]);
        assert_eq!(p.ground_truth, 3200.0);
    }

    #[test]
    fn two_choices_otherwise() {
        let p = rounding_problem("RH-TEST".into(), DifficultyTier::Medium, 1234);
        assert_eq!(p.choices, vec![1200, 1300]);
        assert_eq!(p.ground_truth, 1200.0);
        assert_eq!(p.display_text, "Round 1234 to the nearest hundred.");
    }
}
