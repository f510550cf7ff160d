//! Pythagorean theorem drill (`PY-`).
//!
//! Three times out of four the hypotenuse is unknown; otherwise one leg is,
//! with the hypotenuse built as `leg + k` so it always exceeds the known leg.
//! Answers are estimates unless the triangle happens to be a Pythagorean
//! triple, in which case only the exact side counts.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    difficulty::TierRanges,
    error::Result,
    helpers::text_problem,
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::random_int,
};

pub const SIDE_TOLERANCE: f64 = 0.25;

const HYPOTENUSE_UNKNOWN_PROBABILITY: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownSide {
    A,
    B,
    C,
}

impl fmt::Display for UnknownSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownSide::A => write!(f, "Side a"),
            UnknownSide::B => write!(f, "Side b"),
            UnknownSide::C => write!(f, "Hypotenuse c"),
        }
    }
}

/// Right triangle with exactly one side missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Option<i64>,
    pub b: Option<i64>,
    pub c: Option<i64>,
    pub unknown: UnknownSide,
}

impl Triangle {
    pub fn hypotenuse_unknown(a: i64, b: i64) -> Self {
        Triangle { a: Some(a), b: Some(b), c: None, unknown: UnknownSide::C }
    }

    /// `known_leg` sits on the side that is not `unknown`.
    pub fn leg_unknown(unknown: UnknownSide, known_leg: i64, c: i64) -> Self {
        match unknown {
            UnknownSide::A => Triangle { a: None, b: Some(known_leg), c: Some(c), unknown },
            _ => Triangle { a: Some(known_leg), b: None, c: Some(c), unknown: UnknownSide::B },
        }
    }

    pub fn missing_side(&self) -> f64 {
        let sq = |n: Option<i64>| n.map(|v| (v * v) as f64).unwrap_or(0.0);
        match self.unknown {
            UnknownSide::C => (sq(self.a) + sq(self.b)).sqrt(),
            UnknownSide::A => (sq(self.c) - sq(self.b)).sqrt(),
            UnknownSide::B => (sq(self.c) - sq(self.a)).sqrt(),
        }
    }

    pub fn question(&self) -> String {
        let show = |n: Option<i64>| n.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string());
        format!(
            "Right triangle: a = {}, b = {}, c = {}. Find the {}.",
            show(self.a),
            show(self.b),
            show(self.c),
            self.unknown.to_string().to_lowercase()
        )
    }
}

pub fn triangle_problem(problem_id: String, difficulty: DifficultyTier, triangle: &Triangle) -> Problem {
    let side = triangle.missing_side();
    text_problem(
        problem_id,
        DrillKind::Pythagorean,
        difficulty,
        triangle.question(),
        side,
        CheckPolicy::ExactIfPerfectElseTolerance(SIDE_TOLERANCE),
        format!("The {} is ≈ {:.2}.", triangle.unknown, side),
    )
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let triangle = if rng.gen_bool(HYPOTENUSE_UNKNOWN_PROBABILITY) {
        let a = random_int(rng, ranges.pythagorean_leg);
        let b = random_int(rng, ranges.pythagorean_leg);
        Triangle::hypotenuse_unknown(a, b)
    } else {
        let unknown = if rng.gen_bool(0.5) { UnknownSide::A } else { UnknownSide::B };
        let leg = random_int(rng, ranges.pythagorean_leg);
        let c = leg + random_int(rng, ranges.hypotenuse_increment);
        Triangle::leg_unknown(unknown, leg, c)
    };

    Ok(triangle_problem(problem_id, difficulty, &triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn three_four_five() {
        let p = triangle_problem(
            "PY-TEST".into(),
            DifficultyTier::Easy,
            &Triangle::hypotenuse_unknown(3, 4),
        );
        assert_eq!(p.ground_truth, 5.0);
        assert_eq!(p.display_text, "Right triangle: a = 3, b = 4, c = ?. Find the hypotenuse c.");
        assert_eq!(p.reveal_text, "The Hypotenuse c is ≈ 5.00.");
    }

    #[test]
    fn missing_leg() {
        let t = Triangle::leg_unknown(UnknownSide::A, 5, 13);
        assert_eq!(t.missing_side(), 12.0);
        assert_eq!(t.b, Some(5));
        let t = Triangle::leg_unknown(UnknownSide::B, 4, 6);
        assert!((t.missing_side() - 20f64.sqrt()).abs() < 1e-12);
        assert_eq!(t.a, Some(4));
    }

    #[test]
    fn leg_reveal_names_the_side() {
        let p = triangle_problem(
            "PY-TEST".into(),
            DifficultyTier::Medium,
            &Triangle::leg_unknown(UnknownSide::A, 5, 13),
        );
        assert_eq!(p.display_text, "Right triangle: a = ?, b = 5, c = 13. Find the side a.");
        assert_eq!(p.reveal_text, "The Side a is ≈ 12.00.");
    }

    #[test]
    fn missing_side_is_always_real_and_positive() {
        for tier_ranges in [TierRanges::easy(), TierRanges::medium(), TierRanges::hard()] {
            for seed in 0..200u64 {
                let mut rng = StdRng::seed_from_u64(seed);
                let p = generate(&mut rng, DifficultyTier::Medium, "PY-TEST".into(), &tier_ranges)
                    .unwrap();
                assert!(p.ground_truth.is_finite() && p.ground_truth > 0.0, "seed={seed}");
            }
        }
    }
}
