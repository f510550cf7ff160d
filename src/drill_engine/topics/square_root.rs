//! Square-root estimation drill (`SR-`).

use rand::Rng;

use crate::drill_engine::{
    difficulty::TierRanges,
    error::Result,
    helpers::text_problem,
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::random_int,
};

/// How far an estimate may stray from an irrational root.
pub const ROOT_TOLERANCE: f64 = 0.25;

pub fn radicand_problem(problem_id: String, difficulty: DifficultyTier, radicand: i64) -> Problem {
    let root = (radicand as f64).sqrt();
    text_problem(
        problem_id,
        DrillKind::SquareRoot,
        difficulty,
        format!("Estimate: √{radicand} ≈ ?"),
        root,
        CheckPolicy::ExactIfPerfectElseTolerance(ROOT_TOLERANCE),
        format!("The square root of {radicand} is ≈ {root:.2}."),
    )
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let radicand = random_int(rng, ranges.radicand);
    Ok(radicand_problem(problem_id, difficulty, radicand))
}
