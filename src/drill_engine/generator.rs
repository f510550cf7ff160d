use rand::{rngs::StdRng, RngCore, SeedableRng};
use tracing::debug;

use crate::drill_engine::{
    difficulty::DifficultyPolicy,
    error::Result,
    models::{DrillKind, DrillRequest, Problem},
    topics,
};

/// Generate a problem id from drill + seed.
fn make_problem_id(drill: DrillKind, rng: &mut impl RngCore) -> String {
    let prefix = match drill {
        DrillKind::OrderOfOperations => "OO",
        DrillKind::LinearEquation    => "LE",
        DrillKind::Geometry          => "GE",
        DrillKind::SignedArithmetic  => "SA",
        DrillKind::SquareRoot        => "SR",
        DrillKind::Pythagorean       => "PY",
        DrillKind::Rounding          => "RH",
    };
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// Generate with the built-in difficulty table.
pub fn generate_problem(request: DrillRequest) -> Result<Problem> {
    generate_problem_with(request, &DifficultyPolicy::default())
}

/// Core dispatch: routes to the correct drill module.
///
/// The policy is validated before any randomness is drawn, so a bad table
/// fails the same way for every seed.
pub fn generate_problem_with(request: DrillRequest, policy: &DifficultyPolicy) -> Result<Problem> {
    policy.validate()?;

    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let problem_id = make_problem_id(request.drill, &mut rng);
    let ranges = policy.tier(request.difficulty);
    let difficulty = request.difficulty;

    let problem = match request.drill {
        DrillKind::OrderOfOperations =>
            topics::order_of_operations::generate(&mut rng, difficulty, problem_id, ranges),

        DrillKind::LinearEquation =>
            topics::linear_equation::generate(&mut rng, difficulty, problem_id, ranges),

        DrillKind::Geometry =>
            topics::geometry::generate(&mut rng, difficulty, problem_id, ranges),

        DrillKind::SignedArithmetic =>
            topics::signed_arithmetic::generate(&mut rng, difficulty, problem_id, ranges),

        DrillKind::SquareRoot =>
            topics::square_root::generate(&mut rng, difficulty, problem_id, ranges),

        DrillKind::Pythagorean =>
            topics::pythagorean::generate(&mut rng, difficulty, problem_id, ranges),

        DrillKind::Rounding =>
            topics::rounding::generate(&mut rng, difficulty, problem_id, ranges),
    }?;

    debug!(
        problem_id = %problem.problem_id,
        drill = %problem.drill,
        difficulty = %problem.difficulty,
        seeded = request.rng_seed.is_some(),
        "problem generated"
    );
    Ok(problem)
}
