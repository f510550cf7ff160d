//! Signed addition / subtraction drill (`SA-`).
//!
//! The only drill using the stepped Hot/Warm feedback ladder. Negative
//! operands are parenthesised, and half of the `a - b` questions with a
//! positive `b` are shown as `a + (-b)` instead.

use rand::Rng;

use crate::drill_engine::{
    difficulty::TierRanges,
    error::Result,
    helpers::text_problem,
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::random_int,
};

fn operand_text(n: i64) -> String {
    if n < 0 { format!("({n})") } else { n.to_string() }
}

/// Question text for `lhs op rhs`; `flip` shows `- b` as `+ (-b)`.
pub fn question(lhs: i64, subtract: bool, rhs: i64, flip: bool) -> String {
    let (op, shown_rhs) = match (subtract, flip && rhs > 0) {
        (true, true)  => ("+", operand_text(-rhs)),
        (true, false) => ("-", operand_text(rhs)),
        (false, _)    => ("+", operand_text(rhs)),
    };
    format!("{} {} {} = ?", operand_text(lhs), op, shown_rhs)
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let subtract = rng.gen_bool(0.5);
    let lhs = random_int(rng, ranges.signed_operand);
    let rhs = random_int(rng, ranges.signed_operand);
    let flip = subtract && rhs > 0 && rng.gen_bool(0.5);

    let answer = if subtract { lhs - rhs } else { lhs + rhs };

    Ok(text_problem(
        problem_id,
        DrillKind::SignedArithmetic,
        difficulty,
        question(lhs, subtract, rhs, flip),
        answer as f64,
        CheckPolicy::SteppedFeedback,
        format!("The answer is {answer}."),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn negative_operands_are_parenthesised() {
        assert_eq!(question(-3, false, 5, false), "(-3) + 5 = ?");
        assert_eq!(question(4, true, -2, false), "4 - (-2) = ?");
    }

    #[test]
    fn flipped_subtraction_adds_the_negative() {
        assert_eq!(question(4, true, 6, true), "4 + (-6) = ?");
        // Nothing to flip when the subtrahend is not positive.
        assert_eq!(question(4, true, -6, true), "4 - (-6) = ?");
    }

    #[test]
    fn answers_stay_on_the_number_line() {
        let ranges = TierRanges::medium();
        for seed in 0..200u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate(&mut rng, DifficultyTier::Medium, "SA-TEST".into(), &ranges).unwrap();
            assert!((-20.0..=19.0).contains(&p.ground_truth), "{} (seed={seed})", p.ground_truth);
            assert_eq!(p.check_policy, CheckPolicy::SteppedFeedback);
        }
    }
}
