//! Order-of-operations drill (`OO-`).
//!
//! Builds `a op b` or `a op b op c` over small signed terms, or one of the
//! two special forms `base ^ exp` and `dividend / divisor`. Every division is
//! exact by construction; a candidate whose ground truth is not an integer is
//! rejected and rebuilt.

use rand::Rng;

use crate::drill_engine::{
    difficulty::TierRanges,
    error::Result,
    evaluator::{self, evaluate, Expression, Operator},
    helpers::{problem, with_retries, Attempt},
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::{even_factors, is_integral, signed_term, term_pool},
};

const PRIMARY_OPERATORS: [Operator; 5] =
    [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div, Operator::Pow];

/// No second exponent in a chain.
const CHAINED_OPERATORS: [Operator; 4] =
    [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

const THREE_TERM_PROBABILITY: f64 = 0.8;

/// `base ^ exp`; bases 2 and 3 may be cubed, larger bases are only squared.
pub fn exponent_form<R: Rng>(rng: &mut R) -> Expression {
    let base = rng.gen_range(2..=6i64);
    let exponent = if base <= 3 {
        if rng.gen_bool(0.5) { 2 } else { 3 }
    } else {
        2
    };
    Expression::binary(base, Operator::Pow, exponent)
}

/// `divisor * quotient / divisor`, always exact.
pub fn division_form(divisor: i64, quotient: i64) -> Expression {
    Expression::binary(divisor * quotient, Operator::Div, divisor)
}

/// Magnitude a trailing `/ d` actually divides in `first op1 ...`.
///
/// After `*` the division applies to the whole product (left to right);
/// after `+` or `-` it binds tighter and only takes the second term.
fn division_source(first: &Expression, op1: Operator) -> Option<u64> {
    if op1.precedence() >= Operator::Div.precedence() {
        let value = evaluate(first).ok()?;
        Some(value.round().abs() as u64)
    } else {
        match first.tokens().get(2) {
            Some(evaluator::Token::Num(n)) => Some(n.unsigned_abs()),
            _ => None,
        }
    }
}

fn candidate<R: Rng>(rng: &mut R, pool: &[i64]) -> Attempt<(Expression, f64)> {
    let three_terms = rng.gen_bool(THREE_TERM_PROBABILITY);
    let op1 = PRIMARY_OPERATORS[rng.gen_range(0..PRIMARY_OPERATORS.len())];

    let expression = match op1 {
        Operator::Pow => exponent_form(rng),
        Operator::Div => {
            let divisor = rng.gen_range(2..=5i64);
            let quotient = rng.gen_range(1..=5i64);
            division_form(divisor, quotient)
        }
        _ => {
            let first = Expression::binary(signed_term(rng, pool), op1, signed_term(rng, pool));
            if !three_terms {
                first
            } else {
                let op2 = CHAINED_OPERATORS[rng.gen_range(0..CHAINED_OPERATORS.len())];
                if op2 == Operator::Div {
                    let source = match division_source(&first, op1) {
                        Some(n) if n > 0 => n,
                        Some(_) => return Attempt::Reject("zero dividend"),
                        None => return Attempt::Reject("first sub-expression did not evaluate"),
                    };
                    let factors = even_factors(source);
                    let divisor = factors[rng.gen_range(0..factors.len())];
                    first.then(Operator::Div, divisor as i64)
                } else {
                    first.then(op2, signed_term(rng, pool))
                }
            }
        }
    };

    match evaluate(&expression) {
        Ok(truth) if is_integral(truth) => Attempt::Accept((expression, truth.round())),
        Ok(_) => Attempt::Reject("non-integral result"),
        Err(_) => Attempt::Reject("malformed expression"),
    }
}

/// Wrap an already-built expression as a problem. `None` when it does not
/// evaluate to an integer.
pub fn problem_from_expression(
    problem_id: String,
    difficulty: DifficultyTier,
    expression: &Expression,
) -> Option<Problem> {
    let truth = evaluate(expression).ok().filter(|v| is_integral(*v))?.round();
    Some(into_problem(problem_id, difficulty, expression, truth))
}

fn into_problem(
    problem_id: String,
    difficulty: DifficultyTier,
    expression: &Expression,
    truth: f64,
) -> Problem {
    problem(
        problem_id,
        DrillKind::OrderOfOperations,
        difficulty,
        expression.to_string(),
        evaluator::format(expression),
        truth,
        CheckPolicy::Exact,
        format!("The answer is {}.", truth as i64),
        Vec::new(),
    )
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let pool = term_pool(ranges.term_magnitude);
    let (expression, truth) =
        with_retries(DrillKind::OrderOfOperations, || candidate(&mut *rng, &pool))?;

    Ok(into_problem(problem_id, difficulty, &expression, truth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::evaluator::Token;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every `/` in `expr` divides its actual left operand exactly.
    fn divisions_are_exact(expr: &Expression) -> bool {
        let t = expr.tokens();
        for (i, token) in t.iter().enumerate() {
            if *token != Token::Op(Operator::Div) {
                continue;
            }
            let Some(Token::Num(d)) = t.get(i + 1) else { return false };
            let dividend = match (i, t.get(1)) {
                (3, Some(Token::Op(Operator::Mul))) => match (t[0], t[2]) {
                    (Token::Num(a), Token::Num(b)) => a * b,
                    _ => return false,
                },
                _ => match t[i - 1] {
                    Token::Num(n) => n,
                    _ => return false,
                },
            };
            if *d == 0 || dividend % d != 0 {
                return false;
            }
        }
        true
    }

    #[test]
    fn every_candidate_is_integral_with_exact_divisions() {
        let pool = term_pool(TierRanges::medium().term_magnitude);
        for seed in 0..500u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Attempt::Accept((expr, truth)) = candidate(&mut rng, &pool) {
                assert!(divisions_are_exact(&expr), "inexact division in {expr} (seed={seed})");
                assert!(is_integral(truth), "non-integral {truth} for {expr}");
                assert!(expr.tokens().len() <= 5);
            }
        }
    }

    #[test]
    fn special_forms_never_chain() {
        for seed in 0..200u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let expr = exponent_form(&mut rng);
            assert_eq!(expr.tokens().len(), 3);
            let Token::Num(base) = expr.tokens()[0] else { panic!("base") };
            let Token::Num(exp) = expr.tokens()[2] else { panic!("exponent") };
            assert!((2..=6).contains(&base));
            if base > 3 {
                assert_eq!(exp, 2);
            } else {
                assert!(exp == 2 || exp == 3);
            }
        }
    }

    #[test]
    fn division_form_is_exact() {
        let p = problem_from_expression("OO-TEST".into(), DifficultyTier::Medium, &division_form(4, 3))
            .unwrap();
        assert_eq!(p.display_text, "12 / 4");
        assert_eq!(p.display_html, "12 ÷ 4");
        assert_eq!(p.ground_truth, 3.0);
    }

    #[test]
    fn plain_product() {
        let p = problem_from_expression(
            "OO-TEST".into(),
            DifficultyTier::Medium,
            &Expression::binary(7, Operator::Mul, 3),
        )
        .unwrap();
        assert_eq!(p.display_text, "7 * 3");
        assert_eq!(p.ground_truth, 21.0);
        assert_eq!(p.check_policy, CheckPolicy::Exact);
    }

    #[test]
    fn fractional_expression_is_refused() {
        let expr = Expression::binary(7, Operator::Div, 2);
        assert!(problem_from_expression("OO-TEST".into(), DifficultyTier::Easy, &expr).is_none());
    }

    #[test]
    fn division_after_sum_divides_only_the_second_term() {
        let first = Expression::binary(3, Operator::Add, -6);
        assert_eq!(division_source(&first, Operator::Add), Some(6));
        let first = Expression::binary(3, Operator::Mul, -6);
        assert_eq!(division_source(&first, Operator::Mul), Some(18));
    }
}
