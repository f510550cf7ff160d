//! Linear equation drill (`LE-`).
//!
//! Eight single-unknown forms over `a` (coefficient or divisor), `b`
//! (constant) and the integer solution `x`. The right-hand side `c` is
//! computed from the other three, so every equation is solvable by
//! construction. Division forms reject candidates where `a` does not divide
//! `x`; success probability is `1/a`, so a handful of retries is typical.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    difficulty::{NumericRange, TierRanges},
    error::Result,
    evaluator::{evaluate, Expression, Operator, Token},
    helpers::{text_problem, with_retries, Attempt, MAX_GENERATION_ATTEMPTS},
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::{normalize_signs, random_int},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquationForm {
    /// `ax + b = c`
    ScaledPlus,
    /// `ax - b = c`
    ScaledMinus,
    /// `b - ax = c`
    ConstantMinusScaled,
    /// `b + ax = c`, shown as `ax + b = c`
    ConstantPlusScaled,
    /// `x/a + b = c`
    DividedPlus,
    /// `x/a - b = c`
    DividedMinus,
    /// `b - x/a = c`
    ConstantMinusDivided,
    /// `b + x/a = c`, shown as `x/a + b = c`
    ConstantPlusDivided,
}

impl EquationForm {
    pub const ALL: [EquationForm; 8] = [
        EquationForm::ScaledPlus,
        EquationForm::ScaledMinus,
        EquationForm::ConstantMinusScaled,
        EquationForm::ConstantPlusScaled,
        EquationForm::DividedPlus,
        EquationForm::DividedMinus,
        EquationForm::ConstantMinusDivided,
        EquationForm::ConstantPlusDivided,
    ];

    /// 1-based variant id.
    pub fn id(self) -> u8 {
        match self {
            EquationForm::ScaledPlus           => 1,
            EquationForm::ScaledMinus          => 2,
            EquationForm::ConstantMinusScaled  => 3,
            EquationForm::ConstantPlusScaled   => 4,
            EquationForm::DividedPlus          => 5,
            EquationForm::DividedMinus         => 6,
            EquationForm::ConstantMinusDivided => 7,
            EquationForm::ConstantPlusDivided  => 8,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        EquationForm::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }

    pub fn is_division(self) -> bool {
        self.id() > 4
    }
}

/// A solvable equation: substituting `x` into `form` gives `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearEquation {
    pub form: EquationForm,
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub x: i64,
}

impl LinearEquation {
    /// `None` when `a` is zero or, for division forms, does not divide `x`.
    pub fn new(form: EquationForm, a: i64, b: i64, x: i64) -> Option<Self> {
        let mut eq = LinearEquation { form, a, b, c: 0, x };
        eq.c = eq.substitute(x)?;
        Some(eq)
    }

    /// Left-hand side with `value` in place of the unknown, as an expression
    /// in evaluation order.
    pub fn lhs_expression(&self, value: i64) -> Expression {
        let op = if self.form.is_division() { Operator::Div } else { Operator::Mul };
        let unknown = vec![
            Token::LParen, Token::Num(value), Token::Op(op), Token::Num(self.a), Token::RParen,
        ];
        let mut tokens = Vec::with_capacity(7);
        match self.form {
            EquationForm::ScaledPlus | EquationForm::DividedPlus => {
                tokens.extend(unknown);
                tokens.extend([Token::Op(Operator::Add), Token::Num(self.b)]);
            }
            EquationForm::ScaledMinus | EquationForm::DividedMinus => {
                tokens.extend(unknown);
                tokens.extend([Token::Op(Operator::Sub), Token::Num(self.b)]);
            }
            EquationForm::ConstantMinusScaled | EquationForm::ConstantMinusDivided => {
                tokens.extend([Token::Num(self.b), Token::Op(Operator::Sub)]);
                tokens.extend(unknown);
            }
            EquationForm::ConstantPlusScaled | EquationForm::ConstantPlusDivided => {
                tokens.extend([Token::Num(self.b), Token::Op(Operator::Add)]);
                tokens.extend(unknown);
            }
        }
        Expression::new(tokens)
    }

    /// Value of the left-hand side at `value`; `None` if it is not an integer.
    pub fn substitute(&self, value: i64) -> Option<i64> {
        if self.a == 0 || (self.form.is_division() && value % self.a != 0) {
            return None;
        }
        evaluate(&self.lhs_expression(value)).ok().map(|v| v.round() as i64)
    }

    /// Rendered equation with signs normalised and unit coefficients hidden.
    pub fn text(&self) -> String {
        let (a, b, c) = (self.a, self.b, self.c);
        let raw = match self.form {
            EquationForm::ScaledPlus | EquationForm::ConstantPlusScaled => {
                format!("{a}x + {b} = {c}")
            }
            EquationForm::ScaledMinus if b < 0 => format!("{a}x + {} = {c}", b.abs()),
            EquationForm::ScaledMinus => format!("{a}x - {b} = {c}"),
            EquationForm::ConstantMinusScaled => format!("{b} - {a}x = {c}"),
            EquationForm::DividedPlus | EquationForm::ConstantPlusDivided => {
                format!("x/{a} + {b} = {c}")
            }
            EquationForm::DividedMinus if b < 0 => format!("x/{a} + {} = {c}", b.abs()),
            EquationForm::DividedMinus => format!("x/{a} - {b} = {c}"),
            EquationForm::ConstantMinusDivided => format!("{b} - x/{a} = {c}"),
        };
        hide_unit_coefficient(&normalize_signs(&raw))
    }
}

impl fmt::Display for LinearEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// `1x` at the start or after a space becomes `x`.
fn hide_unit_coefficient(text: &str) -> String {
    let text = text.replace(" 1x", " x");
    match text.strip_prefix("1x") {
        Some(rest) => format!("x{rest}"),
        None => text,
    }
}

/// Draw the unknown; a zero is re-rolled half of the time.
fn draw_unknown<R: Rng>(rng: &mut R, range: NumericRange) -> i64 {
    let mut x = random_int(rng, range);
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        if x != 0 || !rng.gen_bool(0.5) {
            break;
        }
        x = random_int(rng, range);
    }
    x
}

fn candidate<R: Rng>(rng: &mut R, ranges: &TierRanges) -> Attempt<LinearEquation> {
    let x = draw_unknown(rng, ranges.equation_unknown);
    let a = random_int(rng, ranges.equation_coefficient);
    let b = random_int(rng, ranges.equation_constant);
    let form = EquationForm::ALL[rng.gen_range(0..EquationForm::ALL.len())];

    let Some(eq) = LinearEquation::new(form, a, b, x) else {
        return Attempt::Reject("x is not divisible by a");
    };
    if a == 1 && b == 0 {
        return Attempt::Reject("degenerate x = c form");
    }
    if !eq.text().contains('x') {
        return Attempt::Reject("rendered text lost the unknown");
    }
    Attempt::Accept(eq)
}

pub fn equation_problem(
    problem_id: String,
    difficulty: DifficultyTier,
    eq: &LinearEquation,
) -> Problem {
    text_problem(
        problem_id,
        DrillKind::LinearEquation,
        difficulty,
        eq.text(),
        eq.x as f64,
        CheckPolicy::Exact,
        format!("The answer is {}.", eq.x),
    )
}

/// Equations have no tiers of their own; `ranges` is whatever the policy
/// returns for the requested tier (identical by default).
pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let eq = with_retries(DrillKind::LinearEquation, || candidate(&mut *rng, ranges))?;
    Ok(equation_problem(problem_id, difficulty, &eq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scaled_plus_renders_and_solves() {
        let eq = LinearEquation::new(EquationForm::ScaledPlus, 3, 2, 5).unwrap();
        assert_eq!(eq.c, 17);
        assert_eq!(eq.text(), "3x + 2 = 17");
    }

    /// Right-hand side worked out by hand for each form.
    fn hand_solved_c(form: EquationForm, a: i64, b: i64, x: i64) -> i64 {
        match form {
            EquationForm::ScaledPlus           => a * x + b,
            EquationForm::ScaledMinus          => a * x - b,
            EquationForm::ConstantMinusScaled  => b - a * x,
            EquationForm::ConstantPlusScaled   => b + a * x,
            EquationForm::DividedPlus          => x / a + b,
            EquationForm::DividedMinus         => x / a - b,
            EquationForm::ConstantMinusDivided => b - x / a,
            EquationForm::ConstantPlusDivided  => b + x / a,
        }
    }

    /// Value of one rendered term (`3x`, `x`, `x/4`, `-7`) at `x`.
    fn term_value(term: &str, x: i64) -> Option<i64> {
        if let Some(d) = term.strip_prefix("x/") {
            let d: i64 = d.parse().ok()?;
            return (x % d == 0).then(|| x / d);
        }
        if let Some(coef) = term.strip_suffix('x') {
            let a: i64 = if coef.is_empty() { 1 } else { coef.parse().ok()? };
            return Some(a * x);
        }
        term.parse().ok()
    }

    /// Evaluate the rendered left-hand side at `x` and read the shown `c`.
    fn read_back(text: &str, x: i64) -> Option<(i64, i64)> {
        let (lhs, rhs) = text.split_once(" = ")?;
        let parts: Vec<&str> = lhs.split(' ').collect();
        if parts.len() != 3 {
            return None;
        }
        let left = term_value(parts[0], x)?;
        let right = term_value(parts[2], x)?;
        let value = match parts[1] {
            "+" => left + right,
            "-" => left - right,
            _ => return None,
        };
        Some((value, rhs.parse().ok()?))
    }

    #[test]
    fn every_form_matches_its_hand_solution() {
        for form in EquationForm::ALL {
            for (a, b, x) in [(2, -3, 8), (4, 7, -12), (1, 5, 6), (3, 0, 9)] {
                let eq = LinearEquation::new(form, a, b, x).unwrap();
                assert_eq!(eq.c, hand_solved_c(form, a, b, x), "{form:?} a={a} b={b} x={x}");
                assert_eq!(read_back(&eq.text(), x), Some((eq.c, eq.c)), "{}", eq.text());
            }
            assert_eq!(EquationForm::from_id(form.id()), Some(form));
        }
    }

    #[test]
    fn rendered_equations_hold_at_the_answer() {
        let ranges = TierRanges::medium();
        for seed in 0..2000u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate(&mut rng, DifficultyTier::Medium, "LE-TEST".into(), &ranges).unwrap();
            let x = p.ground_truth as i64;
            let (lhs, shown_c) = read_back(&p.display_text, x)
                .unwrap_or_else(|| panic!("unreadable {:?} (seed={seed})", p.display_text));
            assert_eq!(lhs, shown_c, "{} with x = {x} (seed={seed})", p.display_text);
        }
    }

    #[test]
    fn remaining_forms_render() {
        let eq = LinearEquation::new(EquationForm::ConstantPlusScaled, 3, 2, 5).unwrap();
        assert_eq!(eq.text(), "3x + 2 = 17");
        let eq = LinearEquation::new(EquationForm::ConstantPlusScaled, 3, -2, 5).unwrap();
        assert_eq!(eq.text(), "3x - 2 = 13");
        let eq = LinearEquation::new(EquationForm::DividedPlus, 2, 3, 8).unwrap();
        assert_eq!(eq.text(), "x/2 + 3 = 7");
        let eq = LinearEquation::new(EquationForm::ConstantPlusDivided, 4, -1, 8).unwrap();
        assert_eq!(eq.text(), "x/4 - 1 = 1");
        let eq = LinearEquation::new(EquationForm::ScaledMinus, 2, 3, 4).unwrap();
        assert_eq!(eq.text(), "2x - 3 = 5");
        let eq = LinearEquation::new(EquationForm::DividedMinus, 3, -2, 6).unwrap();
        assert_eq!(eq.text(), "x/3 + 2 = 4");
    }

    #[test]
    fn division_forms_require_divisibility() {
        assert!(LinearEquation::new(EquationForm::DividedPlus, 3, 1, 7).is_none());
        let eq = LinearEquation::new(EquationForm::ConstantMinusDivided, 3, 1, -9).unwrap();
        assert_eq!(eq.c, 4);
        assert_eq!(eq.text(), "1 - x/3 = 4");
    }

    #[test]
    fn negative_constants_collapse_signs() {
        let eq = LinearEquation::new(EquationForm::ScaledPlus, 2, -4, 3).unwrap();
        assert_eq!(eq.text(), "2x - 4 = 2");
        let eq = LinearEquation::new(EquationForm::ScaledMinus, 2, -4, 3).unwrap();
        assert_eq!(eq.text(), "2x + 4 = 10");
        let eq = LinearEquation::new(EquationForm::DividedMinus, 2, 5, 4).unwrap();
        assert_eq!(eq.text(), "x/2 - 5 = -3");
    }

    #[test]
    fn unit_coefficient_is_hidden() {
        let eq = LinearEquation::new(EquationForm::ScaledPlus, 1, 4, 3).unwrap();
        assert_eq!(eq.text(), "x + 4 = 7");
        let eq = LinearEquation::new(EquationForm::ConstantMinusScaled, 1, 4, 3).unwrap();
        assert_eq!(eq.text(), "4 - x = 1");
    }

    #[test]
    fn form_ids_are_one_based() {
        assert_eq!(EquationForm::from_id(0), None);
        assert_eq!(EquationForm::from_id(9), None);
        assert_eq!(EquationForm::from_id(5), Some(EquationForm::DividedPlus));
    }

    #[test]
    fn accepted_candidates_are_never_degenerate() {
        let ranges = TierRanges::medium();
        for seed in 0..400u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Attempt::Accept(eq) = candidate(&mut rng, &ranges) {
                assert!(!(eq.a == 1 && eq.b == 0), "degenerate {eq} (seed={seed})");
                assert!(eq.text().contains('x'));
                assert!((-20..=20).contains(&eq.x));
                if eq.form.is_division() {
                    assert_eq!(eq.x % eq.a, 0);
                }
            }
        }
    }
}
