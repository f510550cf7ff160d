//! Answer checking: one comparison rule per [`CheckPolicy`].
//!
//! | Policy | Rule |
//! |--------|------|
//! | `Exact` | answer equals the ground truth |
//! | `AbsoluteTolerance(t)` | `|answer - truth| <= t` |
//! | `ExactIfPerfectElseTolerance(t)` | `Exact` for integral truths, tolerance otherwise |
//! | `SteppedFeedback` | `Exact`, plus Hot (off by 1) / Warm (off by 2) messages |
//!
//! Empty or non-numeric input is never scored: it comes back as
//! [`UnparsableAnswer`] from [`check`] and as [`Verdict::Empty`] from
//! [`check_answer`]. Problems with choices score only answers from the list.

use tracing::debug;

use crate::drill_engine::{
    error::UnparsableAnswer,
    models::{CheckPolicy, CheckResult, Feedback, Problem, Verdict},
    numeric::{format_truth, is_integral, INTEGRAL_EPSILON},
};

/// Message shown when nothing usable was entered.
pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter an answer.";

/// Slack added to tolerance comparisons so `truth + t` stays inside the
/// boundary despite binary rounding.
const TOLERANCE_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Judgement {
    pub correct: bool,
    /// Ground truth as text: an integer, or two decimals.
    pub display_truth: String,
    pub feedback: Feedback,
}

/// Read a finite number from user input.
pub fn parse_answer(raw: &str) -> Result<f64, UnparsableAnswer> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| !trimmed.is_empty() && v.is_finite())
        .ok_or_else(|| UnparsableAnswer { input: raw.to_string() })
}

fn exact(answer: f64, truth: f64) -> bool {
    (answer - truth).abs() < INTEGRAL_EPSILON
}

fn within(answer: f64, truth: f64, tolerance: f64) -> bool {
    (answer - truth).abs() <= tolerance + TOLERANCE_SLACK
}

fn stepped(answer: f64, truth: f64) -> Feedback {
    let diff = (answer - truth).abs();
    if exact(diff, 0.0) {
        Feedback::Correct
    } else if exact(diff, 1.0) {
        Feedback::Hot
    } else if exact(diff, 2.0) {
        Feedback::Warm
    } else {
        Feedback::Incorrect
    }
}

/// Judge `user_answer` against `ground_truth` under `policy`.
pub fn check(
    ground_truth: f64,
    user_answer: &str,
    policy: CheckPolicy,
) -> Result<Judgement, UnparsableAnswer> {
    let answer = parse_answer(user_answer)?;

    let feedback = match policy {
        CheckPolicy::SteppedFeedback => stepped(answer, ground_truth),
        other => {
            let correct = match other {
                CheckPolicy::AbsoluteTolerance(t) => within(answer, ground_truth, t),
                CheckPolicy::ExactIfPerfectElseTolerance(t) if !is_integral(ground_truth) => {
                    within(answer, ground_truth, t)
                }
                _ => exact(answer, ground_truth),
            };
            if correct { Feedback::Correct } else { Feedback::Incorrect }
        }
    };

    Ok(Judgement {
        correct: feedback == Feedback::Correct,
        display_truth: format_truth(ground_truth),
        feedback,
    })
}

/// Free-entry problems accept anything; choice problems only their choices.
fn is_listed_choice(problem: &Problem, raw_input: &str) -> bool {
    problem.choices.is_empty()
        || parse_answer(raw_input)
            .map(|v| problem.choices.iter().any(|&c| exact(v, c as f64)))
            .unwrap_or(false)
}

/// Check raw input against a generated problem.
pub fn check_answer(problem: &Problem, raw_input: &str) -> CheckResult {
    match check(problem.ground_truth, raw_input, problem.check_policy) {
        Ok(mut judgement) => {
            if !is_listed_choice(problem, raw_input) {
                judgement.correct = false;
                judgement.feedback = Feedback::Incorrect;
            }
            debug!(
                problem_id = %problem.problem_id,
                correct = judgement.correct,
                feedback = ?judgement.feedback,
                "answer checked"
            );
            CheckResult {
                verdict: if judgement.correct { Verdict::Correct } else { Verdict::Incorrect },
                message: if problem.drill.allows_retry() {
                    judgement.feedback.message().to_string()
                } else {
                    judgement.feedback.closing_message().to_string()
                },
                revealed_truth: problem.reveal_text.clone(),
            }
        }
        Err(e) => {
            debug!(problem_id = %problem.problem_id, error = %e, "empty answer");
            CheckResult {
                verdict: Verdict::Empty,
                message: EMPTY_ANSWER_MESSAGE.to_string(),
                revealed_truth: String::new(),
            }
        }
    }
}
