use serde_json::{json, Value};

use crate::drill_engine::models::{CheckPolicy, CheckResult, Problem, Verdict};

/// How the client should collect the answer.
fn input_mode(problem: &Problem) -> &'static str {
    if problem.choices.is_empty() { "free_entry" } else { "choice" }
}

/// Short hint shown under the input box.
fn answer_hint(policy: CheckPolicy) -> Value {
    match policy {
        CheckPolicy::Exact | CheckPolicy::SteppedFeedback => json!({ "kind": "exact" }),
        CheckPolicy::AbsoluteTolerance(t) => json!({ "kind": "estimate", "tolerance": t }),
        CheckPolicy::ExactIfPerfectElseTolerance(t) => {
            json!({ "kind": "estimate_unless_exact", "tolerance": t })
        }
    }
}

fn choice_buttons(choices: &[i64]) -> Value {
    let buttons: Vec<Value> = choices
        .iter()
        .enumerate()
        .map(|(id, value)| json!({ "id": id, "label": value.to_string(), "value": value }))
        .collect();
    Value::Array(buttons)
}

fn verdict_str(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct   => "correct",
        Verdict::Incorrect => "incorrect",
        Verdict::Empty     => "empty",
    }
}

/// Map a `Problem` to the JSON object sent to the client.
///
/// The ground truth and reveal sentence stay server-side; the client learns
/// the answer only through [`to_client_verdict`].
pub fn to_client_problem(problem: &Problem) -> Value {
    json!({
        "id": problem.problem_id,
        "drill": problem.drill.to_string(),
        "difficulty": problem.difficulty.to_string(),
        "text": problem.display_text,
        "html": problem.display_html,
        "input": input_mode(problem),
        "hint": answer_hint(problem.check_policy),
        "choices": choice_buttons(&problem.choices),
    })
}

/// Map a `CheckResult` to the JSON object sent to the client.
pub fn to_client_verdict(result: &CheckResult) -> Value {
    let revealed = if result.revealed_truth.is_empty() {
        Value::Null
    } else {
        Value::String(result.revealed_truth.clone())
    };
    json!({
        "verdict": verdict_str(result.verdict),
        "correct": result.verdict == Verdict::Correct,
        "message": result.message,
        "revealed": revealed,
    })
}
