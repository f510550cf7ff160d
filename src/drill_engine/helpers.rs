//! Shared builder functions used by every drill generator.
//!
//! Generators own their arithmetic; these helpers own the boilerplate: the
//! bounded rejection loop, HTML-safe text, and final `Problem` assembly.
//!
//! ## RNG ordering
//!
//! The problem id is drawn before any topic draws (see `generator.rs`), and
//! each topic draws in a fixed order. Reordering draws changes every seeded
//! problem and breaks the golden tests.

use tracing::{debug, warn};

use crate::drill_engine::{
    error::{DrillError, Result},
    models::*,
    numeric::escape_html,
};

/// Upper bound on candidates tried by any rejection loop.
pub const MAX_GENERATION_ATTEMPTS: u32 = 1000;

/// Outcome of one rejection-sampling candidate.
#[derive(Debug)]
pub enum Attempt<T> {
    Accept(T),
    /// Candidate violated a constraint; the reason is logged.
    Reject(&'static str),
}

/// Run `candidate` until it is accepted or the attempt cap is hit.
pub fn with_retries<T>(
    drill: DrillKind,
    mut candidate: impl FnMut() -> Attempt<T>,
) -> Result<T> {
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        match candidate() {
            Attempt::Accept(value) => return Ok(value),
            Attempt::Reject(reason) => debug!(%drill, attempt, reason, "candidate rejected"),
        }
    }
    warn!(%drill, attempts = MAX_GENERATION_ATTEMPTS, "constraints unsatisfiable");
    Err(DrillError::ConstraintUnsatisfiable {
        drill,
        attempts: MAX_GENERATION_ATTEMPTS,
    })
}

/// Plain text made HTML-safe, for drills with no special markup.
pub fn html_text(text: &str) -> String {
    escape_html(text)
}

/// Assemble the final [`Problem`]. Last call in every generator.
pub fn problem(
    id: String, drill: DrillKind, difficulty: DifficultyTier,
    display_text: String, display_html: String,
    ground_truth: f64, check_policy: CheckPolicy,
    reveal_text: String, choices: Vec<i64>,
) -> Problem {
    Problem {
        problem_id: id,
        drill,
        difficulty,
        display_text,
        display_html,
        ground_truth,
        check_policy,
        reveal_text,
        choices,
    }
}

/// Free-entry problem whose HTML is the escaped plain text.
pub fn text_problem(
    id: String, drill: DrillKind, difficulty: DifficultyTier,
    text: String, ground_truth: f64, check_policy: CheckPolicy, reveal_text: String,
) -> Problem {
    let html = html_text(&text);
    problem(id, drill, difficulty, text, html, ground_truth, check_policy, reveal_text, Vec::new())
}
