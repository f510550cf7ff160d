//! # math_drill_gen
//!
//! A fully offline, deterministic generator and checker for arithmetic and
//! pre-algebra practice drills.
//!
//! Seven drills are covered: order of operations, linear equations,
//! geometry (perimeter, area, volume), signed addition and subtraction,
//! square root estimation, the Pythagorean theorem and rounding to the
//! nearest hundred. Each problem carries a plain-text and an HTML rendering,
//! a numeric ground truth, and the rule used to check a typed answer.
//!
//! ## How it works
//!
//! 1. Create a [`DrillRequest`] with a drill, a difficulty tier, and an
//!    optional RNG seed.
//! 2. Call [`generate_problem`]: the engine looks up the tier's numeric
//!    ranges, draws operands, rejects candidates that would not have a clean
//!    answer, and builds the question text.
//! 3. Pass the user's raw input to [`check_answer`]. Blank or non-numeric
//!    input comes back as [`Verdict::Empty`] and is never scored.
//!
//! ## Key features
//!
//! - **Deterministic**: pass a seed to reproduce the exact same problem every
//!   time, useful for tests and replays.
//! - **Solvable by construction**: divisions are exact, equations have an
//!   integer solution, and every rejection loop is bounded.
//! - **Configurable tiers**: ranges per tier live in a [`DifficultyPolicy`]
//!   that can be loaded from JSON.
//!
//! ## Quick start
//!
//! ```rust
//! use math_drill_gen::{
//!     check_answer, generate_problem, DifficultyTier, DrillKind, DrillRequest, Verdict,
//! };
//!
//! // Minimal: only the drill is required (defaults: Medium, entropy):
//! let problem = generate_problem(DrillRequest::new(DrillKind::SquareRoot)).unwrap();
//! println!("Q: {}", problem.display_text);
//!
//! // Full control:
//! let problem = generate_problem(DrillRequest {
//!     drill: DrillKind::LinearEquation,
//!     difficulty: DifficultyTier::Hard,
//!     rng_seed: Some(42),
//! })
//! .unwrap();
//!
//! let result = check_answer(&problem, "");
//! assert_eq!(result.verdict, Verdict::Empty);
//!
//! let answer = problem.ground_truth.to_string();
//! assert_eq!(check_answer(&problem, &answer).verdict, Verdict::Correct);
//! ```

pub mod client_adapter;
pub mod drill_engine;

// Convenience re-exports so callers can use `math_drill_gen::generate_problem`
// directly without reaching into `drill_engine::`.
pub use drill_engine::{
    check, check_answer, format_for_display, generate_problem, generate_problem_with,
    CheckPolicy, CheckResult, ConfigError, DifficultyPolicy, DifficultyTier, DrillError,
    DrillKind, DrillRequest, DrillSession, Feedback, Problem, SessionState, Verdict,
};
