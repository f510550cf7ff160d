//! Core drill engine: problem generation, expression handling, and answer checking.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: drills, tiers, check policies, requests, problems |
//! | `error`      | `DrillError`, `ConfigError`, `EvalError`, `UnparsableAnswer` |
//! | `difficulty` | Per-tier numeric ranges and the JSON-loadable policy table |
//! | `numeric`    | Random draws, factor lists, sign cleanup, truth formatting |
//! | `evaluator`  | Token-based expressions: precedence evaluation and display |
//! | `helpers`    | Bounded rejection loop and `Problem` builders |
//! | `generator`  | Single entry point `generate_problem()`, dispatches to topics |
//! | `topics`     | One generator per drill |
//! | `checker`    | Answer checking under each `CheckPolicy` |
//! | `session`    | Per-drill answer state and streak |

pub mod checker;
pub mod difficulty;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod numeric;
pub mod session;
pub mod topics;

// Re-export the public API surface so callers can use
// `drill_engine::generate_problem` without reaching into sub-modules.
pub use checker::{check, check_answer, Judgement};
pub use difficulty::{DifficultyPolicy, NumericRange, RangeKey, TierRanges};
pub use error::{ConfigError, DrillError, EvalError, UnparsableAnswer};
pub use generator::{generate_problem, generate_problem_with};
pub use models::{
    CheckPolicy, CheckResult, DifficultyTier, DrillKind, DrillRequest, Feedback, Problem, Verdict,
};
pub use session::{DrillSession, SessionState};

/// Markup to show for a problem: escaped text with `×`, `÷` and `<sup>`.
pub fn format_for_display(problem: &Problem) -> String {
    problem.display_html.clone()
}
