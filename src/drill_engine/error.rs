//! Error types for the drill engine.
//!
//! Generation failures are retryable by the caller; answer-parsing failures
//! never reach the caller as errors (they become `Verdict::Empty`).

use thiserror::Error;

use crate::drill_engine::models::DrillKind;

pub type Result<T> = std::result::Result<T, DrillError>;

/// Top-level error returned by `generate_problem`.
#[derive(Debug, Error)]
pub enum DrillError {
    /// A rejection loop hit its attempt cap. Signals a misconfigured range.
    #[error("could not satisfy {drill} constraints after {attempts} attempts")]
    ConstraintUnsatisfiable { drill: DrillKind, attempts: u32 },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Problems with a difficulty table or a stored tier string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown difficulty tier: {0:?}")]
    UnknownTier(String),

    #[error("{tier} range `{key}` is empty ({min} > {max})")]
    EmptyRange { tier: String, key: &'static str, min: i64, max: i64 },

    #[error("{tier} range `{key}` must be positive (min was {min})")]
    NonPositive { tier: String, key: &'static str, min: i64 },

    #[error("{tier} range `{key}` ({min}..={max}) exceeds ±{limit}")]
    OutOfBounds { tier: String, key: &'static str, min: i64, max: i64, limit: i64 },

    #[error("invalid difficulty table: {0}")]
    Parse(String),
}

/// Evaluation failure inside the closed expression grammar.
///
/// Only generator bugs produce these; the generators regenerate on them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,
    #[error("expected a number or `(` at token {0}")]
    ExpectedOperand(usize),
    #[error("unbalanced parenthesis at token {0}")]
    Unbalanced(usize),
    #[error("unexpected trailing token at {0}")]
    Trailing(usize),
    #[error("division by zero")]
    DivisionByZero,
}

/// The user's input could not be read as a number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no answer entered: {input:?}")]
pub struct UnparsableAnswer {
    pub input: String,
}
