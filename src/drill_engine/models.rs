use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::drill_engine::error::ConfigError;

// ---------------------------------------------------------------------------
// Drill / difficulty metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrillKind {
    OrderOfOperations,
    LinearEquation,
    Geometry,
    SignedArithmetic,
    SquareRoot,
    Pythagorean,
    Rounding,
}

impl DrillKind {
    pub const ALL: [DrillKind; 7] = [
        DrillKind::OrderOfOperations,
        DrillKind::LinearEquation,
        DrillKind::Geometry,
        DrillKind::SignedArithmetic,
        DrillKind::SquareRoot,
        DrillKind::Pythagorean,
        DrillKind::Rounding,
    ];

    /// Whether a wrong answer leaves the problem open for another attempt.
    pub fn allows_retry(self) -> bool {
        matches!(
            self,
            DrillKind::OrderOfOperations | DrillKind::SignedArithmetic | DrillKind::Rounding
        )
    }
}

impl fmt::Display for DrillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DrillKind::OrderOfOperations => "Order of Operations",
            DrillKind::LinearEquation    => "Linear Equation",
            DrillKind::Geometry          => "Geometry",
            DrillKind::SignedArithmetic  => "Addition / Subtraction",
            DrillKind::SquareRoot        => "Square Roots",
            DrillKind::Pythagorean       => "Pythagorean Theorem",
            DrillKind::Rounding          => "Rounding to the Hundred",
        };
        write!(f, "{}", s)
    }
}

/// Named difficulty bucket. Persisted by the caller as its `Display` string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] =
        [DifficultyTier::Easy, DifficultyTier::Medium, DifficultyTier::Hard];
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Easy   => write!(f, "Easy"),
            DifficultyTier::Medium => write!(f, "Medium"),
            DifficultyTier::Hard   => write!(f, "Hard"),
        }
    }
}

impl FromStr for DifficultyTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Easy"   => Ok(DifficultyTier::Easy),
            "Medium" => Ok(DifficultyTier::Medium),
            "Hard"   => Ok(DifficultyTier::Hard),
            other    => Err(ConfigError::UnknownTier(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Checking policies and verdicts
// ---------------------------------------------------------------------------

/// How a user answer is compared against a problem's ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CheckPolicy {
    Exact,
    AbsoluteTolerance(f64),
    /// Exact when the ground truth is an integer, tolerance otherwise.
    ExactIfPerfectElseTolerance(f64),
    /// Exact scoring with a Hot/Warm message ladder for near misses.
    SteppedFeedback,
}

/// Message tier attached to a judgement. Only `Correct` scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct,
    Hot,
    Warm,
    Incorrect,
}

impl Feedback {
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct   => "Correct! Well done!",
            Feedback::Hot       => "Hot! Try again.",
            Feedback::Warm      => "Warm! Try again.",
            Feedback::Incorrect => "Incorrect. Try again!",
        }
    }

    /// Message for a drill that closes the problem after one answer.
    pub fn closing_message(self) -> &'static str {
        match self {
            Feedback::Incorrect => "Incorrect.",
            other               => other.message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Nothing usable was entered; the caller should refocus input.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub verdict: Verdict,
    pub message: String,
    /// Ground truth as shown to the player; empty for `Verdict::Empty`.
    pub revealed_truth: String,
}

// ---------------------------------------------------------------------------
// Request / problem types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillRequest {
    pub drill: DrillKind,
    pub difficulty: DifficultyTier,
    pub rng_seed: Option<u64>,
}

impl DrillRequest {
    /// Medium difficulty, entropy-seeded.
    pub fn new(drill: DrillKind) -> Self {
        DrillRequest {
            drill,
            difficulty: DifficultyTier::default(),
            rng_seed: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyTier) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// A generated drill question. Replaced wholesale on "next question".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub problem_id: String,
    pub drill: DrillKind,
    pub difficulty: DifficultyTier,
    /// Plain-text question, ASCII operators (e.g. `"12 / 4"`).
    pub display_text: String,
    /// HTML-safe markup: escaped text plus `×`, `÷` and `<sup>`.
    pub display_html: String,
    pub ground_truth: f64,
    pub check_policy: CheckPolicy,
    /// Sentence revealing the answer once checked.
    pub reveal_text: String,
    /// Candidate answers for multiple-choice drills; empty for free entry.
    pub choices: Vec<i64>,
}
