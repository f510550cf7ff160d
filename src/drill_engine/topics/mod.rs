//! Drill generators, one module per drill.
//!
//! Every module has the same crate-private entry point:
//!
//! ```ignore
//! pub(crate) fn generate<R: Rng>(
//!     rng: &mut R,
//!     difficulty: DifficultyTier,
//!     problem_id: String,
//!     ranges: &TierRanges,
//! ) -> Result<Problem>
//! ```
//!
//! `ranges` must already have passed `DifficultyPolicy::validate`; the
//! generator dispatches to these via `generator.rs`, which validates first.
//! The problem builders the modules export stay public and take plain
//! values instead.

/// OO-: expressions under operator precedence
pub mod order_of_operations;
/// LE-: one-variable linear equations, eight forms
pub mod linear_equation;
/// GE-: rectangle perimeter / area, cuboid volume
pub mod geometry;
/// SA-: signed addition and subtraction (Hot/Warm feedback)
pub mod signed_arithmetic;
/// SR-: square root estimation
pub mod square_root;
/// PY-: missing side of a right triangle
pub mod pythagorean;
/// RH-: rounding to the nearest hundred (multiple choice)
pub mod rounding;
