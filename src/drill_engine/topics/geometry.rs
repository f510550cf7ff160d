//! Geometry drill (`GE-`): perimeter and area of rectangles, volume of boxes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    difficulty::TierRanges,
    error::Result,
    helpers::text_problem,
    models::{CheckPolicy, DifficultyTier, DrillKind, Problem},
    numeric::random_int,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureKind {
    Perimeter,
    Area,
    Volume,
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureKind::Perimeter => write!(f, "perimeter"),
            MeasureKind::Area      => write!(f, "area"),
            MeasureKind::Volume    => write!(f, "volume"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle,
    Box,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub l: i64,
    pub w: i64,
    /// Only boxes have a height.
    pub h: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeProblem {
    pub kind: MeasureKind,
    pub shape: Shape,
    pub dimensions: Dimensions,
    pub unit: String,
}

impl ShapeProblem {
    pub fn rectangle(kind: MeasureKind, l: i64, w: i64) -> Self {
        let unit = if kind == MeasureKind::Area { "square units" } else { "units" };
        ShapeProblem {
            kind,
            shape: Shape::Rectangle,
            dimensions: Dimensions { l, w, h: None },
            unit: unit.to_string(),
        }
    }

    pub fn cuboid(l: i64, w: i64, h: i64) -> Self {
        ShapeProblem {
            kind: MeasureKind::Volume,
            shape: Shape::Box,
            dimensions: Dimensions { l, w, h: Some(h) },
            unit: "cubic units".to_string(),
        }
    }

    pub fn measure(&self) -> i64 {
        let Dimensions { l, w, h } = self.dimensions;
        match self.kind {
            MeasureKind::Perimeter => 2 * (l + w),
            MeasureKind::Area      => l * w,
            MeasureKind::Volume    => l * w * h.unwrap_or(1),
        }
    }

    pub fn question(&self) -> String {
        let Dimensions { l, w, h } = self.dimensions;
        match (self.shape, h) {
            (Shape::Box, Some(h)) => {
                format!("Calculate the volume of a box with dimensions {l}, {w}, and {h}.")
            }
            _ => format!("Calculate the {} of a rectangle with sides {l} and {w}.", self.kind),
        }
    }
}

pub fn shape_problem(problem_id: String, difficulty: DifficultyTier, shape: &ShapeProblem) -> Problem {
    let answer = shape.measure();
    text_problem(
        problem_id,
        DrillKind::Geometry,
        difficulty,
        shape.question(),
        answer as f64,
        CheckPolicy::Exact,
        format!("The correct {} is {} {}.", shape.kind, answer, shape.unit),
    )
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyTier,
    problem_id: String,
    ranges: &TierRanges,
) -> Result<Problem> {
    let kind = match rng.gen_range(0..3) {
        0 => MeasureKind::Perimeter,
        1 => MeasureKind::Area,
        _ => MeasureKind::Volume,
    };

    let shape = match kind {
        MeasureKind::Volume => {
            let side = ranges.box_side;
            let l = random_int(rng, side);
            let w = random_int(rng, side);
            let h = random_int(rng, side);
            ShapeProblem::cuboid(l, w, h)
        }
        _ => {
            let side = ranges.rectangle_side;
            let l = random_int(rng, side);
            let w = random_int(rng, side);
            ShapeProblem::rectangle(kind, l, w)
        }
    };

    Ok(shape_problem(problem_id, difficulty, &shape))
}
