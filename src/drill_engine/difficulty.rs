//! Difficulty tiers mapped to the numeric ranges each generator draws from.
//!
//! The table is plain data: the caller persists the chosen tier, this module
//! only answers "which range does tier T use for key K". A custom table can
//! be loaded from JSON; omitted tiers keep their defaults.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::drill_engine::error::ConfigError;
use crate::drill_engine::models::DifficultyTier;

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl NumericRange {
    pub const fn new(min: i64, max: i64) -> Self {
        NumericRange { min, max }
    }

    pub fn contains(&self, n: i64) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

/// Which range a generator is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKey {
    /// Largest term magnitude in order-of-operations expressions.
    TermMagnitude,
    EquationUnknown,
    EquationCoefficient,
    EquationConstant,
    RectangleSide,
    BoxSide,
    Radicand,
    PythagoreanLeg,
    HypotenuseIncrement,
    SignedOperand,
    RoundingNumber,
}

impl RangeKey {
    pub const ALL: [RangeKey; 11] = [
        RangeKey::TermMagnitude,
        RangeKey::EquationUnknown,
        RangeKey::EquationCoefficient,
        RangeKey::EquationConstant,
        RangeKey::RectangleSide,
        RangeKey::BoxSide,
        RangeKey::Radicand,
        RangeKey::PythagoreanLeg,
        RangeKey::HypotenuseIncrement,
        RangeKey::SignedOperand,
        RangeKey::RoundingNumber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RangeKey::TermMagnitude       => "term_magnitude",
            RangeKey::EquationUnknown     => "equation_unknown",
            RangeKey::EquationCoefficient => "equation_coefficient",
            RangeKey::EquationConstant    => "equation_constant",
            RangeKey::RectangleSide       => "rectangle_side",
            RangeKey::BoxSide             => "box_side",
            RangeKey::Radicand            => "radicand",
            RangeKey::PythagoreanLeg      => "pythagorean_leg",
            RangeKey::HypotenuseIncrement => "hypotenuse_increment",
            RangeKey::SignedOperand       => "signed_operand",
            RangeKey::RoundingNumber      => "rounding_number",
        }
    }

    /// Largest magnitude either bound may take. Keeps every product a
    /// generator forms well inside `i64` and every factor search short.
    pub fn limit(self) -> i64 {
        match self {
            RangeKey::TermMagnitude       => 100,
            RangeKey::EquationUnknown     => 10_000,
            RangeKey::EquationCoefficient => 1_000,
            RangeKey::EquationConstant    => 10_000,
            RangeKey::RectangleSide       => 10_000,
            RangeKey::BoxSide             => 10_000,
            RangeKey::Radicand            => 1_000_000_000_000,
            RangeKey::PythagoreanLeg      => 1_000_000,
            RangeKey::HypotenuseIncrement => 1_000_000,
            RangeKey::SignedOperand       => 1_000_000,
            RangeKey::RoundingNumber      => 1_000_000_000_000,
        }
    }

    /// Keys whose lower bound must be at least 1 (sides, divisors, radicands).
    fn requires_positive(self) -> bool {
        !matches!(
            self,
            RangeKey::EquationUnknown | RangeKey::EquationConstant | RangeKey::SignedOperand
        )
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every range used by one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRanges {
    pub term_magnitude: NumericRange,
    pub equation_unknown: NumericRange,
    pub equation_coefficient: NumericRange,
    pub equation_constant: NumericRange,
    pub rectangle_side: NumericRange,
    pub box_side: NumericRange,
    pub radicand: NumericRange,
    pub pythagorean_leg: NumericRange,
    pub hypotenuse_increment: NumericRange,
    pub signed_operand: NumericRange,
    pub rounding_number: NumericRange,
}

impl TierRanges {
    pub fn get(&self, key: RangeKey) -> NumericRange {
        match key {
            RangeKey::TermMagnitude       => self.term_magnitude,
            RangeKey::EquationUnknown     => self.equation_unknown,
            RangeKey::EquationCoefficient => self.equation_coefficient,
            RangeKey::EquationConstant    => self.equation_constant,
            RangeKey::RectangleSide       => self.rectangle_side,
            RangeKey::BoxSide             => self.box_side,
            RangeKey::Radicand            => self.radicand,
            RangeKey::PythagoreanLeg      => self.pythagorean_leg,
            RangeKey::HypotenuseIncrement => self.hypotenuse_increment,
            RangeKey::SignedOperand       => self.signed_operand,
            RangeKey::RoundingNumber      => self.rounding_number,
        }
    }

    /// Build a tier from the per-tier values; keys with no tiers in the
    /// drills themselves (equations, signed operands, rounding) are shared.
    fn with_scaled(
        term_max: i64,
        rectangle: (i64, i64),
        box_side: (i64, i64),
        radicand: (i64, i64),
        leg_max: i64,
        increment_max: i64,
    ) -> Self {
        TierRanges {
            term_magnitude: NumericRange::new(1, term_max),
            equation_unknown: NumericRange::new(-20, 20),
            equation_coefficient: NumericRange::new(1, 10),
            equation_constant: NumericRange::new(-10, 10),
            rectangle_side: NumericRange::new(rectangle.0, rectangle.1),
            box_side: NumericRange::new(box_side.0, box_side.1),
            radicand: NumericRange::new(radicand.0, radicand.1),
            pythagorean_leg: NumericRange::new(3, leg_max),
            hypotenuse_increment: NumericRange::new(1, increment_max),
            signed_operand: NumericRange::new(-10, 9),
            rounding_number: NumericRange::new(1000, 9999),
        }
    }

    pub fn easy() -> Self {
        Self::with_scaled(5, (2, 6), (2, 4), (4, 100), 5, 7)
    }

    pub fn medium() -> Self {
        Self::with_scaled(10, (2, 10), (2, 7), (49, 144), 10, 10)
    }

    pub fn hard() -> Self {
        Self::with_scaled(12, (5, 15), (5, 10), (81, 256), 15, 12)
    }

    fn validate(&self, tier: DifficultyTier) -> Result<(), ConfigError> {
        for key in RangeKey::ALL {
            let range = self.get(key);
            if range.min > range.max {
                return Err(ConfigError::EmptyRange {
                    tier: tier.to_string(),
                    key: key.name(),
                    min: range.min,
                    max: range.max,
                });
            }
            if key.requires_positive() && range.min < 1 {
                return Err(ConfigError::NonPositive {
                    tier: tier.to_string(),
                    key: key.name(),
                    min: range.min,
                });
            }
            let limit = key.limit();
            if range.min < -limit || range.max > limit {
                return Err(ConfigError::OutOfBounds {
                    tier: tier.to_string(),
                    key: key.name(),
                    min: range.min,
                    max: range.max,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// The `(tier, key) -> range` lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPolicy {
    #[serde(default = "TierRanges::easy")]
    pub easy: TierRanges,
    #[serde(default = "TierRanges::medium")]
    pub medium: TierRanges,
    #[serde(default = "TierRanges::hard")]
    pub hard: TierRanges,
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        DifficultyPolicy {
            easy: TierRanges::easy(),
            medium: TierRanges::medium(),
            hard: TierRanges::hard(),
        }
    }
}

impl DifficultyPolicy {
    /// Parse and validate a JSON table.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let policy: DifficultyPolicy =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn tier(&self, tier: DifficultyTier) -> &TierRanges {
        match tier {
            DifficultyTier::Easy   => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard   => &self.hard,
        }
    }

    pub fn ranges_for(&self, tier: DifficultyTier, key: RangeKey) -> NumericRange {
        self.tier(tier).get(key)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in DifficultyTier::ALL {
            if let Err(e) = self.tier(tier).validate(tier) {
                warn!(error = %e, "rejected difficulty table");
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_drill_defaults() {
        let policy = DifficultyPolicy::default();
        assert_eq!(
            policy.ranges_for(DifficultyTier::Medium, RangeKey::Radicand),
            NumericRange::new(49, 144)
        );
        assert_eq!(
            policy.ranges_for(DifficultyTier::Hard, RangeKey::RectangleSide),
            NumericRange::new(5, 15)
        );
        assert_eq!(
            policy.ranges_for(DifficultyTier::Easy, RangeKey::BoxSide),
            NumericRange::new(2, 4)
        );
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn equation_ranges_do_not_depend_on_tier() {
        let policy = DifficultyPolicy::default();
        for key in [
            RangeKey::EquationUnknown,
            RangeKey::EquationCoefficient,
            RangeKey::EquationConstant,
        ] {
            let medium = policy.ranges_for(DifficultyTier::Medium, key);
            assert_eq!(policy.ranges_for(DifficultyTier::Easy, key), medium);
            assert_eq!(policy.ranges_for(DifficultyTier::Hard, key), medium);
        }
    }

    #[test]
    fn json_override_keeps_missing_tiers() {
        let mut hard = TierRanges::hard();
        hard.radicand = NumericRange::new(100, 400);
        let json = serde_json::json!({ "hard": hard }).to_string();

        let policy = DifficultyPolicy::from_json_str(&json).unwrap();
        assert_eq!(policy.hard.radicand, NumericRange::new(100, 400));
        assert_eq!(policy.easy, TierRanges::easy());
        assert_eq!(policy.medium, TierRanges::medium());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut policy = DifficultyPolicy::default();
        policy.easy.box_side = NumericRange::new(6, 2);
        assert_eq!(
            policy.validate(),
            Err(ConfigError::EmptyRange {
                tier: "Easy".into(),
                key: "box_side",
                min: 6,
                max: 2,
            })
        );
    }

    #[test]
    fn zero_coefficient_is_rejected() {
        let mut policy = DifficultyPolicy::default();
        policy.medium.equation_coefficient = NumericRange::new(0, 10);
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::NonPositive { key: "equation_coefficient", .. })
        ));
    }

    #[test]
    fn oversized_json_table_is_rejected() {
        let mut medium = TierRanges::medium();
        medium.box_side = NumericRange::new(1, i64::MAX / 2);
        medium.rectangle_side = NumericRange::new(1, i64::MAX / 2);
        let json = serde_json::json!({ "medium": medium }).to_string();
        assert_eq!(
            DifficultyPolicy::from_json_str(&json),
            Err(ConfigError::OutOfBounds {
                tier: "Medium".into(),
                key: "rectangle_side",
                min: 1,
                max: i64::MAX / 2,
                limit: 10_000,
            })
        );
    }

    #[test]
    fn bounds_apply_to_negative_ends_too() {
        let mut policy = DifficultyPolicy::default();
        policy.hard.signed_operand = NumericRange::new(i64::MIN, 0);
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::OutOfBounds { key: "signed_operand", .. })
        ));
    }

    #[test]
    fn default_tables_sit_inside_the_limits() {
        let policy = DifficultyPolicy::default();
        for tier in DifficultyTier::ALL {
            for key in RangeKey::ALL {
                let range = policy.ranges_for(tier, key);
                assert!(range.min >= -key.limit() && range.max <= key.limit(), "{tier} {key}");
            }
        }
    }

    #[test]
    fn garbage_json_is_a_parse_error() {
        assert!(matches!(
            DifficultyPolicy::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
