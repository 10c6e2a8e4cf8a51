use std::str::FromStr;

use itertools::Itertools;
use strum::{Display, EnumString, VariantNames};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A categorical value that does not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} \"{value}\", expected one of: {allowed}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
    pub allowed: String,
}

fn parse_variant<T>(field: &'static str, value: &str) -> Result<T, UnknownVariant>
where
    T: FromStr + VariantNames,
{
    value.parse().map_err(|_| UnknownVariant {
        field,
        value: value.to_owned(),
        allowed: T::VARIANTS.iter().join(", "),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(value: &str) -> Result<Self, UnknownVariant> {
        parse_variant("gender", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Exercise 1-3 days a week.
    LightlyActive,
    /// Exercise 3-5 days a week.
    ModeratelyActive,
    /// Exercise 6-7 days a week.
    VeryActive,
    /// Athlete-level training.
    ExtremelyActive,
}

impl ActivityLevel {
    pub fn parse(value: &str) -> Result<Self, UnknownVariant> {
        parse_variant("activity_level", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    StayHealthy,
}

impl Goal {
    pub fn parse(value: &str) -> Result<Self, UnknownVariant> {
        parse_variant("goal", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BodyMetrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
}

impl BodyMetrics {
    pub fn new(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> Self {
        Self {
            weight_kg,
            height_cm,
            age,
            sex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(ActivityLevel::parse("lightly_active"), Ok(ActivityLevel::LightlyActive));
        assert_eq!(
            ActivityLevel::parse("extremely_active"),
            Ok(ActivityLevel::ExtremelyActive)
        );
        assert_eq!(Goal::parse("lose_weight"), Ok(Goal::LoseWeight));
        assert_eq!(Sex::parse("female"), Ok(Sex::Female));
    }

    #[test]
    fn display_matches_parse() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ] {
            assert_eq!(ActivityLevel::parse(&level.to_string()), Ok(level));
        }
    }

    #[test]
    fn unknown_activity_level_lists_allowed_values() {
        let error = ActivityLevel::parse("unknown").unwrap_err();
        assert_eq!(error.field, "activity_level");
        assert_eq!(error.value, "unknown");
        assert_eq!(
            error.allowed,
            "sedentary, lightly_active, moderately_active, very_active, extremely_active"
        );
    }

    #[test]
    fn unknown_goal_is_rejected() {
        let error = Goal::parse("get_fit").unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid goal \"get_fit\", expected one of: lose_weight, gain_muscle, stay_healthy"
        );
    }

    #[test]
    fn sex_is_a_closed_set() {
        assert!(Sex::parse("other").is_err());
        assert!(Sex::parse("Male").is_err());
    }
}
