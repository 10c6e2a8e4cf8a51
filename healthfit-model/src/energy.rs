use strum::{Display, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn description(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "You are underweight. Consider consulting a nutritionist.",
            BmiCategory::Normal => "You have a healthy weight. Keep it up!",
            BmiCategory::Overweight => "You are overweight. A balanced diet and exercise can help.",
            BmiCategory::Obese => "You are obese. Please consult a healthcare professional.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub description: String,
}

impl BmiResult {
    pub fn new(bmi: f64, category: BmiCategory) -> Self {
        Self {
            bmi,
            category,
            description: category.description().to_owned(),
        }
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacroDistribution {
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

/// Every value derived from a profile's body metrics, activity level and goal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnergyProfile {
    pub bmi: BmiResult,
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub macros: MacroDistribution,
}
