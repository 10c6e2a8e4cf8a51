use healthfit_model::profile::{ActivityLevel, Goal, Sex};

use crate::error::{require_positive, whole_kcal, CalculationError, Result};

const WEIGHT_LOSS_DEFICIT: i32 = 500;
const MUSCLE_GAIN_SURPLUS: i32 = 300;

/// Basal Metabolic Rate in kcal/day using the Mifflin-St Jeor equation:
/// `10 * weight + 6.25 * height - 5 * age`, plus 5 for men or minus 161 for women.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> Result<i32> {
    let weight_kg = require_positive("weight", weight_kg)?;
    let height_cm = require_positive("height", height_cm)?;

    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let bmr = match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    };

    whole_kcal("bmr", require_positive("bmr", bmr)?)
}

pub fn activity_multiplier(activity_level: ActivityLevel) -> f64 {
    match activity_level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::ModeratelyActive => 1.55,
        ActivityLevel::VeryActive => 1.725,
        ActivityLevel::ExtremelyActive => 1.9,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by the activity multiplier.
pub fn calculate_tdee(bmr: i32, activity_level: ActivityLevel) -> Result<i32> {
    let bmr = require_positive("bmr", f64::from(bmr))?;
    whole_kcal("tdee", bmr * activity_multiplier(activity_level))
}

/// Daily calorie target for a goal. Inputs are whole kcal so no rounding is needed.
pub fn calculate_target_calories(tdee: i32, goal: Goal) -> Result<i32> {
    require_positive("tdee", f64::from(tdee))?;

    let adjustment = match goal {
        Goal::LoseWeight => -WEIGHT_LOSS_DEFICIT,
        Goal::GainMuscle => MUSCLE_GAIN_SURPLUS,
        Goal::StayHealthy => 0,
    };

    tdee.checked_add(adjustment)
        .filter(|target| *target > 0)
        .ok_or(CalculationError::InvalidMagnitude {
            field: "target_calories",
            value: f64::from(tdee) + f64::from(adjustment),
            constraint: "must be a positive whole number of kcal",
        })
}
