//! Energy and body-composition formulas: BMI, Mifflin-St Jeor BMR, TDEE,
//! goal-based calorie targets and macronutrient splits.
//!
//! Every function is pure. Categorical values are typed enums, so an unknown
//! activity level or goal can only fail earlier, when a string is parsed into
//! one (see [`CalculationError::InvalidCategoricalInput`]).

mod bmi;
mod error;
mod expenditure;
mod macronutrients;

use healthfit_model::{
    energy::EnergyProfile,
    profile::{ActivityLevel, BodyMetrics, Goal},
};

pub use bmi::calculate_bmi;
pub use error::{CalculationError, Result};
pub use expenditure::{
    activity_multiplier, calculate_bmr, calculate_target_calories, calculate_tdee,
};
pub use macronutrients::calculate_macros;

/// Runs BMI, BMR, TDEE, target calories and macros in order.
pub fn calculate_energy_profile(
    metrics: &BodyMetrics,
    activity_level: ActivityLevel,
    goal: Goal,
) -> Result<EnergyProfile> {
    let bmi = calculate_bmi(metrics.weight_kg, metrics.height_cm)?;
    let bmr = calculate_bmr(metrics.weight_kg, metrics.height_cm, metrics.age, metrics.sex)?;
    let tdee = calculate_tdee(bmr, activity_level)?;
    let target_calories = calculate_target_calories(tdee, goal)?;
    let macros = calculate_macros(target_calories, goal, metrics.weight_kg)?;

    Ok(EnergyProfile {
        bmi,
        bmr,
        tdee,
        target_calories,
        macros,
    })
}
