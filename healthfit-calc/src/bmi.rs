use healthfit_model::energy::{BmiCategory, BmiResult};

use crate::error::{require_positive, Result};

/// Body Mass Index from weight in kilograms and height in centimeters.
///
/// The index is rounded to one decimal place and the category is picked from
/// the rounded value, so 18.46 lands in `Normal` rather than `Underweight`.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<BmiResult> {
    let weight_kg = require_positive("weight", weight_kg)?;
    let height_m = require_positive("height", height_cm)? / 100.0;

    let bmi = weight_kg / height_m.powi(2);
    let rounded = (bmi * 10.0).round() / 10.0;

    Ok(BmiResult::new(rounded, categorize(rounded)))
}

fn categorize(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}
