use healthfit_model::{energy::MacroDistribution, profile::Goal};

use crate::error::{require_positive, Result};

const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
const CARBS_KCAL_PER_GRAM: f64 = 4.0;
const FAT_KCAL_PER_GRAM: f64 = 9.0;

struct MacroSplit {
    protein: f64,
    fat: f64,
    carbs: f64,
}

fn macro_split(goal: Goal) -> MacroSplit {
    match goal {
        Goal::LoseWeight => MacroSplit {
            protein: 0.35,
            fat: 0.25,
            carbs: 0.40,
        },
        Goal::GainMuscle => MacroSplit {
            protein: 0.30,
            fat: 0.25,
            carbs: 0.45,
        },
        Goal::StayHealthy => MacroSplit {
            protein: 0.25,
            fat: 0.30,
            carbs: 0.45,
        },
    }
}

/// Splits a calorie target into protein, carbohydrate and fat grams.
///
/// `_weight_kg` does not take part in the calculation. It is kept so callers
/// can pass it now and a per-kilogram protein target can be added later
/// without changing the signature.
pub fn calculate_macros(
    target_calories: i32,
    goal: Goal,
    _weight_kg: f64,
) -> Result<MacroDistribution> {
    let kcal = require_positive("target_calories", f64::from(target_calories))?;
    let split = macro_split(goal);

    Ok(MacroDistribution {
        protein: (kcal * split.protein / PROTEIN_KCAL_PER_GRAM).round() as i32,
        carbs: (kcal * split.carbs / CARBS_KCAL_PER_GRAM).round() as i32,
        fats: (kcal * split.fat / FAT_KCAL_PER_GRAM).round() as i32,
    })
}
