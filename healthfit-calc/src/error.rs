use healthfit_model::profile::UnknownVariant;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("invalid {field} \"{value}\", expected one of: {allowed}")]
    InvalidCategoricalInput {
        field: &'static str,
        value: String,
        allowed: String,
    },
    #[error("invalid {field} {value}: {constraint}")]
    InvalidMagnitude {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },
}

impl From<UnknownVariant> for CalculationError {
    fn from(e: UnknownVariant) -> Self {
        CalculationError::InvalidCategoricalInput {
            field: e.field,
            value: e.value,
            allowed: e.allowed,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculationError>;

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::InvalidMagnitude {
            field,
            value,
            constraint: "must be a positive finite number",
        })
    }
}

/// Rounds to whole kcal, rejecting values that do not fit an `i32`.
pub(crate) fn whole_kcal(field: &'static str, value: f64) -> Result<i32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Ok(rounded as i32)
    } else {
        Err(CalculationError::InvalidMagnitude {
            field,
            value,
            constraint: "must fit in a whole number of kcal",
        })
    }
}
