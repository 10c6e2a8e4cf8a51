use chrono::{DateTime, NaiveDate, Utc};
use strum::{Display, EnumString};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Food {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub serving_size: String,
    pub category: String,
    pub health_score: i32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Meal {
    pub id: String,
    pub user_id: String,
    pub meal_type: String,
    /// Raw JSON array of the eaten items, stored as submitted.
    pub food_items: String,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Meal {
    pub fn new(
        user_id: String,
        meal_type: String,
        food_items: String,
        totals: MealTotals,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            meal_type,
            food_items,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_carbs: totals.carbs,
            total_fats: totals.fats,
            date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WaterAction {
    #[default]
    Add,
    Set,
}

/// One user's measurements for a single calendar day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DailyMetric {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub weight: f64,
    pub bmi: f64,
    pub water_intake: f64,
    pub steps: i64,
}

impl DailyMetric {
    pub fn new(user_id: String, date: NaiveDate, weight: f64, bmi: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            date,
            weight,
            bmi,
            water_intake: 0.0,
            steps: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DailyStats {
    pub water_intake: f64,
    pub weight: f64,
    pub steps: i64,
}

impl From<Option<DailyMetric>> for DailyStats {
    fn from(metric: Option<DailyMetric>) -> Self {
        metric
            .map(|m| Self {
                water_intake: m.water_intake,
                weight: m.weight,
                steps: m.steps,
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metric_gives_zero_stats() {
        assert_eq!(DailyStats::from(None), DailyStats::default());
    }

    #[test]
    fn water_action_defaults_to_add() {
        assert_eq!(WaterAction::default(), WaterAction::Add);
        assert_eq!("set".parse::<WaterAction>(), Ok(WaterAction::Set));
    }
}
