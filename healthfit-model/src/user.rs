use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::energy::EnergyProfile;
use crate::profile::{ActivityLevel, BodyMetrics, Goal, Sex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const ONBOARDING_NAME: &str = "User";
pub const AUTO_CREATED_NAME: &str = "New User";

/// A user profile. Body fields left as `None` mean onboarding is not finished yet.
#[cfg_attr(feature = "serde", serde_with::skip_serializing_none)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct User {
    pub id: String,
    pub auth_id: String,
    pub email: String,
    pub name: String,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "gender"))]
    pub sex: Option<Sex>,
    pub goal: Option<Goal>,
    pub activity_level: ActivityLevel,
    pub target_weight: Option<f64>,
    pub bmi: Option<f64>,
    pub bmr: Option<i32>,
    pub tdee: Option<i32>,
    pub target_calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fats: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(auth_id: String, email: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            auth_id,
            email,
            name,
            age: None,
            weight: None,
            height: None,
            sex: None,
            goal: None,
            activity_level: ActivityLevel::Sedentary,
            target_weight: None,
            bmi: None,
            bmr: None,
            tdee: None,
            target_calories: None,
            protein: None,
            carbs: None,
            fats: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn body_metrics(&self) -> Option<BodyMetrics> {
        Some(BodyMetrics::new(
            self.weight?,
            self.height?,
            self.age?,
            self.sex?,
        ))
    }

    pub fn apply_update(&mut self, update: ProfileUpdate) {
        self.email = update.email;
        if let Some(name) = update.name {
            self.name = name;
        }
        self.age = update.age.or(self.age);
        self.weight = update.weight.or(self.weight);
        self.height = update.height.or(self.height);
        self.sex = update.sex.or(self.sex);
        self.goal = update.goal.or(self.goal);
        if let Some(activity_level) = update.activity_level {
            self.activity_level = activity_level;
        }
        self.target_weight = update.target_weight.or(self.target_weight);
        self.updated_at = Utc::now();
    }

    pub fn set_energy_profile(&mut self, energy: Option<&EnergyProfile>) {
        self.bmi = energy.map(|e| e.bmi.bmi);
        self.bmr = energy.map(|e| e.bmr);
        self.tdee = energy.map(|e| e.tdee);
        self.target_calories = energy.map(|e| e.target_calories);
        self.protein = energy.map(|e| e.macros.protein);
        self.carbs = energy.map(|e| e.macros.carbs);
        self.fats = energy.map(|e| e.macros.fats);
    }
}

/// Profile fields submitted at onboarding or on a later update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub email: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub sex: Option<Sex>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
    pub target_weight: Option<f64>,
}
