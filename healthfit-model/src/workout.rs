use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Seconds, for timed exercises such as planks.
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Minutes.
    pub duration: i32,
    pub difficulty: String,
    pub body_part: String,
    pub calories_burned: i32,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorkoutLog {
    pub id: String,
    pub user_id: String,
    pub workout_id: String,
    pub completion_time: i32,
    pub calories_burned: i32,
    pub date: DateTime<Utc>,
}

impl WorkoutLog {
    pub fn new(
        user_id: String,
        workout_id: String,
        completion_time: i32,
        calories_burned: i32,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            workout_id,
            completion_time,
            calories_burned,
            date,
        }
    }
}

/// A history entry together with the library workout it refers to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkoutLogEntry {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub log: WorkoutLog,
    pub workout: Workout,
}
