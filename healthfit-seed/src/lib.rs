use std::{fs::File, io::BufReader, path::Path};

use healthfit_db::{food::FoodRepository, workout::WorkoutRepository};
use healthfit_model::{meal::Food, workout::Workout};
use log::{debug, info};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] healthfit_db::Error),
}

/// Reference data every installation starts with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

impl Catalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub foods: usize,
    pub workouts: usize,
    pub skipped: usize,
}

pub struct Seeder {
    foods: Box<dyn FoodRepository>,
    workouts: Box<dyn WorkoutRepository>,
}

impl Seeder {
    pub fn new(foods: Box<dyn FoodRepository>, workouts: Box<dyn WorkoutRepository>) -> Self {
        Self { foods, workouts }
    }

    /// Inserts every entry whose id is not stored yet, so reruns are harmless.
    pub async fn run(&self, catalog: &Catalog) -> Result<SeedReport, Error> {
        let mut report = SeedReport::default();

        info!("Seeding {} foods", catalog.foods.len());
        for food in catalog.foods.iter() {
            if self.foods.get_food(&food.id).await?.is_some() {
                debug!("Food {} already present", food.id);
                report.skipped += 1;
                continue;
            }
            self.foods.insert_food(food).await?;
            report.foods += 1;
        }

        info!("Seeding {} workouts", catalog.workouts.len());
        for workout in catalog.workouts.iter() {
            if self.workouts.get_workout(&workout.id).await?.is_some() {
                debug!("Workout {} already present", workout.id);
                report.skipped += 1;
                continue;
            }
            self.workouts.insert_workout(workout).await?;
            report.workouts += 1;
        }

        Ok(report)
    }
}
