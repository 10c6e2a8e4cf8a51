use async_trait::async_trait;
use chrono::{DateTime, Utc};
use healthfit_model::workout::{Workout, WorkoutLog, WorkoutLogEntry};
use log::debug;

use crate::{connection::Connection, corrupt, Result};

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: String,
    name: String,
    description: String,
    duration: i32,
    difficulty: String,
    body_part: String,
    calories_burned: i32,
    exercises: String,
}

impl TryFrom<WorkoutRow> for Workout {
    type Error = crate::Error;

    fn try_from(row: WorkoutRow) -> Result<Self> {
        let exercises =
            serde_json::from_str(&row.exercises).map_err(|e| corrupt("workouts", &row.id, e))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            duration: row.duration,
            difficulty: row.difficulty,
            body_part: row.body_part,
            calories_burned: row.calories_burned,
            exercises,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WorkoutLogRow {
    id: String,
    user_id: String,
    workout_id: String,
    completion_time: i32,
    calories_burned: i32,
    date: DateTime<Utc>,
    #[sqlx(flatten)]
    workout: JoinedWorkoutRow,
}

#[derive(sqlx::FromRow)]
struct JoinedWorkoutRow {
    w_name: String,
    w_description: String,
    w_duration: i32,
    w_difficulty: String,
    w_body_part: String,
    w_calories_burned: i32,
    w_exercises: String,
}

impl TryFrom<WorkoutLogRow> for WorkoutLogEntry {
    type Error = crate::Error;

    fn try_from(row: WorkoutLogRow) -> Result<Self> {
        let workout = Workout::try_from(WorkoutRow {
            id: row.workout_id.clone(),
            name: row.workout.w_name,
            description: row.workout.w_description,
            duration: row.workout.w_duration,
            difficulty: row.workout.w_difficulty,
            body_part: row.workout.w_body_part,
            calories_burned: row.workout.w_calories_burned,
            exercises: row.workout.w_exercises,
        })?;

        Ok(Self {
            log: WorkoutLog {
                id: row.id,
                user_id: row.user_id,
                workout_id: row.workout_id,
                completion_time: row.completion_time,
                calories_burned: row.calories_burned,
                date: row.date,
            },
            workout,
        })
    }
}

#[mockall::automock]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    async fn list_workouts(&self) -> Result<Vec<Workout>>;
    async fn get_workout(&self, id: &str) -> Result<Option<Workout>>;
    async fn insert_workout(&self, workout: &Workout) -> Result<()>;
    async fn insert_log(&self, log: &WorkoutLog) -> Result<()>;
    /// A user's history, newest first, each entry joined with its workout.
    async fn list_logs(&self, user_id: &str) -> Result<Vec<WorkoutLogEntry>>;
}

#[derive(Clone)]
pub struct WorkoutRepositoryImpl {
    connection: Connection,
}

impl WorkoutRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<WorkoutRow> = sqlx::query_as("SELECT * FROM workouts ORDER BY name")
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter().map(Workout::try_from).collect()
    }

    async fn get_workout(&self, id: &str) -> Result<Option<Workout>> {
        let mut conn = self.connection.lock().await;
        let row: Option<WorkoutRow> = sqlx::query_as("SELECT * FROM workouts WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.map(Workout::try_from).transpose()
    }

    async fn insert_workout(&self, workout: &Workout) -> Result<()> {
        let exercises = serde_json::to_string(&workout.exercises)
            .map_err(|e| corrupt("workouts", &workout.id, e))?;

        let mut conn = self.connection.lock().await;
        debug!("Storing workout {}", workout.name);
        sqlx::query(
            "INSERT INTO workouts (
                id, name, description, duration, difficulty, body_part, calories_burned, exercises
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&workout.id)
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.duration)
        .bind(&workout.difficulty)
        .bind(&workout.body_part)
        .bind(workout.calories_burned)
        .bind(exercises)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn insert_log(&self, log: &WorkoutLog) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Storing workout log {} for user {}", log.id, log.user_id);
        sqlx::query(
            "INSERT INTO user_workouts (
                id, user_id, workout_id, completion_time, calories_burned, date
            ) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&log.id)
        .bind(&log.user_id)
        .bind(&log.workout_id)
        .bind(log.completion_time)
        .bind(log.calories_burned)
        .bind(log.date)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn list_logs(&self, user_id: &str) -> Result<Vec<WorkoutLogEntry>> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<WorkoutLogRow> = sqlx::query_as(
            "SELECT uw.id, uw.user_id, uw.workout_id, uw.completion_time, uw.calories_burned,
                uw.date, w.name AS w_name, w.description AS w_description,
                w.duration AS w_duration, w.difficulty AS w_difficulty,
                w.body_part AS w_body_part, w.calories_burned AS w_calories_burned,
                w.exercises AS w_exercises
            FROM user_workouts uw
            JOIN workouts w ON w.id = uw.workout_id
            WHERE uw.user_id = ?
            ORDER BY uw.date DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter().map(WorkoutLogEntry::try_from).collect()
    }
}
