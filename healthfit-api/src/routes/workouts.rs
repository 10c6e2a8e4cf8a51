use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use healthfit_model::workout::WorkoutLog;
use log::debug;
use serde::Deserialize;

use crate::{
    auth::AuthenticatedUser,
    error::{internal, ApiError},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWorkoutRequest {
    workout_id: Option<String>,
    #[serde(default)]
    completion_time: i32,
    #[serde(default)]
    calories_burned: i32,
    date: Option<DateTime<Utc>>,
}

#[get("")]
pub async fn list_workouts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let workouts = state
        .workouts
        .list_workouts()
        .await
        .map_err(internal("Failed to fetch workouts"))?;
    Ok(HttpResponse::Ok().json(workouts))
}

#[get("/{id}")]
pub async fn get_workout(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let workout = state
        .workouts
        .get_workout(&path)
        .await
        .map_err(internal("Failed to fetch workout"))?
        .ok_or(ApiError::NotFound("Workout not found"))?;
    Ok(HttpResponse::Ok().json(workout))
}

#[post("/history")]
pub async fn log_workout(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    body: web::Json<LogWorkoutRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = caller
        .find_or_create(&state)
        .await
        .map_err(internal("Failed to log workout"))?
        .ok_or(ApiError::NotFound("User not found"))?;
    let body = body.into_inner();

    let workout_id = body
        .workout_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing workoutId".to_owned()))?;

    let workout = state
        .workouts
        .get_workout(&workout_id)
        .await
        .map_err(internal("Failed to log workout"))?
        .ok_or(ApiError::NotFound("Workout not found"))?;

    let log = WorkoutLog::new(
        user.id,
        workout.id,
        body.completion_time,
        body.calories_burned,
        body.date.unwrap_or_else(Utc::now),
    );

    debug!("Logging workout {} for user {}", log.workout_id, log.user_id);
    state
        .workouts
        .insert_log(&log)
        .await
        .map_err(internal("Failed to log workout"))?;

    Ok(HttpResponse::Created().json(log))
}

#[get("/history")]
pub async fn workout_history(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let Some(user) = caller
        .find_or_create(&state)
        .await
        .map_err(internal("Failed to fetch user workouts"))?
    else {
        return Ok(HttpResponse::Ok().json(Vec::<()>::new()));
    };

    let history = state
        .workouts
        .list_logs(&user.id)
        .await
        .map_err(internal("Failed to fetch user workouts"))?;
    Ok(HttpResponse::Ok().json(history))
}
