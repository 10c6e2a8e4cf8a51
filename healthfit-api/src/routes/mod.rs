use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::ApiError;

mod ai;
mod auth;
mod meals;
mod users;
mod workouts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(health)
    .service(
        web::scope("/api/users")
            .service(users::upsert_user)
            .service(users::get_user),
    )
    .service(
        web::scope("/api/meals")
            .service(meals::list_foods)
            .service(meals::get_food)
            .service(meals::update_water)
            .service(meals::daily_stats)
            .service(meals::log_meal)
            .service(meals::list_meals),
    )
    .service(
        web::scope("/api/workouts")
            .service(workouts::list_workouts)
            .service(workouts::log_workout)
            .service(workouts::workout_history)
            .service(workouts::get_workout),
    )
    .service(
        web::scope("/api/ai")
            .service(ai::chat)
            .service(ai::chat_history),
    )
    .service(
        web::scope("/api/auth")
            .service(auth::verify)
            .service(auth::login),
    );
}

#[actix_web::get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "message": "Server is running" }))
}

/// Fallback for every unmatched route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": { "message": "Route not found", "status": 404 }
    }))
}
