use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use healthfit_model::{
    meal::{DailyMetric, DailyStats, Meal, MealTotals, WaterAction},
    user::User,
};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::AuthenticatedUser,
    error::{internal, ApiError},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMealRequest {
    meal_type: Option<String>,
    food_items: Option<serde_json::Value>,
    #[serde(default)]
    total_calories: f64,
    #[serde(default)]
    total_protein: f64,
    #[serde(default)]
    total_carbs: f64,
    #[serde(default)]
    total_fats: f64,
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    amount: f64,
    #[serde(default)]
    action: WaterAction,
}

/// Meal, water and stats operations need an existing profile.
async fn existing_user(
    state: &AppState,
    caller: &AuthenticatedUser,
    message: &'static str,
) -> Result<User, ApiError> {
    state
        .users
        .find_by_auth_id(caller.auth_id())
        .await
        .map_err(internal(message))?
        .ok_or(ApiError::NotFound("User not found"))
}

#[get("/foods")]
pub async fn list_foods(
    state: web::Data<AppState>,
    query: web::Query<FoodQuery>,
) -> Result<HttpResponse, ApiError> {
    let foods = state
        .foods
        .list_foods(query.into_inner().category)
        .await
        .map_err(internal("Failed to fetch foods"))?;
    Ok(HttpResponse::Ok().json(foods))
}

#[get("/foods/{id}")]
pub async fn get_food(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let food = state
        .foods
        .get_food(&path)
        .await
        .map_err(internal("Failed to fetch food"))?
        .ok_or(ApiError::NotFound("Food not found"))?;
    Ok(HttpResponse::Ok().json(food))
}

#[post("")]
pub async fn log_meal(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    body: web::Json<LogMealRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = existing_user(&state, &caller, "Failed to log meal").await?;
    let body = body.into_inner();

    let meal_type = body
        .meal_type
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing mealType".to_owned()))?;
    let food_items = body
        .food_items
        .unwrap_or_else(|| json!([]))
        .to_string();

    let meal = Meal::new(
        user.id,
        meal_type,
        food_items,
        MealTotals {
            calories: body.total_calories,
            protein: body.total_protein,
            carbs: body.total_carbs,
            fats: body.total_fats,
        },
        body.date.unwrap_or_else(Utc::now),
    );

    debug!("Logging {} meal {}", meal.meal_type, meal.id);
    state
        .meals
        .insert_meal(&meal)
        .await
        .map_err(internal("Failed to log meal"))?;

    Ok(HttpResponse::Created().json(meal))
}

#[get("")]
pub async fn list_meals(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = existing_user(&state, &caller, "Failed to fetch meals").await?;
    let meals = state
        .meals
        .list_meals(&user.id, query.date)
        .await
        .map_err(internal("Failed to fetch meals"))?;
    Ok(HttpResponse::Ok().json(meals))
}

#[post("/water")]
pub async fn update_water(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    body: web::Json<WaterRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = existing_user(&state, &caller, "Failed to update water").await?;
    let today = Utc::now().date_naive();

    let seed = DailyMetric::new(
        user.id,
        today,
        user.weight.unwrap_or_default(),
        user.bmi.unwrap_or_default(),
    );

    let water_intake = state
        .metrics
        .record_water(&seed, body.amount, body.action)
        .await
        .map_err(internal("Failed to update water"))?;

    Ok(HttpResponse::Ok().json(json!({ "waterIntake": water_intake })))
}

#[get("/stats")]
pub async fn daily_stats(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = existing_user(&state, &caller, "Failed to fetch stats").await?;
    let day = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let metric = state
        .metrics
        .find_metric(&user.id, day)
        .await
        .map_err(internal("Failed to fetch stats"))?;

    Ok(HttpResponse::Ok().json(DailyStats::from(metric)))
}
