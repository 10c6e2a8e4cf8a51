use actix_web::{get, post, HttpResponse};
use serde_json::json;

use crate::auth::AuthenticatedUser;

#[get("/verify")]
pub async fn verify(caller: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "valid": true,
        "message": "Token is valid",
        "user": caller.0,
    }))
}

/// Sign-in happens against the identity provider directly, never through this API.
#[post("/login")]
pub async fn login() -> HttpResponse {
    HttpResponse::NotImplemented()
        .json(json!({ "message": "Please login via the Mobile App using Supabase." }))
}
