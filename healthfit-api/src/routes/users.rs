use actix_web::{get, post, web, HttpResponse};
use healthfit_calc::calculate_energy_profile;
use healthfit_model::{
    profile::{ActivityLevel, Goal, Sex, UnknownVariant},
    user::{ProfileUpdate, User, ONBOARDING_NAME},
};
use log::info;
use serde::Deserialize;

use crate::{
    auth::AuthenticatedUser,
    error::{internal, ApiError},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    auth_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    age: Option<u32>,
    weight: Option<f64>,
    height: Option<f64>,
    gender: Option<String>,
    goal: Option<String>,
    activity_level: Option<String>,
    target_weight: Option<f64>,
}

fn parse_optional<T>(
    value: Option<&str>,
    parse: fn(&str) -> Result<T, UnknownVariant>,
) -> Result<Option<T>, ApiError> {
    value
        .map(parse)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

impl ProfileRequest {
    fn into_parts(self) -> Result<(String, ProfileUpdate), ApiError> {
        let (Some(auth_id), Some(email)) = (
            self.auth_id.filter(|s| !s.is_empty()),
            self.email.filter(|s| !s.is_empty()),
        ) else {
            return Err(ApiError::BadRequest(
                "Missing required fields: authId, email".to_owned(),
            ));
        };

        let update = ProfileUpdate {
            email,
            name: self.name,
            age: self.age,
            weight: self.weight,
            height: self.height,
            sex: parse_optional(self.gender.as_deref(), Sex::parse)?,
            goal: parse_optional(self.goal.as_deref(), Goal::parse)?,
            activity_level: parse_optional(self.activity_level.as_deref(), ActivityLevel::parse)?,
            target_weight: self.target_weight,
        };

        Ok((auth_id, update))
    }
}

/// Recomputes the derived fields once every calculator input is known.
fn refresh_energy_profile(user: &mut User) -> Result<(), ApiError> {
    let energy = match (user.body_metrics(), user.goal) {
        (Some(metrics), Some(goal)) => Some(
            calculate_energy_profile(&metrics, user.activity_level, goal)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
        _ => None,
    };
    user.set_energy_profile(energy.as_ref());
    Ok(())
}

#[post("")]
pub async fn upsert_user(
    state: web::Data<AppState>,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let (auth_id, update) = body.into_inner().into_parts()?;

    let existing = state
        .users
        .find_by_auth_id(&auth_id)
        .await
        .map_err(internal("Failed to create/update user"))?;
    let mut user = existing.unwrap_or_else(|| {
        info!("Onboarding user {}", auth_id);
        User::new(
            auth_id.clone(),
            update.email.clone(),
            ONBOARDING_NAME.to_owned(),
        )
    });

    user.apply_update(update);
    refresh_energy_profile(&mut user)?;

    state
        .users
        .save(&user)
        .await
        .map_err(internal("Failed to create/update user"))?;

    Ok(HttpResponse::Ok().json(user))
}

#[get("/{auth_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if path.as_str() != caller.auth_id() {
        return Err(ApiError::Forbidden);
    }

    let user = caller
        .find_or_create(&state)
        .await
        .map_err(internal("Failed to fetch user"))?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ProfileRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn required_fields() {
        let test_data = [
            r#"{}"#,
            r#"{"authId":"auth-1"}"#,
            r#"{"email":"ada@example.com"}"#,
            r#"{"authId":"","email":"ada@example.com"}"#,
        ];

        for (i, json) in test_data.into_iter().enumerate() {
            let err = request(json).into_parts().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Missing required fields: authId, email",
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn categorical_fields_are_parsed() {
        let (auth_id, update) = request(
            r#"{"authId":"auth-1","email":"ada@example.com","gender":"female",
                "goal":"lose_weight","activityLevel":"very_active"}"#,
        )
        .into_parts()
        .unwrap();

        assert_eq!(auth_id, "auth-1");
        assert_eq!(update.sex, Some(Sex::Female));
        assert_eq!(update.goal, Some(Goal::LoseWeight));
        assert_eq!(update.activity_level, Some(ActivityLevel::VeryActive));
    }

    #[test]
    fn unknown_goal_is_rejected() {
        let err = request(r#"{"authId":"auth-1","email":"ada@example.com","goal":"get_fit"}"#)
            .into_parts()
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("get_fit"));
    }

    #[test]
    fn energy_profile_needs_every_input() {
        let mut user = User::new(
            "auth-1".to_owned(),
            "ada@example.com".to_owned(),
            ONBOARDING_NAME.to_owned(),
        );
        user.apply_update(ProfileUpdate {
            email: "ada@example.com".to_owned(),
            age: Some(30),
            weight: Some(70.0),
            height: Some(175.0),
            sex: Some(Sex::Male),
            ..Default::default()
        });
        refresh_energy_profile(&mut user).unwrap();
        assert_eq!(user.tdee, None);

        user.goal = Some(Goal::LoseWeight);
        refresh_energy_profile(&mut user).unwrap();
        assert_eq!(user.bmi, Some(22.9));
        assert_eq!(user.bmr, Some(1649));
        assert_eq!(user.tdee, Some(1979));
        assert_eq!(user.target_calories, Some(1479));
        assert_eq!(
            (user.protein, user.carbs, user.fats),
            (Some(129), Some(148), Some(41))
        );
    }

    #[test]
    fn calculator_errors_are_bad_requests() {
        let mut user = User::new(
            "auth-1".to_owned(),
            "ada@example.com".to_owned(),
            ONBOARDING_NAME.to_owned(),
        );
        user.apply_update(ProfileUpdate {
            email: "ada@example.com".to_owned(),
            age: Some(30),
            weight: Some(0.0),
            height: Some(175.0),
            sex: Some(Sex::Male),
            goal: Some(Goal::StayHealthy),
            ..Default::default()
        });
        assert!(matches!(
            refresh_energy_profile(&mut user),
            Err(ApiError::BadRequest(_))
        ));
    }
}
