#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    dev::ServiceResponse,
    test::{self, TestRequest},
    web, App,
};
use chrono::{TimeZone, Utc};
use healthfit_api::state::AppState;
use healthfit_client::{Error, Identity, MockCompletionProvider, MockIdentityProvider};
use healthfit_db::{
    chat::MockChatRepository, food::MockFoodRepository, meal::MockMealRepository,
    metric::MockMetricRepository, user::MockUserRepository, workout::MockWorkoutRepository,
};
use healthfit_model::{
    profile::{ActivityLevel, Goal, Sex},
    user::User,
};

pub const TOKEN: &str = "valid-token";

pub fn identity() -> Identity {
    Identity {
        id: "auth-1".to_owned(),
        email: Some("ada@example.com".to_owned()),
    }
}

/// A fully onboarded profile for `identity()`.
pub fn stored_user() -> User {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    User {
        id: "user-1".to_owned(),
        auth_id: "auth-1".to_owned(),
        email: "ada@example.com".to_owned(),
        name: "Ada".to_owned(),
        age: Some(30),
        weight: Some(70.0),
        height: Some(175.0),
        sex: Some(Sex::Male),
        goal: Some(Goal::LoseWeight),
        activity_level: ActivityLevel::Sedentary,
        target_weight: Some(65.0),
        bmi: Some(22.9),
        bmr: Some(1649),
        tdee: Some(1979),
        target_calories: Some(1479),
        protein: Some(129),
        carbs: Some(148),
        fats: Some(41),
        created_at: created,
        updated_at: created,
    }
}

pub struct Mocks {
    pub users: MockUserRepository,
    pub foods: MockFoodRepository,
    pub meals: MockMealRepository,
    pub metrics: MockMetricRepository,
    pub workouts: MockWorkoutRepository,
    pub chats: MockChatRepository,
    pub identity: MockIdentityProvider,
    pub coach: MockCompletionProvider,
}

impl Mocks {
    pub fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            foods: MockFoodRepository::new(),
            meals: MockMealRepository::new(),
            metrics: MockMetricRepository::new(),
            workouts: MockWorkoutRepository::new(),
            chats: MockChatRepository::new(),
            identity: MockIdentityProvider::new(),
            coach: MockCompletionProvider::new(),
        }
    }

    /// `TOKEN` resolves to `identity`, any other token is rejected.
    pub fn signed_in(identity: Identity) -> Self {
        let mut mocks = Self::new();
        mocks.identity.expect_get_user().returning(move |token| {
            if token == TOKEN {
                Ok(identity.clone())
            } else {
                Err(Error::RequestError)
            }
        });
        mocks
    }

    /// Signed in as `identity()` with `stored_user()` on file.
    pub fn onboarded() -> Self {
        let mut mocks = Self::signed_in(identity());
        mocks
            .users
            .expect_find_by_auth_id()
            .returning(|_| Ok(Some(stored_user())));
        mocks
    }

    pub fn into_state(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            users: Arc::new(self.users),
            foods: Arc::new(self.foods),
            meals: Arc::new(self.meals),
            metrics: Arc::new(self.metrics),
            workouts: Arc::new(self.workouts),
            chats: Arc::new(self.chats),
            identity: Arc::new(self.identity),
            coach: Arc::new(self.coach),
        })
    }
}

pub fn authorized(request: TestRequest) -> TestRequest {
    request.insert_header(("Authorization", format!("Bearer {}", TOKEN)))
}

pub async fn call(mocks: Mocks, request: TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(mocks.into_state())
            .configure(healthfit_api::configure)
            .default_service(web::to(healthfit_api::not_found)),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

pub async fn call_json(mocks: Mocks, request: TestRequest) -> (u16, serde_json::Value) {
    let response = call(mocks, request).await;
    let status = response.status().as_u16();
    let body = test::read_body_json(response).await;
    (status, body)
}
