mod common;

use actix_web::test::TestRequest;
use chrono::{NaiveDate, Utc};
use common::{authorized, call_json, identity, Mocks};
use healthfit_model::meal::{DailyMetric, Food, WaterAction};
use serde_json::json;

fn apple() -> Food {
    Food {
        id: "apple".to_owned(),
        name: "Apple".to_owned(),
        calories: 95.0,
        protein: 0.5,
        carbs: 25.0,
        fats: 0.3,
        serving_size: "1 medium".to_owned(),
        category: "fruit".to_owned(),
        health_score: 9,
    }
}

#[actix_web::test]
async fn list_foods_by_category() {
    let test_data = [
        ("/api/meals/foods", None),
        ("/api/meals/foods?category=fruit", Some("fruit".to_owned())),
    ];

    for (i, (uri, category)) in test_data.into_iter().enumerate() {
        let mut mocks = Mocks::new();
        mocks
            .foods
            .expect_list_foods()
            .times(1)
            .returning(move |requested| {
                assert_eq!(requested, category);
                Ok(vec![apple()])
            });

        let (status, body) = call_json(mocks, TestRequest::get().uri(uri)).await;
        assert_eq!(status, 200, "Test case #{}", i);
        assert_eq!(body[0]["servingSize"], "1 medium", "Test case #{}", i);
        assert_eq!(body[0]["healthScore"], 9, "Test case #{}", i);
    }
}

#[actix_web::test]
async fn get_food() {
    let test_data = [
        ("apple", 200, json!("Apple")),
        ("durian", 404, json!(null)),
    ];

    for (i, (id, status, name)) in test_data.into_iter().enumerate() {
        let mut mocks = Mocks::new();
        mocks
            .foods
            .expect_get_food()
            .returning(|id| Ok((id == "apple").then(apple)));

        let (actual, body) = call_json(
            mocks,
            TestRequest::get().uri(&format!("/api/meals/foods/{}", id)),
        )
        .await;
        assert_eq!(actual, status, "Test case #{}", i);
        assert_eq!(body["name"], name, "Test case #{}", i);
    }
}

#[actix_web::test]
async fn food_lookup_failure_is_internal_error() {
    let mut mocks = Mocks::new();
    mocks
        .foods
        .expect_list_foods()
        .returning(|_| Err(healthfit_db::Error::MissingDatabaseUrl));

    let (status, body) = call_json(mocks, TestRequest::get().uri("/api/meals/foods")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Failed to fetch foods"}));
}

#[actix_web::test]
async fn log_meal_needs_profile() {
    let mut mocks = Mocks::signed_in(identity());
    mocks
        .users
        .expect_find_by_auth_id()
        .returning(|_| Ok(None));
    mocks.meals.expect_insert_meal().times(0);

    let (status, body) = call_json(
        mocks,
        authorized(TestRequest::post().uri("/api/meals")).set_json(json!({"mealType": "lunch"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[actix_web::test]
async fn log_meal() {
    let mut mocks = Mocks::onboarded();
    mocks.meals.expect_insert_meal().times(1).returning(|meal| {
        assert_eq!(meal.user_id, "user-1");
        assert_eq!(meal.food_items, r#"[{"foodId":"apple","quantity":2}]"#);
        assert_eq!(meal.total_calories, 190.0);
        Ok(())
    });

    let (status, body) = call_json(
        mocks,
        authorized(TestRequest::post().uri("/api/meals")).set_json(json!({
            "mealType": "breakfast",
            "foodItems": [{"foodId": "apple", "quantity": 2}],
            "totalCalories": 190,
            "totalProtein": 1,
            "totalCarbs": 50,
            "totalFats": 0.6,
            "date": "2024-05-01T08:30:00Z"
        })),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(body["mealType"], "breakfast");
    assert_eq!(body["date"], "2024-05-01T08:30:00Z");
}

#[actix_web::test]
async fn log_meal_requires_meal_type() {
    let (status, body) = call_json(
        Mocks::onboarded(),
        authorized(TestRequest::post().uri("/api/meals")).set_json(json!({"totalCalories": 95})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Missing mealType"}));
}

#[actix_web::test]
async fn list_meals_for_day() {
    let test_data = [
        ("/api/meals", None),
        (
            "/api/meals?date=2024-05-01",
            NaiveDate::from_ymd_opt(2024, 5, 1),
        ),
    ];

    for (i, (uri, day)) in test_data.into_iter().enumerate() {
        let mut mocks = Mocks::onboarded();
        mocks
            .meals
            .expect_list_meals()
            .times(1)
            .returning(move |user_id, requested| {
                assert_eq!(user_id, "user-1");
                assert_eq!(requested, day);
                Ok(vec![])
            });

        let (status, body) = call_json(mocks, authorized(TestRequest::get().uri(uri))).await;
        assert_eq!(status, 200, "Test case #{}", i);
        assert_eq!(body, json!([]), "Test case #{}", i);
    }
}

#[actix_web::test]
async fn malformed_date_is_bad_request() {
    let (status, body) = call_json(
        Mocks::onboarded(),
        authorized(TestRequest::get().uri("/api/meals?date=yesterday")),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn water_add_and_set() {
    let today = Utc::now().date_naive();
    let test_data = [
        (json!({"amount": 250}), 250.0, WaterAction::Add, 250.0),
        (json!({"amount": 250, "action": "add"}), 250.0, WaterAction::Add, 750.0),
        (json!({"amount": 2000, "action": "set"}), 2000.0, WaterAction::Set, 2000.0),
    ];

    for (i, (request, amount, action, stored)) in test_data.into_iter().enumerate() {
        let mut mocks = Mocks::onboarded();
        mocks
            .metrics
            .expect_record_water()
            .times(1)
            .returning(move |seed, got_amount, got_action| {
                assert_eq!(seed.date, today);
                assert_eq!((seed.weight, seed.bmi), (70.0, 22.9));
                assert_eq!(seed.water_intake, 0.0);
                assert_eq!((got_amount, got_action), (amount, action));
                Ok(stored)
            });

        let (status, body) = call_json(
            mocks,
            authorized(TestRequest::post().uri("/api/meals/water")).set_json(request),
        )
        .await;
        assert_eq!(status, 200, "Test case #{}", i);
        assert_eq!(body, json!({"waterIntake": stored}), "Test case #{}", i);
    }
}

#[actix_web::test]
async fn daily_stats() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let test_data = [
        (None, json!({"waterIntake": 0.0, "weight": 0.0, "steps": 0})),
        (
            Some(1200.0),
            json!({"waterIntake": 1200.0, "weight": 70.0, "steps": 0}),
        ),
    ];

    for (i, (water, expected)) in test_data.into_iter().enumerate() {
        let mut mocks = Mocks::onboarded();
        mocks
            .metrics
            .expect_find_metric()
            .returning(move |user_id, date| {
                assert_eq!(date, day);
                Ok(water.map(|water| {
                    let mut metric = DailyMetric::new(user_id.to_owned(), date, 70.0, 22.9);
                    metric.water_intake = water;
                    metric
                }))
            });

        let (status, body) = call_json(
            mocks,
            authorized(TestRequest::get().uri("/api/meals/stats?date=2024-05-01")),
        )
        .await;
        assert_eq!(status, 200, "Test case #{}", i);
        assert_eq!(body, expected, "Test case #{}", i);
    }
}
