use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use healthfit_model::meal::Meal;
use log::debug;

use crate::{connection::Connection, Result};

#[derive(sqlx::FromRow)]
struct MealRow {
    id: String,
    user_id: String,
    meal_type: String,
    food_items: String,
    total_calories: f64,
    total_protein: f64,
    total_carbs: f64,
    total_fats: f64,
    date: DateTime<Utc>,
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            meal_type: row.meal_type,
            food_items: row.food_items,
            total_calories: row.total_calories,
            total_protein: row.total_protein,
            total_carbs: row.total_carbs,
            total_fats: row.total_fats,
            date: row.date,
        }
    }
}

/// Start of `day` and of the following day, both in UTC.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = start
        .checked_add_days(Days::new(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

#[mockall::automock]
#[async_trait]
pub trait MealRepository: Send + Sync {
    async fn insert_meal(&self, meal: &Meal) -> Result<()>;
    /// Meals of a user, newest first, optionally limited to one calendar day.
    async fn list_meals(&self, user_id: &str, day: Option<NaiveDate>) -> Result<Vec<Meal>>;
}

#[derive(Clone)]
pub struct MealRepositoryImpl {
    connection: Connection,
}

impl MealRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MealRepository for MealRepositoryImpl {
    async fn insert_meal(&self, meal: &Meal) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Storing meal {} for user {}", meal.id, meal.user_id);
        sqlx::query(
            "INSERT INTO meals (
                id, user_id, meal_type, food_items, total_calories, total_protein,
                total_carbs, total_fats, date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&meal.id)
        .bind(&meal.user_id)
        .bind(&meal.meal_type)
        .bind(&meal.food_items)
        .bind(meal.total_calories)
        .bind(meal.total_protein)
        .bind(meal.total_carbs)
        .bind(meal.total_fats)
        .bind(meal.date)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn list_meals(&self, user_id: &str, day: Option<NaiveDate>) -> Result<Vec<Meal>> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<MealRow> = match day {
            Some(day) => {
                let (start, end) = day_bounds(day);
                sqlx::query_as(
                    "SELECT * FROM meals WHERE user_id = ? AND date >= ? AND date < ?
                    ORDER BY date DESC",
                )
                .bind(user_id)
                .bind(start)
                .bind(end)
                .fetch_all(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM meals WHERE user_id = ? ORDER BY date DESC")
                    .bind(user_id)
                    .fetch_all(&mut *conn)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Meal::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use healthfit_model::meal::MealTotals;

    use super::*;
    use crate::test_utils::{memory_connection, stored_user};

    fn meal(user_id: &str, meal_type: &str, date: DateTime<Utc>) -> Meal {
        Meal::new(
            user_id.to_owned(),
            meal_type.to_owned(),
            r#"[{"name":"Banana"}]"#.to_owned(),
            MealTotals {
                calories: 105.0,
                protein: 1.0,
                carbs: 27.0,
                fats: 0.0,
            },
            date,
        )
    }

    #[tokio::test]
    async fn lists_newest_first_and_filters_by_day() {
        let connection = memory_connection().await;
        let user = stored_user(&connection).await;
        let repository = MealRepositoryImpl::new(connection);

        let breakfast = meal(&user.id, "breakfast", Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        let dinner = meal(&user.id, "dinner", Utc.with_ymd_and_hms(2024, 5, 1, 19, 30, 0).unwrap());
        let next_day = meal(&user.id, "lunch", Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());
        for m in [&breakfast, &dinner, &next_day] {
            repository.insert_meal(m).await.unwrap();
        }

        let all = repository.list_meals(&user.id, None).await.unwrap();
        assert_eq!(all, vec![next_day.clone(), dinner.clone(), breakfast.clone()]);

        let first_day = repository
            .list_meals(&user.id, NaiveDate::from_ymd_opt(2024, 5, 1))
            .await
            .unwrap();
        assert_eq!(first_day, vec![dinner, breakfast]);
    }

    #[test]
    fn day_bounds() {
        let (start, end) = super::day_bounds(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }
}
