use async_trait::async_trait;
use chrono::{DateTime, Utc};
use healthfit_model::{
    profile::{ActivityLevel, Goal, Sex},
    user::User,
};
use log::debug;

use crate::{connection::Connection, corrupt, Result};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    auth_id: String,
    email: String,
    name: String,
    age: Option<i64>,
    weight: Option<f64>,
    height: Option<f64>,
    gender: Option<String>,
    goal: Option<String>,
    activity_level: String,
    target_weight: Option<f64>,
    bmi: Option<f64>,
    bmr: Option<i32>,
    tdee: Option<i32>,
    target_calories: Option<i32>,
    protein: Option<i32>,
    carbs: Option<i32>,
    fats: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = crate::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let age = row
            .age
            .map(u32::try_from)
            .transpose()
            .map_err(|e| corrupt("users", &row.id, e))?;
        let sex = row
            .gender
            .as_deref()
            .map(Sex::parse)
            .transpose()
            .map_err(|e| corrupt("users", &row.id, e))?;
        let goal = row
            .goal
            .as_deref()
            .map(Goal::parse)
            .transpose()
            .map_err(|e| corrupt("users", &row.id, e))?;
        let activity_level =
            ActivityLevel::parse(&row.activity_level).map_err(|e| corrupt("users", &row.id, e))?;

        Ok(User {
            id: row.id,
            auth_id: row.auth_id,
            email: row.email,
            name: row.name,
            age,
            weight: row.weight,
            height: row.height,
            sex,
            goal,
            activity_level,
            target_weight: row.target_weight,
            bmi: row.bmi,
            bmr: row.bmr,
            tdee: row.tdee,
            target_calories: row.target_calories,
            protein: row.protein,
            carbs: row.carbs,
            fats: row.fats,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_auth_id(&self, auth_id: &str) -> Result<Option<User>>;
    /// Inserts the user, or overwrites the stored profile with the same auth id.
    async fn save(&self, user: &User) -> Result<()>;
}

#[derive(Clone)]
pub struct UserRepositoryImpl {
    connection: Connection,
}

impl UserRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_auth_id(&self, auth_id: &str) -> Result<Option<User>> {
        let mut conn = self.connection.lock().await;
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE auth_id = ?")
            .bind(auth_id)
            .fetch_optional(&mut *conn)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn save(&self, user: &User) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Storing user {}", user.auth_id);
        sqlx::query(
            "INSERT INTO users (
                id, auth_id, email, name, age, weight, height, gender, goal, activity_level,
                target_weight, bmi, bmr, tdee, target_calories, protein, carbs, fats,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (auth_id) DO UPDATE SET
                email = excluded.email,
                name = excluded.name,
                age = excluded.age,
                weight = excluded.weight,
                height = excluded.height,
                gender = excluded.gender,
                goal = excluded.goal,
                activity_level = excluded.activity_level,
                target_weight = excluded.target_weight,
                bmi = excluded.bmi,
                bmr = excluded.bmr,
                tdee = excluded.tdee,
                target_calories = excluded.target_calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fats = excluded.fats,
                updated_at = excluded.updated_at",
        )
        .bind(&user.id)
        .bind(&user.auth_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.age.map(i64::from))
        .bind(user.weight)
        .bind(user.height)
        .bind(user.sex.map(|s| s.to_string()))
        .bind(user.goal.map(|g| g.to_string()))
        .bind(user.activity_level.to_string())
        .bind(user.target_weight)
        .bind(user.bmi)
        .bind(user.bmr)
        .bind(user.tdee)
        .bind(user.target_calories)
        .bind(user.protein)
        .bind(user.carbs)
        .bind(user.fats)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use healthfit_model::profile::{ActivityLevel, Goal, Sex};

    use super::*;
    use crate::test_utils::memory_connection;

    #[tokio::test]
    async fn missing_user_is_none() {
        let repository = UserRepositoryImpl::new(memory_connection().await);
        assert_eq!(repository.find_by_auth_id("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_update_by_auth_id() {
        let repository = UserRepositoryImpl::new(memory_connection().await);
        let mut user = User::new(
            "auth-1".to_owned(),
            "ada@example.com".to_owned(),
            "Ada".to_owned(),
        );
        repository.save(&user).await.unwrap();

        user.age = Some(30);
        user.weight = Some(70.0);
        user.height = Some(175.0);
        user.sex = Some(Sex::Female);
        user.goal = Some(Goal::StayHealthy);
        user.activity_level = ActivityLevel::ModeratelyActive;
        user.bmr = Some(1483);
        repository.save(&user).await.unwrap();

        let stored = repository.find_by_auth_id("auth-1").await.unwrap().unwrap();
        assert_eq!(stored.id, user.id);
        assert_eq!(stored.age, Some(30));
        assert_eq!(stored.sex, Some(Sex::Female));
        assert_eq!(stored.goal, Some(Goal::StayHealthy));
        assert_eq!(stored.activity_level, ActivityLevel::ModeratelyActive);
        assert_eq!(stored.bmr, Some(1483));
        assert_eq!(stored.tdee, None);
    }
}
