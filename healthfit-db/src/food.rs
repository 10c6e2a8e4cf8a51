use async_trait::async_trait;
use healthfit_model::meal::Food;
use log::debug;

use crate::{connection::Connection, Result};

#[derive(sqlx::FromRow)]
struct FoodRow {
    id: String,
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    serving_size: String,
    category: String,
    health_score: i32,
}

impl From<FoodRow> for Food {
    fn from(row: FoodRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            calories: row.calories,
            protein: row.protein,
            carbs: row.carbs,
            fats: row.fats,
            serving_size: row.serving_size,
            category: row.category,
            health_score: row.health_score,
        }
    }
}

#[mockall::automock]
#[async_trait]
pub trait FoodRepository: Send + Sync {
    async fn list_foods(&self, category: Option<String>) -> Result<Vec<Food>>;
    async fn get_food(&self, id: &str) -> Result<Option<Food>>;
    async fn insert_food(&self, food: &Food) -> Result<()>;
}

#[derive(Clone)]
pub struct FoodRepositoryImpl {
    connection: Connection,
}

impl FoodRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl FoodRepository for FoodRepositoryImpl {
    async fn list_foods(&self, category: Option<String>) -> Result<Vec<Food>> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<FoodRow> = match category {
            Some(category) => {
                sqlx::query_as("SELECT * FROM foods WHERE category = ? ORDER BY name")
                    .bind(category)
                    .fetch_all(&mut *conn)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM foods ORDER BY name")
                    .fetch_all(&mut *conn)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Food::from).collect())
    }

    async fn get_food(&self, id: &str) -> Result<Option<Food>> {
        let mut conn = self.connection.lock().await;
        let row: Option<FoodRow> = sqlx::query_as("SELECT * FROM foods WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(Food::from))
    }

    async fn insert_food(&self, food: &Food) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Storing food {}", food.name);
        sqlx::query(
            "INSERT INTO foods (
                id, name, calories, protein, carbs, fats, serving_size, category, health_score
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&food.id)
        .bind(&food.name)
        .bind(food.calories)
        .bind(food.protein)
        .bind(food.carbs)
        .bind(food.fats)
        .bind(&food.serving_size)
        .bind(&food.category)
        .bind(food.health_score)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
