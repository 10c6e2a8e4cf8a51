use async_trait::async_trait;
use chrono::NaiveDate;
use healthfit_model::meal::{DailyMetric, WaterAction};
use log::debug;

use crate::{connection::Connection, Result};

#[derive(sqlx::FromRow)]
struct MetricRow {
    id: String,
    user_id: String,
    date: NaiveDate,
    weight: f64,
    bmi: f64,
    water_intake: f64,
    steps: i64,
}

impl From<MetricRow> for DailyMetric {
    fn from(row: MetricRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            weight: row.weight,
            bmi: row.bmi,
            water_intake: row.water_intake,
            steps: row.steps,
        }
    }
}

#[mockall::automock]
#[async_trait]
pub trait MetricRepository: Send + Sync {
    async fn find_metric(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyMetric>>;
    /// Adds to or sets the day's water intake in a single statement and returns
    /// the stored total. `seed` is inserted when the day has no metric yet.
    async fn record_water(
        &self,
        seed: &DailyMetric,
        amount: f64,
        action: WaterAction,
    ) -> Result<f64>;
}

#[derive(Clone)]
pub struct MetricRepositoryImpl {
    connection: Connection,
}

impl MetricRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MetricRepository for MetricRepositoryImpl {
    async fn find_metric(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyMetric>> {
        let mut conn = self.connection.lock().await;
        let row: Option<MetricRow> =
            sqlx::query_as("SELECT * FROM user_metrics WHERE user_id = ? AND date = ?")
                .bind(user_id)
                .bind(date)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(row.map(DailyMetric::from))
    }

    async fn record_water(
        &self,
        seed: &DailyMetric,
        amount: f64,
        action: WaterAction,
    ) -> Result<f64> {
        let mut conn = self.connection.lock().await;
        debug!(
            "Recording water ({}) for user {} on {}",
            action, seed.user_id, seed.date
        );
        let water_intake = sqlx::query_scalar(
            "INSERT INTO user_metrics (id, user_id, date, weight, bmi, water_intake, steps)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id, date) DO UPDATE SET water_intake = CASE ?
                WHEN 'add' THEN water_intake + excluded.water_intake
                ELSE excluded.water_intake
            END
            RETURNING water_intake",
        )
        .bind(&seed.id)
        .bind(&seed.user_id)
        .bind(seed.date)
        .bind(seed.weight)
        .bind(seed.bmi)
        .bind(amount)
        .bind(seed.steps)
        .bind(action.to_string())
        .fetch_one(&mut *conn)
        .await?;

        Ok(water_intake)
    }
}
