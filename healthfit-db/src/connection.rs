use std::{env, str::FromStr, sync::Arc};

use dotenv::dotenv;
use log::debug;
use sqlx::{sqlite::SqliteConnectOptions, Connection as SqlxConnection, SqliteConnection};
use tokio::sync::{Mutex, MutexGuard};

use crate::{schema::SCHEMA, Error, Result};

const SETUP_QUERY: &str = "PRAGMA mmap_size = 30000000000;
PRAGMA cache_size = -1000;
PRAGMA page_size = 4096;
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;";

#[derive(Clone)]
pub struct Connection {
    inner: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    pub async fn establish() -> Result<Self> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").map_err(|_| Error::MissingDatabaseUrl)?;
        Self::open(&database_url).await
    }

    pub async fn open(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut connection = SqliteConnection::connect_with(&options).await?;

        sqlx::raw_sql(SETUP_QUERY).execute(&mut connection).await?;
        debug!("Applying schema");
        sqlx::raw_sql(SCHEMA).execute(&mut connection).await?;

        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.inner.lock().await
    }
}
