pub mod chat;
pub mod connection;
pub mod food;
pub mod meal;
pub mod metric;
mod schema;
pub mod user;
pub mod workout;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt {table} row {id}: {reason}")]
    Corrupt {
        table: &'static str,
        id: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

fn corrupt(table: &'static str, id: &str, reason: impl ToString) -> Error {
    Error::Corrupt {
        table,
        id: id.to_owned(),
        reason: reason.to_string(),
    }
}
