use async_trait::async_trait;
use chrono::{DateTime, Utc};
use healthfit_model::chat::{ChatMessage, ChatRole, ChatSession};
use log::debug;

use crate::{connection::Connection, corrupt, Result};

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: String,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SessionRow> for ChatSession {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: String,
    session_id: String,
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = crate::Error;

    fn try_from(row: MessageRow) -> Result<Self> {
        let role: ChatRole = row
            .role
            .parse()
            .map_err(|e| corrupt("chat_messages", &row.id, e))?;

        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            role,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[mockall::automock]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// The user's most recently updated session.
    async fn latest_session(&self, user_id: &str) -> Result<Option<ChatSession>>;
    async fn insert_session(&self, session: &ChatSession) -> Result<()>;
    async fn touch_session(&self, session_id: &str, updated_at: DateTime<Utc>) -> Result<()>;
    async fn insert_message(&self, message: &ChatMessage) -> Result<()>;
    /// Messages of a session, oldest first.
    async fn list_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>>;
}

#[derive(Clone)]
pub struct ChatRepositoryImpl {
    connection: Connection,
}

impl ChatRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ChatRepository for ChatRepositoryImpl {
    async fn latest_session(&self, user_id: &str) -> Result<Option<ChatSession>> {
        let mut conn = self.connection.lock().await;
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT * FROM chat_sessions WHERE user_id = ?
            ORDER BY updated_at DESC, rowid DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(ChatSession::from))
    }

    async fn insert_session(&self, session: &ChatSession) -> Result<()> {
        let mut conn = self.connection.lock().await;
        debug!("Opening chat session {} for user {}", session.id, session.user_id);
        sqlx::query(
            "INSERT INTO chat_sessions (id, user_id, title, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.title)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn touch_session(&self, session_id: &str, updated_at: DateTime<Utc>) -> Result<()> {
        let mut conn = self.connection.lock().await;
        sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(updated_at)
            .bind(session_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn insert_message(&self, message: &ChatMessage) -> Result<()> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO chat_messages (id, session_id, role, content, created_at)
            VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.id)
        .bind(&message.session_id)
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn list_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT * FROM chat_messages WHERE session_id = ? ORDER BY created_at, rowid",
        )
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter().map(ChatMessage::try_from).collect()
    }
}
