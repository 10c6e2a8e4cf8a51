use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use healthfit_model::chat::{ChatMessage, ChatRole, ChatSession, DEFAULT_SESSION_TITLE};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::AuthenticatedUser,
    coach,
    error::{internal, ApiError},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    prompt: Option<String>,
}

#[post("/chat")]
pub async fn chat(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    const FAILURE: &str = "Failed to chat with AI";

    let user = caller
        .find_or_create(&state)
        .await
        .map_err(internal(FAILURE))?
        .ok_or(ApiError::NotFound("User not found"))?;

    let prompt = body
        .into_inner()
        .prompt
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Prompt is required".to_owned()))?;

    let session = match state
        .chats
        .latest_session(&user.id)
        .await
        .map_err(internal(FAILURE))?
    {
        Some(session) => session,
        None => {
            let session = ChatSession::new(user.id.clone(), DEFAULT_SESSION_TITLE.to_owned());
            state
                .chats
                .insert_session(&session)
                .await
                .map_err(internal(FAILURE))?;
            session
        }
    };

    let question = ChatMessage::new(session.id.clone(), ChatRole::User, prompt.clone());
    state
        .chats
        .insert_message(&question)
        .await
        .map_err(internal(FAILURE))?;

    debug!("Asking coach in session {}", session.id);
    let advice = coach::advise(state.coach.as_ref(), &prompt).await;

    let answer = ChatMessage::new(session.id.clone(), ChatRole::Assistant, advice.clone());
    state
        .chats
        .insert_message(&answer)
        .await
        .map_err(internal(FAILURE))?;
    state
        .chats
        .touch_session(&session.id, Utc::now())
        .await
        .map_err(internal(FAILURE))?;

    Ok(HttpResponse::Ok().json(json!({ "advice": advice })))
}

#[get("/history")]
pub async fn chat_history(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    const FAILURE: &str = "Failed to fetch chat history";

    let user = caller
        .find_or_create(&state)
        .await
        .map_err(internal(FAILURE))?
        .ok_or(ApiError::NotFound("User not found"))?;

    let Some(session) = state
        .chats
        .latest_session(&user.id)
        .await
        .map_err(internal(FAILURE))?
    else {
        return Ok(HttpResponse::Ok().json(Vec::<ChatMessage>::new()));
    };

    let messages = state
        .chats
        .list_messages(&session.id)
        .await
        .map_err(internal(FAILURE))?;
    Ok(HttpResponse::Ok().json(messages))
}
