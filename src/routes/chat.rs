// src/routes/chat.rs
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    message::{ChatContext, ChatRequest, ChatResponse, RegistrationChatResponse},
    services::assistant::TurnOutcome,
    state::SharedState,
};

const MAX_LOGGED_CHARS: usize = 120;

/// The trimmed message plus the parsed body, or a validation error naming the bad field.
fn validate(
    payload: Result<Json<ChatRequest>, JsonRejection>,
    route_context: ChatContext,
) -> AppResult<(String, ChatRequest)> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::validation("body", format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::validation("message", "Field 'message' is required and cannot be empty"))?
        .to_string();

    if let Some(tag) = request.context.as_deref() {
        if tag != route_context.as_str() {
            debug!(requested = %tag, served = %route_context, "Context tag overridden by route");
        }
    }

    Ok((message, request))
}

async fn run_turn(
    state: &SharedState,
    context: ChatContext,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<TurnOutcome> {
    let (message, request) = validate(payload, context)?;
    let preview: String = message.chars().take(MAX_LOGGED_CHARS).collect();
    info!(context = %context, history = request.conversation_history.len(), "Chat query: {}", preview);

    state
        .assistant
        .respond(
            context,
            &message,
            request.user_data.as_ref(),
            &request.conversation_history,
        )
        .await
}

fn chat_response(outcome: TurnOutcome, context: ChatContext) -> ChatResponse {
    ChatResponse {
        response: outcome.response,
        context,
        suggestions: outcome.suggestions,
        source: outcome.source,
        timestamp: Utc::now(),
    }
}

pub async fn landing_chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let outcome = run_turn(&state, ChatContext::Landing, payload).await?;
    Ok(Json(chat_response(outcome, ChatContext::Landing)))
}

pub async fn registration_chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<RegistrationChatResponse>> {
    let mut outcome = run_turn(&state, ChatContext::Registration, payload).await?;
    let field_updates = std::mem::take(&mut outcome.field_updates);
    if !field_updates.is_empty() {
        debug!(?field_updates, "Extracted registration fields");
    }

    Ok(Json(RegistrationChatResponse {
        chat: chat_response(outcome, ChatContext::Registration),
        field_updates,
    }))
}
