//! Chat API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::chat::{ChatRequest, ConversationMessage};

use crate::api::parse_session_id;
use crate::assistant::{TurnOutcome, greeting};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/sessions/:id/chat/open - 打开助手
///
/// 对话为空时追加一次问候语，返回可见对话记录。
pub async fn open(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ConversationMessage>>> {
    let id = parse_session_id(&id)?;
    let mut session = state.sessions.try_lock(id)?;
    if session.transcript.is_empty() {
        let text = greeting(&session.cart.snapshot());
        session.transcript.push(ConversationMessage::assistant(text));
        session.touch();
    }
    Ok(Json(session.visible_transcript()))
}

/// POST /api/sessions/:id/chat - 一轮对话
pub async fn send_message(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ChatRequest>,
) -> AppResult<Json<TurnOutcome>> {
    let id = parse_session_id(&id)?;
    if payload.message.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmptyMessage));
    }

    // 整轮持锁 (包括等待模型回复)
    let mut session = state.sessions.try_lock(id)?;
    let outcome = state
        .assistant
        .handle_turn(&mut session, &payload.message)
        .await;
    Ok(Json(outcome))
}

/// GET /api/sessions/:id/chat - 可见对话记录
pub async fn transcript(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ConversationMessage>>> {
    let id = parse_session_id(&id)?;
    let session = state.sessions.lock(id).await?;
    Ok(Json(session.visible_transcript()))
}
