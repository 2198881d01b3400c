//! Session API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::ApiResponse;
use uuid::Uuid;

use crate::api::parse_session_id;
use crate::core::ServerState;
use crate::session::SessionView;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

/// POST /api/sessions - 创建会话 (空购物车、空对话)
pub async fn create(State(state): State<ServerState>) -> Json<SessionCreated> {
    let id = state.sessions.create();
    Json(SessionCreated { id })
}

/// GET /api/sessions/:id - 会话快照
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionView>> {
    let id = parse_session_id(&id)?;
    let session = state.sessions.lock(id).await?;
    Ok(Json(session.view()))
}

/// DELETE /api/sessions/:id - 删除会话
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_session_id(&id)?;
    if !state.sessions.remove(id) {
        return Err(AppError::session_not_found(id));
    }
    Ok(Json(ApiResponse::ok()))
}

/// POST /api/sessions/:id/new-order - 清空购物车、对话和人数
pub async fn new_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionView>> {
    let id = parse_session_id(&id)?;
    let mut session = state.sessions.try_lock(id)?;
    session.start_new_order();
    tracing::info!(session_id = %id, "New order started");
    Ok(Json(session.view()))
}
