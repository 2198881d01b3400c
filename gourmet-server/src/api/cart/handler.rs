//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::CartSnapshot;

use crate::api::parse_session_id;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub item_id: String,
    /// 默认 1
    pub quantity: Option<u32>,
}

/// GET /api/sessions/:id/cart - 购物车快照
pub async fn get_cart(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CartSnapshot>> {
    let id = parse_session_id(&id)?;
    let session = state.sessions.lock(id).await?;
    Ok(Json(session.cart.snapshot()))
}

/// POST /api/sessions/:id/cart/items - 加入菜品
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<CartSnapshot>> {
    let id = parse_session_id(&id)?;
    let item = state
        .catalog
        .get(&payload.item_id)
        .ok_or_else(|| AppError::menu_item_not_found(payload.item_id.clone()))?;

    let mut session = state.sessions.try_lock(id)?;
    let quantity = session
        .cart
        .add_item(item, payload.quantity.unwrap_or(1))?;
    session.touch();
    tracing::debug!(session_id = %id, item = %item.name, quantity, "Cart item added");

    Ok(Json(session.cart.snapshot()))
}

/// DELETE /api/sessions/:id/cart/items/:item_id - 减少一份
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<CartSnapshot>> {
    let id = parse_session_id(&id)?;
    let mut session = state.sessions.try_lock(id)?;
    let remaining = session.cart.remove_one(&item_id)?;
    session.touch();
    tracing::debug!(session_id = %id, item_id = %item_id, remaining, "Cart item decremented");

    Ok(Json(session.cart.snapshot()))
}
