//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{MenuCategory, MenuItem};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/menu - 按分类分组的完整菜单
pub async fn list(State(state): State<ServerState>) -> Json<Vec<MenuCategory>> {
    Json(state.catalog.categories().to_vec())
}

/// GET /api/menu/items/:id - 单个菜品 (含配料/过敏原信息)
pub async fn get_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::menu_item_not_found(id))?;
    Ok(Json(item))
}
