//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu`] - 菜单查询
//! - [`sessions`] - 会话管理
//! - [`cart`] - 购物车直接操作
//! - [`chat`] - 点单助手对话
//! - [`analysis`] - 订单分析
//! - [`checkout`] - 结账

pub mod analysis;
pub mod cart;
pub mod chat;
pub mod checkout;
pub mod health;
pub mod menu;
pub mod sessions;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// 构建完整的 axum 应用 (已绑定状态)
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(sessions::router())
        .merge(cart::router())
        .merge(chat::router())
        .merge(analysis::router())
        .merge(checkout::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}

/// 路径中的会话 ID；无法解析时视为会话不存在
pub(crate) fn parse_session_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::session_not_found(raw))
}
