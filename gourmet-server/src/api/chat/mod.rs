//! Chat API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/sessions/{id}/chat/open | POST | 打开助手 (首次追加问候语) |
//! | /api/sessions/{id}/chat | POST | 一轮对话 |
//! | /api/sessions/{id}/chat | GET | 可见对话记录 |
//!
//! 同一会话同时只允许一轮对话，第二个请求返回 409。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sessions/{id}/chat", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::transcript).post(handler::send_message))
        .route("/open", post(handler::open))
}
