//! Session API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/sessions | POST | 创建会话 |
//! | /api/sessions/{id} | GET | 会话快照 |
//! | /api/sessions/{id} | DELETE | 删除会话 |
//! | /api/sessions/{id}/new-order | POST | 开始新订单 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sessions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/new-order", post(handler::new_order))
}
