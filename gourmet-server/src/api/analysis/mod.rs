//! Order analysis API 模块
//!
//! `GET /api/sessions/{id}/analysis?people=&budget=`
//!
//! 未传 `people` 时使用会话记住的人数；两者都没有时返回校验错误。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sessions/{id}/analysis", get(handler::analyze))
}
