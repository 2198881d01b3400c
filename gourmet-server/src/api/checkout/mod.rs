//! Checkout API 模块
//!
//! 计算小票后开始新订单；不处理支付。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sessions/{id}/checkout", post(handler::checkout))
}
