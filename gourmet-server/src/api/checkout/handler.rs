//! Checkout API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use shared::models::Receipt;
use uuid::Uuid;

use crate::api::parse_session_id;
use crate::cart::Cart;
use crate::core::ServerState;
use crate::utils::money::{percentage_of, round_money, to_decimal, to_f64};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/sessions/:id/checkout - 结账并开始新订单
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Receipt>> {
    let id = parse_session_id(&id)?;
    let mut session = state.sessions.try_lock(id)?;

    let receipt = build_receipt(&session.cart, state.config.tax_rate_percent, Utc::now())?;
    session.start_new_order();

    tracing::info!(
        session_id = %id,
        order_number = %receipt.order_number,
        total = receipt.total,
        "Order checked out"
    );
    Ok(Json(receipt))
}

/// 小计 + 税 = 总计，均为 2 位小数 (四舍五入)
pub fn build_receipt(
    cart: &Cart,
    tax_rate_percent: f64,
    issued_at: DateTime<Utc>,
) -> AppResult<Receipt> {
    if cart.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let snapshot = cart.snapshot();
    let subtotal = round_money(cart.total());
    let tax = percentage_of(subtotal, to_decimal(tax_rate_percent));
    let total = subtotal + tax;

    Ok(Receipt {
        order_number: order_number(issued_at),
        lines: snapshot.lines,
        subtotal: to_f64(subtotal),
        tax_rate: tax_rate_percent,
        tax: to_f64(tax),
        total: to_f64(total),
        issued_at: issued_at.timestamp_millis(),
    })
}

/// GD-20240131-1A2B3C
fn order_number(issued_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    format!("GD-{}-{}", issued_at.format("%Y%m%d"), suffix)
}
