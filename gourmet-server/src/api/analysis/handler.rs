//! Order analysis API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::advisor::{OrderAnalysis, analyze_order};
use crate::api::parse_session_id;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub people: Option<u32>,
    pub budget: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub analysis: OrderAnalysis,
    /// 可直接展示的文本版本
    pub text: String,
}

/// GET /api/sessions/:id/analysis - 订单分析
pub async fn analyze(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> AppResult<Json<AnalysisResponse>> {
    let id = parse_session_id(&id)?;
    if let Some(budget) = query.budget
        && !(budget.is_finite() && budget >= 0.0)
    {
        return Err(AppError::validation("budget must be a non-negative amount")
            .with_detail("budget", budget));
    }

    let (cart, party_size) = {
        let session = state.sessions.lock(id).await?;
        (session.cart.snapshot(), session.party_size)
    };

    let people = match query.people.or(party_size) {
        Some(0) => return Err(AppError::validation("people must be at least 1")),
        Some(people) => people,
        None => {
            return Err(AppError::validation(
                "people is required until the customer states a party size",
            ));
        }
    };

    let analysis = analyze_order(&cart, people, query.budget, &state.catalog);
    let text = analysis.render();
    Ok(Json(AnalysisResponse { analysis, text }))
}
