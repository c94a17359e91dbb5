//! 재무제표 라우트 (`/api/v1/financials`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use savvy_data::storage::models::{BalanceSheet, CashFlowStatement, IncomeStatement};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{data_error, ApiResult};
use crate::query::{clamp_limit, normalize_symbol, DEFAULT_LIST_LIMIT};
use crate::repository::FinancialsRepository;
use crate::state::AppState;

/// 재무제표 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StatementQuery {
    /// 보고 기간 (FY, Q1..Q4)
    pub period: Option<String>,
    pub limit: Option<i64>,
}

impl StatementQuery {
    fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT)
    }
}

async fn income_statements(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StatementQuery>,
) -> ApiResult<Json<Vec<IncomeStatement>>> {
    let rows = FinancialsRepository::income_statements(
        state.pool()?,
        &normalize_symbol(&symbol),
        query.period.as_deref(),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn balance_sheets(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StatementQuery>,
) -> ApiResult<Json<Vec<BalanceSheet>>> {
    let rows = FinancialsRepository::balance_sheets(
        state.pool()?,
        &normalize_symbol(&symbol),
        query.period.as_deref(),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn cash_flow_statements(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StatementQuery>,
) -> ApiResult<Json<Vec<CashFlowStatement>>> {
    let rows = FinancialsRepository::cash_flow_statements(
        state.pool()?,
        &normalize_symbol(&symbol),
        query.period.as_deref(),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

pub fn financials_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/income-statements/{symbol}", get(income_statements))
        .route("/balance-sheets/{symbol}", get(balance_sheets))
        .route("/cash-flow-statements/{symbol}", get(cash_flow_statements))
}
