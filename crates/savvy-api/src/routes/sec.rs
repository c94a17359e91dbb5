//! SEC 공시 라우트 (`/api/v1/sec`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use savvy_data::storage::models::SecFiling;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{data_error, ApiResult};
use crate::query::{clamp_limit, normalize_symbol, DEFAULT_LIST_LIMIT};
use crate::repository::SecFilingRepository;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FilingQuery {
    /// 공시 양식 (예: 10-K)
    pub form_type: Option<String>,
    pub limit: Option<i64>,
}

impl FilingQuery {
    fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT)
    }
}

async fn filings_by_symbol(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<FilingQuery>,
) -> ApiResult<Json<Vec<SecFiling>>> {
    let rows = SecFilingRepository::by_symbol(
        state.pool()?,
        &normalize_symbol(&symbol),
        query.form_type.as_deref(),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn filings_by_cik(
    State(state): State<Arc<AppState>>,
    Path(cik): Path<String>,
    Query(query): Query<FilingQuery>,
) -> ApiResult<Json<Vec<SecFiling>>> {
    let rows = SecFilingRepository::by_cik(
        state.pool()?,
        cik.trim(),
        query.form_type.as_deref(),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn filings_by_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<FilingQuery>,
) -> ApiResult<Json<Vec<SecFiling>>> {
    let rows = SecFilingRepository::by_date(
        state.pool()?,
        date,
        query.form_type.as_deref(),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

pub fn sec_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/filings/{symbol}", get(filings_by_symbol))
        .route("/filings/cik/{cik}", get(filings_by_cik))
        .route("/filings/by-date/{date}", get(filings_by_date))
}
