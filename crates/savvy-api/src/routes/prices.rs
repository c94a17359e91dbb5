//! 시세 라우트 (`/api/v1/prices`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use savvy_data::storage::models::{HistoricalPrice, IntradayPrice, Quote};
use std::sync::Arc;

use crate::error::{data_error, not_found, ApiResult};
use crate::query::{normalize_symbol, DateRangeQuery, ListQuery};
use crate::repository::PriceRepository;
use crate::state::AppState;

async fn quotes(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Quote>>> {
    let rows = PriceRepository::quotes(state.pool()?, &normalize_symbol(&symbol), query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn latest_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Quote>> {
    let symbol = normalize_symbol(&symbol);
    PriceRepository::latest_quote(state.pool()?, &symbol)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Quote not found for symbol: {}", symbol)))
}

async fn historical(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<HistoricalPrice>>> {
    range.validate()?;
    let rows = PriceRepository::historical(
        state.pool()?,
        &normalize_symbol(&symbol),
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn intraday(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<IntradayPrice>>> {
    range.validate()?;
    let rows = PriceRepository::intraday(
        state.pool()?,
        &normalize_symbol(&symbol),
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

pub fn prices_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes/{symbol}", get(quotes))
        .route("/quotes/{symbol}/latest", get(latest_quote))
        .route("/historical/{symbol}", get(historical))
        .route("/intraday/{symbol}", get(intraday))
}
