//! 시장 성과 라우트 (`/api/v1/market`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use savvy_data::storage::models::{
    ActiveStock, IndustryPe, IndustryPerformance, SectorPe, SectorPerformance, StockGainer,
    StockLoser,
};
use std::sync::Arc;

use crate::error::{data_error, ApiResult};
use crate::query::DateRangeQuery;
use crate::repository::MarketRepository;
use crate::state::AppState;

async fn sector_performance(
    State(state): State<Arc<AppState>>,
    Path(sector): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<SectorPerformance>>> {
    range.validate()?;
    let rows = MarketRepository::sector_performance(
        state.pool()?,
        &sector,
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn industry_performance(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<IndustryPerformance>>> {
    range.validate()?;
    let rows = MarketRepository::industry_performance(
        state.pool()?,
        &industry,
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn sector_pe(
    State(state): State<Arc<AppState>>,
    Path(sector): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<SectorPe>>> {
    range.validate()?;
    let rows = MarketRepository::sector_pe(
        state.pool()?,
        &sector,
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn industry_pe(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<IndustryPe>>> {
    range.validate()?;
    let rows = MarketRepository::industry_pe(
        state.pool()?,
        &industry,
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn gainers(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<Vec<StockGainer>>> {
    let rows = MarketRepository::gainers(state.pool()?, date)
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn losers(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<Vec<StockLoser>>> {
    let rows = MarketRepository::losers(state.pool()?, date)
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn actives(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<Vec<ActiveStock>>> {
    let rows = MarketRepository::actives(state.pool()?, date)
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

pub fn market_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sector-performance/{sector}", get(sector_performance))
        .route("/industry-performance/{industry}", get(industry_performance))
        .route("/sector-pe/{sector}", get(sector_pe))
        .route("/industry-pe/{industry}", get(industry_pe))
        .route("/gainers/{date}", get(gainers))
        .route("/losers/{date}", get(losers))
        .route("/actives/{date}", get(actives))
}
