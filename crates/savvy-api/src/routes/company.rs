//! 벤더 기업 데이터 라우트 (`/api/v1/company`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use savvy_data::storage::models::{
    CompanyProfile, DelistedCompany, EmployeeCount, Executive, MarketCapitalization, SharesFloat,
};
use std::sync::Arc;

use crate::error::{data_error, not_found, ApiResult};
use crate::query::{clamp_limit, normalize_symbol, ListQuery};
use crate::repository::CompanyDataRepository;
use crate::state::AppState;

/// 프로필 목록 기본 건수.
const DEFAULT_PROFILE_LIMIT: i64 = 50;

async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<CompanyProfile>>> {
    let limit = clamp_limit(query.limit, DEFAULT_PROFILE_LIMIT);
    let profiles = CompanyDataRepository::list_profiles(state.pool()?, limit)
        .await
        .map_err(data_error)?;
    Ok(Json(profiles))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<CompanyProfile>> {
    let symbol = normalize_symbol(&symbol);
    CompanyDataRepository::get_profile(state.pool()?, &symbol)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Company profile not found for symbol: {}", symbol)))
}

async fn list_executives(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Vec<Executive>>> {
    let executives = CompanyDataRepository::executives(state.pool()?, &normalize_symbol(&symbol))
        .await
        .map_err(data_error)?;
    Ok(Json(executives))
}

async fn get_executive(
    State(state): State<Arc<AppState>>,
    Path((symbol, name)): Path<(String, String)>,
) -> ApiResult<Json<Executive>> {
    let symbol = normalize_symbol(&symbol);
    CompanyDataRepository::get_executive(state.pool()?, &symbol, &name)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Executive not found: {} at {}", name, symbol)))
}

async fn list_market_caps(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<MarketCapitalization>>> {
    let records =
        CompanyDataRepository::market_caps(state.pool()?, &normalize_symbol(&symbol), query.limit())
            .await
            .map_err(data_error)?;
    Ok(Json(records))
}

async fn get_market_cap(
    State(state): State<Arc<AppState>>,
    Path((symbol, date)): Path<(String, NaiveDate)>,
) -> ApiResult<Json<MarketCapitalization>> {
    let symbol = normalize_symbol(&symbol);
    CompanyDataRepository::get_market_cap(state.pool()?, &symbol, date)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| {
            not_found(format!(
                "Market capitalization not found for {} on {}",
                symbol, date
            ))
        })
}

async fn list_employee_counts(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<EmployeeCount>>> {
    let records = CompanyDataRepository::employee_counts(
        state.pool()?,
        &normalize_symbol(&symbol),
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(records))
}

async fn list_shares_float(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<SharesFloat>>> {
    let records =
        CompanyDataRepository::shares_float(state.pool()?, &normalize_symbol(&symbol), query.limit())
            .await
            .map_err(data_error)?;
    Ok(Json(records))
}

async fn list_delisted(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<DelistedCompany>>> {
    let records = CompanyDataRepository::list_delisted(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(records))
}

async fn get_delisted(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<DelistedCompany>> {
    let symbol = normalize_symbol(&symbol);
    CompanyDataRepository::get_delisted(state.pool()?, &symbol)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Delisted company not found for symbol: {}", symbol)))
}

pub fn company_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles/{symbol}", get(get_profile))
        .route("/executives/{symbol}", get(list_executives))
        .route("/executives/{symbol}/{name}", get(get_executive))
        .route("/market-cap/{symbol}", get(list_market_caps))
        .route("/market-cap/{symbol}/{date}", get(get_market_cap))
        .route("/employee-count/{symbol}", get(list_employee_counts))
        .route("/shares-float/{symbol}", get(list_shares_float))
        .route("/delisted", get(list_delisted))
        .route("/delisted/{symbol}", get(get_delisted))
}
