//! 종목/분류 디렉터리 라우트 (`/api/v1/directory`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use savvy_data::storage::models::{
    Country, Exchange, FinancialStatementSymbol, Industry, Sector, StockSymbol, SymbolChange,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{data_error, not_found, ApiResult};
use crate::query::{clamp_limit, normalize_symbol, ListQuery, DEFAULT_LIST_LIMIT};
use crate::repository::DirectoryRepository;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SymbolQuery {
    /// 거래소 약칭 (예: NASDAQ)
    pub exchange: Option<String>,
    pub limit: Option<i64>,
}

async fn symbols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolQuery>,
) -> ApiResult<Json<Vec<StockSymbol>>> {
    let rows = DirectoryRepository::symbols(
        state.pool()?,
        query.exchange.as_deref(),
        clamp_limit(query.limit, DEFAULT_LIST_LIMIT),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn symbol(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<StockSymbol>> {
    let symbol = normalize_symbol(&symbol);
    DirectoryRepository::symbol(state.pool()?, &symbol)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Symbol not found: {}", symbol)))
}

async fn financial_statement_symbols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<FinancialStatementSymbol>>> {
    let rows = DirectoryRepository::financial_statement_symbols(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn financial_statement_symbol(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<FinancialStatementSymbol>> {
    let symbol = normalize_symbol(&symbol);
    DirectoryRepository::financial_statement_symbol(state.pool()?, &symbol)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Financial statement symbol not found: {}", symbol)))
}

async fn exchanges(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Exchange>>> {
    let rows = DirectoryRepository::exchanges(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn exchange_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Exchange>> {
    DirectoryRepository::exchange_by_name(state.pool()?, &name)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Exchange not found: {}", name)))
}

async fn exchange_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<Exchange>> {
    DirectoryRepository::exchange_by_code(state.pool()?, &code)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Exchange not found for code: {}", code)))
}

async fn sectors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Sector>>> {
    let rows = DirectoryRepository::sectors(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn sector(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Sector>> {
    DirectoryRepository::sector(state.pool()?, &name)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Sector not found: {}", name)))
}

async fn industries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Industry>>> {
    let rows = DirectoryRepository::industries(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn industry(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Industry>> {
    DirectoryRepository::industry(state.pool()?, &name)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Industry not found: {}", name)))
}

async fn countries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Country>>> {
    let rows = DirectoryRepository::countries(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Country>> {
    DirectoryRepository::country(state.pool()?, &name)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Country not found: {}", name)))
}

async fn symbol_changes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<SymbolChange>>> {
    let rows = DirectoryRepository::symbol_changes(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn changes_from(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Vec<SymbolChange>>> {
    let rows = DirectoryRepository::changes_from(state.pool()?, &normalize_symbol(&symbol))
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn changes_to(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Vec<SymbolChange>>> {
    let rows = DirectoryRepository::changes_to(state.pool()?, &normalize_symbol(&symbol))
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

pub fn directory_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/symbols", get(symbols))
        .route("/symbols/{symbol}", get(symbol))
        .route("/financial-statement-symbols", get(financial_statement_symbols))
        .route(
            "/financial-statement-symbols/{symbol}",
            get(financial_statement_symbol),
        )
        .route("/exchanges", get(exchanges))
        .route("/exchanges/by-name/{name}", get(exchange_by_name))
        .route("/exchanges/by-code/{code}", get(exchange_by_code))
        .route("/sectors", get(sectors))
        .route("/sectors/{sector}", get(sector))
        .route("/industries", get(industries))
        .route("/industries/{industry}", get(industry))
        .route("/countries", get(countries))
        .route("/countries/{country}", get(country))
        .route("/symbol-changes", get(symbol_changes))
        .route("/symbol-changes/old/{symbol}", get(changes_from))
        .route("/symbol-changes/new/{symbol}", get(changes_to))
}
