//! 거시경제 라우트 (`/api/v1/economics`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use savvy_data::storage::models::{
    EconomicCalendarEvent, EconomicIndicator, MarketRiskPremium, TreasuryRate,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{data_error, not_found, ApiResult};
use crate::query::{clamp_limit, validate_range, DateRangeQuery, ListQuery, DEFAULT_LIST_LIMIT};
use crate::repository::{EconomicsRepository, IndicatorFilter};
use crate::state::AppState;

/// 경제 지표/일정 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EconomicsQuery {
    /// 지표 이름 (예: GDP)
    pub name: Option<String>,
    pub country: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

async fn treasury_rates(
    State(state): State<Arc<AppState>>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<TreasuryRate>>> {
    range.validate()?;
    let rows = EconomicsRepository::treasury_rates(
        state.pool()?,
        range.from_date,
        range.to_date,
        range.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn treasury_rate(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<TreasuryRate>> {
    EconomicsRepository::treasury_rate(state.pool()?, date)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Treasury rate not found for date: {}", date)))
}

async fn indicators(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EconomicsQuery>,
) -> ApiResult<Json<Vec<EconomicIndicator>>> {
    validate_range(query.from_date, query.to_date)?;
    let limit = clamp_limit(query.limit, DEFAULT_LIST_LIMIT);
    let filter = IndicatorFilter {
        name: query.name,
        country: query.country,
        from: query.from_date,
        to: query.to_date,
    };
    let rows = EconomicsRepository::indicators(state.pool()?, &filter, limit)
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EconomicsQuery>,
) -> ApiResult<Json<Vec<EconomicCalendarEvent>>> {
    validate_range(query.from_date, query.to_date)?;
    let rows = EconomicsRepository::calendar(
        state.pool()?,
        query.country.as_deref(),
        query.from_date,
        query.to_date,
        clamp_limit(query.limit, DEFAULT_LIST_LIMIT),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn risk_premiums(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<MarketRiskPremium>>> {
    let rows = EconomicsRepository::risk_premiums(state.pool()?, query.limit())
        .await
        .map_err(data_error)?;
    Ok(Json(rows))
}

async fn risk_premium(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> ApiResult<Json<MarketRiskPremium>> {
    EconomicsRepository::risk_premium(state.pool()?, &country)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Market risk premium not found for country: {}", country)))
}

pub fn economics_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/treasury-rates", get(treasury_rates))
        .route("/treasury-rates/{date}", get(treasury_rate))
        .route("/indicators", get(indicators))
        .route("/calendar", get(calendar))
        .route("/risk-premium", get(risk_premiums))
        .route("/risk-premium/{country}", get(risk_premium))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    async fn status_of(uri: &str) -> StatusCode {
        let app = economics_router().with_state(Arc::new(create_test_state()));
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_malformed_date_path_rejected() {
        assert_eq!(
            status_of("/treasury-rates/not-a-date").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_inverted_indicator_range_rejected() {
        assert_eq!(
            status_of("/indicators?name=GDP&from_date=2024-02-01&to_date=2024-01-01").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_calendar_without_database() {
        assert_eq!(
            status_of("/calendar?country=US").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
