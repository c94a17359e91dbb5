//! 배당/실적 라우트 (`/api/v1/dividends-earnings`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use savvy_data::storage::models::{
    Dividend, DividendCalendarEvent, EarningsCalendarEvent, EarningsReport,
};
use std::sync::Arc;

use crate::error::{data_error, ApiResult};
use crate::query::{normalize_symbol, DateRangeQuery};
use crate::repository::DividendsEarningsRepository;
use crate::state::AppState;

async fn dividends(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<Dividend>>> {
    range.validate()?;
    let rows = DividendsEarningsRepository::dividends(
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

async fn dividend_calendar(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<DividendCalendarEvent>>> {
    range.validate()?;
    let rows = DividendsEarningsRepository::dividend_calendar(
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

async fn earnings(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<EarningsReport>>> {
    range.validate()?;
    let rows = DividendsEarningsRepository::earnings(
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

async fn earnings_calendar(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<EarningsCalendarEvent>>> {
    range.validate()?;
    let rows = DividendsEarningsRepository::earnings_calendar(
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

pub fn dividends_earnings_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dividends/{symbol}", get(dividends))
        .route("/dividend-calendar/{symbol}", get(dividend_calendar))
        .route("/earnings/{symbol}", get(earnings))
        .route("/earnings-calendar/{symbol}", get(earnings_calendar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    #[tokio::test]
    async fn test_inverted_range_rejected_before_database() {
        let app = dividends_earnings_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/dividends/AAPL?from_date=2024-06-01&to_date=2024-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // DB가 없어도 기간 검증이 먼저 실패해야 함
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_without_database_is_unavailable() {
        let app = dividends_earnings_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/earnings/AAPL")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
