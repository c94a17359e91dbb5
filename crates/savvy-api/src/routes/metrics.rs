//! 기업 지표 스크리너 라우트 (`/api/v1/metrics`).
//!
//! 수집기가 계산해 둔 `company_metrics`를 조회합니다.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use savvy_data::storage::models::CompanyMetrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{data_error, not_found, validation_error, ApiErrorResponse, ApiResult};
use crate::query::normalize_symbol;
use crate::repository::{page_count, MetricsFilter, MetricsRepository};
use crate::state::AppState;

/// 지표 목록 한 페이지.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsPage {
    pub items: Vec<CompanyMetrics>,
    /// 필터에 맞는 전체 건수
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    /// 전체 페이지 수
    pub pages: i64,
}

/// 심볼별 지표 조회.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{symbol}",
    params(("symbol" = String, Path, description = "종목 심볼")),
    responses(
        (status = 200, description = "기업 지표", body = CompanyMetrics),
        (status = 404, description = "지표 없음", body = ApiErrorResponse)
    ),
    tag = "metrics"
)]
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<CompanyMetrics>> {
    let symbol = normalize_symbol(&symbol);
    MetricsRepository::get(state.pool()?, &symbol)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Metrics not found for symbol: {}", symbol)))
}

/// 필터/페이지 목록.
#[utoipa::path(
    get,
    path = "/api/v1/metrics",
    params(MetricsFilter),
    responses(
        (status = 200, description = "지표 페이지", body = MetricsPage),
        (status = 400, description = "잘못된 페이지 파라미터", body = ApiErrorResponse)
    ),
    tag = "metrics"
)]
pub async fn list_metrics(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MetricsFilter>,
) -> ApiResult<Json<MetricsPage>> {
    filter.validate().map_err(validation_error)?;
    debug!(filter = ?filter, "지표 목록 조회");

    let (items, total) = MetricsRepository::list(state.pool()?, &filter)
        .await
        .map_err(data_error)?;

    Ok(Json(MetricsPage {
        items,
        total,
        page: filter.page,
        page_size: filter.page_size,
        pages: page_count(total, filter.page_size),
    }))
}

/// 지표가 있는 섹터 목록.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/sectors/list",
    responses(
        (status = 200, description = "섹터 이름 (정렬됨)", body = Vec<String>)
    ),
    tag = "metrics"
)]
pub async fn list_sectors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let sectors = MetricsRepository::sectors(state.pool()?)
        .await
        .map_err(data_error)?;
    Ok(Json(sectors))
}

pub fn metrics_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_metrics))
        .route("/sectors/list", get(list_sectors))
        .route("/{symbol}", get(get_metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::state::create_test_state;

    async fn call(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new()
            .nest("/metrics", metrics_router())
            .with_state(state);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected() {
        let (status, body) = call(Arc::new(create_test_state()), "/metrics?page_size=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_page_rejected() {
        let (status, _) = call(Arc::new(create_test_state()), "/metrics?page_size=501").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_page_rejected() {
        let (status, body) = call(
            Arc::new(create_test_state()),
            "/metrics?page=9223372036854775807&page_size=500",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_without_database_is_unavailable() {
        let (status, body) = call(Arc::new(create_test_state()), "/metrics/AAPL").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "DB_UNAVAILABLE");
    }

    #[tokio::test]
    #[ignore] // DB 연결 필요
    async fn test_list_metrics_pagination() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let pool = PgPoolOptions::new().connect(&url).await.unwrap();
        savvy_data::run_migrations(&pool).await.unwrap();
        let state = Arc::new(create_test_state().with_db_pool(pool));

        let (status, body) = call(state.clone(), "/metrics?page=1&page_size=2").await;
        assert_eq!(status, StatusCode::OK);
        let page: MetricsPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.page_size, 2);
        assert!(page.items.len() <= 2);
        assert_eq!(page.pages, page_count(page.total, 2));

        let (status, body) = call(state, "/metrics/sectors/list").await;
        assert_eq!(status, StatusCode::OK);
        let sectors: Vec<String> = serde_json::from_value(body).unwrap();
        let mut sorted = sectors.clone();
        sorted.sort();
        assert_eq!(sectors, sorted);
    }
}
