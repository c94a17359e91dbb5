//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조 (`{prefix}` 기본값 `/api/v1`)
//!
//! - `{prefix}/health` - 헬스 체크 (liveness)
//! - `{prefix}/health/ready` - 상세 헬스 체크 (readiness)
//! - `{prefix}/companies` - 회사 CRUD
//! - `{prefix}/company` - 벤더 기업 데이터 (프로필, 임원, 시가총액 등)
//! - `{prefix}/financials` - 손익계산서/재무상태표/현금흐름표
//! - `{prefix}/prices` - 호가, 일봉, 분봉
//! - `{prefix}/dividends-earnings` - 배당/실적 및 일정
//! - `{prefix}/economics` - 국채 금리, 경제 지표, 경제 일정, 위험 프리미엄
//! - `{prefix}/market` - 섹터/산업 성과, 상위 종목
//! - `{prefix}/sec` - SEC 공시
//! - `{prefix}/directory` - 종목, 거래소, 섹터, 산업, 국가, 심볼 변경
//! - `{prefix}/news` - 뉴스
//! - `{prefix}/metrics` - 기업 지표 스크리너

pub mod companies;
pub mod company;
pub mod directory;
pub mod dividends_earnings;
pub mod economics;
pub mod financials;
pub mod health;
pub mod market;
pub mod metrics;
pub mod news;
pub mod prices;
pub mod sec;

pub use companies::{companies_router, CompanyListQuery};
pub use company::company_router;
pub use directory::directory_router;
pub use dividends_earnings::dividends_earnings_router;
pub use economics::economics_router;
pub use financials::financials_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse, HealthStatus};
pub use market::market_router;
pub use metrics::{metrics_router, MetricsPage};
pub use news::news_router;
pub use prices::prices_router;
pub use sec::sec_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// `prefix`는 `Settings::api_v1_prefix` 값입니다.
pub fn create_api_router(prefix: &str) -> Router<Arc<AppState>> {
    let prefix = prefix.trim_end_matches('/');
    let at = |path: &str| format!("{}{}", prefix, path);

    Router::new()
        .nest(&at("/health"), health_router())
        .nest(&at("/companies"), companies_router())
        .nest(&at("/company"), company_router())
        .nest(&at("/financials"), financials_router())
        .nest(&at("/prices"), prices_router())
        .nest(&at("/dividends-earnings"), dividends_earnings_router())
        .nest(&at("/economics"), economics_router())
        .nest(&at("/market"), market_router())
        .nest(&at("/sec"), sec_router())
        .nest(&at("/directory"), directory_router())
        .nest(&at("/news"), news_router())
        .nest(&at("/metrics"), metrics_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    async fn status_of(uri: &str) -> StatusCode {
        let app = create_api_router("/api/v1").with_state(Arc::new(create_test_state()));
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_routes_mounted_under_prefix() {
        assert_eq!(status_of("/api/v1/health").await, StatusCode::OK);
        assert_eq!(status_of("/api/v1/health/ready").await, StatusCode::OK);

        // DB 없이 데이터 라우트는 503
        for uri in [
            "/api/v1/companies",
            "/api/v1/company/profiles/AAPL",
            "/api/v1/financials/income-statements/AAPL?period=FY",
            "/api/v1/prices/quotes/AAPL/latest",
            "/api/v1/economics/treasury-rates",
            "/api/v1/market/gainers/2024-01-02",
            "/api/v1/sec/filings/cik/0000320193",
            "/api/v1/directory/exchanges/by-code/NASDAQ",
            "/api/v1/news/stock/AAPL",
            "/api/v1/metrics/sectors/list",
        ] {
            assert_eq!(status_of(uri).await, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_not_found() {
        assert_eq!(status_of("/api/v1/unknown").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("/health").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_prefix() {
        let app = create_api_router("/api/v1/").with_state(Arc::new(create_test_state()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
