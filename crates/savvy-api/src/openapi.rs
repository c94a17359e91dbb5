//! OpenAPI 문서화 설정.
//!
//! utoipa로 REST API의 OpenAPI 3.0 문서를 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새 엔드포인트를 문서에 추가하려면 핸들러에 `#[utoipa::path(...)]`를 달고
//! 아래 `paths(...)`와 `components(schemas(...))`에 등록합니다.

use axum::Router;
use savvy_data::storage::models::CompanyMetrics;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::repository::{Company, CompanyCreate, CompanyUpdate};
use crate::routes::{ComponentHealth, ComponentStatus, HealthResponse, HealthStatus, MetricsPage};

/// Fundamental Savvy API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fundamental Savvy API",
        description = r#"
# Fundamental Savvy REST API

Financial Modeling Prep에서 수집한 펀더멘털 데이터를 조회하는 읽기 전용 API입니다.

## 주요 기능

- **회사**: 추적 대상 회사 CRUD
- **재무제표/시세/배당/실적**: 심볼별 조회
- **거시경제**: 국채 금리, 경제 지표, 일정
- **스크리너**: 계산된 기업 지표 필터링
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 및 DB 상태"),
        (name = "companies", description = "회사 - 추적 대상 회사 CRUD"),
        (name = "metrics", description = "지표 - 기업 지표 스크리너")
    ),
    components(
        schemas(
            // ===== Health =====
            HealthStatus,
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Companies =====
            Company,
            CompanyCreate,
            CompanyUpdate,

            // ===== Metrics =====
            CompanyMetrics,
            MetricsPage,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Companies =====
        crate::routes::companies::list_companies,
        crate::routes::companies::get_company,
        crate::routes::companies::get_company_by_ticker,
        crate::routes::companies::create_company,
        crate::routes::companies::update_company,
        crate::routes::companies::delete_company,

        // ===== Metrics =====
        crate::routes::metrics::list_metrics,
        crate::routes::metrics::get_metrics,
        crate::routes::metrics::list_sectors,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Fundamental Savvy API"));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));

        assert!(json.contains("\"health\""));
        assert!(json.contains("\"companies\""));
        assert!(json.contains("\"metrics\""));

        assert!(json.contains("/api/v1/health/ready"));
        assert!(json.contains("/api/v1/companies/{id}"));
        assert!(json.contains("/api/v1/metrics/sectors/list"));
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(json.contains("HealthResponse"));
        assert!(json.contains("ApiErrorResponse"));
        assert!(json.contains("CompanyCreate"));
        assert!(json.contains("MetricsPage"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }
}
