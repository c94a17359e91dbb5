//! Companies API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/companies` - 목록 (id 순, skip/limit)
//! - `POST /api/v1/companies` - 생성
//! - `GET /api/v1/companies/{id}` - 조회
//! - `PUT /api/v1/companies/{id}` - 부분 수정
//! - `DELETE /api/v1/companies/{id}` - 삭제
//! - `GET /api/v1/companies/ticker/{ticker}` - 티커로 조회

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::IntoParams;
use validator::Validate;

use crate::error::{bad_request, data_error, not_found, validation_error, ApiErrorResponse, ApiResult};
use crate::query::{clamp_limit, normalize_symbol};
use crate::repository::companies::normalize_ticker;
use crate::repository::{Company, CompanyCreate, CompanyRepository, CompanyUpdate};
use crate::state::AppState;

/// 회사 목록 기본 건수.
const DEFAULT_COMPANY_LIMIT: i64 = 100;

/// 목록 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CompanyListQuery {
    /// 건너뛸 행 수 (기본 0)
    #[serde(default)]
    pub skip: i64,
    /// 최대 건수 (기본 100)
    pub limit: Option<i64>,
}

fn already_exists(ticker: &str) -> (StatusCode, Json<ApiErrorResponse>) {
    bad_request(format!("Company with ticker {} already exists", ticker))
}

fn missing_id(id: i32) -> (StatusCode, Json<ApiErrorResponse>) {
    not_found(format!("Company with id {} not found", id))
}

/// 회사 목록.
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    params(CompanyListQuery),
    responses(
        (status = 200, description = "회사 목록", body = [Company])
    ),
    tag = "companies"
)]
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyListQuery>,
) -> ApiResult<Json<Vec<Company>>> {
    let pool = state.pool()?;
    let skip = query.skip.max(0);
    let limit = clamp_limit(query.limit, DEFAULT_COMPANY_LIMIT);

    let companies = CompanyRepository::list(pool, skip, limit)
        .await
        .map_err(data_error)?;
    Ok(Json(companies))
}

/// id로 조회.
#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    params(("id" = i32, Path, description = "회사 id")),
    responses(
        (status = 200, description = "회사", body = Company),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Company>> {
    let pool = state.pool()?;

    CompanyRepository::get(pool, id)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| missing_id(id))
}

/// 티커로 조회.
#[utoipa::path(
    get,
    path = "/api/v1/companies/ticker/{ticker}",
    params(("ticker" = String, Path, description = "티커 (대소문자 무시)")),
    responses(
        (status = 200, description = "회사", body = Company),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    tag = "companies"
)]
pub async fn get_company_by_ticker(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> ApiResult<Json<Company>> {
    let pool = state.pool()?;
    let ticker = normalize_symbol(&ticker);

    CompanyRepository::get_by_ticker(pool, &ticker)
        .await
        .map_err(data_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("Company with ticker {} not found", ticker)))
}

/// 회사 생성.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CompanyCreate,
    responses(
        (status = 201, description = "생성됨", body = Company),
        (status = 400, description = "검증 실패 또는 티커 중복", body = ApiErrorResponse)
    ),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CompanyCreate>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    input.validate().map_err(validation_error)?;
    let pool = state.pool()?;
    let ticker = normalize_ticker(&input.ticker);

    if CompanyRepository::get_by_ticker(pool, &ticker)
        .await
        .map_err(data_error)?
        .is_some()
    {
        return Err(already_exists(&ticker));
    }

    let company = CompanyRepository::create(pool, &input)
        .await
        .map_err(|e| match e {
            savvy_data::DataError::DuplicateError(_) => already_exists(&ticker),
            other => data_error(other),
        })?;

    info!(id = company.id, ticker = %company.ticker, "회사 생성");
    Ok((StatusCode::CREATED, Json(company)))
}

/// 회사 부분 수정.
#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    params(("id" = i32, Path, description = "회사 id")),
    request_body = CompanyUpdate,
    responses(
        (status = 200, description = "수정됨", body = Company),
        (status = 400, description = "검증 실패 또는 티커 중복", body = ApiErrorResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<CompanyUpdate>,
) -> ApiResult<Json<Company>> {
    input.validate().map_err(validation_error)?;
    let pool = state.pool()?;

    let existing = CompanyRepository::get(pool, id)
        .await
        .map_err(data_error)?
        .ok_or_else(|| missing_id(id))?;

    if let Some(ticker) = input.ticker.as_deref().map(normalize_ticker) {
        if ticker != existing.ticker {
            let taken = CompanyRepository::get_by_ticker(pool, &ticker)
                .await
                .map_err(data_error)?;
            if taken.is_some_and(|other| other.id != id) {
                return Err(already_exists(&ticker));
            }
        }
    }

    debug!(id, update = ?input, "회사 수정");
    CompanyRepository::update(pool, id, &input)
        .await
        .map_err(|e| match e {
            savvy_data::DataError::DuplicateError(msg) => bad_request(msg),
            other => data_error(other),
        })?
        .map(Json)
        .ok_or_else(|| missing_id(id))
}

/// 회사 삭제.
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    params(("id" = i32, Path, description = "회사 id")),
    responses(
        (status = 204, description = "삭제됨"),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    tag = "companies"
)]
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let pool = state.pool()?;

    if CompanyRepository::delete(pool, id).await.map_err(data_error)? {
        info!(id, "회사 삭제");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(missing_id(id))
    }
}

/// 회사 라우터 생성.
pub fn companies_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/ticker/{ticker}", get(get_company_by_ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::Response};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    fn app(state: AppState) -> Router {
        Router::new()
            .nest("/companies", companies_router())
            .with_state(Arc::new(state))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_empty_ticker() {
        let app = app(create_test_state());
        let response = send(
            &app,
            "POST",
            "/companies",
            Some(json!({"ticker": "", "name": "Nameless"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_whitespace_ticker_rejected() {
        let app = app(create_test_state());

        let created = send(
            &app,
            "POST",
            "/companies",
            Some(json!({"ticker": "   ", "name": "Blank"})),
        )
        .await;
        assert_eq!(created.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(created).await["code"], "VALIDATION_ERROR");

        let updated = send(&app, "PUT", "/companies/1", Some(json!({"ticker": "  "}))).await;
        assert_eq!(updated.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(updated).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_rejects_overlong_name() {
        let app = app(create_test_state());
        let response = send(
            &app,
            "PUT",
            "/companies/1",
            Some(json!({"name": "x".repeat(256)})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_without_database_unavailable() {
        let app = app(create_test_state());
        let response = send(&app, "GET", "/companies", None).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["code"], "DB_UNAVAILABLE");
    }

    #[tokio::test]
    #[ignore] // DB 연결 필요
    async fn test_company_crud_round_trip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let pool = sqlx::PgPool::connect(&url).await.unwrap();
        savvy_data::run_migrations(&pool).await.unwrap();
        sqlx::query("DELETE FROM company WHERE ticker = 'ZZTEST'")
            .execute(&pool)
            .await
            .unwrap();
        let app = app(create_test_state().with_db_pool(pool));

        // 생성 후 다시 읽으면 동일한 값
        let created = send(
            &app,
            "POST",
            "/companies",
            Some(json!({
                "ticker": " zztest ",
                "name": "Round Trip Inc",
                "sector": "Technology",
                "industry": "Software"
            })),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = json_body(created).await;
        assert_eq!(created["ticker"], "ZZTEST");
        let id = created["id"].as_i64().unwrap();

        let fetched = json_body(send(&app, "GET", &format!("/companies/{}", id), None).await).await;
        assert_eq!(fetched, created);

        let by_ticker = send(&app, "GET", "/companies/ticker/zztest", None).await;
        assert_eq!(by_ticker.status(), StatusCode::OK);

        // 중복 티커
        let duplicate = send(
            &app,
            "POST",
            "/companies",
            Some(json!({"ticker": "ZZTEST", "name": "Again"})),
        )
        .await;
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(duplicate).await["message"],
            "Company with ticker ZZTEST already exists"
        );

        // 부분 수정: sector만 지우고 나머지는 유지
        let updated = send(
            &app,
            "PUT",
            &format!("/companies/{}", id),
            Some(json!({"sector": null})),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = json_body(updated).await;
        assert!(updated["sector"].is_null());
        assert_eq!(updated["industry"], "Software");
        assert_eq!(updated["name"], "Round Trip Inc");
        assert!(!updated["updated_at"].is_null());

        let deleted = send(&app, "DELETE", &format!("/companies/{}", id), None).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = send(&app, "GET", &format!("/companies/{}", id), None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(missing).await["message"],
            format!("Company with id {} not found", id)
        );
    }
}
