//! 모든 핸들러에서 공유되는 애플리케이션 상태.

use axum::{http::StatusCode, Json};
use savvy_core::Environment;
use sqlx::PgPool;

use crate::error::{ApiErrorResponse, ApiResult};

/// 애플리케이션 공유 상태.
///
/// `Arc`로 감싸 Axum의 State extractor로 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 연결 풀
    pub db_pool: Option<PgPool>,

    /// 실행 환경
    pub environment: Environment,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(environment: Environment) -> Self {
        Self {
            db_pool: None,
            environment,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 풀 설정.
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 요청 처리에 쓸 풀. 설정되지 않았으면 503.
    pub fn pool(&self) -> ApiResult<&PgPool> {
        self.db_pool.as_ref().ok_or_else(|| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiErrorResponse::new(
                    "DB_UNAVAILABLE",
                    "Database not available",
                )),
            )
        })
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// `SELECT 1`로 데이터베이스를 확인합니다. 실패 시 사유를 반환합니다.
    pub async fn check_database(&self) -> Result<(), String> {
        let pool = self
            .db_pool
            .as_ref()
            .ok_or_else(|| "database not configured".to_string())?;

        savvy_data::health_check(pool)
            .await
            .map_err(|e| e.to_string())
    }
}

/// 데이터베이스 없는 테스트용 상태.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::new(Environment::Test)
}
