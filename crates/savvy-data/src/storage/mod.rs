//! PostgreSQL 저장소.
//!
//! - 연결 풀 생성 및 마이그레이션
//! - 테이블별 행 타입 (`models`)
//! - 범용 벌크 업서트 (`upsert`)
//! - 커밋/롤백 범위 트랜잭션 (`session`)

pub mod models;
pub mod session;
pub mod upsert;

use std::str::FromStr;
use std::time::Duration;

use savvy_core::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::ConnectOptions;
use tracing::info;

use crate::error::{DataError, Result};

/// 설정으로부터 연결 풀을 생성합니다.
///
/// 개발 환경이 아니면 SQL 문 로깅을 끕니다.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("Connecting to database...");

    let mut options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| DataError::ConfigError(format!("잘못된 DATABASE_URL: {}", e)))?;
    if !config.log_statements {
        options = options.disable_statement_logging();
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| DataError::ConnectionError(e.to_string()))?;

    info!("Database connection established");
    Ok(pool)
}

/// 데이터베이스 마이그레이션을 실행합니다.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| DataError::MigrationError(e.to_string()))?;

    info!("Migrations completed successfully");
    Ok(())
}

/// `SELECT 1`로 데이터베이스 상태를 확인합니다.
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
