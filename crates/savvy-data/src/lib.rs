//! 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - Financial Modeling Prep API 클라이언트와 응답 DTO
//! - PostgreSQL 행 타입, 범용 벌크 업서트, 트랜잭션 범위 헬퍼
//! - 벤더 DTO → 행 매퍼
//! - 기업 지표(밸류에이션/수익성/배당) 계산
//! - 수집 대상 선정 및 갱신 필요 여부 판단

pub mod error;
pub mod etl;
pub mod mappers;
pub mod metrics;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

// 저장소 재내보내기
pub use storage::session::with_transaction;
pub use storage::upsert::{bulk_insert_ignore, bulk_insert_or_update, ConflictAction, UpsertRow};
pub use storage::{connect_pool, health_check, run_migrations};

pub use mappers::{map_and_save, map_batch};
pub use metrics::{calculate_company_metrics, MetricsInputs};
pub use provider::FmpClient;
