//! Financial Modeling Prep 데이터 수집기.
//!
//! API 서버와 독립적으로 실행되는 ETL 바이너리를 제공합니다:
//! - 종목/분류 디렉터리 (검색, 재무제표 제공 종목, 섹터, 산업 등)
//! - 기업 프로필, 재무제표, 시세, 배당/실적
//! - 거시경제 지표, 섹터 성과, 뉴스
//! - 기업 지표 계산

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::SyncStats;
