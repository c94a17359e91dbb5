//! # Savvy Core
//!
//! Fundamental Savvy 전반에서 공유하는 기반 요소:
//! - 환경 변수 기반 설정 (`Settings`)
//! - 공통 에러 타입
//! - tracing 로깅 초기화

pub mod config;
pub mod error;
pub mod logging;

pub use config::{DatabaseConfig, Environment, ServerConfig, Settings};
pub use error::{SavvyError, SavvyResult};
pub use logging::{init_logging, LogConfig, LogFormat};
