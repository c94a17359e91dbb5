//! 에러 타입 정의.

use savvy_data::DataError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 데이터베이스 에러
    #[error("Database error: {0}")]
    Database(String),
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),
    /// 데이터 소스 에러 (FMP 요청/응답)
    #[error("Data source error: {0}")]
    DataSource(String),
    /// 잘못된 명령 인자
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// 일반 에러
    #[error("Error: {0}")]
    Other(String),
}

impl From<DataError> for CollectorError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::FetchError(_) | DataError::ParseError(_) => Self::DataSource(err.to_string()),
            DataError::ConfigError(msg) => Self::Config(msg),
            DataError::SerializationError(_) => Self::Other(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for CollectorError {
    fn from(err: sqlx::Error) -> Self {
        Self::from(DataError::from(err))
    }
}

impl From<savvy_core::SavvyError> for CollectorError {
    fn from(err: savvy_core::SavvyError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_classification() {
        let fetch: CollectorError = DataError::FetchError("503".to_string()).into();
        assert!(matches!(fetch, CollectorError::DataSource(_)));

        let pool: CollectorError = DataError::PoolExhausted.into();
        assert!(matches!(pool, CollectorError::Database(_)));

        let config: CollectorError = DataError::ConfigError("bad url".to_string()).into();
        assert_eq!(config.to_string(), "Configuration error: bad url");
    }
}
