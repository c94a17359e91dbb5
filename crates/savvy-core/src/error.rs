//! Fundamental Savvy 공통 에러 타입.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum SavvyError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 외부 데이터 제공자 에러
    #[error("데이터 제공자 에러: {0}")]
    Provider(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 공통 Result 타입.
pub type SavvyResult<T> = Result<T, SavvyError>;

impl SavvyError {
    /// 재시도 가능한 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SavvyError::Network(_) | SavvyError::Provider(_))
    }
}

impl From<config::ConfigError> for SavvyError {
    fn from(err: config::ConfigError) -> Self {
        SavvyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SavvyError {
    fn from(err: serde_json::Error) -> Self {
        SavvyError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(SavvyError::Network("timeout".to_string()).is_retryable());
        assert!(SavvyError::Provider("429".to_string()).is_retryable());
        assert!(!SavvyError::Config("missing".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = SavvyError::NotFound("AAPL".to_string());
        assert_eq!(err.to_string(), "찾을 수 없음: AAPL");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{invalid");
        let err: SavvyError = parse.unwrap_err().into();
        assert!(matches!(err, SavvyError::Serialization(_)));
    }
}
