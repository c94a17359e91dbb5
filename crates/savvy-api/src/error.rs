//! API 에러 응답 타입.
//!
//! 모든 엔드포인트는 실패 시 `(StatusCode, Json<ApiErrorResponse>)`를 반환합니다.

use axum::{http::StatusCode, Json};
use savvy_data::DataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// API 에러 응답.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Company with id 7 not found",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DB_ERROR", "INVALID_INPUT", "NOT_FOUND")
    pub code: String,
    /// 에러 메시지
    pub message: String,
    /// 추가 상세 정보
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러.
    pub fn with_details(code: impl Into<String>, message: impl Into<String>, details: Value) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }
}

/// 핸들러 에러.
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// 핸들러 결과.
pub type ApiResult<T> = Result<T, ApiError>;

pub fn not_found(message: impl Into<String>) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("NOT_FOUND", message)),
    )
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_INPUT", message)),
    )
}

/// `validator` 검증 실패를 400으로 변환합니다.
pub fn validation_error(errors: ValidationErrors) -> ApiError {
    let message = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ");
    let details = serde_json::to_value(&errors).unwrap_or(Value::Null);

    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::with_details(
            "VALIDATION_ERROR",
            message,
            details,
        )),
    )
}

/// 저장소 에러를 HTTP 에러로 변환합니다.
pub fn data_error(err: DataError) -> ApiError {
    match err {
        DataError::NotFound(msg) => not_found(msg),
        DataError::DuplicateError(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("DUPLICATE", msg)),
        ),
        DataError::PoolExhausted | DataError::ConnectionError(_) => {
            error!(error = %err, "데이터베이스 연결 실패");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiErrorResponse::new("DB_UNAVAILABLE", err.to_string())),
            )
        }
        other => {
            error!(error = %other, "쿼리 실패");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("DB_ERROR", other.to_string())),
            )
        }
    }
}
