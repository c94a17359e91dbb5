//! 목록 조회 공통 쿼리 파라미터.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{bad_request, ApiResult};

/// 목록 기본 건수.
pub const DEFAULT_LIST_LIMIT: i64 = 1000;
/// 목록 최대 건수.
pub const MAX_LIST_LIMIT: i64 = 5000;

/// 요청 건수를 `1..=MAX_LIST_LIMIT`로 제한합니다.
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

/// 경로의 심볼을 조회용으로 정규화합니다.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct ListQuery {
    /// 최대 건수 (기본 1000, 최대 5000)
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT)
    }
}

/// 기간 필터.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// 시작일 (포함, YYYY-MM-DD)
    pub from_date: Option<NaiveDate>,
    /// 종료일 (포함, YYYY-MM-DD)
    pub to_date: Option<NaiveDate>,
    /// 최대 건수 (기본 1000, 최대 5000)
    pub limit: Option<i64>,
}

impl DateRangeQuery {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT)
    }

    /// 시작일이 종료일보다 늦으면 400.
    pub fn validate(&self) -> ApiResult<()> {
        validate_range(self.from_date, self.to_date)
    }
}

pub fn validate_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ApiResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(bad_request(format!(
            "from_date ({}) must not be after to_date ({})",
            from, to
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT), 1000);
        assert_eq!(clamp_limit(Some(10), DEFAULT_LIST_LIMIT), 10);
        assert_eq!(clamp_limit(Some(100_000), DEFAULT_LIST_LIMIT), MAX_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIST_LIMIT), 1);
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" aapl "), "AAPL");
        assert_eq!(normalize_symbol("brk.b"), "BRK.B");
    }

    #[test]
    fn test_date_range_validation() {
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d);
        let range = DateRangeQuery {
            from_date: day(10),
            to_date: day(1),
            limit: None,
        };
        assert!(range.validate().is_err());

        assert!(validate_range(day(1), day(1)).is_ok());
        assert!(validate_range(None, day(1)).is_ok());
    }
}
