//! 벤더 DTO → 저장용 행 변환.
//!
//! 매퍼는 DTO 하나를 받아 행 하나를 반환하며, 자연 키(심볼, 날짜 등)가 없거나
//! 파싱할 수 없으면 `None`을 반환해 해당 항목을 건너뜁니다. 키가 아닌 날짜 필드는
//! 파싱 실패 시 `NULL`로 저장됩니다.
//!
//! 응답에 없는 문맥(일봉의 심볼, 경제 지표 이름, 상위 종목 스냅샷 날짜)은
//! 매퍼 인자로 명시적으로 받습니다.

mod company;
mod directory;
mod dividends_earnings;
mod economics;
mod financials;
mod market;
mod news;
mod prices;

pub use company::*;
pub use directory::*;
pub use dividends_earnings::*;
pub use economics::*;
pub use financials::*;
pub use market::*;
pub use news::*;
pub use prices::*;

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgConnection;
use tracing::debug;

use crate::error::Result;
use crate::storage::upsert::{bulk_write, ConflictAction, UpsertRow};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `YYYY-MM-DD` 문자열을 날짜로 변환합니다.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?.trim(), DATE_FORMAT).ok()
}

/// `YYYY-MM-DD HH:MM:SS` 문자열을 시각으로 변환합니다.
///
/// 날짜만 있으면 자정으로 간주합니다.
pub fn parse_datetime(value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .ok()
        .or_else(|| parse_date(Some(value)).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// 날짜 또는 날짜+시각 문자열에서 날짜 부분을 취합니다.
pub fn parse_day(value: Option<&str>) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

/// 공백이 아닌 문자열만 남깁니다. 자연 키 검사에 사용합니다.
pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 모든 DTO에 매퍼를 적용하고 거부된 항목은 버립니다.
pub fn map_batch<D, R, F>(dtos: &[D], mapper: F) -> Vec<R>
where
    F: Fn(&D) -> Option<R>,
{
    let rows: Vec<R> = dtos.iter().filter_map(&mapper).collect();
    if rows.len() < dtos.len() {
        debug!(
            total = dtos.len(),
            skipped = dtos.len() - rows.len(),
            "자연 키가 없는 항목 제외"
        );
    }
    rows
}

/// 변환 후 벌크 기록합니다. 제출된 행 수를 반환합니다.
///
/// 변환 결과가 비어 있으면 데이터베이스에 접근하지 않고 0을 반환합니다.
pub async fn map_and_save<D, R, F>(
    conn: &mut PgConnection,
    dtos: &[D],
    mapper: F,
    unique_columns: &[&str],
    action: ConflictAction,
) -> Result<usize>
where
    R: UpsertRow,
    F: Fn(&D) -> Option<R>,
{
    let rows = map_batch(dtos, mapper);
    if rows.is_empty() {
        return Ok(0);
    }

    bulk_write(conn, &rows, unique_columns, action).await?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-03-15")),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_date(Some("15/03/2024")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_parse_datetime_falls_back_to_midnight() {
        let full = parse_datetime(Some("2024-03-15 09:30:00")).unwrap();
        assert_eq!(full.to_string(), "2024-03-15 09:30:00");

        let date_only = parse_datetime(Some("2024-03-15")).unwrap();
        assert_eq!(date_only.to_string(), "2024-03-15 00:00:00");

        assert_eq!(parse_datetime(Some("yesterday")), None);
    }

    #[test]
    fn test_parse_day_accepts_both_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 1);
        assert_eq!(parse_day(Some("2024-11-01 16:05:12")), expected);
        assert_eq!(parse_day(Some("2024-11-01")), expected);
    }

    #[test]
    fn test_map_batch_drops_rejected() {
        let input = vec![Some(1), None, Some(3)];
        let rows: Vec<i32> = map_batch(&input, |v| v.map(|n| n * 10));
        assert_eq!(rows, vec![10, 30]);
    }
}
