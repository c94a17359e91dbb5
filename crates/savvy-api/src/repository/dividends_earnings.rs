//! 배당 및 실적 조회. 모두 기간 필터를 받으며 최신순입니다.

use chrono::NaiveDate;
use savvy_data::storage::models::{
    Dividend, DividendCalendarEvent, EarningsCalendarEvent, EarningsReport,
};
use savvy_data::Result;
use sqlx::PgPool;

pub struct DividendsEarningsRepository;

/// 심볼과 기간으로 거르는 공통 조회문.
fn symbol_range_sql(table: &str) -> String {
    format!(
        r#"
        SELECT * FROM {}
        WHERE symbol = $1
            AND ($2::date IS NULL OR date >= $2)
            AND ($3::date IS NULL OR date <= $3)
        ORDER BY date DESC
        LIMIT $4
        "#,
        table
    )
}

impl DividendsEarningsRepository {
    pub async fn dividends(
        pool: &PgPool,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<Dividend>> {
        let rows = sqlx::query_as(&symbol_range_sql("dividend"))
            .bind(symbol)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn dividend_calendar(
        pool: &PgPool,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<DividendCalendarEvent>> {
        let rows = sqlx::query_as(&symbol_range_sql("dividend_calendar_event"))
            .bind(symbol)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn earnings(
        pool: &PgPool,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<EarningsReport>> {
        let rows = sqlx::query_as(&symbol_range_sql("earnings_report"))
            .bind(symbol)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn earnings_calendar(
        pool: &PgPool,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<EarningsCalendarEvent>> {
        let rows = sqlx::query_as(&symbol_range_sql("earnings_calendar_event"))
            .bind(symbol)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_range_sql_targets_table() {
        let sql = symbol_range_sql("dividend");
        assert!(sql.contains("FROM dividend\n"));
        assert!(sql.contains("ORDER BY date DESC"));
        assert!(sql.contains("LIMIT $4"));
    }
}
