//! 시세 및 가격 조회.

use chrono::NaiveDate;
use savvy_data::storage::models::{HistoricalPrice, IntradayPrice, Quote};
use savvy_data::Result;
use sqlx::PgPool;

pub struct PriceRepository;

impl PriceRepository {
    /// 시세 스냅샷, 최신순.
    pub async fn quotes(pool: &PgPool, symbol: &str, limit: i64) -> Result<Vec<Quote>> {
        let quotes = sqlx::query_as(
            r#"SELECT * FROM quote WHERE symbol = $1 ORDER BY "timestamp" DESC LIMIT $2"#,
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(quotes)
    }

    pub async fn latest_quote(pool: &PgPool, symbol: &str) -> Result<Option<Quote>> {
        let quote = sqlx::query_as(
            r#"SELECT * FROM quote WHERE symbol = $1 ORDER BY "timestamp" DESC LIMIT 1"#,
        )
        .bind(symbol)
        .fetch_optional(pool)
        .await?;
        Ok(quote)
    }

    /// 일봉, 날짜 오름차순.
    pub async fn historical(
        pool: &PgPool,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<HistoricalPrice>> {
        let prices = sqlx::query_as(
            r#"
            SELECT * FROM historical_price
            WHERE symbol = $1
                AND ($2::date IS NULL OR date >= $2)
                AND ($3::date IS NULL OR date <= $3)
            ORDER BY date
            LIMIT $4
            "#,
        )
        .bind(symbol)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(prices)
    }

    /// 분봉, 최신순. 종료일은 그날 전체를 포함합니다.
    pub async fn intraday(
        pool: &PgPool,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<IntradayPrice>> {
        let prices = sqlx::query_as(
            r#"
            SELECT * FROM intraday_price
            WHERE symbol = $1
                AND ($2::date IS NULL OR date >= $2::date)
                AND ($3::date IS NULL OR date < $3::date + 1)
            ORDER BY date DESC
            LIMIT $4
            "#,
        )
        .bind(symbol)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(prices)
    }
}
