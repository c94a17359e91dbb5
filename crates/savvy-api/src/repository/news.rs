//! 뉴스 조회. 모두 최신순이며 종료일은 그날 전체를 포함합니다.

use chrono::NaiveDate;
use savvy_data::storage::models::{FmpArticle, GeneralNews, StockNews};
use savvy_data::Result;
use sqlx::PgPool;

pub struct NewsRepository;

impl NewsRepository {
    /// `tickers`는 부분 문자열 일치입니다.
    pub async fn fmp_articles(
        pool: &PgPool,
        tickers: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<FmpArticle>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM fmp_article
            WHERE ($1::text IS NULL OR tickers LIKE '%' || $1 || '%')
                AND ($2::date IS NULL OR date >= $2::date)
                AND ($3::date IS NULL OR date < $3::date + 1)
            ORDER BY date DESC
            LIMIT $4
            "#,
        )
        .bind(tickers)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn general(
        pool: &PgPool,
        symbol: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<GeneralNews>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM general_news
            WHERE ($1::text IS NULL OR symbol = $1)
                AND ($2::date IS NULL OR published_date >= $2::date)
                AND ($3::date IS NULL OR published_date < $3::date + 1)
            ORDER BY published_date DESC
            LIMIT $4
            "#,
        )
        .bind(symbol)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// `symbol`이 없으면 전체 종목.
    pub async fn stock(
        pool: &PgPool,
        symbol: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<StockNews>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM stock_news
            WHERE ($1::text IS NULL OR symbol = $1)
                AND ($2::date IS NULL OR published_date >= $2::date)
                AND ($3::date IS NULL OR published_date < $3::date + 1)
            ORDER BY published_date DESC
            LIMIT $4
            "#,
        )
        .bind(symbol)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
