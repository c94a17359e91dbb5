//! SEC 공시 조회. 모두 공시일 최신순입니다.

use chrono::NaiveDate;
use savvy_data::storage::models::SecFiling;
use savvy_data::Result;
use sqlx::PgPool;

pub struct SecFilingRepository;

impl SecFilingRepository {
    pub async fn by_symbol(
        pool: &PgPool,
        symbol: &str,
        form_type: Option<&str>,
        limit: i64,
    ) -> Result<Vec<SecFiling>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM sec_filing
            WHERE symbol = $1
                AND ($2::text IS NULL OR form_type = $2)
            ORDER BY filing_date DESC, accepted_date DESC NULLS LAST
            LIMIT $3
            "#,
        )
        .bind(symbol)
        .bind(form_type)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_cik(
        pool: &PgPool,
        cik: &str,
        form_type: Option<&str>,
        limit: i64,
    ) -> Result<Vec<SecFiling>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM sec_filing
            WHERE cik = $1
                AND ($2::text IS NULL OR form_type = $2)
            ORDER BY filing_date DESC, accepted_date DESC NULLS LAST
            LIMIT $3
            "#,
        )
        .bind(cik)
        .bind(form_type)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn by_date(
        pool: &PgPool,
        filing_date: NaiveDate,
        form_type: Option<&str>,
        limit: i64,
    ) -> Result<Vec<SecFiling>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM sec_filing
            WHERE filing_date = $1
                AND ($2::text IS NULL OR form_type = $2)
            ORDER BY accepted_date DESC NULLS LAST, symbol
            LIMIT $3
            "#,
        )
        .bind(filing_date)
        .bind(form_type)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
