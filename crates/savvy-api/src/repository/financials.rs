//! 재무제표 조회.

use savvy_data::storage::models::{BalanceSheet, CashFlowStatement, IncomeStatement};
use savvy_data::Result;
use sqlx::PgPool;

pub struct FinancialsRepository;

impl FinancialsRepository {
    /// 날짜 최신순. `period`가 있으면 해당 보고 기간만 (대소문자 무시).
    pub async fn income_statements(
        pool: &PgPool,
        symbol: &str,
        period: Option<&str>,
        limit: i64,
    ) -> Result<Vec<IncomeStatement>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM income_statement
            WHERE symbol = $1
                AND ($2::text IS NULL OR UPPER(period) = UPPER($2))
            ORDER BY date DESC
            LIMIT $3
            "#,
        )
        .bind(symbol)
        .bind(period)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn balance_sheets(
        pool: &PgPool,
        symbol: &str,
        period: Option<&str>,
        limit: i64,
    ) -> Result<Vec<BalanceSheet>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM balance_sheet
            WHERE symbol = $1
                AND ($2::text IS NULL OR UPPER(period) = UPPER($2))
            ORDER BY date DESC
            LIMIT $3
            "#,
        )
        .bind(symbol)
        .bind(period)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn cash_flow_statements(
        pool: &PgPool,
        symbol: &str,
        period: Option<&str>,
        limit: i64,
    ) -> Result<Vec<CashFlowStatement>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM cash_flow_statement
            WHERE symbol = $1
                AND ($2::text IS NULL OR UPPER(period) = UPPER($2))
            ORDER BY date DESC
            LIMIT $3
            "#,
        )
        .bind(symbol)
        .bind(period)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
