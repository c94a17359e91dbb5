//! 지표 계산 입력 조회.

use sqlx::PgPool;

use super::MetricsInputs;
use crate::error::Result;
use crate::storage::models::{
    BalanceSheet, CashFlowStatement, CompanyProfile, Dividend, IncomeStatement, Quote,
};

/// 한 종목의 최근 4분기 재무제표, 최신 시세, 프로필, 전체 배당 이력을 조회합니다.
pub async fn load_metrics_inputs(pool: &PgPool, symbol: &str) -> Result<MetricsInputs> {
    let income: Vec<IncomeStatement> = sqlx::query_as(
        r#"
        SELECT * FROM income_statement
        WHERE symbol = $1 AND period ILIKE 'Q%'
        ORDER BY date DESC
        LIMIT 4
        "#,
    )
    .bind(symbol)
    .fetch_all(pool)
    .await?;

    let balance: Vec<BalanceSheet> = sqlx::query_as(
        r#"
        SELECT * FROM balance_sheet
        WHERE symbol = $1 AND period ILIKE 'Q%'
        ORDER BY date DESC
        LIMIT 4
        "#,
    )
    .bind(symbol)
    .fetch_all(pool)
    .await?;

    let cash_flow: Vec<CashFlowStatement> = sqlx::query_as(
        r#"
        SELECT * FROM cash_flow_statement
        WHERE symbol = $1 AND period ILIKE 'Q%'
        ORDER BY date DESC
        LIMIT 4
        "#,
    )
    .bind(symbol)
    .fetch_all(pool)
    .await?;

    let quote: Option<Quote> = sqlx::query_as(
        "SELECT * FROM quote WHERE symbol = $1 ORDER BY \"timestamp\" DESC LIMIT 1",
    )
    .bind(symbol)
    .fetch_optional(pool)
    .await?;

    let profile: Option<CompanyProfile> =
        sqlx::query_as("SELECT * FROM company_profile WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await?;

    let dividends: Vec<Dividend> =
        sqlx::query_as("SELECT * FROM dividend WHERE symbol = $1 ORDER BY date DESC")
            .bind(symbol)
            .fetch_all(pool)
            .await?;

    Ok(MetricsInputs {
        income,
        balance,
        cash_flow,
        quote,
        profile,
        dividends,
    })
}
