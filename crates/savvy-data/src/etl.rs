//! 수집 대상 선정 및 갱신 필요 여부 판단.
//!
//! 재무제표와 배당은 종목별 마지막 저장 행의 날짜를 보고 전체 수집, 최신분 수집,
//! 건너뛰기 중 하나를 결정합니다.

use chrono::{Duration, NaiveDate};
use sqlx::PgPool;

use crate::error::Result;

/// 전체 수집 시 요청 건수.
pub const FULL_FETCH_LIMIT: u32 = 100;
/// 최신분 수집 시 요청 건수.
pub const LATEST_FETCH_LIMIT: u32 = 1;

/// 재무제표 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    Balance,
    CashFlow,
}

impl StatementKind {
    pub const ALL: [StatementKind; 3] = [
        StatementKind::Income,
        StatementKind::Balance,
        StatementKind::CashFlow,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            StatementKind::Income => "income_statement",
            StatementKind::Balance => "balance_sheet",
            StatementKind::CashFlow => "cash_flow_statement",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// 수집 계획.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    /// 저장된 행 없음, 이력 전체 수집
    Full,
    /// 마지막 행이 오래됨, 최신분 수집
    Latest,
    /// 최신 상태
    Skip,
}

impl FetchPlan {
    /// 재무제표 요청 건수. 건너뛰면 `None`.
    pub fn statement_limit(&self) -> Option<u32> {
        match self {
            FetchPlan::Full => Some(FULL_FETCH_LIMIT),
            FetchPlan::Latest => Some(LATEST_FETCH_LIMIT),
            FetchPlan::Skip => None,
        }
    }
}

/// 종목별 마지막 재무제표 행.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LatestStatement {
    pub date: NaiveDate,
    pub period: Option<String>,
}

fn is_quarter(period: Option<&str>) -> bool {
    matches!(period, Some("Q1" | "Q2" | "Q3" | "Q4"))
}

fn cutoff(today: NaiveDate, months: u32) -> NaiveDate {
    today - Duration::days(i64::from(months) * 30)
}

/// 재무제표 수집 계획.
///
/// 마지막 행이 분기 보고서이고 `months × 30`일보다 오래됐을 때만 최신분을 받습니다.
pub fn statement_fetch_plan(
    latest: Option<&LatestStatement>,
    months: u32,
    today: NaiveDate,
) -> FetchPlan {
    match latest {
        None => FetchPlan::Full,
        Some(row) if is_quarter(row.period.as_deref()) && row.date < cutoff(today, months) => {
            FetchPlan::Latest
        }
        Some(_) => FetchPlan::Skip,
    }
}

/// 배당 수집 계획.
pub fn dividend_fetch_plan(latest: Option<NaiveDate>, months: u32, today: NaiveDate) -> FetchPlan {
    match latest {
        None => FetchPlan::Full,
        Some(date) if date < cutoff(today, months) => FetchPlan::Latest,
        Some(_) => FetchPlan::Skip,
    }
}

/// 지정 거래소에 상장되어 있고 재무제표를 제공하는 심볼.
pub async fn symbols_with_financials(pool: &PgPool, exchanges: &[String]) -> Result<Vec<String>> {
    let symbols = sqlx::query_scalar(
        r#"
        SELECT s.symbol
        FROM stock_symbol s
        JOIN financial_statement_symbol f ON f.symbol = s.symbol
        WHERE s.exchange_short_name = ANY($1)
        ORDER BY s.symbol
        "#,
    )
    .bind(exchanges)
    .fetch_all(pool)
    .await?;

    Ok(symbols)
}

/// 종목의 마지막 재무제표 행.
pub async fn latest_statement(
    pool: &PgPool,
    kind: StatementKind,
    symbol: &str,
) -> Result<Option<LatestStatement>> {
    let sql = format!(
        "SELECT date, period FROM {} WHERE symbol = $1 ORDER BY date DESC LIMIT 1",
        kind.table()
    );
    let row = sqlx::query_as(&sql).bind(symbol).fetch_optional(pool).await?;
    Ok(row)
}

/// 종목의 마지막 배당일.
pub async fn latest_dividend_date(pool: &PgPool, symbol: &str) -> Result<Option<NaiveDate>> {
    let date = sqlx::query_scalar("SELECT MAX(date) FROM dividend WHERE symbol = $1")
        .bind(symbol)
        .fetch_one(pool)
        .await?;
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn statement(date: &str, period: &str) -> LatestStatement {
        LatestStatement {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            period: Some(period.to_string()),
        }
    }

    #[test]
    fn test_no_rows_fetch_full() {
        let plan = statement_fetch_plan(None, 3, today());
        assert_eq!(plan, FetchPlan::Full);
        assert_eq!(plan.statement_limit(), Some(100));
    }

    #[test]
    fn test_stale_quarter_fetch_latest() {
        let plan = statement_fetch_plan(Some(&statement("2024-03-30", "Q1")), 3, today());
        assert_eq!(plan, FetchPlan::Latest);
        assert_eq!(plan.statement_limit(), Some(1));
    }

    #[test]
    fn test_recent_or_annual_skipped() {
        assert_eq!(
            statement_fetch_plan(Some(&statement("2024-04-15", "Q2")), 3, today()),
            FetchPlan::Skip
        );
        assert_eq!(
            statement_fetch_plan(Some(&statement("2020-12-31", "FY")), 3, today()),
            FetchPlan::Skip
        );
        assert_eq!(FetchPlan::Skip.statement_limit(), None);
    }

    #[test]
    fn test_dividend_plan() {
        let old = NaiveDate::from_ymd_opt(2024, 1, 1);
        let recent = NaiveDate::from_ymd_opt(2024, 6, 1);

        assert_eq!(dividend_fetch_plan(None, 3, today()), FetchPlan::Full);
        assert_eq!(dividend_fetch_plan(old, 3, today()), FetchPlan::Latest);
        assert_eq!(dividend_fetch_plan(recent, 3, today()), FetchPlan::Skip);
    }

    #[test]
    fn test_statement_kind_tables() {
        let tables: Vec<&str> = StatementKind::ALL.iter().map(|k| k.table()).collect();
        assert_eq!(tables, ["income_statement", "balance_sheet", "cash_flow_statement"]);
    }
}
