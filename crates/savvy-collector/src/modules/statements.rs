//! 분기 재무제표 동기화.
//!
//! 종목별 마지막 저장 행을 보고 전체 이력, 최신 1건, 건너뛰기 중 하나를 고릅니다.

use chrono::{Local, NaiveDate};
use savvy_data::etl::{latest_statement, statement_fetch_plan, symbols_with_financials, StatementKind};
use savvy_data::mappers::{map_balance_sheet, map_cash_flow_statement, map_income_statement};
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;
use tracing::info;

use super::{for_each_item, save};
use crate::{CollectorConfig, Result, SyncStats};

/// FMP 분기 보고서 기간.
const QUARTER: &str = "quarter";

const STATEMENT_KEY: &[&str] = &["symbol", "date"];

/// `statements`: 지정한 종류의 재무제표를 동기화합니다.
pub async fn sync_statements(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
    kinds: &[StatementKind],
) -> Result<SyncStats> {
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;
    let today = Local::now().date_naive();
    let mut total = SyncStats::new();

    for &kind in kinds {
        info!(kind = %kind, symbols = symbols.len(), "재무제표 동기화");
        let stats = for_each_item(kind.table(), symbols.clone(), |symbol| async move {
            sync_symbol(pool, client, kind, &symbol, config.statement_stale_months, today).await
        })
        .await;
        stats.log_summary(kind.table());
        total.merge(&stats);
    }

    Ok(total)
}

async fn sync_symbol(
    pool: &PgPool,
    client: &FmpClient,
    kind: StatementKind,
    symbol: &str,
    stale_months: u32,
    today: NaiveDate,
) -> Result<Option<usize>> {
    let latest = latest_statement(pool, kind, symbol).await?;
    let Some(limit) = statement_fetch_plan(latest.as_ref(), stale_months, today).statement_limit()
    else {
        return Ok(None);
    };

    let saved = match kind {
        StatementKind::Income => {
            let rows = client.fetch_income_statements(symbol, QUARTER, limit).await?;
            save(pool, rows, map_income_statement, STATEMENT_KEY, ConflictAction::Update).await?
        }
        StatementKind::Balance => {
            let rows = client.fetch_balance_sheets(symbol, QUARTER, limit).await?;
            save(pool, rows, map_balance_sheet, STATEMENT_KEY, ConflictAction::Update).await?
        }
        StatementKind::CashFlow => {
            let rows = client.fetch_cash_flow_statements(symbol, QUARTER, limit).await?;
            save(pool, rows, map_cash_flow_statement, STATEMENT_KEY, ConflictAction::Update)
                .await?
        }
    };

    Ok(Some(saved))
}
