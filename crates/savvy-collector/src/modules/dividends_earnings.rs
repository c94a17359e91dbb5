//! 배당 이력과 배당/실적 캘린더 동기화.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use savvy_data::etl::{dividend_fetch_plan, latest_dividend_date, symbols_with_financials, FetchPlan};
use savvy_data::mappers::{
    map_dividend, map_dividend_calendar_event, map_earnings_calendar_event, map_earnings_report,
};
use savvy_data::provider::fmp::dto;
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{fmp_date, for_each_item, require_range, save, single_result};
use crate::{CollectorConfig, Result, SyncStats};

const SYMBOL_DATE: &[&str] = &["symbol", "date"];

/// 최신분 수집일 때 남길 배당 건수.
const LATEST_DIVIDENDS: usize = 1;

/// 수집 계획에 맞게 배당 이력을 자릅니다. 응답은 최신순입니다.
pub fn select_dividends(plan: FetchPlan, mut dividends: Vec<dto::Dividend>) -> Vec<dto::Dividend> {
    match plan {
        FetchPlan::Full => dividends,
        FetchPlan::Latest => {
            dividends.truncate(LATEST_DIVIDENDS);
            dividends
        }
        FetchPlan::Skip => Vec::new(),
    }
}

/// `dividends`: 종목별 배당 이력.
///
/// 저장된 배당이 없으면 전체, 마지막 배당이 오래됐으면 최신 1건만 기록합니다.
pub async fn sync_dividends(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
) -> Result<SyncStats> {
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;
    let today = Local::now().date_naive();
    let months = config.dividend_stale_months;

    Ok(for_each_item("dividends", symbols, |symbol| async move {
        let latest = latest_dividend_date(pool, &symbol).await?;
        let plan = dividend_fetch_plan(latest, months, today);
        if plan == FetchPlan::Skip {
            return Ok(None);
        }

        let dividends = select_dividends(plan, client.fetch_dividends(&symbol).await?);
        let saved = save(pool, dividends, map_dividend, SYMBOL_DATE, ConflictAction::Update).await?;
        Ok(Some(saved))
    })
    .await)
}

/// `earnings`: 종목별 실적 이력.
pub async fn sync_earnings(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
    limit: u32,
) -> Result<SyncStats> {
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;

    Ok(for_each_item("earnings", symbols, |symbol| async move {
        let reports = client.fetch_earnings(&symbol, limit).await?;
        let saved =
            save(pool, reports, map_earnings_report, SYMBOL_DATE, ConflictAction::Update).await?;
        Ok(Some(saved))
    })
    .await)
}

/// `dividend-calendar`
pub async fn sync_dividend_calendar(
    pool: &PgPool,
    client: &FmpClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let start = Instant::now();
    let result: Result<usize> = async {
        let events = client
            .fetch_dividend_calendar(&fmp_date(from), &fmp_date(to))
            .await?;
        save(
            pool,
            events,
            map_dividend_calendar_event,
            SYMBOL_DATE,
            ConflictAction::Update,
        )
        .await
    }
    .await;
    Ok(single_result("dividend-calendar", start, result))
}

/// `earnings-calendar`
pub async fn sync_earnings_calendar(
    pool: &PgPool,
    client: &FmpClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let start = Instant::now();
    let result: Result<usize> = async {
        let events = client
            .fetch_earnings_calendar(&fmp_date(from), &fmp_date(to))
            .await?;
        save(
            pool,
            events,
            map_earnings_calendar_event,
            SYMBOL_DATE,
            ConflictAction::Update,
        )
        .await
    }
    .await;
    Ok(single_result("earnings-calendar", start, result))
}
