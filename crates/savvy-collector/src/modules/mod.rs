//! 동기화 명령 구현.
//!
//! 각 명령은 항목(종목, 검색어, 지표 이름 등) 단위로 FMP에서 받아 한 트랜잭션으로
//! 기록합니다. 한 항목의 실패는 로그와 통계에 남기고 다음 항목으로 진행합니다.

pub mod company;
pub mod directory;
pub mod dividends_earnings;
pub mod economics;
pub mod market;
pub mod metrics;
pub mod news;
pub mod prices;
pub mod statements;

pub use company::{sync_company_details, sync_delisted_companies, sync_profiles};
pub use directory::{
    sync_countries, sync_exchanges, sync_financial_statement_symbols, sync_industries,
    sync_sectors, sync_stock_list, sync_symbol_changes,
};
pub use dividends_earnings::{
    sync_dividend_calendar, sync_dividends, sync_earnings, sync_earnings_calendar,
};
pub use economics::{
    sync_economic_calendar, sync_economic_indicators, sync_risk_premium, sync_treasury_rates,
};
pub use market::{sync_industry_performance, sync_market_movers, sync_sector_performance};
pub use metrics::sync_company_metrics;
pub use news::{sync_news, sync_sec_filings};
pub use prices::{sync_historical_prices, sync_intraday_prices, sync_quotes};
pub use statements::sync_statements;

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use chrono::NaiveDate;
use savvy_data::{map_and_save, with_transaction, ConflictAction, UpsertRow};
use sqlx::PgPool;

use crate::error::CollectorError;
use crate::{Result, SyncStats};

/// DTO를 변환해 한 트랜잭션으로 기록합니다. 기록한 행 수를 반환합니다.
pub(crate) async fn save<D, R, F>(
    pool: &PgPool,
    dtos: Vec<D>,
    mapper: F,
    unique_columns: &'static [&'static str],
    action: ConflictAction,
) -> Result<usize>
where
    D: Send + Sync + 'static,
    R: UpsertRow + 'static,
    F: Fn(&D) -> Option<R> + Send + Sync + 'static,
{
    if dtos.is_empty() {
        return Ok(0);
    }

    let saved = with_transaction(pool, move |conn| {
        Box::pin(async move { map_and_save(conn, &dtos, mapper, unique_columns, action).await })
    })
    .await?;
    Ok(saved)
}

/// 항목을 순서대로 처리합니다.
///
/// 작업은 기록한 행 수를 반환하며 `None`은 건너뜀을 뜻합니다.
pub(crate) async fn for_each_item<T, F, Fut>(
    operation: &str,
    items: Vec<T>,
    mut task: F,
) -> SyncStats
where
    T: Display + Clone,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<Option<usize>>>,
{
    let start = Instant::now();
    let mut stats = SyncStats::new();
    let count = items.len();

    tracing::info!(operation, count, "동기화 시작");

    for (idx, item) in items.into_iter().enumerate() {
        stats.total += 1;
        let label = item.to_string();

        match task(item).await {
            Ok(None) => {
                stats.skipped += 1;
                tracing::debug!(operation, item = %label, "최신 상태, 건너뜀");
            }
            Ok(Some(0)) => {
                stats.empty += 1;
                tracing::debug!(operation, item = %label, "데이터 없음");
            }
            Ok(Some(saved)) => {
                stats.success += 1;
                stats.records += saved;
                tracing::debug!(
                    operation,
                    item = %label,
                    saved,
                    progress = format!("{}/{}", idx + 1, count),
                    "저장 완료"
                );
            }
            Err(e) => {
                stats.errors += 1;
                tracing::warn!(operation, item = %label, error = %e, "항목 동기화 실패");
            }
        }
    }

    stats.elapsed = start.elapsed();
    stats
}

/// 단일 요청 명령의 결과를 통계로 만듭니다.
pub(crate) fn single_result(operation: &str, start: Instant, result: Result<usize>) -> SyncStats {
    let mut stats = SyncStats {
        total: 1,
        ..Default::default()
    };
    match result {
        Ok(0) => stats.empty = 1,
        Ok(saved) => {
            stats.success = 1;
            stats.records = saved;
        }
        Err(e) => {
            stats.errors = 1;
            tracing::warn!(operation, error = %e, "동기화 실패");
        }
    }
    stats.elapsed = start.elapsed();
    stats
}

/// 시작일이 종료일보다 늦으면 에러.
pub fn require_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if from > to {
        return Err(CollectorError::InvalidArgument(format!(
            "from_date ({}) must not be after to_date ({})",
            from, to
        )));
    }
    Ok(())
}

/// FMP 요청용 날짜 문자열.
pub(crate) fn fmp_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 쉼표/공백 구분 심볼 목록을 대문자로 정규화합니다. 중복은 첫 항목만 남깁니다.
pub fn parse_symbols(values: &[String]) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in values
        .iter()
        .flat_map(|v| v.split(|c: char| c == ',' || c.is_whitespace()))
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
    {
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}
