//! 기업 지표 계산 및 저장.
//!
//! 종목을 묶음 단위로 계산하고 묶음마다 한 트랜잭션으로 기록합니다.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use savvy_data::etl::symbols_with_financials;
use savvy_data::metrics::load_metrics_inputs;
use savvy_data::storage::models::CompanyMetrics;
use savvy_data::{bulk_insert_or_update, calculate_company_metrics, with_transaction};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::{CollectorConfig, Result, SyncStats};

/// 한 종목의 지표. 재무제표가 없으면 `None`.
async fn compute(pool: &PgPool, symbol: &str, today: NaiveDate) -> Result<Option<CompanyMetrics>> {
    let inputs = load_metrics_inputs(pool, symbol).await?;
    Ok(calculate_company_metrics(symbol, &inputs, today))
}

async fn write_batch(pool: &PgPool, rows: Vec<CompanyMetrics>) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let count = rows.len();
    with_transaction(pool, move |conn| {
        Box::pin(async move { bulk_insert_or_update(conn, &rows, &["symbol"]).await })
    })
    .await?;
    Ok(count)
}

/// `metrics`: 재무제표 제공 종목의 지표를 다시 계산합니다.
///
/// `batch_size`를 주지 않으면 설정값을 사용합니다.
pub async fn sync_company_metrics(
    pool: &PgPool,
    config: &CollectorConfig,
    batch_size: Option<usize>,
) -> Result<SyncStats> {
    let start = Instant::now();
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;
    let batch_size = batch_size.unwrap_or(config.metrics_batch_size).max(1);
    let today = Local::now().date_naive();
    let mut stats = SyncStats::new();

    info!(symbols = symbols.len(), batch_size, "기업 지표 계산 시작");

    for (idx, batch) in symbols.chunks(batch_size).enumerate() {
        let mut rows = Vec::with_capacity(batch.len());
        let mut computed = 0;

        for symbol in batch {
            stats.total += 1;
            match compute(pool, symbol, today).await {
                Ok(Some(metrics)) => {
                    computed += 1;
                    rows.push(metrics);
                }
                Ok(None) => {
                    stats.skipped += 1;
                    debug!(symbol = %symbol, "재무제표 없음, 건너뜀");
                }
                Err(e) => {
                    stats.errors += 1;
                    warn!(symbol = %symbol, error = %e, "지표 계산 실패");
                }
            }
        }

        match write_batch(pool, rows).await {
            Ok(saved) => {
                stats.success += computed;
                stats.records += saved;
                debug!(batch = idx + 1, saved, "지표 묶음 저장 완료");
            }
            Err(e) => {
                stats.errors += computed;
                warn!(batch = idx + 1, error = %e, "지표 묶음 저장 실패");
            }
        }
    }

    stats.elapsed = start.elapsed();
    Ok(stats)
}
