//! 시세, 일봉, 분봉 동기화.

use std::fmt;

use chrono::NaiveDate;
use savvy_data::etl::symbols_with_financials;
use savvy_data::mappers::{map_historical_price, map_intraday_price, map_quote};
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{fmp_date, for_each_item, require_range, save};
use crate::{CollectorConfig, Result, SyncStats};

/// 기본 분봉 간격.
pub const DEFAULT_INTRADAY_INTERVAL: &str = "1hour";

/// FMP가 지원하는 분봉 간격.
pub const INTRADAY_INTERVALS: [&str; 6] = ["1min", "5min", "15min", "30min", "1hour", "4hour"];

/// 한 번의 시세 요청에 담는 심볼 묶음.
#[derive(Debug, Clone)]
pub struct SymbolBatch(pub Vec<String>);

impl fmt::Display for SymbolBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if self.0.len() > 1 => {
                write!(f, "{}..{} ({})", first, last, self.0.len())
            }
            (Some(only), _) => f.write_str(only),
            _ => f.write_str("(empty)"),
        }
    }
}

/// 심볼을 `size`개씩 묶습니다. `size`가 0이면 1로 취급합니다.
pub fn batch_symbols(symbols: &[String], size: usize) -> Vec<SymbolBatch> {
    symbols
        .chunks(size.max(1))
        .map(|chunk| SymbolBatch(chunk.to_vec()))
        .collect()
}

/// 재무제표 제공 종목에 추적 지수를 더한 기본 대상.
async fn default_symbols(pool: &PgPool, config: &CollectorConfig) -> Result<Vec<String>> {
    let mut symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;
    for index in &config.sync_indices {
        if !symbols.contains(index) {
            symbols.push(index.clone());
        }
    }
    Ok(symbols)
}

/// `quotes`: 대상 종목의 현재 시세를 묶음 단위로 받습니다.
pub async fn sync_quotes(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
) -> Result<SyncStats> {
    let symbols = default_symbols(pool, config).await?;
    let batches = batch_symbols(&symbols, config.quote_batch_size);

    Ok(for_each_item("quotes", batches, |batch| async move {
        let quotes = client.fetch_quotes(&batch.0).await?;
        let saved = save(pool, quotes, map_quote, &["symbol", "timestamp"], ConflictAction::Update)
            .await?;
        Ok(Some(saved))
    })
    .await)
}

/// `historical-prices`: 기간 내 일봉. 심볼을 주지 않으면 기본 대상 전체입니다.
pub async fn sync_historical_prices(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
    from: NaiveDate,
    to: NaiveDate,
    symbols: Vec<String>,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let symbols = if symbols.is_empty() {
        default_symbols(pool, config).await?
    } else {
        symbols
    };
    let (from, to) = (fmp_date(from), fmp_date(to));
    let (from, to) = (from.as_str(), to.as_str());

    Ok(for_each_item("historical-prices", symbols, |symbol| async move {
        let response = client
            .fetch_historical_prices(&symbol, Some(from), Some(to))
            .await?;
        let owner = symbol.clone();
        let saved = save(
            pool,
            response.historical,
            move |dto| map_historical_price(&owner, dto),
            &["symbol", "date"],
            ConflictAction::Update,
        )
        .await?;
        Ok(Some(saved))
    })
    .await)
}

/// `intraday-prices`: 지정 간격의 최근 분봉.
pub async fn sync_intraday_prices(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
    interval: &str,
    symbols: Vec<String>,
) -> Result<SyncStats> {
    if !INTRADAY_INTERVALS.contains(&interval) {
        return Err(crate::CollectorError::InvalidArgument(format!(
            "지원하지 않는 분봉 간격: {} (허용: {})",
            interval,
            INTRADAY_INTERVALS.join(", ")
        )));
    }
    let symbols = if symbols.is_empty() {
        default_symbols(pool, config).await?
    } else {
        symbols
    };

    Ok(for_each_item("intraday-prices", symbols, |symbol| async move {
        let prices = client.fetch_intraday_prices(&symbol, interval).await?;
        let owner = symbol.clone();
        let saved = save(
            pool,
            prices,
            move |dto| map_intraday_price(&owner, dto),
            &["symbol", "date"],
            ConflictAction::Update,
        )
        .await?;
        Ok(Some(saved))
    })
    .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn symbols(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{:03}", i)).collect()
    }

    #[test]
    fn test_batch_symbols() {
        let batches = batch_symbols(&symbols(120), 50);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].0.len(), 50);
        assert_eq!(batches[2].0.len(), 20);

        assert_eq!(batch_symbols(&symbols(3), 0).len(), 3);
        assert!(batch_symbols(&[], 50).is_empty());
    }

    #[test]
    fn test_batch_display() {
        let batches = batch_symbols(&symbols(3), 10);
        assert_eq!(batches[0].to_string(), "S000..S002 (3)");

        let single = SymbolBatch(vec!["AAPL".to_string()]);
        assert_eq!(single.to_string(), "AAPL");
    }

    #[test]
    fn test_default_interval_is_supported() {
        assert!(INTRADAY_INTERVALS.contains(&DEFAULT_INTRADAY_INTERVAL));
    }

    proptest! {
        #[test]
        fn prop_batches_preserve_symbols(n in 0usize..300, size in 0usize..80) {
            let input = symbols(n);
            let batches = batch_symbols(&input, size);

            let flattened: Vec<String> = batches.iter().flat_map(|b| b.0.clone()).collect();
            prop_assert_eq!(flattened, input);
            prop_assert!(batches.iter().all(|b| !b.0.is_empty() && b.0.len() <= size.max(1)));
        }
    }
}
