//! 종목/분류 디렉터리 동기화.

use std::time::Instant;

use savvy_data::mappers::{
    map_country, map_exchange, map_financial_statement_symbol, map_industry, map_sector,
    map_stock_symbol, map_symbol_change,
};
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{for_each_item, save, single_result};
use crate::{Result, SyncStats};

/// 종목 검색 접두어. 검색 API는 전체 목록을 주지 않아 접두어별로 모읍니다.
pub const SEARCH_PREFIXES: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 접두어당 검색 상한.
const SEARCH_LIMIT: u32 = 30_000;

/// `stock-list`: 모든 접두어로 검색해 심볼별로 업서트합니다.
pub async fn sync_stock_list(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let prefixes: Vec<char> = SEARCH_PREFIXES.chars().collect();

    for_each_item("stock-list", prefixes, |prefix| async move {
        let results = client
            .search_symbols(&prefix.to_string(), None, SEARCH_LIMIT)
            .await?;
        let saved = save(pool, results, map_stock_symbol, &["symbol"], ConflictAction::Update).await?;
        Ok(Some(saved))
    })
    .await
}

/// `fs-symbols`: 재무제표 제공 종목.
pub async fn sync_financial_statement_symbols(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let symbols = client.fetch_financial_statement_symbols().await?;
        save(
            pool,
            symbols,
            map_financial_statement_symbol,
            &["symbol"],
            ConflictAction::Update,
        )
        .await
    }
    .await;
    single_result("fs-symbols", start, result)
}

/// `sectors`: 이미 있는 섹터는 그대로 둡니다.
pub async fn sync_sectors(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let sectors = client.fetch_sectors().await?;
        save(pool, sectors, map_sector, &["sector"], ConflictAction::Ignore).await
    }
    .await;
    single_result("sectors", start, result)
}

/// `industries`: 이미 있는 산업은 그대로 둡니다.
pub async fn sync_industries(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let industries = client.fetch_industries().await?;
        save(pool, industries, map_industry, &["industry"], ConflictAction::Ignore).await
    }
    .await;
    single_result("industries", start, result)
}

/// `exchanges`: 거래소 이름으로 업서트합니다.
pub async fn sync_exchanges(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let exchanges = client.fetch_exchanges().await?;
        save(pool, exchanges, map_exchange, &["name"], ConflictAction::Update).await
    }
    .await;
    single_result("exchanges", start, result)
}

/// `countries`
pub async fn sync_countries(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let countries = client.fetch_countries().await?;
        save(pool, countries, map_country, &["country"], ConflictAction::Ignore).await
    }
    .await;
    single_result("countries", start, result)
}

/// `symbol-changes`
pub async fn sync_symbol_changes(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let changes = client.fetch_symbol_changes().await?;
        save(
            pool,
            changes,
            map_symbol_change,
            &["old_symbol", "new_symbol", "change_date"],
            ConflictAction::Update,
        )
        .await
    }
    .await;
    single_result("symbol-changes", start, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_prefixes_cover_alphanumerics() {
        assert_eq!(SEARCH_PREFIXES.len(), 36);
        assert!(SEARCH_PREFIXES.starts_with('A'));
        assert!(SEARCH_PREFIXES.ends_with('9'));
    }
}
