//! 뉴스와 SEC 공시 동기화.

use std::time::Instant;

use savvy_data::etl::symbols_with_financials;
use savvy_data::mappers::{map_fmp_article, map_general_news, map_sec_filing, map_stock_news};
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{for_each_item, save, single_result};
use crate::{CollectorConfig, Result, SyncStats};

/// `news`: FMP 기사, 일반 뉴스, 종목 뉴스 한 페이지씩.
pub async fn sync_news(pool: &PgPool, client: &FmpClient, page: u32, limit: u32) -> SyncStats {
    let mut stats = SyncStats::new();

    let start = Instant::now();
    let result: Result<usize> = async {
        let articles = client.fetch_fmp_articles(page, limit).await?;
        save(
            pool,
            articles,
            map_fmp_article,
            &["link", "date"],
            ConflictAction::Update,
        )
        .await
    }
    .await;
    stats.merge(&single_result("fmp-articles", start, result));

    let start = Instant::now();
    let result: Result<usize> = async {
        let news = client.fetch_general_news(page).await?;
        save(pool, news, map_general_news, &["url"], ConflictAction::Update).await
    }
    .await;
    stats.merge(&single_result("general-news", start, result));

    let start = Instant::now();
    let result: Result<usize> = async {
        let news = client.fetch_stock_news(&[], page, limit).await?;
        save(
            pool,
            news,
            map_stock_news,
            &["symbol", "url"],
            ConflictAction::Update,
        )
        .await
    }
    .await;
    stats.merge(&single_result("stock-news", start, result));

    stats
}

/// `sec-filings`: 종목별 공시 목록 한 페이지.
pub async fn sync_sec_filings(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
    form_type: Option<&str>,
    page: u32,
) -> Result<SyncStats> {
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;

    Ok(for_each_item("sec-filings", symbols, |symbol| async move {
        let filings = client.fetch_sec_filings(&symbol, form_type, page).await?;
        let saved = save(
            pool,
            filings,
            map_sec_filing,
            &["symbol", "link"],
            ConflictAction::Update,
        )
        .await?;
        Ok(Some(saved))
    })
    .await)
}
