//! 섹터/산업 성과와 상위 종목 동기화.

use std::time::Instant;

use chrono::NaiveDate;
use savvy_data::mappers::{
    map_active_stock, map_industry_pe, map_industry_performance, map_sector_pe,
    map_sector_performance, map_stock_gainer, map_stock_loser,
};
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{fmp_date, for_each_item, require_range, save, single_result};
use crate::{Result, SyncStats};

const SECTOR_KEY: &[&str] = &["sector", "date", "exchange"];
const INDUSTRY_KEY: &[&str] = &["industry", "date", "exchange"];
const MOVER_KEY: &[&str] = &["date", "symbol"];

/// 디렉터리에 저장된 섹터 이름.
async fn stored_sectors(pool: &PgPool) -> Result<Vec<String>> {
    let sectors = sqlx::query_scalar("SELECT sector FROM sector ORDER BY sector")
        .fetch_all(pool)
        .await?;
    Ok(sectors)
}

/// 디렉터리에 저장된 산업 이름.
async fn stored_industries(pool: &PgPool) -> Result<Vec<String>> {
    let industries = sqlx::query_scalar("SELECT industry FROM industry ORDER BY industry")
        .fetch_all(pool)
        .await?;
    Ok(industries)
}

/// `sector-performance`: 섹터별 등락률과 PER.
///
/// 섹터 목록은 `sectors` 명령으로 먼저 채워져 있어야 합니다.
pub async fn sync_sector_performance(
    pool: &PgPool,
    client: &FmpClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let sectors = stored_sectors(pool).await?;
    let (from, to) = (fmp_date(from), fmp_date(to));
    let (from, to) = (from.as_str(), to.as_str());

    Ok(for_each_item("sector-performance", sectors, |sector| async move {
        let performance = client.fetch_sector_performance(&sector, from, to).await?;
        let mut saved = save(
            pool,
            performance,
            map_sector_performance,
            SECTOR_KEY,
            ConflictAction::Update,
        )
        .await?;

        let pe = client.fetch_sector_pe(&sector, from, to).await?;
        saved += save(pool, pe, map_sector_pe, SECTOR_KEY, ConflictAction::Update).await?;
        Ok(Some(saved))
    })
    .await)
}

/// `industry-performance`: 산업별 등락률과 PER.
pub async fn sync_industry_performance(
    pool: &PgPool,
    client: &FmpClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let industries = stored_industries(pool).await?;
    let (from, to) = (fmp_date(from), fmp_date(to));
    let (from, to) = (from.as_str(), to.as_str());

    Ok(for_each_item("industry-performance", industries, |industry| async move {
        let performance = client
            .fetch_industry_performance(&industry, from, to)
            .await?;
        let mut saved = save(
            pool,
            performance,
            map_industry_performance,
            INDUSTRY_KEY,
            ConflictAction::Update,
        )
        .await?;

        let pe = client.fetch_industry_pe(&industry, from, to).await?;
        saved += save(pool, pe, map_industry_pe, INDUSTRY_KEY, ConflictAction::Update).await?;
        Ok(Some(saved))
    })
    .await)
}

/// `market-movers`: 상승, 하락, 거래 상위 종목을 `date` 스냅샷으로 기록합니다.
pub async fn sync_market_movers(pool: &PgPool, client: &FmpClient, date: NaiveDate) -> SyncStats {
    let mut stats = SyncStats::new();

    let start = Instant::now();
    let result: Result<usize> = async {
        let gainers = client.fetch_gainers().await?;
        save(
            pool,
            gainers,
            move |dto| map_stock_gainer(date, dto),
            MOVER_KEY,
            ConflictAction::Update,
        )
        .await
    }
    .await;
    stats.merge(&single_result("gainers", start, result));

    let start = Instant::now();
    let result: Result<usize> = async {
        let losers = client.fetch_losers().await?;
        save(
            pool,
            losers,
            move |dto| map_stock_loser(date, dto),
            MOVER_KEY,
            ConflictAction::Update,
        )
        .await
    }
    .await;
    stats.merge(&single_result("losers", start, result));

    let start = Instant::now();
    let result: Result<usize> = async {
        let actives = client.fetch_most_active().await?;
        save(
            pool,
            actives,
            move |dto| map_active_stock(date, dto),
            MOVER_KEY,
            ConflictAction::Update,
        )
        .await
    }
    .await;
    stats.merge(&single_result("actives", start, result));

    stats
}
