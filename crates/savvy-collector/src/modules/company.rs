//! 기업 프로필과 부가 정보 동기화.

use std::time::Instant;

use savvy_data::etl::symbols_with_financials;
use savvy_data::mappers::{
    map_company_profile, map_delisted_company, map_employee_count, map_executive,
    map_market_capitalization, map_shares_float,
};
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{for_each_item, save, single_result};
use crate::{CollectorConfig, Result, SyncStats};

/// 시가총액 이력 요청 건수.
const MARKET_CAP_LIMIT: u32 = 100;

/// `profiles`: 재무제표 제공 종목의 프로필.
pub async fn sync_profiles(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
) -> Result<SyncStats> {
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;

    Ok(for_each_item("profiles", symbols, |symbol| async move {
        let profiles = client.fetch_company_profile(&symbol).await?;
        let saved = save(pool, profiles, map_company_profile, &["symbol"], ConflictAction::Update)
            .await?;
        Ok(Some(saved))
    })
    .await)
}

/// `company-details`: 경영진, 시가총액, 직원 수, 유통주식.
///
/// 네 요청 중 하나라도 실패하면 해당 종목은 실패로 집계됩니다.
pub async fn sync_company_details(
    pool: &PgPool,
    client: &FmpClient,
    config: &CollectorConfig,
) -> Result<SyncStats> {
    let symbols = symbols_with_financials(pool, &config.sync_exchanges).await?;

    Ok(for_each_item("company-details", symbols, |symbol| async move {
        let mut saved = 0;

        let executives = client.fetch_executives(&symbol).await?;
        let owner = symbol.clone();
        saved += save(
            pool,
            executives,
            move |dto| map_executive(&owner, dto),
            &["symbol", "name"],
            ConflictAction::Update,
        )
        .await?;

        let market_caps = client
            .fetch_market_capitalization(&symbol, MARKET_CAP_LIMIT)
            .await?;
        saved += save(
            pool,
            market_caps,
            map_market_capitalization,
            &["symbol", "date"],
            ConflictAction::Update,
        )
        .await?;

        let employees = client.fetch_employee_count(&symbol).await?;
        saved += save(
            pool,
            employees,
            map_employee_count,
            &["symbol", "filing_date"],
            ConflictAction::Update,
        )
        .await?;

        let floats = client.fetch_shares_float(&symbol).await?;
        saved += save(
            pool,
            floats,
            map_shares_float,
            &["symbol", "date"],
            ConflictAction::Update,
        )
        .await?;

        Ok(Some(saved))
    })
    .await)
}

/// `delisted`: 상장폐지 기업 한 페이지.
pub async fn sync_delisted_companies(pool: &PgPool, client: &FmpClient, page: u32) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let companies = client.fetch_delisted_companies(page).await?;
        save(pool, companies, map_delisted_company, &["symbol"], ConflictAction::Update).await
    }
    .await;
    single_result("delisted", start, result)
}
