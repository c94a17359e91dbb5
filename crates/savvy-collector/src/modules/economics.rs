//! 거시 경제 데이터 동기화.

use std::time::Instant;

use chrono::NaiveDate;
use savvy_data::mappers::{
    map_economic_calendar_event, map_economic_indicator, map_market_risk_premium,
    map_treasury_rate, parse_date,
};
use savvy_data::provider::fmp::dto;
use savvy_data::{ConflictAction, FmpClient};
use sqlx::PgPool;

use super::{fmp_date, for_each_item, require_range, save, single_result};
use crate::{Result, SyncStats};

/// 기간 밖이거나 날짜를 읽을 수 없는 값을 버립니다.
///
/// 지표 API는 기간 파라미터 없이 전체 이력을 반환합니다.
pub fn within_range(
    values: Vec<dto::EconomicIndicator>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<dto::EconomicIndicator> {
    values
        .into_iter()
        .filter(|v| matches!(parse_date(v.date.as_deref()), Some(d) if d >= from && d <= to))
        .collect()
}

/// `economic-indicators`: 지표별로 기간 내 값을 기록합니다.
pub async fn sync_economic_indicators(
    pool: &PgPool,
    client: &FmpClient,
    names: Vec<String>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;

    Ok(for_each_item("economic-indicators", names, |name| async move {
        let values = within_range(client.fetch_economic_indicator(&name).await?, from, to);
        let owner = name.clone();
        let saved = save(
            pool,
            values,
            move |dto| map_economic_indicator(&owner, dto),
            &["name", "date"],
            ConflictAction::Update,
        )
        .await?;
        Ok(Some(saved))
    })
    .await)
}

/// `treasury-rates`
pub async fn sync_treasury_rates(
    pool: &PgPool,
    client: &FmpClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let start = Instant::now();
    let result: Result<usize> = async {
        let rates = client
            .fetch_treasury_rates(&fmp_date(from), &fmp_date(to))
            .await?;
        save(pool, rates, map_treasury_rate, &["date"], ConflictAction::Update).await
    }
    .await;
    Ok(single_result("treasury-rates", start, result))
}

/// `economic-calendar`
pub async fn sync_economic_calendar(
    pool: &PgPool,
    client: &FmpClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncStats> {
    require_range(from, to)?;
    let start = Instant::now();
    let result: Result<usize> = async {
        let events = client
            .fetch_economic_calendar(&fmp_date(from), &fmp_date(to))
            .await?;
        save(
            pool,
            events,
            map_economic_calendar_event,
            &["date", "event", "country"],
            ConflictAction::Update,
        )
        .await
    }
    .await;
    Ok(single_result("economic-calendar", start, result))
}

/// `risk-premium`: 국가별 시장 위험 프리미엄.
pub async fn sync_risk_premium(pool: &PgPool, client: &FmpClient) -> SyncStats {
    let start = Instant::now();
    let result: Result<usize> = async {
        let premiums = client.fetch_market_risk_premium().await?;
        save(
            pool,
            premiums,
            map_market_risk_premium,
            &["country"],
            ConflictAction::Update,
        )
        .await
    }
    .await;
    single_result("risk-premium", start, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(date: Option<&str>) -> dto::EconomicIndicator {
        dto::EconomicIndicator {
            date: date.map(str::to_string),
            value: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_within_range_is_inclusive() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let values = vec![
            value(Some("2023-12-31")),
            value(Some("2024-01-01")),
            value(Some("2024-06-30")),
            value(Some("2024-07-01")),
            value(Some("not a date")),
            value(None),
        ];

        let kept = within_range(values, d("2024-01-01"), d("2024-06-30"));
        let dates: Vec<_> = kept.iter().filter_map(|v| v.date.as_deref()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-06-30"]);
    }
}
