//! 거시경제 조회.

use chrono::NaiveDate;
use savvy_data::storage::models::{
    EconomicCalendarEvent, EconomicIndicator, MarketRiskPremium, TreasuryRate,
};
use savvy_data::Result;
use sqlx::PgPool;

/// 경제 지표 필터.
#[derive(Debug, Default, Clone)]
pub struct IndicatorFilter {
    pub name: Option<String>,
    pub country: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub struct EconomicsRepository;

impl EconomicsRepository {
    /// 최신순.
    pub async fn treasury_rates(
        pool: &PgPool,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<TreasuryRate>> {
        let rates = sqlx::query_as(
            r#"
            SELECT * FROM treasury_rate
            WHERE ($1::date IS NULL OR date >= $1)
                AND ($2::date IS NULL OR date <= $2)
            ORDER BY date DESC
            LIMIT $3
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rates)
    }

    pub async fn treasury_rate(pool: &PgPool, date: NaiveDate) -> Result<Option<TreasuryRate>> {
        let rate = sqlx::query_as("SELECT * FROM treasury_rate WHERE date = $1")
            .bind(date)
            .fetch_optional(pool)
            .await?;
        Ok(rate)
    }

    /// 최신순.
    pub async fn indicators(
        pool: &PgPool,
        filter: &IndicatorFilter,
        limit: i64,
    ) -> Result<Vec<EconomicIndicator>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM economic_indicator
            WHERE ($1::text IS NULL OR name = $1)
                AND ($2::text IS NULL OR country = $2)
                AND ($3::date IS NULL OR date >= $3)
                AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, name
            LIMIT $5
            "#,
        )
        .bind(&filter.name)
        .bind(&filter.country)
        .bind(filter.from)
        .bind(filter.to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// 일정 순(오름차순). 종료일은 그날 전체를 포함합니다.
    pub async fn calendar(
        pool: &PgPool,
        country: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<EconomicCalendarEvent>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM economic_calendar_event
            WHERE ($1::text IS NULL OR country = $1)
                AND ($2::date IS NULL OR date >= $2::date)
                AND ($3::date IS NULL OR date < $3::date + 1)
            ORDER BY date
            LIMIT $4
            "#,
        )
        .bind(country)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn risk_premiums(pool: &PgPool, limit: i64) -> Result<Vec<MarketRiskPremium>> {
        let rows = sqlx::query_as("SELECT * FROM market_risk_premium ORDER BY country LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn risk_premium(pool: &PgPool, country: &str) -> Result<Option<MarketRiskPremium>> {
        let row = sqlx::query_as("SELECT * FROM market_risk_premium WHERE country = $1")
            .bind(country)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}
