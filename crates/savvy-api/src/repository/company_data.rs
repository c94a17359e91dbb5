//! 벤더 기업 데이터 조회 (프로필, 임원, 시가총액, 직원 수, 유통 주식, 상장폐지).

use chrono::NaiveDate;
use savvy_data::storage::models::{
    CompanyProfile, DelistedCompany, EmployeeCount, Executive, MarketCapitalization, SharesFloat,
};
use savvy_data::Result;
use sqlx::PgPool;

pub struct CompanyDataRepository;

impl CompanyDataRepository {
    pub async fn list_profiles(pool: &PgPool, limit: i64) -> Result<Vec<CompanyProfile>> {
        let profiles = sqlx::query_as("SELECT * FROM company_profile ORDER BY symbol LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(profiles)
    }

    pub async fn get_profile(pool: &PgPool, symbol: &str) -> Result<Option<CompanyProfile>> {
        let profile = sqlx::query_as("SELECT * FROM company_profile WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    pub async fn executives(pool: &PgPool, symbol: &str) -> Result<Vec<Executive>> {
        let executives = sqlx::query_as("SELECT * FROM executive WHERE symbol = $1 ORDER BY name")
            .bind(symbol)
            .fetch_all(pool)
            .await?;
        Ok(executives)
    }

    pub async fn get_executive(pool: &PgPool, symbol: &str, name: &str) -> Result<Option<Executive>> {
        let executive = sqlx::query_as("SELECT * FROM executive WHERE symbol = $1 AND name = $2")
            .bind(symbol)
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(executive)
    }

    /// 최신순.
    pub async fn market_caps(
        pool: &PgPool,
        symbol: &str,
        limit: i64,
    ) -> Result<Vec<MarketCapitalization>> {
        let records = sqlx::query_as(
            "SELECT * FROM market_capitalization WHERE symbol = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn get_market_cap(
        pool: &PgPool,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<MarketCapitalization>> {
        let record =
            sqlx::query_as("SELECT * FROM market_capitalization WHERE symbol = $1 AND date = $2")
                .bind(symbol)
                .bind(date)
                .fetch_optional(pool)
                .await?;
        Ok(record)
    }

    /// 공시일 최신순.
    pub async fn employee_counts(
        pool: &PgPool,
        symbol: &str,
        limit: i64,
    ) -> Result<Vec<EmployeeCount>> {
        let records = sqlx::query_as(
            "SELECT * FROM employee_count WHERE symbol = $1 ORDER BY filing_date DESC LIMIT $2",
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn shares_float(pool: &PgPool, symbol: &str, limit: i64) -> Result<Vec<SharesFloat>> {
        let records = sqlx::query_as(
            "SELECT * FROM shares_float WHERE symbol = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn list_delisted(pool: &PgPool, limit: i64) -> Result<Vec<DelistedCompany>> {
        let records = sqlx::query_as(
            "SELECT * FROM delisted_company ORDER BY delisted_date DESC NULLS LAST, symbol LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn get_delisted(pool: &PgPool, symbol: &str) -> Result<Option<DelistedCompany>> {
        let record = sqlx::query_as("SELECT * FROM delisted_company WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await?;
        Ok(record)
    }
}
