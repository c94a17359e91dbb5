//! 시장 성과 조회.

use chrono::NaiveDate;
use savvy_data::storage::models::{
    ActiveStock, IndustryPe, IndustryPerformance, SectorPe, SectorPerformance, StockGainer,
    StockLoser,
};
use savvy_data::Result;
use sqlx::PgPool;

/// 섹터/산업 시계열 테이블.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSeries {
    SectorPerformance,
    IndustryPerformance,
    SectorPe,
    IndustryPe,
}

impl GroupSeries {
    fn table(&self) -> &'static str {
        match self {
            GroupSeries::SectorPerformance => "sector_performance",
            GroupSeries::IndustryPerformance => "industry_performance",
            GroupSeries::SectorPe => "sector_pe",
            GroupSeries::IndustryPe => "industry_pe",
        }
    }

    fn key_column(&self) -> &'static str {
        match self {
            GroupSeries::SectorPerformance | GroupSeries::SectorPe => "sector",
            GroupSeries::IndustryPerformance | GroupSeries::IndustryPe => "industry",
        }
    }

    fn sql(&self) -> String {
        format!(
            r#"
            SELECT * FROM {table}
            WHERE {key} = $1
                AND ($2::date IS NULL OR date >= $2)
                AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC, exchange
            LIMIT $4
            "#,
            table = self.table(),
            key = self.key_column()
        )
    }
}

/// 상위 종목 테이블.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movers {
    Gainers,
    Losers,
    Actives,
}

impl Movers {
    fn sql(&self) -> &'static str {
        match self {
            Movers::Gainers => {
                "SELECT * FROM stock_gainer WHERE date = $1 ORDER BY changes_percentage DESC NULLS LAST"
            }
            Movers::Losers => {
                "SELECT * FROM stock_loser WHERE date = $1 ORDER BY changes_percentage ASC NULLS LAST"
            }
            Movers::Actives => "SELECT * FROM active_stock WHERE date = $1 ORDER BY symbol",
        }
    }
}

pub struct MarketRepository;

impl MarketRepository {
    async fn series<T>(
        pool: &PgPool,
        series: GroupSeries,
        name: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as(&series.sql())
            .bind(name)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn sector_performance(
        pool: &PgPool,
        sector: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<SectorPerformance>> {
        Self::series(pool, GroupSeries::SectorPerformance, sector, from, to, limit).await
    }

    pub async fn industry_performance(
        pool: &PgPool,
        industry: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<IndustryPerformance>> {
        Self::series(pool, GroupSeries::IndustryPerformance, industry, from, to, limit).await
    }

    pub async fn sector_pe(
        pool: &PgPool,
        sector: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<SectorPe>> {
        Self::series(pool, GroupSeries::SectorPe, sector, from, to, limit).await
    }

    pub async fn industry_pe(
        pool: &PgPool,
        industry: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<IndustryPe>> {
        Self::series(pool, GroupSeries::IndustryPe, industry, from, to, limit).await
    }

    async fn movers<T>(pool: &PgPool, movers: Movers, date: NaiveDate) -> Result<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as(movers.sql())
            .bind(date)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn gainers(pool: &PgPool, date: NaiveDate) -> Result<Vec<StockGainer>> {
        Self::movers(pool, Movers::Gainers, date).await
    }

    pub async fn losers(pool: &PgPool, date: NaiveDate) -> Result<Vec<StockLoser>> {
        Self::movers(pool, Movers::Losers, date).await
    }

    pub async fn actives(pool: &PgPool, date: NaiveDate) -> Result<Vec<ActiveStock>> {
        Self::movers(pool, Movers::Actives, date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_sql_uses_matching_key() {
        let sql = GroupSeries::IndustryPe.sql();
        assert!(sql.contains("FROM industry_pe"));
        assert!(sql.contains("WHERE industry = $1"));

        let sql = GroupSeries::SectorPerformance.sql();
        assert!(sql.contains("FROM sector_performance"));
        assert!(sql.contains("WHERE sector = $1"));
    }

    #[test]
    fn test_movers_sql() {
        assert!(Movers::Gainers.sql().contains("stock_gainer"));
        assert!(Movers::Losers.sql().contains("stock_loser"));
        assert!(Movers::Actives.sql().contains("active_stock"));
    }
}
