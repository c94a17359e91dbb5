//! 참조 목록 조회 (심볼, 거래소, 섹터, 산업, 국가, 심볼 변경).

use savvy_data::storage::models::{
    Country, Exchange, FinancialStatementSymbol, Industry, Sector, StockSymbol, SymbolChange,
};
use savvy_data::Result;
use sqlx::PgPool;

pub struct DirectoryRepository;

impl DirectoryRepository {
    /// `exchange`가 있으면 거래소 약칭으로 거릅니다.
    pub async fn symbols(
        pool: &PgPool,
        exchange: Option<&str>,
        limit: i64,
    ) -> Result<Vec<StockSymbol>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM stock_symbol
            WHERE ($1::text IS NULL OR exchange_short_name = $1)
            ORDER BY symbol
            LIMIT $2
            "#,
        )
        .bind(exchange)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn symbol(pool: &PgPool, symbol: &str) -> Result<Option<StockSymbol>> {
        let row = sqlx::query_as("SELECT * FROM stock_symbol WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn financial_statement_symbols(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<FinancialStatementSymbol>> {
        let rows =
            sqlx::query_as("SELECT * FROM financial_statement_symbol ORDER BY symbol LIMIT $1")
                .bind(limit)
                .fetch_all(pool)
                .await?;
        Ok(rows)
    }

    pub async fn financial_statement_symbol(
        pool: &PgPool,
        symbol: &str,
    ) -> Result<Option<FinancialStatementSymbol>> {
        let row = sqlx::query_as("SELECT * FROM financial_statement_symbol WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn exchanges(pool: &PgPool, limit: i64) -> Result<Vec<Exchange>> {
        let rows = sqlx::query_as("SELECT * FROM exchange ORDER BY name LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn exchange_by_name(pool: &PgPool, name: &str) -> Result<Option<Exchange>> {
        let row = sqlx::query_as("SELECT * FROM exchange WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn exchange_by_code(pool: &PgPool, code: &str) -> Result<Option<Exchange>> {
        let row = sqlx::query_as("SELECT * FROM exchange WHERE code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn sectors(pool: &PgPool, limit: i64) -> Result<Vec<Sector>> {
        let rows = sqlx::query_as("SELECT * FROM sector ORDER BY sector LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn sector(pool: &PgPool, sector: &str) -> Result<Option<Sector>> {
        let row = sqlx::query_as("SELECT * FROM sector WHERE sector = $1")
            .bind(sector)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn industries(pool: &PgPool, limit: i64) -> Result<Vec<Industry>> {
        let rows = sqlx::query_as("SELECT * FROM industry ORDER BY industry LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn industry(pool: &PgPool, industry: &str) -> Result<Option<Industry>> {
        let row = sqlx::query_as("SELECT * FROM industry WHERE industry = $1")
            .bind(industry)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn countries(pool: &PgPool, limit: i64) -> Result<Vec<Country>> {
        let rows = sqlx::query_as("SELECT * FROM country ORDER BY country LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn country(pool: &PgPool, country: &str) -> Result<Option<Country>> {
        let row = sqlx::query_as("SELECT * FROM country WHERE country = $1")
            .bind(country)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// 변경일 최신순.
    pub async fn symbol_changes(pool: &PgPool, limit: i64) -> Result<Vec<SymbolChange>> {
        let rows = sqlx::query_as(
            "SELECT * FROM symbol_change ORDER BY change_date DESC, old_symbol LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn changes_from(pool: &PgPool, old_symbol: &str) -> Result<Vec<SymbolChange>> {
        let rows = sqlx::query_as(
            "SELECT * FROM symbol_change WHERE old_symbol = $1 ORDER BY change_date DESC",
        )
        .bind(old_symbol)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn changes_to(pool: &PgPool, new_symbol: &str) -> Result<Vec<SymbolChange>> {
        let rows = sqlx::query_as(
            "SELECT * FROM symbol_change WHERE new_symbol = $1 ORDER BY change_date DESC",
        )
        .bind(new_symbol)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
