//! 기업 지표 조회 (스크리너).

use savvy_data::storage::models::CompanyMetrics;
use savvy_data::Result;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use utoipa::IntoParams;
use validator::Validate;

/// 지표 목록 필터와 페이지.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct MetricsFilter {
    /// 섹터 (정확히 일치)
    pub sector: Option<String>,
    pub min_pe_ratio: Option<f64>,
    pub max_pe_ratio: Option<f64>,
    pub min_dividend_yield: Option<f64>,
    pub max_dividend_yield: Option<f64>,
    pub min_roic: Option<f64>,
    pub max_roic: Option<f64>,
    pub min_market_cap: Option<f64>,
    pub max_market_cap: Option<f64>,
    pub min_years_increasing_dividend: Option<i32>,
    /// 페이지 번호 (1-1000000)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 1_000_000, message = "page는 1-1000000이어야 합니다"))]
    pub page: i64,
    /// 페이지 크기 (1-500)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 500, message = "page_size는 1-500이어야 합니다"))]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    50
}

impl Default for MetricsFilter {
    fn default() -> Self {
        Self {
            sector: None,
            min_pe_ratio: None,
            max_pe_ratio: None,
            min_dividend_yield: None,
            max_dividend_yield: None,
            min_roic: None,
            max_roic: None,
            min_market_cap: None,
            max_market_cap: None,
            min_years_increasing_dividend: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl MetricsFilter {
    /// 검증 전 값이 와도 넘치지 않도록 포화 연산합니다.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.page_size.max(0))
    }
}

/// 전체 건수에 대한 페이지 수.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    }
}

pub struct MetricsRepository;

impl MetricsRepository {
    pub async fn get(pool: &PgPool, symbol: &str) -> Result<Option<CompanyMetrics>> {
        let row = sqlx::query_as("SELECT * FROM company_metrics WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// 필터에 맞는 한 페이지와 전체 건수. 심볼 순입니다.
    pub async fn list(pool: &PgPool, filter: &MetricsFilter) -> Result<(Vec<CompanyMetrics>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM company_metrics WHERE 1=1");
        Self::add_filter_conditions(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut builder = Self::page_query(filter);
        let items = builder
            .build_query_as::<CompanyMetrics>()
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    fn page_query(filter: &MetricsFilter) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT * FROM company_metrics WHERE 1=1");
        Self::add_filter_conditions(&mut builder, filter);
        builder.push(" ORDER BY symbol LIMIT ");
        builder.push_bind(filter.page_size);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset());
        builder
    }

    /// 동적 WHERE 조건 추가
    fn add_filter_conditions(builder: &mut QueryBuilder<'static, Postgres>, filter: &MetricsFilter) {
        if let Some(ref sector) = filter.sector {
            builder.push(" AND sector = ");
            builder.push_bind(sector.clone());
        }

        let ranges = [
            ("pe_ratio", filter.min_pe_ratio, filter.max_pe_ratio),
            ("dividend_yield", filter.min_dividend_yield, filter.max_dividend_yield),
            ("roic", filter.min_roic, filter.max_roic),
            ("market_cap", filter.min_market_cap, filter.max_market_cap),
        ];
        for (column, min, max) in ranges {
            if let Some(v) = min {
                builder.push(format!(" AND {} >= ", column));
                builder.push_bind(v);
            }
            if let Some(v) = max {
                builder.push(format!(" AND {} <= ", column));
                builder.push_bind(v);
            }
        }

        if let Some(v) = filter.min_years_increasing_dividend {
            builder.push(" AND years_increasing_dividend >= ");
            builder.push_bind(v);
        }
    }

    /// NULL이 아닌 섹터, 정렬됨.
    pub async fn sectors(pool: &PgPool) -> Result<Vec<String>> {
        let sectors = sqlx::query_scalar(
            "SELECT DISTINCT sector FROM company_metrics WHERE sector IS NOT NULL ORDER BY sector",
        )
        .fetch_all(pool)
        .await?;
        Ok(sectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 50), 0);
        assert_eq!(page_count(1, 50), 1);
        assert_eq!(page_count(100, 50), 2);
        assert_eq!(page_count(101, 50), 3);
    }

    #[test]
    fn test_filter_defaults_and_offset() {
        let filter: MetricsFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 50);
        assert_eq!(filter.offset(), 0);
        assert!(filter.validate().is_ok());

        let third = MetricsFilter {
            page: 3,
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(third.offset(), 40);
    }

    #[test]
    fn test_filter_validation() {
        let zero_page = MetricsFilter {
            page: 0,
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let huge = MetricsFilter {
            page_size: 501,
            ..Default::default()
        };
        assert!(huge.validate().is_err());

        let far = MetricsFilter {
            page: i64::MAX,
            page_size: 500,
            ..Default::default()
        };
        assert!(far.validate().is_err());
        assert_eq!(far.offset(), i64::MAX);
    }

    #[test]
    fn test_page_query_conditions() {
        let filter = MetricsFilter {
            sector: Some("Technology".to_string()),
            min_pe_ratio: Some(5.0),
            max_roic: Some(0.5),
            min_years_increasing_dividend: Some(10),
            ..Default::default()
        };
        let sql = MetricsRepository::page_query(&filter).into_sql();

        assert_eq!(
            sql,
            "SELECT * FROM company_metrics WHERE 1=1 AND sector = $1 AND pe_ratio >= $2 \
             AND roic <= $3 AND years_increasing_dividend >= $4 ORDER BY symbol LIMIT $5 OFFSET $6"
        );
    }
}
