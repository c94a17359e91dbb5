//! 환경변수 기반 설정 모듈.

use savvy_core::{DatabaseConfig, Settings};
use savvy_data::FmpClient;

use crate::error::CollectorError;
use crate::Result;

/// `economic-indicators`가 지표를 지정하지 않았을 때 수집하는 지표.
pub const DEFAULT_INDICATORS: [&str; 24] = [
    "GDP",
    "realGDP",
    "nominalPotentialGDP",
    "realGDPPerCapita",
    "federalFunds",
    "CPI",
    "inflationRate",
    "inflation",
    "retailSales",
    "consumerSentiment",
    "durableGoods",
    "unemploymentRate",
    "totalNonfarmPayroll",
    "initialClaims",
    "industrialProductionTotalIndex",
    "newPrivatelyOwnedHousingUnitsStartedTotalUnits",
    "totalVehicleSales",
    "retailMoneyFunds",
    "smoothedUSRecessionProbabilities",
    "3MonthOr90DayRatesAndYieldsCertificatesOfDeposit",
    "commercialBankInterestRateOnCreditCardPlansAllAccounts",
    "30YearFixedRateMortgageAverage",
    "15YearFixedRateMortgageAverage",
    "tradeBalanceGoodsAndServices",
];

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 수집 대상 거래소 약칭
    pub sync_exchanges: Vec<String>,
    /// 일봉 수집 시 추가하는 지수 심볼
    pub sync_indices: Vec<String>,
    /// 재무제표 갱신 기준 (개월)
    pub statement_stale_months: u32,
    /// 배당 갱신 기준 (개월)
    pub dividend_stale_months: u32,
    /// 시세 요청당 심볼 수
    pub quote_batch_size: usize,
    /// 지표 계산 배치 크기
    pub metrics_batch_size: usize,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        let settings = Settings::from_env()?;
        Ok(Self::from_lookup(settings.database, |key| std::env::var(key).ok()))
    }

    /// 주어진 조회 함수로 수집기 전용 값을 읽습니다.
    pub fn from_lookup<F>(database: DatabaseConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            database,
            sync_exchanges: parse_list(lookup("SYNC_EXCHANGES"), &["NYSE", "NASDAQ"]),
            sync_indices: parse_list(lookup("SYNC_INDICES"), &["^GSPC", "^DJI", "^IXIC"]),
            statement_stale_months: parse("STATEMENT_STALE_MONTHS", 3) as u32,
            dividend_stale_months: parse("DIVIDEND_STALE_MONTHS", 3) as u32,
            quote_batch_size: parse("QUOTE_BATCH_SIZE", 50).max(1) as usize,
            metrics_batch_size: parse("METRICS_BATCH_SIZE", 100).max(1) as usize,
        }
    }

    /// `FMP_API_KEY`로 FMP 클라이언트를 생성합니다. 키가 없으면 설정 에러.
    pub fn fmp_client(&self) -> Result<FmpClient> {
        FmpClient::from_env()?.ok_or_else(|| {
            CollectorError::Config("FMP_API_KEY 환경변수가 설정되지 않았습니다".to_string())
        })
    }
}

/// 쉼표 구분 목록. 비어 있으면 기본값.
pub fn parse_list(value: Option<String>, default: &[&str]) -> Vec<String> {
    let items: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/savvy".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 10,
            log_statements: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::from_lookup(database(), |_| None);

        assert_eq!(config.sync_exchanges, vec!["NYSE", "NASDAQ"]);
        assert_eq!(config.sync_indices, vec!["^GSPC", "^DJI", "^IXIC"]);
        assert_eq!(config.statement_stale_months, 3);
        assert_eq!(config.dividend_stale_months, 3);
        assert_eq!(config.quote_batch_size, 50);
        assert_eq!(config.metrics_batch_size, 100);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SYNC_EXCHANGES", "AMEX, NYSE"),
            ("QUOTE_BATCH_SIZE", "0"),
            ("STATEMENT_STALE_MONTHS", "6"),
            ("METRICS_BATCH_SIZE", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let config =
            CollectorConfig::from_lookup(database(), |k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.sync_exchanges, vec!["AMEX", "NYSE"]);
        assert_eq!(config.quote_batch_size, 1);
        assert_eq!(config.statement_stale_months, 6);
        assert_eq!(config.metrics_batch_size, 100);
    }

    #[test]
    fn test_parse_list_blank_uses_default() {
        assert_eq!(parse_list(Some(" , ".to_string()), &["A"]), vec!["A"]);
        assert_eq!(parse_list(Some("x,y".to_string()), &["A"]), vec!["x", "y"]);
    }

    #[test]
    fn test_default_indicator_names_unique() {
        let mut names = DEFAULT_INDICATORS.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_INDICATORS.len());
    }
}
