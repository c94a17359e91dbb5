//! Financial Modeling Prep(FMP) API 클라이언트.
//!
//! 기업 프로필, 재무제표, 시세, 배당, 거시경제, 뉴스 등 수집기가 사용하는
//! 모든 원천 데이터를 제공합니다. 응답은 [`dto`] 타입으로 역직렬화되며
//! 저장용 행으로의 변환은 [`crate::mappers`]가 담당합니다.
//!
//! # API 키
//!
//! 환경변수 `FMP_API_KEY`에서 읽으며 모든 요청에 `apikey` 쿼리로 전달됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use savvy_data::provider::fmp::FmpClient;
//!
//! let client = FmpClient::new("YOUR_API_KEY")?;
//! let profiles = client.fetch_company_profile("AAPL").await?;
//! ```

pub mod dto;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{DataError, Result};

/// 기본 API 주소.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

/// 요청 간 기본 대기 시간 (밀리초).
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// FMP API 클라이언트.
#[derive(Clone)]
pub struct FmpClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    request_delay: Duration,
}

impl std::fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url)
            .field("request_delay", &self.request_delay)
            .finish_non_exhaustive()
    }
}

impl FmpClient {
    /// 기본 주소로 클라이언트를 생성합니다.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
        })
    }

    /// 다른 주소를 사용합니다 (테스트 서버 등).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 요청 간 대기 시간을 설정합니다.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// 환경변수 `FMP_API_KEY`, `FMP_BASE_URL`, `FMP_REQUEST_DELAY_MS`에서 생성합니다.
    ///
    /// API 키가 없으면 `Ok(None)`을 반환합니다.
    pub fn from_env() -> Result<Option<Self>> {
        let Some(api_key) = std::env::var("FMP_API_KEY").ok().filter(|k| !k.is_empty()) else {
            warn!("FMP_API_KEY가 설정되지 않았습니다");
            return Ok(None);
        };

        let mut client = Self::new(api_key)?;
        if let Ok(base_url) = std::env::var("FMP_BASE_URL") {
            client = client.with_base_url(base_url);
        }
        if let Some(delay) = std::env::var("FMP_REQUEST_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            client = client.with_request_delay(Duration::from_millis(delay));
        }
        Ok(Some(client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET 요청 후 JSON을 `T`로 역직렬화합니다.
    ///
    /// FMP는 잘못된 요청에도 200과 함께 `{"Error Message": ...}`를 반환하므로
    /// 본문을 먼저 확인합니다.
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, params = ?params, "FMP API 요청");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.expose_secret())])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "FMP API 오류 [{}]: {} - {}",
                path, status, body
            )));
        }

        let value: serde_json::Value = response.json().await?;
        if let Some(message) = value.get("Error Message").and_then(|m| m.as_str()) {
            return Err(DataError::FetchError(format!(
                "FMP API 오류 [{}]: {}",
                path, message
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| DataError::ParseError(format!("FMP 응답 파싱 실패 [{}]: {}", path, e)))
    }

    // =========================================================================
    // 디렉터리
    // =========================================================================

    /// 심볼 검색 (거래소 필터 선택).
    pub async fn search_symbols(
        &self,
        query: &str,
        exchange: Option<&str>,
        limit: u32,
    ) -> Result<Vec<dto::SearchResult>> {
        let mut params = vec![("query", query.to_string()), ("limit", limit.to_string())];
        if let Some(exchange) = exchange {
            params.push(("exchange", exchange.to_string()));
        }
        self.get("/stable/search-symbol", &params).await
    }

    /// 재무제표를 제공하는 심볼 목록.
    pub async fn fetch_financial_statement_symbols(
        &self,
    ) -> Result<Vec<dto::FinancialStatementSymbol>> {
        self.get("/stable/financial-statement-symbol-list", &[]).await
    }

    pub async fn fetch_exchanges(&self) -> Result<Vec<dto::Exchange>> {
        self.get("/stable/available-exchanges", &[]).await
    }

    pub async fn fetch_sectors(&self) -> Result<Vec<dto::Sector>> {
        self.get("/stable/available-sectors", &[]).await
    }

    pub async fn fetch_industries(&self) -> Result<Vec<dto::Industry>> {
        self.get("/stable/available-industries", &[]).await
    }

    pub async fn fetch_countries(&self) -> Result<Vec<dto::Country>> {
        self.get("/stable/available-countries", &[]).await
    }

    pub async fn fetch_symbol_changes(&self) -> Result<Vec<dto::SymbolChange>> {
        self.get("/api/v4/symbol_change", &[]).await
    }

    // =========================================================================
    // 기업
    // =========================================================================

    pub async fn fetch_company_profile(&self, symbol: &str) -> Result<Vec<dto::CompanyProfile>> {
        self.get(&format!("/api/v3/profile/{}", symbol), &[]).await
    }

    pub async fn fetch_executives(&self, symbol: &str) -> Result<Vec<dto::Executive>> {
        self.get(&format!("/api/v3/key-executives/{}", symbol), &[])
            .await
    }

    pub async fn fetch_market_capitalization(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<dto::MarketCapitalization>> {
        self.get(
            &format!("/api/v3/historical-market-capitalization/{}", symbol),
            &[("limit", limit.to_string())],
        )
        .await
    }

    pub async fn fetch_employee_count(&self, symbol: &str) -> Result<Vec<dto::EmployeeCount>> {
        self.get(
            "/api/v4/historical/employee_count",
            &[("symbol", symbol.to_string())],
        )
        .await
    }

    pub async fn fetch_shares_float(&self, symbol: &str) -> Result<Vec<dto::SharesFloat>> {
        self.get("/api/v4/shares_float", &[("symbol", symbol.to_string())])
            .await
    }

    pub async fn fetch_delisted_companies(
        &self,
        page: u32,
    ) -> Result<Vec<dto::DelistedCompany>> {
        self.get("/api/v3/delisted-companies", &[("page", page.to_string())])
            .await
    }

    // =========================================================================
    // 재무제표
    // =========================================================================

    /// 손익계산서. `period`는 `quarter` 또는 `annual`.
    pub async fn fetch_income_statements(
        &self,
        symbol: &str,
        period: &str,
        limit: u32,
    ) -> Result<Vec<dto::IncomeStatement>> {
        self.get(
            &format!("/api/v3/income-statement/{}", symbol),
            &[("period", period.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn fetch_balance_sheets(
        &self,
        symbol: &str,
        period: &str,
        limit: u32,
    ) -> Result<Vec<dto::BalanceSheet>> {
        self.get(
            &format!("/api/v3/balance-sheet-statement/{}", symbol),
            &[("period", period.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn fetch_cash_flow_statements(
        &self,
        symbol: &str,
        period: &str,
        limit: u32,
    ) -> Result<Vec<dto::CashFlowStatement>> {
        self.get(
            &format!("/api/v3/cash-flow-statement/{}", symbol),
            &[("period", period.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    // =========================================================================
    // 시세
    // =========================================================================

    /// 여러 심볼의 실시간 시세를 한 번에 조회합니다.
    pub async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<dto::Quote>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        self.get(&format!("/api/v3/quote/{}", symbols.join(",")), &[])
            .await
    }

    /// 일봉. 기간을 지정하지 않으면 FMP 기본 범위(약 5년)가 반환됩니다.
    pub async fn fetch_historical_prices(
        &self,
        symbol: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<dto::Historical<dto::HistoricalPrice>> {
        let mut params = Vec::new();
        if let Some(from) = from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            params.push(("to", to.to_string()));
        }
        self.get(&format!("/api/v3/historical-price-full/{}", symbol), &params)
            .await
    }

    /// 분봉. `interval`은 `1min`, `5min`, `15min`, `30min`, `1hour`, `4hour`.
    pub async fn fetch_intraday_prices(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Vec<dto::IntradayPrice>> {
        self.get(
            &format!("/api/v3/historical-chart/{}/{}", interval, symbol),
            &[],
        )
        .await
    }

    // =========================================================================
    // 배당 / 실적
    // =========================================================================

    /// 종목별 배당 이력. 응답 항목에 없는 심볼을 채워서 반환합니다.
    pub async fn fetch_dividends(&self, symbol: &str) -> Result<Vec<dto::Dividend>> {
        let wrapper: dto::Historical<dto::Dividend> = self
            .get(
                &format!("/api/v3/historical-price-full/stock_dividend/{}", symbol),
                &[],
            )
            .await?;

        Ok(wrapper
            .historical
            .into_iter()
            .map(|mut d| {
                d.symbol.get_or_insert_with(|| symbol.to_string());
                d
            })
            .collect())
    }

    pub async fn fetch_dividend_calendar(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::DividendCalendarEvent>> {
        self.get(
            "/api/v3/stock_dividend_calendar",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }

    pub async fn fetch_earnings(&self, symbol: &str, limit: u32) -> Result<Vec<dto::EarningsReport>> {
        self.get(
            &format!("/api/v3/historical/earning_calendar/{}", symbol),
            &[("limit", limit.to_string())],
        )
        .await
    }

    pub async fn fetch_earnings_calendar(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::EarningsCalendarEvent>> {
        self.get(
            "/api/v3/earning_calendar",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }

    // =========================================================================
    // 거시경제
    // =========================================================================

    pub async fn fetch_treasury_rates(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::TreasuryRate>> {
        self.get(
            "/api/v4/treasury",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }

    /// 경제 지표 값. 응답에는 이름이 없어 요청한 이름을 채웁니다.
    pub async fn fetch_economic_indicator(
        &self,
        name: &str,
    ) -> Result<Vec<dto::EconomicIndicator>> {
        let values: Vec<dto::EconomicIndicator> = self
            .get("/api/v4/economic", &[("name", name.to_string())])
            .await?;

        Ok(values
            .into_iter()
            .map(|mut v| {
                v.name = Some(name.to_string());
                v
            })
            .collect())
    }

    pub async fn fetch_economic_calendar(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::EconomicCalendarEvent>> {
        self.get(
            "/api/v3/economic_calendar",
            &[("from", from.to_string()), ("to", to.to_string())],
        )
        .await
    }

    pub async fn fetch_market_risk_premium(&self) -> Result<Vec<dto::MarketRiskPremium>> {
        self.get("/api/v4/market_risk_premium", &[]).await
    }

    // =========================================================================
    // 시장
    // =========================================================================

    pub async fn fetch_sector_performance(
        &self,
        sector: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::SectorPerformance>> {
        self.get(
            "/stable/historical-sector-performance",
            &[
                ("sector", sector.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_industry_performance(
        &self,
        industry: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::IndustryPerformance>> {
        self.get(
            "/stable/historical-industry-performance",
            &[
                ("industry", industry.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_sector_pe(
        &self,
        sector: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::SectorPe>> {
        self.get(
            "/stable/historical-sector-pe",
            &[
                ("sector", sector.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_industry_pe(
        &self,
        industry: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<dto::IndustryPe>> {
        self.get(
            "/stable/historical-industry-pe",
            &[
                ("industry", industry.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_gainers(&self) -> Result<Vec<dto::StockMover>> {
        self.get("/api/v3/stock_market/gainers", &[]).await
    }

    pub async fn fetch_losers(&self) -> Result<Vec<dto::StockMover>> {
        self.get("/api/v3/stock_market/losers", &[]).await
    }

    pub async fn fetch_most_active(&self) -> Result<Vec<dto::StockMover>> {
        self.get("/api/v3/stock_market/actives", &[]).await
    }

    // =========================================================================
    // SEC / 뉴스
    // =========================================================================

    pub async fn fetch_sec_filings(
        &self,
        symbol: &str,
        form_type: Option<&str>,
        page: u32,
    ) -> Result<Vec<dto::SecFiling>> {
        let mut params = vec![("page", page.to_string())];
        if let Some(form_type) = form_type {
            params.push(("type", form_type.to_string()));
        }
        let filings: Vec<dto::SecFiling> = self
            .get(&format!("/api/v3/sec_filings/{}", symbol), &params)
            .await?;

        Ok(filings
            .into_iter()
            .map(|mut f| {
                f.symbol.get_or_insert_with(|| symbol.to_string());
                f
            })
            .collect())
    }

    pub async fn fetch_fmp_articles(&self, page: u32, size: u32) -> Result<Vec<dto::FmpArticle>> {
        let page: dto::FmpArticlePage = self
            .get(
                "/api/v3/fmp/articles",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;
        Ok(page.content)
    }

    pub async fn fetch_general_news(&self, page: u32) -> Result<Vec<dto::GeneralNews>> {
        self.get("/api/v4/general_news", &[("page", page.to_string())])
            .await
    }

    pub async fn fetch_stock_news(
        &self,
        tickers: &[String],
        page: u32,
        limit: u32,
    ) -> Result<Vec<dto::StockNews>> {
        let mut params = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if !tickers.is_empty() {
            params.push(("tickers", tickers.join(",")));
        }
        self.get("/api/v3/stock_news", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(server: &mockito::Server) -> FmpClient {
        FmpClient::new("test-key")
            .unwrap()
            .with_base_url(server.url())
            .with_request_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_fetch_profile_sends_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/profile/AAPL")
            .match_query(mockito::Matcher::UrlEncoded(
                "apikey".into(),
                "test-key".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"symbol": "AAPL", "companyName": "Apple Inc.", "mktCap": 100}]"#)
            .create_async()
            .await;

        let profiles = test_client(&server).fetch_company_profile("AAPL").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(profiles[0].mkt_cap, Some(100));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/quote/AAPL,MSFT")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_body("Limit Reach")
            .create_async()
            .await;

        let err = test_client(&server)
            .fetch_quotes(&["AAPL".to_string(), "MSFT".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::FetchError(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_error_message_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/income-statement/AAPL")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Error Message": "Invalid API KEY."}"#)
            .create_async()
            .await;

        let err = test_client(&server)
            .fetch_income_statements("AAPL", "quarter", 4)
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::FetchError(ref m) if m.contains("Invalid API KEY")));
    }

    #[tokio::test]
    async fn test_dividends_fill_symbol() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/historical-price-full/stock_dividend/KO")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"symbol": "KO", "historical": [
                    {"date": "2024-03-14", "adjDividend": 0.485, "dividend": 0.485},
                    {"date": "2023-11-30", "adjDividend": 0.46, "dividend": 0.46}
                ]}"#,
            )
            .create_async()
            .await;

        let dividends = test_client(&server).fetch_dividends("KO").await.unwrap();

        assert_eq!(dividends.len(), 2);
        assert!(dividends.iter().all(|d| d.symbol.as_deref() == Some("KO")));
    }

    #[tokio::test]
    async fn test_economic_indicator_sets_name() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/economic")
            .match_query(mockito::Matcher::UrlEncoded("name".into(), "GDP".into()))
            .with_status(200)
            .with_body(r#"[{"date": "2024-04-01", "value": 28269.17}]"#)
            .create_async()
            .await;

        let values = test_client(&server)
            .fetch_economic_indicator("GDP")
            .await
            .unwrap();

        assert_eq!(values[0].name.as_deref(), Some("GDP"));
        assert_eq!(values[0].value, Some(28269.17));
    }

    #[tokio::test]
    async fn test_empty_quote_request_skips_network() {
        let client = FmpClient::new("k")
            .unwrap()
            .with_base_url("http://127.0.0.1:1")
            .with_request_delay(Duration::ZERO);

        assert!(client.fetch_quotes(&[]).await.unwrap().is_empty());
    }
}
