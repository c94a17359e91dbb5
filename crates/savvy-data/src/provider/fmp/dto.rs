//! Financial Modeling Prep 응답 DTO.
//!
//! 필드 이름은 벤더 JSON(camelCase)을 그대로 따르며, 벤더가 값을 빠뜨리는 경우가 잦아
//! 대부분 `Option`입니다. 날짜는 문자열 그대로 받아 매퍼에서 파싱합니다.

use serde::{Deserialize, Serialize};

// =============================================================================
// 기업
// =============================================================================

/// 기업 프로필.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub symbol: Option<String>,
    pub price: Option<f64>,
    pub beta: Option<f64>,
    pub vol_avg: Option<i64>,
    pub mkt_cap: Option<i64>,
    pub last_div: Option<f64>,
    pub range: Option<String>,
    pub changes: Option<f64>,
    pub company_name: Option<String>,
    pub currency: Option<String>,
    pub cik: Option<String>,
    pub isin: Option<String>,
    pub cusip: Option<String>,
    pub exchange: Option<String>,
    pub exchange_short_name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub ceo: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub full_time_employees: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub dcf_diff: Option<f64>,
    pub dcf: Option<f64>,
    pub image: Option<String>,
    pub ipo_date: Option<String>,
    pub default_image: Option<bool>,
    pub is_etf: Option<bool>,
    pub is_actively_trading: Option<bool>,
    pub is_adr: Option<bool>,
    pub is_fund: Option<bool>,
}

/// 주요 임원. 응답에 심볼이 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executive {
    pub title: Option<String>,
    pub name: Option<String>,
    pub pay: Option<f64>,
    pub currency_pay: Option<String>,
    pub gender: Option<String>,
    pub year_born: Option<i32>,
    pub title_since: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapitalization {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCount {
    pub symbol: Option<String>,
    pub cik: Option<String>,
    pub acceptance_time: Option<String>,
    pub period_of_report: Option<String>,
    pub company_name: Option<String>,
    pub form_type: Option<String>,
    pub filing_date: Option<String>,
    pub employee_count: Option<i64>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharesFloat {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub free_float: Option<f64>,
    pub float_shares: Option<f64>,
    pub outstanding_shares: Option<f64>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelistedCompany {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub exchange: Option<String>,
    pub ipo_date: Option<String>,
    pub delisted_date: Option<String>,
}

// =============================================================================
// 재무제표
// =============================================================================

/// 손익계산서.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub date: Option<String>,
    pub symbol: Option<String>,
    pub reported_currency: Option<String>,
    pub cik: Option<String>,
    pub filling_date: Option<String>,
    pub accepted_date: Option<String>,
    pub calendar_year: Option<String>,
    pub period: Option<String>,
    pub revenue: Option<f64>,
    pub cost_of_revenue: Option<f64>,
    pub gross_profit: Option<f64>,
    pub gross_profit_ratio: Option<f64>,
    pub research_and_development_expenses: Option<f64>,
    pub general_and_administrative_expenses: Option<f64>,
    pub selling_and_marketing_expenses: Option<f64>,
    pub selling_general_and_administrative_expenses: Option<f64>,
    pub other_expenses: Option<f64>,
    pub operating_expenses: Option<f64>,
    pub cost_and_expenses: Option<f64>,
    pub interest_income: Option<f64>,
    pub interest_expense: Option<f64>,
    pub depreciation_and_amortization: Option<f64>,
    pub ebitda: Option<f64>,
    #[serde(alias = "ebitdaratio")]
    pub ebitda_ratio: Option<f64>,
    pub operating_income: Option<f64>,
    pub operating_income_ratio: Option<f64>,
    pub total_other_income_expenses_net: Option<f64>,
    pub income_before_tax: Option<f64>,
    pub income_before_tax_ratio: Option<f64>,
    pub income_tax_expense: Option<f64>,
    pub net_income: Option<f64>,
    pub net_income_ratio: Option<f64>,
    pub eps: Option<f64>,
    #[serde(alias = "epsdiluted")]
    pub eps_diluted: Option<f64>,
    pub weighted_average_shs_out: Option<f64>,
    pub weighted_average_shs_out_dil: Option<f64>,
    pub link: Option<String>,
    pub final_link: Option<String>,
}

/// 재무상태표.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub date: Option<String>,
    pub symbol: Option<String>,
    pub reported_currency: Option<String>,
    pub cik: Option<String>,
    pub filling_date: Option<String>,
    pub accepted_date: Option<String>,
    pub calendar_year: Option<String>,
    pub period: Option<String>,
    pub cash_and_cash_equivalents: Option<f64>,
    pub short_term_investments: Option<f64>,
    pub cash_and_short_term_investments: Option<f64>,
    pub net_receivables: Option<f64>,
    pub inventory: Option<f64>,
    pub other_current_assets: Option<f64>,
    pub total_current_assets: Option<f64>,
    pub property_plant_equipment_net: Option<f64>,
    pub goodwill: Option<f64>,
    pub intangible_assets: Option<f64>,
    pub goodwill_and_intangible_assets: Option<f64>,
    pub long_term_investments: Option<f64>,
    pub tax_assets: Option<f64>,
    pub other_non_current_assets: Option<f64>,
    pub total_non_current_assets: Option<f64>,
    pub other_assets: Option<f64>,
    pub total_assets: Option<f64>,
    pub account_payables: Option<f64>,
    pub short_term_debt: Option<f64>,
    pub tax_payables: Option<f64>,
    pub deferred_revenue: Option<f64>,
    pub other_current_liabilities: Option<f64>,
    pub total_current_liabilities: Option<f64>,
    pub long_term_debt: Option<f64>,
    pub deferred_revenue_non_current: Option<f64>,
    pub deferred_tax_liabilities_non_current: Option<f64>,
    pub other_non_current_liabilities: Option<f64>,
    pub total_non_current_liabilities: Option<f64>,
    pub other_liabilities: Option<f64>,
    pub capital_lease_obligations: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub preferred_stock: Option<f64>,
    pub common_stock: Option<f64>,
    pub retained_earnings: Option<f64>,
    pub accumulated_other_comprehensive_income_loss: Option<f64>,
    #[serde(alias = "othertotalStockholdersEquity")]
    pub other_total_stockholders_equity: Option<f64>,
    pub total_stockholders_equity: Option<f64>,
    pub total_equity: Option<f64>,
    pub total_liabilities_and_stockholders_equity: Option<f64>,
    pub minority_interest: Option<f64>,
    pub total_liabilities_and_total_equity: Option<f64>,
    pub total_investments: Option<f64>,
    pub total_debt: Option<f64>,
    pub net_debt: Option<f64>,
    pub link: Option<String>,
    pub final_link: Option<String>,
}

/// 현금흐름표.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    pub date: Option<String>,
    pub symbol: Option<String>,
    pub reported_currency: Option<String>,
    pub cik: Option<String>,
    pub filling_date: Option<String>,
    pub accepted_date: Option<String>,
    pub calendar_year: Option<String>,
    pub period: Option<String>,
    pub net_income: Option<f64>,
    pub depreciation_and_amortization: Option<f64>,
    pub deferred_income_tax: Option<f64>,
    pub stock_based_compensation: Option<f64>,
    pub change_in_working_capital: Option<f64>,
    pub accounts_receivables: Option<f64>,
    pub inventory: Option<f64>,
    pub accounts_payables: Option<f64>,
    pub other_working_capital: Option<f64>,
    pub other_non_cash_items: Option<f64>,
    #[serde(alias = "netCashProvidedByOperatingActivites")]
    pub net_cash_provided_by_operating_activities: Option<f64>,
    pub investments_in_property_plant_and_equipment: Option<f64>,
    pub acquisitions_net: Option<f64>,
    pub purchases_of_investments: Option<f64>,
    pub sales_maturities_of_investments: Option<f64>,
    #[serde(alias = "otherInvestingActivites")]
    pub other_investing_activities: Option<f64>,
    #[serde(alias = "netCashUsedForInvestingActivites")]
    pub net_cash_used_for_investing_activities: Option<f64>,
    pub debt_repayment: Option<f64>,
    pub common_stock_issued: Option<f64>,
    pub common_stock_repurchased: Option<f64>,
    pub dividends_paid: Option<f64>,
    #[serde(alias = "otherFinancingActivites")]
    pub other_financing_activities: Option<f64>,
    pub net_cash_used_provided_by_financing_activities: Option<f64>,
    pub effect_of_forex_changes_on_cash: Option<f64>,
    pub net_change_in_cash: Option<f64>,
    pub cash_at_end_of_period: Option<f64>,
    pub cash_at_beginning_of_period: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub capital_expenditure: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub link: Option<String>,
    pub final_link: Option<String>,
}

// =============================================================================
// 시세
// =============================================================================

/// 실시간 시세.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub changes_percentage: Option<f64>,
    pub change: Option<f64>,
    pub day_low: Option<f64>,
    pub day_high: Option<f64>,
    pub year_high: Option<f64>,
    pub year_low: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_avg_50: Option<f64>,
    pub price_avg_200: Option<f64>,
    pub exchange: Option<String>,
    pub volume: Option<i64>,
    pub avg_volume: Option<f64>,
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
    pub eps: Option<f64>,
    pub pe: Option<f64>,
    pub earnings_announcement: Option<String>,
    pub shares_outstanding: Option<f64>,
    pub timestamp: Option<i64>,
}

/// 일봉. 응답 항목에는 심볼이 없고 감싸는 객체에만 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPrice {
    pub date: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<i64>,
    pub unadjusted_volume: Option<i64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub vwap: Option<f64>,
    pub label: Option<String>,
    pub change_over_time: Option<f64>,
}

/// `{symbol, historical: [...]}` 형태의 응답. 데이터가 없으면 `{}`가 옵니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Historical<T> {
    pub symbol: Option<String>,
    #[serde(default = "Vec::new")]
    pub historical: Vec<T>,
}

/// 분봉.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayPrice {
    pub date: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

// =============================================================================
// 디렉터리
// =============================================================================

/// 심볼 검색 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub exchange_full_name: Option<String>,
    /// 거래소 약칭 (예: NASDAQ)
    pub exchange: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatementSymbol {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub trading_currency: Option<String>,
    pub reporting_currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub name: Option<String>,
    #[serde(alias = "exchange")]
    pub code: Option<String>,
    #[serde(alias = "countryName")]
    pub country: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolChange {
    pub old_symbol: Option<String>,
    pub new_symbol: Option<String>,
    #[serde(alias = "date")]
    pub change_date: Option<String>,
    pub change_type: Option<String>,
}

// =============================================================================
// 배당 / 실적
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub label: Option<String>,
    pub adj_dividend: Option<f64>,
    pub dividend: Option<f64>,
    pub record_date: Option<String>,
    pub payment_date: Option<String>,
    pub declaration_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendCalendarEvent {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub label: Option<String>,
    pub adj_dividend: Option<f64>,
    pub dividend: Option<f64>,
    pub record_date: Option<String>,
    pub payment_date: Option<String>,
    pub declaration_date: Option<String>,
    #[serde(alias = "yield")]
    pub dividend_yield: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub eps: Option<f64>,
    pub eps_estimated: Option<f64>,
    pub time: Option<String>,
    pub revenue: Option<f64>,
    pub revenue_estimated: Option<f64>,
    pub fiscal_date_ending: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsCalendarEvent {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub eps: Option<f64>,
    pub eps_estimated: Option<f64>,
    pub time: Option<String>,
    pub revenue: Option<f64>,
    pub revenue_estimated: Option<f64>,
    pub fiscal_date_ending: Option<String>,
    pub updated_from_date: Option<String>,
}

// =============================================================================
// 거시경제
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryRate {
    pub date: Option<String>,
    pub month_1: Option<f64>,
    pub month_2: Option<f64>,
    pub month_3: Option<f64>,
    pub month_6: Option<f64>,
    pub year_1: Option<f64>,
    pub year_2: Option<f64>,
    pub year_3: Option<f64>,
    pub year_5: Option<f64>,
    pub year_7: Option<f64>,
    pub year_10: Option<f64>,
    pub year_20: Option<f64>,
    pub year_30: Option<f64>,
}

/// 경제 지표 값. 응답에 지표 이름이 없어 클라이언트가 채웁니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndicator {
    pub name: Option<String>,
    pub date: Option<String>,
    pub value: Option<f64>,
    pub country: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicCalendarEvent {
    pub date: Option<String>,
    pub event: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub previous: Option<f64>,
    pub estimate: Option<f64>,
    pub actual: Option<f64>,
    pub change: Option<f64>,
    pub change_percentage: Option<f64>,
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRiskPremium {
    pub country: Option<String>,
    pub continent: Option<String>,
    pub total_equity_risk_premium: Option<f64>,
    pub country_risk_premium: Option<f64>,
}

// =============================================================================
// 시장
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPerformance {
    pub date: Option<String>,
    pub sector: Option<String>,
    pub exchange: Option<String>,
    pub average_change: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryPerformance {
    pub date: Option<String>,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub average_change: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPe {
    pub date: Option<String>,
    pub sector: Option<String>,
    pub exchange: Option<String>,
    pub pe: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryPe {
    pub date: Option<String>,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub pe: Option<f64>,
}

/// 상승/하락/거래 상위 종목 공통 형태.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMover {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub change: Option<f64>,
    pub price: Option<f64>,
    pub changes_percentage: Option<f64>,
    pub exchange: Option<String>,
}

// =============================================================================
// SEC / 뉴스
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecFiling {
    pub symbol: Option<String>,
    pub cik: Option<String>,
    #[serde(alias = "fillingDate")]
    pub filing_date: Option<String>,
    pub accepted_date: Option<String>,
    #[serde(rename = "type", alias = "formType")]
    pub form_type: Option<String>,
    pub has_financials: Option<bool>,
    pub link: Option<String>,
    pub final_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FmpArticle {
    pub title: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
    pub tickers: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    pub site: Option<String>,
}

/// 기사 목록 페이지.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FmpArticlePage {
    #[serde(default = "Vec::new")]
    pub content: Vec<FmpArticle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralNews {
    pub published_date: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub publisher: Option<String>,
    pub symbol: Option<String>,
    pub site: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockNews {
    pub symbol: Option<String>,
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub site: Option<String>,
    pub image: Option<String>,
}
