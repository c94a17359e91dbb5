//! 기업 정보 행 (프로필, 임원, 시가총액, 직원 수, 유통 주식, 상장폐지).

use chrono::NaiveDate;

upsert_table! {
    /// 기업 프로필. 키: `symbol`
    pub struct CompanyProfile => "company_profile", touches_updated_at = true {
        pub symbol: String,
        pub price: Option<f64>,
        pub beta: Option<f64>,
        pub vol_avg: Option<i64>,
        pub mkt_cap: Option<i64>,
        pub last_div: Option<f64>,
        pub range: Option<String>,
        pub changes: Option<f64>,
        pub company_name: String,
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
        pub ipo_date: Option<NaiveDate>,
        pub default_image: Option<bool>,
        pub is_etf: bool,
        pub is_actively_trading: bool,
        pub is_adr: bool,
        pub is_fund: bool,
    }
}

upsert_table! {
    /// 주요 임원. 키: `symbol`, `name`
    pub struct Executive => "executive", touches_updated_at = true {
        pub symbol: String,
        pub title: Option<String>,
        pub name: String,
        pub pay: Option<f64>,
        pub currency_pay: Option<String>,
        pub gender: Option<String>,
        pub year_born: Option<i32>,
        pub title_since: Option<String>,
    }
}

upsert_table! {
    /// 일별 시가총액. 키: `symbol`, `date`
    pub struct MarketCapitalization => "market_capitalization", touches_updated_at = false {
        pub symbol: String,
        pub date: NaiveDate,
        pub market_cap: f64,
    }
}

upsert_table! {
    /// 공시 기준 직원 수. 키: `symbol`, `filing_date`
    pub struct EmployeeCount => "employee_count", touches_updated_at = false {
        pub symbol: String,
        pub cik: Option<String>,
        pub acceptance_time: Option<String>,
        pub period_of_report: Option<String>,
        pub company_name: Option<String>,
        pub form_type: Option<String>,
        pub filing_date: NaiveDate,
        pub employee_count: Option<i64>,
        pub source: Option<String>,
    }
}

upsert_table! {
    /// 유통 주식 수. 키: `symbol`, `date`
    pub struct SharesFloat => "shares_float", touches_updated_at = false {
        pub symbol: String,
        pub date: NaiveDate,
        pub free_float: Option<f64>,
        pub float_shares: Option<f64>,
        pub outstanding_shares: Option<f64>,
        pub source: Option<String>,
    }
}

upsert_table! {
    /// 상장폐지 기업. 키: `symbol`
    pub struct DelistedCompany => "delisted_company", touches_updated_at = false {
        pub symbol: String,
        pub company_name: Option<String>,
        pub exchange: Option<String>,
        pub ipo_date: Option<NaiveDate>,
        pub delisted_date: Option<NaiveDate>,
    }
}
