//! 배당 및 실적 행.

use chrono::NaiveDate;

upsert_table! {
    /// 배당 이력. 키: `symbol`, `date`
    pub struct Dividend => "dividend", touches_updated_at = true {
        pub symbol: String,
        pub date: NaiveDate,
        pub label: Option<String>,
        pub adj_dividend: Option<f64>,
        pub dividend: Option<f64>,
        pub record_date: Option<NaiveDate>,
        pub payment_date: Option<NaiveDate>,
        pub declaration_date: Option<NaiveDate>,
    }
}

upsert_table! {
    /// 배당 일정. 키: `symbol`, `date`
    pub struct DividendCalendarEvent => "dividend_calendar_event", touches_updated_at = true {
        pub symbol: String,
        pub date: NaiveDate,
        pub label: Option<String>,
        pub adj_dividend: Option<f64>,
        pub dividend: Option<f64>,
        pub record_date: Option<NaiveDate>,
        pub payment_date: Option<NaiveDate>,
        pub declaration_date: Option<NaiveDate>,
        pub dividend_yield: Option<f64>,
    }
}

upsert_table! {
    /// 실적 발표. 키: `symbol`, `date`
    pub struct EarningsReport => "earnings_report", touches_updated_at = true {
        pub symbol: String,
        pub date: NaiveDate,
        pub eps: Option<f64>,
        pub eps_estimated: Option<f64>,
        pub time: Option<String>,
        pub revenue: Option<f64>,
        pub revenue_estimated: Option<f64>,
        pub fiscal_date_ending: Option<String>,
        pub period: Option<String>,
    }
}

upsert_table! {
    /// 실적 발표 일정. 키: `symbol`, `date`
    pub struct EarningsCalendarEvent => "earnings_calendar_event", touches_updated_at = true {
        pub symbol: String,
        pub date: NaiveDate,
        pub eps: Option<f64>,
        pub eps_estimated: Option<f64>,
        pub time: Option<String>,
        pub revenue: Option<f64>,
        pub revenue_estimated: Option<f64>,
        pub fiscal_date_ending: Option<String>,
        pub updated_from_date: Option<String>,
    }
}
