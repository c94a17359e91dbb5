//! 거시경제 행.

use chrono::{NaiveDate, NaiveDateTime};

upsert_table! {
    /// 미 국채 금리 곡선. 키: `date`
    pub struct TreasuryRate => "treasury_rate", touches_updated_at = false {
        pub date: NaiveDate,
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
}

upsert_table! {
    /// 경제 지표 값. 키: `name`, `date`
    pub struct EconomicIndicator => "economic_indicator", touches_updated_at = false {
        pub name: String,
        pub date: NaiveDate,
        pub value: Option<f64>,
        pub country: Option<String>,
        pub period: Option<String>,
    }
}

upsert_table! {
    /// 경제 일정. 키: `date`, `event`, `country`
    pub struct EconomicCalendarEvent => "economic_calendar_event", touches_updated_at = true {
        pub date: NaiveDateTime,
        pub event: String,
        pub country: String,
        pub currency: Option<String>,
        pub previous: Option<f64>,
        pub estimate: Option<f64>,
        pub actual: Option<f64>,
        pub change: Option<f64>,
        pub change_percentage: Option<f64>,
        pub impact: Option<String>,
    }
}

upsert_table! {
    /// 국가별 시장 위험 프리미엄. 키: `country`
    pub struct MarketRiskPremium => "market_risk_premium", touches_updated_at = true {
        pub country: String,
        pub continent: Option<String>,
        pub total_equity_risk_premium: Option<f64>,
        pub country_risk_premium: Option<f64>,
    }
}
