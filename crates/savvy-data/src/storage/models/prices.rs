//! 시세 및 가격 행.

use chrono::{NaiveDate, NaiveDateTime};

upsert_table! {
    /// 실시간 시세 스냅샷. 키: `symbol`, `timestamp`
    pub struct Quote => "quote", touches_updated_at = true {
        pub symbol: String,
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
        /// 유닉스 시각 (초)
        pub timestamp: i64,
    }
}

upsert_table! {
    /// 일봉. 키: `symbol`, `date`
    pub struct HistoricalPrice => "historical_price", touches_updated_at = false {
        pub symbol: String,
        pub date: NaiveDate,
        pub open: f64,
        pub high: f64,
        pub low: f64,
        pub close: f64,
        pub adj_close: Option<f64>,
        pub volume: i64,
        pub unadjusted_volume: Option<i64>,
        pub change: Option<f64>,
        pub change_percent: Option<f64>,
        pub vwap: Option<f64>,
        pub label: Option<String>,
        pub change_over_time: Option<f64>,
    }
}

upsert_table! {
    /// 분봉. 키: `symbol`, `date`
    pub struct IntradayPrice => "intraday_price", touches_updated_at = false {
        pub symbol: String,
        pub date: NaiveDateTime,
        pub open: f64,
        pub high: f64,
        pub low: f64,
        pub close: f64,
        pub volume: i64,
    }
}
