//! 시장 성과 행 (섹터/산업 성과와 PER, 상승/하락/거래 상위 종목).

use chrono::NaiveDate;

upsert_table! {
    /// 키: `sector`, `date`, `exchange`
    pub struct SectorPerformance => "sector_performance", touches_updated_at = false {
        pub sector: String,
        pub date: NaiveDate,
        pub exchange: String,
        pub average_change: Option<f64>,
    }
}

upsert_table! {
    /// 키: `industry`, `date`, `exchange`
    pub struct IndustryPerformance => "industry_performance", touches_updated_at = false {
        pub industry: String,
        pub date: NaiveDate,
        pub exchange: String,
        pub average_change: Option<f64>,
    }
}

upsert_table! {
    /// 키: `sector`, `date`, `exchange`
    pub struct SectorPe => "sector_pe", touches_updated_at = false {
        pub sector: String,
        pub date: NaiveDate,
        pub exchange: String,
        pub pe: Option<f64>,
    }
}

upsert_table! {
    /// 키: `industry`, `date`, `exchange`
    pub struct IndustryPe => "industry_pe", touches_updated_at = false {
        pub industry: String,
        pub date: NaiveDate,
        pub exchange: String,
        pub pe: Option<f64>,
    }
}

upsert_table! {
    /// 일별 상승 상위 종목. 키: `date`, `symbol`
    pub struct StockGainer => "stock_gainer", touches_updated_at = false {
        pub symbol: String,
        pub name: Option<String>,
        pub change: Option<f64>,
        pub price: Option<f64>,
        pub exchange: Option<String>,
        pub changes_percentage: Option<f64>,
        pub date: NaiveDate,
    }
}

upsert_table! {
    /// 일별 하락 상위 종목. 키: `date`, `symbol`
    pub struct StockLoser => "stock_loser", touches_updated_at = false {
        pub symbol: String,
        pub name: Option<String>,
        pub change: Option<f64>,
        pub price: Option<f64>,
        pub exchange: Option<String>,
        pub changes_percentage: Option<f64>,
        pub date: NaiveDate,
    }
}

upsert_table! {
    /// 일별 거래 상위 종목. 키: `date`, `symbol`
    pub struct ActiveStock => "active_stock", touches_updated_at = false {
        pub symbol: String,
        pub name: Option<String>,
        pub change: Option<f64>,
        pub price: Option<f64>,
        pub exchange: Option<String>,
        pub changes_percentage: Option<f64>,
        pub date: NaiveDate,
    }
}
