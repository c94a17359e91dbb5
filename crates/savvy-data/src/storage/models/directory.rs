//! 참조 목록 행 (심볼, 거래소, 섹터, 산업, 국가, 심볼 변경).

use chrono::NaiveDate;

upsert_table! {
    /// 거래 가능 심볼. 키: `symbol` (PK)
    pub struct StockSymbol => "stock_symbol", touches_updated_at = true {
        pub symbol: String,
        pub name: Option<String>,
        pub exchange: Option<String>,
        pub exchange_short_name: Option<String>,
        pub currency: Option<String>,
    }
}

upsert_table! {
    /// 재무제표 제공 심볼. 키: `symbol` (PK)
    pub struct FinancialStatementSymbol => "financial_statement_symbol", touches_updated_at = true {
        pub symbol: String,
        pub company_name: Option<String>,
        pub trading_currency: Option<String>,
        pub reporting_currency: Option<String>,
    }
}

upsert_table! {
    /// 거래소. 키: `name`
    pub struct Exchange => "exchange", touches_updated_at = true {
        pub name: String,
        pub code: Option<String>,
        pub country: Option<String>,
        pub currency: Option<String>,
    }
}

upsert_table! {
    pub struct Sector => "sector", touches_updated_at = false {
        pub sector: String,
    }
}

upsert_table! {
    pub struct Industry => "industry", touches_updated_at = false {
        pub industry: String,
    }
}

upsert_table! {
    pub struct Country => "country", touches_updated_at = false {
        pub country: String,
    }
}

upsert_table! {
    /// 티커 변경 이력. 키: `old_symbol`, `new_symbol`, `change_date`
    pub struct SymbolChange => "symbol_change", touches_updated_at = false {
        pub old_symbol: String,
        pub new_symbol: String,
        pub change_date: NaiveDate,
        pub change_type: Option<String>,
    }
}
