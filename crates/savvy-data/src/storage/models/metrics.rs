upsert_table! {
    /// 재무제표/시세/배당으로 계산한 기업 지표. 키: `symbol`
    pub struct CompanyMetrics => "company_metrics", touches_updated_at = true {
        pub symbol: String,
        pub company_name: Option<String>,
        pub pe_ratio: Option<f64>,
        pub dividend_growth_10y: Option<f64>,
        pub years_increasing_dividend: Option<i32>,
        pub copm: Option<f64>,
        pub roic: Option<f64>,
        pub rota: Option<f64>,
        pub debt_ebitda_ratio: Option<f64>,
        pub ev_ebitda_ratio: Option<f64>,
        pub ev_fcf_ratio: Option<f64>,
        pub pb_ratio: Option<f64>,
        pub ps_ratio: Option<f64>,
        pub dividend_yield: Option<f64>,
        pub dividend_payout: Option<f64>,
        pub score: Option<f64>,
        pub sector: Option<String>,
        pub market_cap: Option<f64>,
    }
}
