use chrono::{NaiveDate, NaiveDateTime};

upsert_table! {
    /// SEC 공시. 키: `symbol`, `link`
    pub struct SecFiling => "sec_filing", touches_updated_at = false {
        pub symbol: String,
        pub cik: Option<String>,
        pub accepted_date: Option<NaiveDateTime>,
        pub filing_date: NaiveDate,
        pub form_type: Option<String>,
        pub has_financials: bool,
        pub link: String,
        pub final_link: Option<String>,
    }
}
