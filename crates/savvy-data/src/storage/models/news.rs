//! 뉴스 행.

use chrono::NaiveDateTime;

upsert_table! {
    /// FMP 자체 기사. 키: `link`, `date`
    pub struct FmpArticle => "fmp_article", touches_updated_at = true {
        pub title: String,
        pub date: NaiveDateTime,
        pub content: String,
        pub tickers: Option<String>,
        pub image: Option<String>,
        pub link: String,
        pub author: Option<String>,
        pub site: Option<String>,
    }
}

upsert_table! {
    /// 일반 뉴스. 키: `url`
    pub struct GeneralNews => "general_news", touches_updated_at = true {
        pub published_date: NaiveDateTime,
        pub title: String,
        pub text: String,
        pub url: String,
        pub publisher: Option<String>,
        pub symbol: Option<String>,
        pub site: Option<String>,
        pub image: Option<String>,
    }
}

upsert_table! {
    /// 종목 뉴스. 키: `symbol`, `url`
    pub struct StockNews => "stock_news", touches_updated_at = true {
        pub symbol: String,
        pub published_date: NaiveDateTime,
        pub publisher: Option<String>,
        pub title: String,
        pub text: String,
        pub url: String,
        pub site: Option<String>,
        pub image: Option<String>,
    }
}
