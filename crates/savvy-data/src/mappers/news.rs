//! SEC 공시 및 뉴스 매퍼.

use super::{non_empty, parse_datetime, parse_day};
use crate::provider::fmp::dto;
use crate::storage::models::{FmpArticle, GeneralNews, SecFiling, StockNews};

pub fn map_sec_filing(dto: &dto::SecFiling) -> Option<SecFiling> {
    Some(SecFiling {
        symbol: non_empty(&dto.symbol)?,
        link: non_empty(&dto.link)?,
        filing_date: parse_day(dto.filing_date.as_deref())?,
        cik: dto.cik.clone(),
        accepted_date: parse_datetime(dto.accepted_date.as_deref()),
        form_type: dto.form_type.clone(),
        has_financials: dto.has_financials.unwrap_or(false),
        final_link: dto.final_link.clone(),
        ..Default::default()
    })
}

pub fn map_fmp_article(dto: &dto::FmpArticle) -> Option<FmpArticle> {
    Some(FmpArticle {
        link: non_empty(&dto.link)?,
        date: parse_datetime(dto.date.as_deref())?,
        title: dto.title.clone().unwrap_or_default(),
        content: dto.content.clone().unwrap_or_default(),
        tickers: dto.tickers.clone(),
        image: dto.image.clone(),
        author: dto.author.clone(),
        site: dto.site.clone(),
        ..Default::default()
    })
}

pub fn map_general_news(dto: &dto::GeneralNews) -> Option<GeneralNews> {
    Some(GeneralNews {
        url: non_empty(&dto.url)?,
        published_date: parse_datetime(dto.published_date.as_deref())?,
        title: dto.title.clone().unwrap_or_default(),
        text: dto.text.clone().unwrap_or_default(),
        publisher: dto.publisher.clone(),
        symbol: dto.symbol.clone(),
        site: dto.site.clone(),
        image: dto.image.clone(),
        ..Default::default()
    })
}

pub fn map_stock_news(dto: &dto::StockNews) -> Option<StockNews> {
    Some(StockNews {
        symbol: non_empty(&dto.symbol)?,
        url: non_empty(&dto.url)?,
        published_date: parse_datetime(dto.published_date.as_deref())?,
        publisher: dto.publisher.clone(),
        title: dto.title.clone().unwrap_or_default(),
        text: dto.text.clone().unwrap_or_default(),
        site: dto.site.clone(),
        image: dto.image.clone(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sec_filing_date_from_datetime() {
        let dto = dto::SecFiling {
            symbol: Some("AAPL".to_string()),
            filing_date: Some("2024-11-01 00:00:00".to_string()),
            accepted_date: Some("2024-11-01 06:01:36".to_string()),
            form_type: Some("10-K".to_string()),
            link: Some("https://www.sec.gov/Archives/x".to_string()),
            ..Default::default()
        };
        let row = map_sec_filing(&dto).unwrap();

        assert_eq!(row.filing_date.to_string(), "2024-11-01");
        assert!(!row.has_financials);
        assert_eq!(row.form_type.as_deref(), Some("10-K"));
    }

    #[test]
    fn test_stock_news_requires_symbol_and_url() {
        let dto = dto::StockNews {
            url: Some("https://news.example/a".to_string()),
            published_date: Some("2024-05-01 10:00:00".to_string()),
            ..Default::default()
        };
        assert!(map_stock_news(&dto).is_none());
    }

    #[test]
    fn test_article_missing_text_defaults_empty() {
        let dto = dto::FmpArticle {
            link: Some("https://fmp.example/a".to_string()),
            date: Some("2024-05-01 10:00:00".to_string()),
            ..Default::default()
        };
        let row = map_fmp_article(&dto).unwrap();
        assert_eq!(row.title, "");
        assert_eq!(row.content, "");
    }
}
