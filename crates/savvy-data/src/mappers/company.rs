//! 기업 정보 매퍼.

use super::{non_empty, parse_date};
use crate::provider::fmp::dto;
use crate::storage::models::{
    CompanyProfile, DelistedCompany, EmployeeCount, Executive, MarketCapitalization, SharesFloat,
};

/// 심볼과 회사명이 모두 있어야 합니다.
pub fn map_company_profile(dto: &dto::CompanyProfile) -> Option<CompanyProfile> {
    Some(CompanyProfile {
        symbol: non_empty(&dto.symbol)?,
        company_name: non_empty(&dto.company_name)?,
        price: dto.price,
        beta: dto.beta,
        vol_avg: dto.vol_avg,
        mkt_cap: dto.mkt_cap,
        last_div: dto.last_div,
        range: dto.range.clone(),
        changes: dto.changes,
        currency: dto.currency.clone(),
        cik: dto.cik.clone(),
        isin: dto.isin.clone(),
        cusip: dto.cusip.clone(),
        exchange: dto.exchange.clone(),
        exchange_short_name: dto.exchange_short_name.clone(),
        industry: dto.industry.clone(),
        website: dto.website.clone(),
        description: dto.description.clone(),
        ceo: dto.ceo.clone(),
        sector: dto.sector.clone(),
        country: dto.country.clone(),
        full_time_employees: dto.full_time_employees.clone(),
        phone: dto.phone.clone(),
        address: dto.address.clone(),
        city: dto.city.clone(),
        state: dto.state.clone(),
        zip: dto.zip.clone(),
        dcf_diff: dto.dcf_diff,
        dcf: dto.dcf,
        image: dto.image.clone(),
        ipo_date: parse_date(dto.ipo_date.as_deref()),
        default_image: dto.default_image,
        is_etf: dto.is_etf.unwrap_or(false),
        is_actively_trading: dto.is_actively_trading.unwrap_or(true),
        is_adr: dto.is_adr.unwrap_or(false),
        is_fund: dto.is_fund.unwrap_or(false),
        ..Default::default()
    })
}

/// 임원 응답에는 심볼이 없어 인자로 받습니다.
pub fn map_executive(symbol: &str, dto: &dto::Executive) -> Option<Executive> {
    Some(Executive {
        symbol: symbol.to_string(),
        name: non_empty(&dto.name)?,
        title: dto.title.clone(),
        pay: dto.pay,
        currency_pay: dto.currency_pay.clone(),
        gender: dto.gender.clone(),
        year_born: dto.year_born,
        title_since: dto.title_since.clone(),
        ..Default::default()
    })
}

pub fn map_market_capitalization(dto: &dto::MarketCapitalization) -> Option<MarketCapitalization> {
    Some(MarketCapitalization {
        symbol: non_empty(&dto.symbol)?,
        date: parse_date(dto.date.as_deref())?,
        market_cap: dto.market_cap?,
        ..Default::default()
    })
}

pub fn map_employee_count(dto: &dto::EmployeeCount) -> Option<EmployeeCount> {
    Some(EmployeeCount {
        symbol: non_empty(&dto.symbol)?,
        filing_date: parse_date(dto.filing_date.as_deref())?,
        cik: dto.cik.clone(),
        acceptance_time: dto.acceptance_time.clone(),
        period_of_report: dto.period_of_report.clone(),
        company_name: dto.company_name.clone(),
        form_type: dto.form_type.clone(),
        employee_count: dto.employee_count,
        source: dto.source.clone(),
        ..Default::default()
    })
}

/// `date`는 `YYYY-MM-DD HH:MM:SS` 형태로도 옵니다.
pub fn map_shares_float(dto: &dto::SharesFloat) -> Option<SharesFloat> {
    Some(SharesFloat {
        symbol: non_empty(&dto.symbol)?,
        date: super::parse_day(dto.date.as_deref())?,
        free_float: dto.free_float,
        float_shares: dto.float_shares,
        outstanding_shares: dto.outstanding_shares,
        source: dto.source.clone(),
        ..Default::default()
    })
}

pub fn map_delisted_company(dto: &dto::DelistedCompany) -> Option<DelistedCompany> {
    Some(DelistedCompany {
        symbol: non_empty(&dto.symbol)?,
        company_name: dto.company_name.clone(),
        exchange: dto.exchange.clone(),
        ipo_date: parse_date(dto.ipo_date.as_deref()),
        delisted_date: parse_date(dto.delisted_date.as_deref()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_profile_copies_fields() {
        let dto = dto::CompanyProfile {
            symbol: Some("AAPL".to_string()),
            company_name: Some("Apple Inc.".to_string()),
            price: Some(189.5),
            mkt_cap: Some(2_900_000_000_000),
            sector: Some("Technology".to_string()),
            ipo_date: Some("1980-12-12".to_string()),
            is_etf: Some(false),
            ..Default::default()
        };

        let row = map_company_profile(&dto).unwrap();

        assert_eq!(row.symbol, "AAPL");
        assert_eq!(row.company_name, "Apple Inc.");
        assert_eq!(row.price, Some(189.5));
        assert_eq!(row.mkt_cap, Some(2_900_000_000_000));
        assert_eq!(row.sector.as_deref(), Some("Technology"));
        assert_eq!(row.ipo_date, NaiveDate::from_ymd_opt(1980, 12, 12));
        assert!(!row.is_etf);
        assert!(row.is_actively_trading);
        assert!(row.id.is_none());
    }

    #[test]
    fn test_profile_without_symbol_rejected() {
        let dto = dto::CompanyProfile {
            company_name: Some("Nameless".to_string()),
            ..Default::default()
        };
        assert!(map_company_profile(&dto).is_none());
    }

    #[test]
    fn test_bad_optional_date_becomes_null() {
        let dto = dto::DelistedCompany {
            symbol: Some("OLD".to_string()),
            ipo_date: Some("n/a".to_string()),
            delisted_date: Some("2020-01-02".to_string()),
            ..Default::default()
        };
        let row = map_delisted_company(&dto).unwrap();
        assert!(row.ipo_date.is_none());
        assert_eq!(row.delisted_date, NaiveDate::from_ymd_opt(2020, 1, 2));
    }

    #[test]
    fn test_executive_takes_symbol() {
        let dto = dto::Executive {
            name: Some("Tim Cook".to_string()),
            title: Some("CEO".to_string()),
            ..Default::default()
        };
        let row = map_executive("AAPL", &dto).unwrap();
        assert_eq!(row.symbol, "AAPL");
        assert_eq!(row.name, "Tim Cook");

        assert!(map_executive("AAPL", &dto::Executive::default()).is_none());
    }
}
