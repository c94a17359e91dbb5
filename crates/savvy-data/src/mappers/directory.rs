//! 디렉터리(심볼, 거래소, 섹터 등) 매퍼.

use super::{non_empty, parse_date};
use crate::provider::fmp::dto;
use crate::storage::models::{
    Country, Exchange, FinancialStatementSymbol, Industry, Sector, StockSymbol, SymbolChange,
};

/// 검색 결과를 심볼 목록 행으로 변환합니다.
///
/// 검색 API는 거래소 약칭을 `exchange`에, 전체 이름을 `exchangeFullName`에 담습니다.
pub fn map_stock_symbol(dto: &dto::SearchResult) -> Option<StockSymbol> {
    Some(StockSymbol {
        symbol: non_empty(&dto.symbol)?,
        name: dto.name.clone(),
        exchange: dto.exchange_full_name.clone(),
        exchange_short_name: dto.exchange.clone(),
        currency: dto.currency.clone(),
        ..Default::default()
    })
}

pub fn map_financial_statement_symbol(
    dto: &dto::FinancialStatementSymbol,
) -> Option<FinancialStatementSymbol> {
    Some(FinancialStatementSymbol {
        symbol: non_empty(&dto.symbol)?,
        company_name: dto.company_name.clone(),
        trading_currency: dto.trading_currency.clone(),
        reporting_currency: dto.reporting_currency.clone(),
        ..Default::default()
    })
}

pub fn map_exchange(dto: &dto::Exchange) -> Option<Exchange> {
    Some(Exchange {
        name: non_empty(&dto.name)?,
        code: non_empty(&dto.code),
        country: dto.country.clone(),
        currency: dto.currency.clone(),
        ..Default::default()
    })
}

pub fn map_sector(dto: &dto::Sector) -> Option<Sector> {
    Some(Sector {
        sector: non_empty(&dto.sector)?,
        ..Default::default()
    })
}

pub fn map_industry(dto: &dto::Industry) -> Option<Industry> {
    Some(Industry {
        industry: non_empty(&dto.industry)?,
        ..Default::default()
    })
}

pub fn map_country(dto: &dto::Country) -> Option<Country> {
    Some(Country {
        country: non_empty(&dto.country)?,
        ..Default::default()
    })
}

pub fn map_symbol_change(dto: &dto::SymbolChange) -> Option<SymbolChange> {
    Some(SymbolChange {
        old_symbol: non_empty(&dto.old_symbol)?,
        new_symbol: non_empty(&dto.new_symbol)?,
        change_date: parse_date(dto.change_date.as_deref())?,
        change_type: dto.change_type.clone(),
        ..Default::default()
    })
}
