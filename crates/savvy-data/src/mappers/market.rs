//! 시장 성과/밸류에이션 및 상위 종목 매퍼.

use chrono::NaiveDate;

use super::{non_empty, parse_date};
use crate::provider::fmp::dto;
use crate::storage::models::{
    ActiveStock, IndustryPe, IndustryPerformance, SectorPe, SectorPerformance, StockGainer,
    StockLoser,
};

/// 거래소가 비어 있으면 빈 문자열로 저장됩니다 (키 컬럼이라 NULL 불가).
fn exchange_key(exchange: &Option<String>) -> String {
    non_empty(exchange).unwrap_or_default()
}

pub fn map_sector_performance(dto: &dto::SectorPerformance) -> Option<SectorPerformance> {
    Some(SectorPerformance {
        sector: non_empty(&dto.sector)?,
        date: parse_date(dto.date.as_deref())?,
        exchange: exchange_key(&dto.exchange),
        average_change: dto.average_change,
        ..Default::default()
    })
}

pub fn map_industry_performance(dto: &dto::IndustryPerformance) -> Option<IndustryPerformance> {
    Some(IndustryPerformance {
        industry: non_empty(&dto.industry)?,
        date: parse_date(dto.date.as_deref())?,
        exchange: exchange_key(&dto.exchange),
        average_change: dto.average_change,
        ..Default::default()
    })
}

pub fn map_sector_pe(dto: &dto::SectorPe) -> Option<SectorPe> {
    Some(SectorPe {
        sector: non_empty(&dto.sector)?,
        date: parse_date(dto.date.as_deref())?,
        exchange: exchange_key(&dto.exchange),
        pe: dto.pe,
        ..Default::default()
    })
}

pub fn map_industry_pe(dto: &dto::IndustryPe) -> Option<IndustryPe> {
    Some(IndustryPe {
        industry: non_empty(&dto.industry)?,
        date: parse_date(dto.date.as_deref())?,
        exchange: exchange_key(&dto.exchange),
        pe: dto.pe,
        ..Default::default()
    })
}

// 상위 종목 응답에는 날짜가 없어 스냅샷 날짜를 인자로 받습니다.

pub fn map_stock_gainer(date: NaiveDate, dto: &dto::StockMover) -> Option<StockGainer> {
    Some(StockGainer {
        symbol: non_empty(&dto.symbol)?,
        name: dto.name.clone(),
        change: dto.change,
        price: dto.price,
        exchange: dto.exchange.clone(),
        changes_percentage: dto.changes_percentage,
        date,
        ..Default::default()
    })
}

pub fn map_stock_loser(date: NaiveDate, dto: &dto::StockMover) -> Option<StockLoser> {
    Some(StockLoser {
        symbol: non_empty(&dto.symbol)?,
        name: dto.name.clone(),
        change: dto.change,
        price: dto.price,
        exchange: dto.exchange.clone(),
        changes_percentage: dto.changes_percentage,
        date,
        ..Default::default()
    })
}

pub fn map_active_stock(date: NaiveDate, dto: &dto::StockMover) -> Option<ActiveStock> {
    Some(ActiveStock {
        symbol: non_empty(&dto.symbol)?,
        name: dto.name.clone(),
        change: dto.change,
        price: dto.price,
        exchange: dto.exchange.clone(),
        changes_percentage: dto.changes_percentage,
        date,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_exchange_becomes_empty_key() {
        let dto = dto::SectorPe {
            date: Some("2024-02-01".to_string()),
            sector: Some("Energy".to_string()),
            exchange: None,
            pe: Some(11.2),
        };
        let row = map_sector_pe(&dto).unwrap();
        assert_eq!(row.exchange, "");
        assert_eq!(row.pe, Some(11.2));
    }

    #[test]
    fn test_mover_uses_snapshot_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let dto = dto::StockMover {
            symbol: Some("NVDA".to_string()),
            changes_percentage: Some(4.5),
            ..Default::default()
        };

        assert_eq!(map_stock_gainer(date, &dto).unwrap().date, date);
        assert_eq!(
            map_active_stock(date, &dto).unwrap().changes_percentage,
            Some(4.5)
        );
        assert!(map_stock_loser(date, &dto::StockMover::default()).is_none());
    }
}
