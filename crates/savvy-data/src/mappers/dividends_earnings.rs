//! 배당/실적 매퍼.

use super::{non_empty, parse_date};
use crate::provider::fmp::dto;
use crate::storage::models::{
    Dividend, DividendCalendarEvent, EarningsCalendarEvent, EarningsReport,
};

pub fn map_dividend(dto: &dto::Dividend) -> Option<Dividend> {
    Some(Dividend {
        symbol: non_empty(&dto.symbol)?,
        date: parse_date(dto.date.as_deref())?,
        label: dto.label.clone(),
        adj_dividend: dto.adj_dividend,
        dividend: dto.dividend,
        record_date: parse_date(dto.record_date.as_deref()),
        payment_date: parse_date(dto.payment_date.as_deref()),
        declaration_date: parse_date(dto.declaration_date.as_deref()),
        ..Default::default()
    })
}

pub fn map_dividend_calendar_event(
    dto: &dto::DividendCalendarEvent,
) -> Option<DividendCalendarEvent> {
    Some(DividendCalendarEvent {
        symbol: non_empty(&dto.symbol)?,
        date: parse_date(dto.date.as_deref())?,
        label: dto.label.clone(),
        adj_dividend: dto.adj_dividend,
        dividend: dto.dividend,
        record_date: parse_date(dto.record_date.as_deref()),
        payment_date: parse_date(dto.payment_date.as_deref()),
        declaration_date: parse_date(dto.declaration_date.as_deref()),
        dividend_yield: dto.dividend_yield,
        ..Default::default()
    })
}

pub fn map_earnings_report(dto: &dto::EarningsReport) -> Option<EarningsReport> {
    Some(EarningsReport {
        symbol: non_empty(&dto.symbol)?,
        date: parse_date(dto.date.as_deref())?,
        eps: dto.eps,
        eps_estimated: dto.eps_estimated,
        time: dto.time.clone(),
        revenue: dto.revenue,
        revenue_estimated: dto.revenue_estimated,
        fiscal_date_ending: dto.fiscal_date_ending.clone(),
        period: dto.period.clone(),
        ..Default::default()
    })
}

pub fn map_earnings_calendar_event(
    dto: &dto::EarningsCalendarEvent,
) -> Option<EarningsCalendarEvent> {
    Some(EarningsCalendarEvent {
        symbol: non_empty(&dto.symbol)?,
        date: parse_date(dto.date.as_deref())?,
        eps: dto.eps,
        eps_estimated: dto.eps_estimated,
        time: dto.time.clone(),
        revenue: dto.revenue,
        revenue_estimated: dto.revenue_estimated,
        fiscal_date_ending: dto.fiscal_date_ending.clone(),
        updated_from_date: dto.updated_from_date.clone(),
        ..Default::default()
    })
}
