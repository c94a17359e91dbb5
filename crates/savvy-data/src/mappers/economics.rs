//! 거시경제 매퍼.

use super::{non_empty, parse_date, parse_datetime};
use crate::provider::fmp::dto;
use crate::storage::models::{
    EconomicCalendarEvent, EconomicIndicator, MarketRiskPremium, TreasuryRate,
};

pub fn map_treasury_rate(dto: &dto::TreasuryRate) -> Option<TreasuryRate> {
    Some(TreasuryRate {
        date: parse_date(dto.date.as_deref())?,
        month_1: dto.month_1,
        month_2: dto.month_2,
        month_3: dto.month_3,
        month_6: dto.month_6,
        year_1: dto.year_1,
        year_2: dto.year_2,
        year_3: dto.year_3,
        year_5: dto.year_5,
        year_7: dto.year_7,
        year_10: dto.year_10,
        year_20: dto.year_20,
        year_30: dto.year_30,
        ..Default::default()
    })
}

/// 경제 지표 값. 응답 항목에 이름이 비어 있으면 요청한 `name`을 사용합니다.
pub fn map_economic_indicator(name: &str, dto: &dto::EconomicIndicator) -> Option<EconomicIndicator> {
    let name = non_empty(&dto.name).unwrap_or_else(|| name.to_string());
    if name.trim().is_empty() {
        return None;
    }

    Some(EconomicIndicator {
        name,
        date: parse_date(dto.date.as_deref())?,
        value: dto.value,
        country: dto.country.clone(),
        period: dto.period.clone(),
        ..Default::default()
    })
}

pub fn map_economic_calendar_event(
    dto: &dto::EconomicCalendarEvent,
) -> Option<EconomicCalendarEvent> {
    Some(EconomicCalendarEvent {
        date: parse_datetime(dto.date.as_deref())?,
        event: non_empty(&dto.event)?,
        country: non_empty(&dto.country)?,
        currency: dto.currency.clone(),
        previous: dto.previous,
        estimate: dto.estimate,
        actual: dto.actual,
        change: dto.change,
        change_percentage: dto.change_percentage,
        impact: dto.impact.clone(),
        ..Default::default()
    })
}

pub fn map_market_risk_premium(dto: &dto::MarketRiskPremium) -> Option<MarketRiskPremium> {
    Some(MarketRiskPremium {
        country: non_empty(&dto.country)?,
        continent: dto.continent.clone(),
        total_equity_risk_premium: dto.total_equity_risk_premium,
        country_risk_premium: dto.country_risk_premium,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_takes_name() {
        let dto = dto::EconomicIndicator {
            date: Some("2024-04-01".to_string()),
            value: Some(3.9),
            ..Default::default()
        };
        let row = map_economic_indicator("unemploymentRate", &dto).unwrap();
        assert_eq!(row.name, "unemploymentRate");
        assert_eq!(row.value, Some(3.9));

        assert!(map_economic_indicator("", &dto).is_none());
    }

    #[test]
    fn test_calendar_event_requires_event_and_country() {
        let mut dto = dto::EconomicCalendarEvent {
            date: Some("2024-05-03 12:30:00".to_string()),
            event: Some("Nonfarm Payrolls".to_string()),
            ..Default::default()
        };
        assert!(map_economic_calendar_event(&dto).is_none());

        dto.country = Some("US".to_string());
        let row = map_economic_calendar_event(&dto).unwrap();
        assert_eq!(row.date.to_string(), "2024-05-03 12:30:00");
    }
}
