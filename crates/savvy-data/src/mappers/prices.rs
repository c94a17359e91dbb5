//! 시세 매퍼.

use super::{non_empty, parse_date, parse_datetime};
use crate::provider::fmp::dto;
use crate::storage::models::{HistoricalPrice, IntradayPrice, Quote};

/// 시세 스냅샷. 키는 `symbol` + `timestamp`입니다.
pub fn map_quote(dto: &dto::Quote) -> Option<Quote> {
    Some(Quote {
        symbol: non_empty(&dto.symbol)?,
        timestamp: dto.timestamp?,
        name: dto.name.clone(),
        price: dto.price,
        changes_percentage: dto.changes_percentage,
        change: dto.change,
        day_low: dto.day_low,
        day_high: dto.day_high,
        year_high: dto.year_high,
        year_low: dto.year_low,
        market_cap: dto.market_cap,
        price_avg_50: dto.price_avg_50,
        price_avg_200: dto.price_avg_200,
        exchange: dto.exchange.clone(),
        volume: dto.volume,
        avg_volume: dto.avg_volume,
        open: dto.open,
        previous_close: dto.previous_close,
        eps: dto.eps,
        pe: dto.pe,
        earnings_announcement: dto.earnings_announcement.clone(),
        shares_outstanding: dto.shares_outstanding,
        ..Default::default()
    })
}

/// 일봉. OHLC와 거래량이 모두 있어야 합니다.
pub fn map_historical_price(symbol: &str, dto: &dto::HistoricalPrice) -> Option<HistoricalPrice> {
    Some(HistoricalPrice {
        symbol: symbol.to_string(),
        date: parse_date(dto.date.as_deref())?,
        open: dto.open?,
        high: dto.high?,
        low: dto.low?,
        close: dto.close?,
        volume: dto.volume?,
        adj_close: dto.adj_close,
        unadjusted_volume: dto.unadjusted_volume,
        change: dto.change,
        change_percent: dto.change_percent,
        vwap: dto.vwap,
        label: dto.label.clone(),
        change_over_time: dto.change_over_time,
        ..Default::default()
    })
}

/// 분봉.
pub fn map_intraday_price(symbol: &str, dto: &dto::IntradayPrice) -> Option<IntradayPrice> {
    Some(IntradayPrice {
        symbol: symbol.to_string(),
        date: parse_datetime(dto.date.as_deref())?,
        open: dto.open?,
        high: dto.high?,
        low: dto.low?,
        close: dto.close?,
        volume: dto.volume?,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bar(date: &str) -> dto::HistoricalPrice {
        dto::HistoricalPrice {
            date: Some(date.to_string()),
            open: Some(10.0),
            high: Some(12.0),
            low: Some(9.5),
            close: Some(11.0),
            volume: Some(1_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_historical_price_uses_given_symbol() {
        let row = map_historical_price("MSFT", &bar("2024-01-02")).unwrap();
        assert_eq!(row.symbol, "MSFT");
        assert_eq!(row.close, 11.0);
        assert_eq!(row.volume, 1_000);
    }

    #[test]
    fn test_historical_price_requires_ohlc() {
        let mut dto = bar("2024-01-02");
        dto.close = None;
        assert!(map_historical_price("MSFT", &dto).is_none());
        assert!(map_historical_price("MSFT", &bar("bad")).is_none());
    }

    #[test]
    fn test_quote_requires_timestamp() {
        let mut dto = dto::Quote {
            symbol: Some("AAPL".to_string()),
            price: Some(190.0),
            ..Default::default()
        };
        assert!(map_quote(&dto).is_none());

        dto.timestamp = Some(1_717_000_000);
        let row = map_quote(&dto).unwrap();
        assert_eq!(row.timestamp, 1_717_000_000);
        assert_eq!(row.price, Some(190.0));
    }

    #[test]
    fn test_intraday_datetime() {
        let dto = dto::IntradayPrice {
            date: Some("2024-05-01 15:59:00".to_string()),
            open: Some(1.0),
            high: Some(1.0),
            low: Some(1.0),
            close: Some(1.0),
            volume: Some(5),
        };
        let row = map_intraday_price("SPY", &dto).unwrap();
        assert_eq!(row.date.to_string(), "2024-05-01 15:59:00");
    }

    proptest! {
        #[test]
        fn historical_price_fields_copied(
            open in -1e6f64..1e6,
            close in -1e6f64..1e6,
            volume in 0i64..i64::MAX,
            vwap in proptest::option::of(0f64..1e6),
            day in 1u32..=28,
        ) {
            let dto = dto::HistoricalPrice {
                date: Some(format!("2023-02-{:02}", day)),
                open: Some(open),
                high: Some(open.max(close)),
                low: Some(open.min(close)),
                close: Some(close),
                volume: Some(volume),
                vwap,
                ..Default::default()
            };
            let row = map_historical_price("SPY", &dto).unwrap();

            prop_assert_eq!(row.open, open);
            prop_assert_eq!(row.close, close);
            prop_assert_eq!(row.volume, volume);
            prop_assert_eq!(row.vwap, vwap);
            prop_assert_eq!(row.date.to_string(), format!("2023-02-{:02}", day));
        }
    }
}
