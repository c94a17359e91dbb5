//! 배당 지표.
//!
//! 배당 금액은 수정 배당(`adj_dividend`)을 우선하고, 없거나 0이면 원 배당을 사용합니다.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use super::ratios::{safe_divide, sum_ttm};
use crate::storage::models::{CashFlowStatement, Dividend, IncomeStatement, Quote};

fn amount(dividend: &Dividend) -> f64 {
    dividend
        .adj_dividend
        .filter(|v| *v != 0.0)
        .or(dividend.dividend)
        .unwrap_or(0.0)
}

/// 연도별 배당 합계.
pub fn yearly_totals(dividends: &[Dividend]) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for dividend in dividends {
        *totals.entry(dividend.date.year()).or_insert(0.0) += amount(dividend);
    }
    totals
}

/// 배당수익률 = 최근 365일 배당 합계 / 주가. 합계가 0이면 `None`.
pub fn dividend_yield(dividends: &[Dividend], quote: Option<&Quote>, today: NaiveDate) -> Option<f64> {
    let price = quote?.price.filter(|p| *p != 0.0)?;
    let since = today - Duration::days(365);

    let annual: f64 = dividends
        .iter()
        .filter(|d| d.date >= since)
        .map(amount)
        .sum();
    if annual == 0.0 {
        return None;
    }

    safe_divide(Some(annual), Some(price))
}

/// 배당성향 = TTM |배당 지급액| / TTM 순이익. 지급액이 0이면 `None`.
pub fn dividend_payout(cash_flow: &[CashFlowStatement], income: &[IncomeStatement]) -> Option<f64> {
    let paid = sum_ttm(
        cash_flow
            .iter()
            .map(|s| Some(s.dividends_paid.unwrap_or(0.0).abs())),
    )
    .filter(|v| *v != 0.0)?;

    safe_divide(Some(paid), sum_ttm(income.iter().map(|s| s.net_income)))
}

/// `years`년 배당 연평균 성장률(CAGR).
///
/// 진행 중인 올해는 제외하고 가장 최근 완결 연도와 `years`년 이전(없으면 가장 오래된
/// 연도)의 합계를 비교합니다. 연도가 2개 미만이면 `None`, 간격이 1년 미만이거나
/// 합계가 0 이하면 0입니다.
pub fn dividend_growth(dividends: &[Dividend], years: i32, today: NaiveDate) -> Option<f64> {
    let totals = yearly_totals(dividends);
    if totals.len() < 2 {
        return None;
    }

    let descending: Vec<i32> = totals.keys().rev().copied().collect();
    let last_year = if descending[0] < today.year() {
        descending[0]
    } else {
        descending[1]
    };

    let target = last_year - years;
    let first_year = descending
        .iter()
        .copied()
        .find(|y| *y <= target)
        .unwrap_or(descending[descending.len() - 1]);

    let span = last_year - first_year;
    if span < 1 {
        return Some(0.0);
    }

    let current = totals[&last_year];
    let oldest = totals[&first_year];
    if oldest <= 0.0 || current <= 0.0 {
        return Some(0.0);
    }

    Some((current / oldest).powf(1.0 / f64::from(span)) - 1.0)
}

/// 작년까지 연속 배당 증가 연수.
///
/// 배당 이력이 없으면 `None`, 연도가 2개 미만이거나 작년 배당이 없으면 0입니다.
pub fn years_increasing_dividend(dividends: &[Dividend], today: NaiveDate) -> Option<i32> {
    if dividends.is_empty() {
        return None;
    }

    let totals = yearly_totals(dividends);
    if totals.len() < 2 {
        return Some(0);
    }

    let this_year = today.year();
    if !totals.contains_key(&(this_year - 1)) {
        return Some(0);
    }

    let descending: Vec<i32> = totals.keys().rev().copied().collect();
    let mut increases = 0;
    for pair in descending.windows(2) {
        let (year, previous) = (pair[0], pair[1]);
        if year == this_year {
            continue;
        }
        if year - previous != 1 || totals[&year] <= totals[&previous] {
            break;
        }
        increases += 1;
    }

    Some(increases)
}
