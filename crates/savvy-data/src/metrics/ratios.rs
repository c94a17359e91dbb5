//! 밸류에이션/수익성/레버리지 비율.
//!
//! 재무제표 슬라이스는 모두 최신 분기 순(날짜 내림차순)이며 최대 4개입니다.
//! 시점 값(자산, 부채 등)은 가장 최근 재무상태표를 사용합니다.

use crate::storage::models::{BalanceSheet, CashFlowStatement, IncomeStatement, Quote};

/// 실효세율을 구할 수 없을 때 사용하는 법인세율.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// 나눗셈. 어느 쪽이든 없거나 분모가 0이면 `None`.
pub fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// 최근 4분기 합계(TTM). 값이 4개 미만이거나 앞의 4개 중 하나라도 없으면 `None`.
pub fn sum_ttm<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let quarters: Vec<Option<f64>> = values.into_iter().take(4).collect();
    if quarters.len() < 4 {
        return None;
    }
    quarters.into_iter().sum()
}

/// 0이 아닌 값만 통과시킵니다.
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn quote_price(quote: Option<&Quote>) -> Option<f64> {
    non_zero(quote?.price)
}

fn quote_market_cap(quote: Option<&Quote>) -> Option<f64> {
    non_zero(quote?.market_cap)
}

/// P/E = 주가 / TTM EPS
pub fn pe_ratio(quote: Option<&Quote>, income: &[IncomeStatement]) -> Option<f64> {
    let price = quote_price(quote)?;
    safe_divide(Some(price), sum_ttm(income.iter().map(|s| s.eps)))
}

/// P/B = 시가총액 / (총자산 - 무형자산 - 총부채)
pub fn pb_ratio(quote: Option<&Quote>, balance: &[BalanceSheet]) -> Option<f64> {
    let market_cap = quote_market_cap(quote)?;
    let latest = balance.first()?;
    non_zero(latest.total_stockholders_equity)?;

    let book_value = latest.total_assets? - latest.intangible_assets? - latest.total_liabilities?;
    safe_divide(Some(market_cap), Some(book_value))
}

/// P/S = 시가총액 / TTM 매출
pub fn ps_ratio(quote: Option<&Quote>, income: &[IncomeStatement]) -> Option<f64> {
    let market_cap = quote_market_cap(quote)?;
    safe_divide(Some(market_cap), sum_ttm(income.iter().map(|s| s.revenue)))
}

/// EV = 시가총액 + 총부채 - 현금성자산 (부채/현금이 없으면 0)
pub fn enterprise_value(quote: Option<&Quote>, balance: Option<&BalanceSheet>) -> Option<f64> {
    let market_cap = quote_market_cap(quote)?;
    let latest = balance?;
    Some(
        market_cap + latest.total_debt.unwrap_or(0.0)
            - latest.cash_and_cash_equivalents.unwrap_or(0.0),
    )
}

pub fn ev_ebitda_ratio(
    quote: Option<&Quote>,
    balance: &[BalanceSheet],
    income: &[IncomeStatement],
) -> Option<f64> {
    let ev = enterprise_value(quote, balance.first())?;
    safe_divide(Some(ev), sum_ttm(income.iter().map(|s| s.ebitda)))
}

pub fn ev_fcf_ratio(
    quote: Option<&Quote>,
    balance: &[BalanceSheet],
    cash_flow: &[CashFlowStatement],
) -> Option<f64> {
    let ev = enterprise_value(quote, balance.first())?;
    safe_divide(Some(ev), sum_ttm(cash_flow.iter().map(|s| s.free_cash_flow)))
}

/// 현금 영업이익률(COPM) = TTM EBITDA / TTM 매출
pub fn copm(income: &[IncomeStatement]) -> Option<f64> {
    safe_divide(
        sum_ttm(income.iter().map(|s| s.ebitda)),
        sum_ttm(income.iter().map(|s| s.revenue)),
    )
}

/// 최근 분기 실효세율. 구할 수 없거나 음수면 [`DEFAULT_TAX_RATE`].
fn effective_tax_rate(latest: &IncomeStatement) -> f64 {
    safe_divide(latest.income_tax_expense, non_zero(latest.income_before_tax))
        .filter(|rate| *rate >= 0.0)
        .unwrap_or(DEFAULT_TAX_RATE)
}

/// ROIC = TTM 영업이익 × (1 - 세율) / (총부채 + 자기자본 - 현금)
///
/// 투하자본이 0 이하이면 `None`.
pub fn roic(income: &[IncomeStatement], balance: &[BalanceSheet]) -> Option<f64> {
    let latest_income = income.first()?;
    let latest_balance = balance.first()?;

    let operating_income = sum_ttm(income.iter().map(|s| s.operating_income))?;
    let nopat = operating_income * (1.0 - effective_tax_rate(latest_income));

    let invested_capital = latest_balance.total_debt.unwrap_or(0.0)
        + latest_balance.total_stockholders_equity.unwrap_or(0.0)
        - latest_balance.cash_and_cash_equivalents.unwrap_or(0.0);
    if invested_capital <= 0.0 {
        return None;
    }

    safe_divide(Some(nopat), Some(invested_capital))
}

/// ROTA = TTM 순이익 / (총자산 - 영업권 - 무형자산)
pub fn rota(income: &[IncomeStatement], balance: &[BalanceSheet]) -> Option<f64> {
    let latest = balance.first()?;
    let net_income = sum_ttm(income.iter().map(|s| s.net_income))?;

    let tangible_assets = latest.total_assets.unwrap_or(0.0)
        - latest.goodwill.unwrap_or(0.0)
        - latest.intangible_assets.unwrap_or(0.0);
    if tangible_assets <= 0.0 {
        return None;
    }

    safe_divide(Some(net_income), Some(tangible_assets))
}

/// 총부채 / TTM EBITDA
pub fn debt_ebitda_ratio(balance: &[BalanceSheet], income: &[IncomeStatement]) -> Option<f64> {
    let total_debt = balance.first()?.total_debt?;
    safe_divide(Some(total_debt), sum_ttm(income.iter().map(|s| s.ebitda)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: f64, market_cap: f64) -> Quote {
        Quote {
            symbol: "TEST".to_string(),
            price: Some(price),
            market_cap: Some(market_cap),
            timestamp: 1,
            ..Default::default()
        }
    }

    fn income(eps: f64, revenue: f64, ebitda: f64) -> IncomeStatement {
        IncomeStatement {
            symbol: "TEST".to_string(),
            eps: Some(eps),
            revenue: Some(revenue),
            ebitda: Some(ebitda),
            operating_income: Some(ebitda * 0.8),
            net_income: Some(ebitda * 0.5),
            income_before_tax: Some(ebitda * 0.7),
            income_tax_expense: Some(ebitda * 0.7 * 0.25),
            ..Default::default()
        }
    }

    fn balance() -> BalanceSheet {
        BalanceSheet {
            symbol: "TEST".to_string(),
            total_assets: Some(1_000.0),
            intangible_assets: Some(100.0),
            goodwill: Some(50.0),
            total_liabilities: Some(400.0),
            total_stockholders_equity: Some(600.0),
            total_debt: Some(200.0),
            cash_and_cash_equivalents: Some(100.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(Some(10.0), Some(4.0)), Some(2.5));
        assert_eq!(safe_divide(Some(10.0), Some(0.0)), None);
        assert_eq!(safe_divide(None, Some(1.0)), None);
        assert_eq!(safe_divide(Some(1.0), None), None);
    }

    #[test]
    fn test_sum_ttm_requires_four_quarters() {
        assert_eq!(sum_ttm(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]), Some(10.0));
        assert_eq!(sum_ttm(vec![Some(1.0), Some(2.0), Some(3.0)]), None);
        assert_eq!(sum_ttm(vec![Some(1.0), None, Some(3.0), Some(4.0)]), None);
        // 5번째 이후는 무시
        assert_eq!(
            sum_ttm(vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(100.0)]),
            Some(4.0)
        );
    }

    #[test]
    fn test_valuation_ratios() {
        let q = quote(100.0, 3_000.0);
        let inc = vec![income(1.0, 250.0, 50.0); 4];
        let bs = vec![balance()];

        // 100 / 4
        assert_eq!(pe_ratio(Some(&q), &inc), Some(25.0));
        // 3000 / (1000 - 100 - 400)
        assert_eq!(pb_ratio(Some(&q), &bs), Some(6.0));
        // 3000 / 1000
        assert_eq!(ps_ratio(Some(&q), &inc), Some(3.0));
        // (3000 + 200 - 100) / 200
        assert_eq!(ev_ebitda_ratio(Some(&q), &bs, &inc), Some(15.5));
        assert_eq!(copm(&inc), Some(0.2));
        // 200 / 200
        assert_eq!(debt_ebitda_ratio(&bs, &inc), Some(1.0));
    }

    #[test]
    fn test_pe_needs_price_and_four_quarters() {
        let inc = vec![income(1.0, 250.0, 50.0); 3];
        assert_eq!(pe_ratio(Some(&quote(100.0, 1.0)), &inc), None);
        assert_eq!(pe_ratio(None, &vec![income(1.0, 1.0, 1.0); 4]), None);
        assert_eq!(pe_ratio(Some(&quote(0.0, 1.0)), &vec![income(1.0, 1.0, 1.0); 4]), None);
    }

    #[test]
    fn test_pb_requires_equity() {
        let mut bs = balance();
        bs.total_stockholders_equity = Some(0.0);
        assert_eq!(pb_ratio(Some(&quote(1.0, 100.0)), &[bs]), None);
    }

    #[test]
    fn test_roic_uses_effective_tax_rate() {
        let inc = vec![income(1.0, 250.0, 50.0); 4];
        let bs = vec![balance()];

        // TTM 영업이익 160, 세율 25% → NOPAT 120; 투하자본 200 + 600 - 100 = 700
        let value = roic(&inc, &bs).unwrap();
        assert!((value - 120.0 / 700.0).abs() < 1e-12);
    }

    #[test]
    fn test_roic_default_tax_rate() {
        let mut latest = income(1.0, 250.0, 50.0);
        latest.income_before_tax = Some(0.0);
        let mut inc = vec![latest];
        inc.extend(vec![income(1.0, 250.0, 50.0); 3]);

        let value = roic(&inc, &[balance()]).unwrap();
        assert!((value - 160.0 * 0.79 / 700.0).abs() < 1e-12);
    }

    #[test]
    fn test_roic_non_positive_capital() {
        let mut bs = balance();
        bs.cash_and_cash_equivalents = Some(10_000.0);
        assert_eq!(roic(&vec![income(1.0, 1.0, 1.0); 4], &[bs]), None);
    }

    #[test]
    fn test_rota_tangible_assets() {
        let inc = vec![income(1.0, 250.0, 50.0); 4];
        // 100 / (1000 - 50 - 100)
        let value = rota(&inc, &[balance()]).unwrap();
        assert!((value - 100.0 / 850.0).abs() < 1e-12);

        let mut bs = balance();
        bs.total_assets = Some(100.0);
        assert_eq!(rota(&inc, &[bs]), None);
    }
}
