//! 기업 지표 계산.
//!
//! 최근 4분기 재무제표, 최신 시세, 프로필, 배당 이력으로 밸류에이션/수익성/배당
//! 지표와 종합 점수를 계산해 `company_metrics` 행을 만듭니다.
//!
//! # 지표
//!
//! 1. **밸류에이션**: P/E, P/B, P/S, EV/EBITDA, EV/FCF
//! 2. **수익성**: COPM(EBITDA 마진), ROIC, ROTA
//! 3. **레버리지**: Debt/EBITDA
//! 4. **배당**: 수익률, 배당성향, 10년 CAGR, 연속 증가 연수
//!
//! 계산은 순수 함수이며 DB 조회는 [`loader`]가 담당합니다.

pub mod dividends;
pub mod loader;
pub mod ratios;
pub mod score;

use chrono::NaiveDate;

use crate::storage::models::{
    BalanceSheet, CashFlowStatement, CompanyMetrics, CompanyProfile, Dividend, IncomeStatement,
    Quote,
};

pub use loader::load_metrics_inputs;
pub use ratios::{safe_divide, sum_ttm};
pub use score::{calculate_score, ScoreInputs};

/// 배당 성장률 계산 기간 (년).
pub const DIVIDEND_GROWTH_YEARS: i32 = 10;

/// 지표 계산 입력. 재무제표와 배당은 날짜 내림차순입니다.
#[derive(Debug, Clone, Default)]
pub struct MetricsInputs {
    pub income: Vec<IncomeStatement>,
    pub balance: Vec<BalanceSheet>,
    pub cash_flow: Vec<CashFlowStatement>,
    pub quote: Option<Quote>,
    pub profile: Option<CompanyProfile>,
    pub dividends: Vec<Dividend>,
}

/// 한 종목의 지표를 계산합니다.
///
/// 손익계산서와 재무상태표가 모두 없으면 `None`을 반환합니다.
pub fn calculate_company_metrics(
    symbol: &str,
    inputs: &MetricsInputs,
    today: NaiveDate,
) -> Option<CompanyMetrics> {
    if inputs.income.is_empty() && inputs.balance.is_empty() {
        return None;
    }

    let quote = inputs.quote.as_ref();
    let (income, balance, cash_flow) = (&inputs.income, &inputs.balance, &inputs.cash_flow);

    let scores = ScoreInputs {
        pe_ratio: ratios::pe_ratio(quote, income),
        pb_ratio: ratios::pb_ratio(quote, balance),
        ps_ratio: ratios::ps_ratio(quote, income),
        ev_ebitda_ratio: ratios::ev_ebitda_ratio(quote, balance, income),
        ev_fcf_ratio: ratios::ev_fcf_ratio(quote, balance, cash_flow),
        copm: ratios::copm(income),
        roic: ratios::roic(income, balance),
        rota: ratios::rota(income, balance),
        debt_ebitda_ratio: ratios::debt_ebitda_ratio(balance, income),
        dividend_yield: dividends::dividend_yield(&inputs.dividends, quote, today),
        dividend_payout: dividends::dividend_payout(cash_flow, income),
        dividend_growth_10y: dividends::dividend_growth(
            &inputs.dividends,
            DIVIDEND_GROWTH_YEARS,
            today,
        ),
        years_increasing_dividend: dividends::years_increasing_dividend(&inputs.dividends, today),
    };

    Some(CompanyMetrics {
        symbol: symbol.to_string(),
        company_name: inputs.profile.as_ref().map(|p| p.company_name.clone()),
        sector: inputs.profile.as_ref().and_then(|p| p.sector.clone()),
        market_cap: quote.and_then(|q| q.market_cap),
        pe_ratio: scores.pe_ratio,
        pb_ratio: scores.pb_ratio,
        ps_ratio: scores.ps_ratio,
        ev_ebitda_ratio: scores.ev_ebitda_ratio,
        ev_fcf_ratio: scores.ev_fcf_ratio,
        copm: scores.copm,
        roic: scores.roic,
        rota: scores.rota,
        debt_ebitda_ratio: scores.debt_ebitda_ratio,
        dividend_yield: scores.dividend_yield,
        dividend_payout: scores.dividend_payout,
        dividend_growth_10y: scores.dividend_growth_10y,
        years_increasing_dividend: scores.years_increasing_dividend,
        score: Some(calculate_score(&scores)),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn quarter(day: u32) -> (IncomeStatement, BalanceSheet, CashFlowStatement) {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        (
            IncomeStatement {
                symbol: "ACME".to_string(),
                date,
                period: Some("Q1".to_string()),
                eps: Some(2.0),
                revenue: Some(1_000.0),
                ebitda: Some(250.0),
                operating_income: Some(200.0),
                net_income: Some(150.0),
                ..Default::default()
            },
            BalanceSheet {
                symbol: "ACME".to_string(),
                date,
                total_assets: Some(10_000.0),
                intangible_assets: Some(500.0),
                total_liabilities: Some(4_000.0),
                total_stockholders_equity: Some(6_000.0),
                total_debt: Some(2_000.0),
                cash_and_cash_equivalents: Some(1_000.0),
                ..Default::default()
            },
            CashFlowStatement {
                symbol: "ACME".to_string(),
                date,
                free_cash_flow: Some(200.0),
                dividends_paid: Some(-60.0),
                ..Default::default()
            },
        )
    }

    fn inputs() -> MetricsInputs {
        let mut inputs = MetricsInputs {
            quote: Some(Quote {
                symbol: "ACME".to_string(),
                price: Some(100.0),
                market_cap: Some(16_000.0),
                timestamp: 1_718_000_000,
                ..Default::default()
            }),
            profile: Some(CompanyProfile {
                symbol: "ACME".to_string(),
                company_name: "Acme Corp".to_string(),
                sector: Some("Industrials".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        for day in [28, 21, 14, 7] {
            let (i, b, c) = quarter(day);
            inputs.income.push(i);
            inputs.balance.push(b);
            inputs.cash_flow.push(c);
        }
        inputs
    }

    #[test]
    fn test_no_statements_no_metrics() {
        let inputs = MetricsInputs {
            quote: inputs().quote,
            ..Default::default()
        };
        assert!(calculate_company_metrics("ACME", &inputs, today()).is_none());
    }

    #[test]
    fn test_full_metrics() {
        let metrics = calculate_company_metrics("ACME", &inputs(), today()).unwrap();

        assert_eq!(metrics.symbol, "ACME");
        assert_eq!(metrics.company_name.as_deref(), Some("Acme Corp"));
        assert_eq!(metrics.sector.as_deref(), Some("Industrials"));
        assert_eq!(metrics.market_cap, Some(16_000.0));

        // 100 / 8
        assert_eq!(metrics.pe_ratio, Some(12.5));
        // 16000 / (10000 - 500 - 4000)
        assert!((metrics.pb_ratio.unwrap() - 16_000.0 / 5_500.0).abs() < 1e-12);
        assert_eq!(metrics.ps_ratio, Some(4.0));
        // (16000 + 2000 - 1000) / 1000
        assert_eq!(metrics.ev_ebitda_ratio, Some(17.0));
        assert_eq!(metrics.ev_fcf_ratio, Some(21.25));
        assert_eq!(metrics.copm, Some(0.25));
        assert_eq!(metrics.dividend_payout, Some(0.4));
        assert!(metrics.dividend_yield.is_none());
        assert!(metrics.years_increasing_dividend.is_none());

        let score = metrics.score.unwrap();
        assert!(score > 0.0 && score <= 10.0);
    }

    #[test]
    fn test_missing_quote_keeps_profitability() {
        let mut inputs = inputs();
        inputs.quote = None;

        let metrics = calculate_company_metrics("ACME", &inputs, today()).unwrap();
        assert!(metrics.pe_ratio.is_none());
        assert!(metrics.market_cap.is_none());
        assert_eq!(metrics.copm, Some(0.25));
        assert!(metrics.roic.is_some());
    }
}
