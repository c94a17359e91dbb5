//! 재무제표 매퍼.
//!
//! 세 재무제표는 공통 머리 필드(심볼, 날짜, 통화, 제출일 등)를 공유하고
//! 나머지 항목은 숫자 그대로 복사합니다.

use super::{non_empty, parse_date, parse_datetime};
use crate::provider::fmp::dto;
use crate::storage::models::{BalanceSheet, CashFlowStatement, IncomeStatement};

/// 머리 필드를 변환하고 나열한 숫자 항목을 복사하는 매퍼를 생성합니다.
macro_rules! statement_mapper {
    (
        $(#[$meta:meta])*
        pub fn $name:ident(dto::$dto:ident) -> $row:ident { $($field:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        pub fn $name(dto: &dto::$dto) -> Option<$row> {
            Some($row {
                symbol: non_empty(&dto.symbol)?,
                date: parse_date(dto.date.as_deref())?,
                reported_currency: dto.reported_currency.clone(),
                cik: dto.cik.clone(),
                filling_date: parse_date(dto.filling_date.as_deref()),
                accepted_date: parse_datetime(dto.accepted_date.as_deref()),
                calendar_year: dto.calendar_year.clone(),
                period: dto.period.clone(),
                link: dto.link.clone(),
                final_link: dto.final_link.clone(),
                $( $field: dto.$field, )*
                ..Default::default()
            })
        }
    };
}

statement_mapper! {
    /// 손익계산서.
    pub fn map_income_statement(dto::IncomeStatement) -> IncomeStatement {
        revenue, cost_of_revenue, gross_profit, gross_profit_ratio,
        research_and_development_expenses, general_and_administrative_expenses,
        selling_and_marketing_expenses, selling_general_and_administrative_expenses,
        other_expenses, operating_expenses, cost_and_expenses, interest_income,
        interest_expense, depreciation_and_amortization, ebitda, ebitda_ratio, operating_income,
        operating_income_ratio, total_other_income_expenses_net, income_before_tax,
        income_before_tax_ratio, income_tax_expense, net_income, net_income_ratio, eps,
        eps_diluted, weighted_average_shs_out, weighted_average_shs_out_dil,
    }
}

statement_mapper! {
    /// 재무상태표.
    pub fn map_balance_sheet(dto::BalanceSheet) -> BalanceSheet {
        cash_and_cash_equivalents, short_term_investments, cash_and_short_term_investments,
        net_receivables, inventory, other_current_assets, total_current_assets,
        property_plant_equipment_net, goodwill, intangible_assets,
        goodwill_and_intangible_assets, long_term_investments, tax_assets,
        other_non_current_assets, total_non_current_assets, other_assets, total_assets,
        account_payables, short_term_debt, tax_payables, deferred_revenue,
        other_current_liabilities, total_current_liabilities, long_term_debt,
        deferred_revenue_non_current, deferred_tax_liabilities_non_current,
        other_non_current_liabilities, total_non_current_liabilities, other_liabilities,
        capital_lease_obligations, total_liabilities, preferred_stock, common_stock,
        retained_earnings, accumulated_other_comprehensive_income_loss,
        other_total_stockholders_equity, total_stockholders_equity, total_equity,
        total_liabilities_and_stockholders_equity, minority_interest,
        total_liabilities_and_total_equity, total_investments, total_debt, net_debt,
    }
}

statement_mapper! {
    /// 현금흐름표.
    pub fn map_cash_flow_statement(dto::CashFlowStatement) -> CashFlowStatement {
        net_income, depreciation_and_amortization, deferred_income_tax,
        stock_based_compensation, change_in_working_capital, accounts_receivables, inventory,
        accounts_payables, other_working_capital, other_non_cash_items,
        net_cash_provided_by_operating_activities, investments_in_property_plant_and_equipment,
        acquisitions_net, purchases_of_investments, sales_maturities_of_investments,
        other_investing_activities, net_cash_used_for_investing_activities, debt_repayment,
        common_stock_issued, common_stock_repurchased, dividends_paid,
        other_financing_activities, net_cash_used_provided_by_financing_activities,
        effect_of_forex_changes_on_cash, net_change_in_cash, cash_at_end_of_period,
        cash_at_beginning_of_period, operating_cash_flow, capital_expenditure, free_cash_flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_income_statement_header_and_items() {
        let dto = dto::IncomeStatement {
            date: Some("2024-06-29".to_string()),
            symbol: Some("AAPL".to_string()),
            period: Some("Q3".to_string()),
            accepted_date: Some("2024-08-02 06:01:36".to_string()),
            filling_date: Some("2024-08-02".to_string()),
            revenue: Some(85_777_000_000.0),
            eps_diluted: Some(1.4),
            ..Default::default()
        };

        let row = map_income_statement(&dto).unwrap();

        assert_eq!(row.symbol, "AAPL");
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 6, 29).unwrap());
        assert_eq!(row.period.as_deref(), Some("Q3"));
        assert_eq!(
            row.accepted_date.map(|d| d.to_string()).as_deref(),
            Some("2024-08-02 06:01:36")
        );
        assert_eq!(row.revenue, Some(85_777_000_000.0));
        assert_eq!(row.eps_diluted, Some(1.4));
        assert!(row.net_income.is_none());
    }

    #[test]
    fn test_statement_without_date_rejected() {
        let dto = dto::BalanceSheet {
            symbol: Some("AAPL".to_string()),
            total_assets: Some(1.0),
            ..Default::default()
        };
        assert!(map_balance_sheet(&dto).is_none());

        let dto = dto::CashFlowStatement {
            date: Some("2024-06-29".to_string()),
            ..Default::default()
        };
        assert!(map_cash_flow_statement(&dto).is_none());
    }
}
