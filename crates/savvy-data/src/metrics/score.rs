//! 종합 점수.
//!
//! 13개 지표를 각각 0~10점으로 환산해 평균합니다. 값이 없거나 유효 구간을
//! 벗어난 지표는 0점입니다.

/// 점수 입력 지표.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub ev_ebitda_ratio: Option<f64>,
    pub ev_fcf_ratio: Option<f64>,
    pub copm: Option<f64>,
    pub roic: Option<f64>,
    pub rota: Option<f64>,
    pub debt_ebitda_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub dividend_payout: Option<f64>,
    pub dividend_growth_10y: Option<f64>,
    pub years_increasing_dividend: Option<i32>,
}

const COMPONENTS: f64 = 13.0;

fn pe_score(pe: f64) -> f64 {
    if pe <= 0.0 || pe >= 30.0 {
        0.0
    } else if pe <= 8.0 {
        pe * 10.0 / 8.0
    } else if pe < 15.0 {
        10.0
    } else {
        (30.0 - pe) * 10.0 / 15.0
    }
}

fn pb_score(pb: f64) -> f64 {
    match pb {
        pb if pb >= 10.0 => 0.0,
        pb if pb < 5.0 => 10.0,
        pb => 10.0 - (pb - 5.0) * 2.0,
    }
}

fn ps_score(ps: f64) -> f64 {
    match ps {
        ps if ps >= 6.0 => 0.0,
        ps if ps < 3.0 => 10.0,
        ps => 10.0 - (ps - 3.0) * 10.0 / 3.0,
    }
}

fn ev_ebitda_score(ratio: f64) -> f64 {
    match ratio {
        r if r >= 18.0 => 0.0,
        r if r < 12.0 => 10.0,
        r => 10.0 - (r - 12.0) * 10.0 / 6.0,
    }
}

fn ev_fcf_score(ratio: f64) -> f64 {
    match ratio {
        r if r >= 30.0 => 0.0,
        r if r <= 20.0 => 10.0,
        r => 30.0 - r,
    }
}

/// COPM/ROIC/ROTA 공통: 양수만 점수화하며 `full` 이상이면 만점.
fn margin_score(value: f64, full: f64, inclusive: bool) -> f64 {
    if value <= 0.0 {
        0.0
    } else if value > full || (inclusive && value == full) {
        10.0
    } else {
        value * 10.0 / full
    }
}

fn debt_ebitda_score(ratio: f64) -> f64 {
    match ratio {
        r if r >= 6.0 => 0.0,
        r if r <= 3.0 => 10.0,
        r => 10.0 - (r - 3.0) * 10.0 / 3.0,
    }
}

fn payout_score(payout: f64) -> f64 {
    match payout {
        p if p >= 0.9 => 0.0,
        p if p < 0.8 => 10.0,
        p => 10.0 - (p - 0.8) * 100.0,
    }
}

fn years_score(years: i32) -> f64 {
    match years {
        y if y <= 0 => 0.0,
        y if y > 10 => 10.0,
        y => f64::from(y),
    }
}

/// 13개 지표 점수의 평균 (0~10).
pub fn calculate_score(inputs: &ScoreInputs) -> f64 {
    let components = [
        inputs.pe_ratio.map(pe_score),
        inputs.pb_ratio.map(pb_score),
        inputs.ps_ratio.map(ps_score),
        inputs.ev_ebitda_ratio.map(ev_ebitda_score),
        inputs.ev_fcf_ratio.map(ev_fcf_score),
        inputs.copm.map(|v| margin_score(v, 0.20, false)),
        inputs.roic.map(|v| margin_score(v, 0.15, true)),
        inputs.rota.map(|v| margin_score(v, 0.15, true)),
        inputs.debt_ebitda_ratio.map(debt_ebitda_score),
        inputs.dividend_yield.map(|v| margin_score(v, 0.03, false)),
        inputs.dividend_payout.map(payout_score),
        inputs.dividend_growth_10y.map(|v| margin_score(v, 0.07, false)),
        inputs.years_increasing_dividend.map(years_score),
    ];

    components.iter().flatten().sum::<f64>() / COMPONENTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(calculate_score(&ScoreInputs::default()), 0.0);
    }

    #[test]
    fn test_perfect_score() {
        let inputs = ScoreInputs {
            pe_ratio: Some(10.0),
            pb_ratio: Some(1.0),
            ps_ratio: Some(1.0),
            ev_ebitda_ratio: Some(8.0),
            ev_fcf_ratio: Some(15.0),
            copm: Some(0.3),
            roic: Some(0.15),
            rota: Some(0.2),
            debt_ebitda_ratio: Some(1.0),
            dividend_yield: Some(0.04),
            dividend_payout: Some(0.5),
            dividend_growth_10y: Some(0.08),
            years_increasing_dividend: Some(25),
        };
        assert!((calculate_score(&inputs) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_pe_bands() {
        assert_eq!(pe_score(4.0), 5.0);
        assert_eq!(pe_score(8.0), 10.0);
        assert_eq!(pe_score(12.0), 10.0);
        assert_eq!(pe_score(15.0), 10.0);
        assert_eq!(pe_score(24.0), 4.0);
        assert_eq!(pe_score(-3.0), 0.0);
        assert_eq!(pe_score(30.0), 0.0);
    }

    #[test]
    fn test_partial_bands() {
        assert_eq!(pb_score(7.0), 6.0);
        assert_eq!(ps_score(4.5), 5.0);
        assert_eq!(ev_ebitda_score(15.0), 5.0);
        assert_eq!(ev_fcf_score(25.0), 5.0);
        assert_eq!(debt_ebitda_score(4.5), 5.0);
        assert!((payout_score(0.85) - 5.0).abs() < 1e-9);
        assert!((margin_score(0.035, 0.07, false) - 5.0).abs() < 1e-9);
        assert_eq!(years_score(4), 4.0);
    }

    #[test]
    fn test_ev_fcf_uses_its_own_ratio() {
        // EV/EBITDA가 없어도 EV/FCF는 점수화
        let inputs = ScoreInputs {
            ev_fcf_ratio: Some(10.0),
            ..Default::default()
        };
        assert!((calculate_score(&inputs) - 10.0 / 13.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn score_within_bounds(
            pe in proptest::option::of(-50f64..100.0),
            pb in proptest::option::of(-5f64..20.0),
            ev_fcf in proptest::option::of(-50f64..80.0),
            roic in proptest::option::of(-1f64..1.0),
            payout in proptest::option::of(-1f64..2.0),
            growth in proptest::option::of(-0.5f64..0.5),
            years in proptest::option::of(-1i32..60),
        ) {
            let inputs = ScoreInputs {
                pe_ratio: pe,
                pb_ratio: pb,
                ev_fcf_ratio: ev_fcf,
                roic,
                dividend_payout: payout,
                dividend_growth_10y: growth,
                years_increasing_dividend: years,
                ..Default::default()
            };
            let score = calculate_score(&inputs);
            prop_assert!((0.0..=10.0).contains(&score));
        }
    }
}
