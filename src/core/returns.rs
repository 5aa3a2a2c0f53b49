use super::rng::Rng;
use super::types::{Decision, DecisionTerms, RiskLevel};

pub fn volatility(risk_level: Option<RiskLevel>) -> f64 {
    match risk_level {
        Some(RiskLevel::High) => 0.30,
        Some(RiskLevel::Medium) => 0.15,
        Some(RiskLevel::Low) | None => 0.05,
    }
}

/// Growth earned on `balance` this month. Only investment decisions earn
/// anything, and only they consume a draw from `rng`.
pub fn monthly_return(decision: &Decision, balance: f64, rng: &mut Rng) -> f64 {
    let DecisionTerms::Investment(terms) = &decision.terms else {
        return 0.0;
    };

    let monthly_rate = terms.annual_return.unwrap_or(0.0) / 100.0 / 12.0;
    let noise = (rng.next_f64() - 0.5) * volatility(terms.risk_level);
    balance * monthly_rate * (1.0 + noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{InvestmentTerms, TravelTerms};
    use proptest::prelude::{any, prop_assert, proptest};

    fn fund(annual_return: f64, risk_level: Option<RiskLevel>) -> Decision {
        Decision::new(
            "Fund",
            DecisionTerms::Investment(InvestmentTerms {
                initial_amount: Some(10_000.0),
                monthly_contribution: None,
                annual_return: Some(annual_return),
                risk_level,
            }),
        )
    }

    #[test]
    fn non_investments_earn_nothing_and_draw_nothing() {
        let trip = Decision::new(
            "Trip",
            DecisionTerms::Travel(TravelTerms {
                total_cost: Some(1_000.0),
                ..TravelTerms::default()
            }),
        );
        let mut rng = Rng::new(5);
        let mut untouched = Rng::new(5);

        assert_eq!(monthly_return(&trip, 100_000.0, &mut rng), 0.0);
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn volatility_follows_risk_level() {
        assert_eq!(volatility(Some(RiskLevel::High)), 0.30);
        assert_eq!(volatility(Some(RiskLevel::Medium)), 0.15);
        assert_eq!(volatility(Some(RiskLevel::Low)), 0.05);
        assert_eq!(volatility(None), 0.05);
    }

    #[test]
    fn zero_return_or_balance_earns_nothing() {
        let mut rng = Rng::new(3);
        assert_eq!(monthly_return(&fund(0.0, None), 50_000.0, &mut rng), 0.0);
        assert_eq!(monthly_return(&fund(12.0, None), 0.0, &mut rng), 0.0);
    }

    #[test]
    fn same_seed_gives_same_return() {
        let decision = fund(8.0, Some(RiskLevel::Medium));
        let a = monthly_return(&decision, 40_000.0, &mut Rng::new(11));
        let b = monthly_return(&decision, 40_000.0, &mut Rng::new(11));
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_return_stays_within_volatility_band(
            seed in any::<u64>(),
            balance in 0u32..2_000_000,
            annual_bp in 0u32..3_000,
            level in 0u8..3
        ) {
            let risk_level = match level {
                0 => RiskLevel::Low,
                1 => RiskLevel::Medium,
                _ => RiskLevel::High,
            };
            let balance = balance as f64;
            let annual = annual_bp as f64 / 100.0;
            let decision = fund(annual, Some(risk_level));
            let expected = balance * annual / 100.0 / 12.0;
            let band = expected * volatility(Some(risk_level)) / 2.0;

            let actual = monthly_return(&decision, balance, &mut Rng::new(seed));
            prop_assert!(actual >= expected - band - 1e-9);
            prop_assert!(actual <= expected + band + 1e-9);
        }
    }
}
