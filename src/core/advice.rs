use super::types::{
    Decision, DecisionTerms, MonthRecord, Priority, ProjectionResult, Recommendation,
    RecommendationKind, UserProfile,
};

const LOW_SAVINGS_RATE_PCT: f64 = 10.0;
const DEPLETION_FLOOR: f64 = 0.5;
const LONG_CAR_LOAN_MONTHS: u32 = 48;

/// Every matching rule, in evaluation order.
pub fn recommend(
    decision: &Decision,
    profile: &UserProfile,
    projection: &ProjectionResult,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let summary = &projection.summary;

    if average_savings_rate(&projection.monthly_data).is_some_and(|rate| rate < LOW_SAVINGS_RATE_PCT)
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Warning,
            title: "Low savings rate".to_string(),
            description: "This decision could sharply reduce your ability to save. Consider \
                          postponing it or cutting its costs."
                .to_string(),
            priority: Priority::High,
        });
    }

    if summary.final_balance < profile.current_savings * DEPLETION_FLOOR {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Warning,
            title: "Large savings depletion".to_string(),
            description: "This decision would use up more than half of your savings. Make sure \
                          you have an emergency plan."
                .to_string(),
            priority: Priority::High,
        });
    }

    if matches!(decision.terms, DecisionTerms::Investment(_))
        && summary.total_investment_return > 0.0
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Success,
            title: "Good investment opportunity".to_string(),
            description: format!(
                "The expected return from this investment is {}.",
                summary.total_investment_return.round() as i64
            ),
            priority: Priority::Medium,
        });
    }

    if let DecisionTerms::Car(terms) = &decision.terms {
        if terms
            .loan_months
            .is_some_and(|months| months > LONG_CAR_LOAN_MONTHS)
        {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Info,
                title: "Long loan term".to_string(),
                description: "Try shortening the loan to save on interest. A larger monthly \
                              payment could save you a lot."
                    .to_string(),
                priority: Priority::Low,
            });
        }
    }

    recommendations
}

fn average_savings_rate(records: &[MonthRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|record| record.savings_rate).sum();
    Some(total / records.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::project;
    use crate::core::rng::Rng;
    use crate::core::types::{
        CarTerms, Horizon, InvestmentTerms, ProjectionSummary, RiskLevel, TravelTerms,
    };
    use chrono::NaiveDate;

    fn profile(current_savings: f64, monthly_income: f64, monthly_expenses: f64) -> UserProfile {
        UserProfile {
            current_savings,
            monthly_income,
            monthly_expenses,
            ..UserProfile::default()
        }
    }

    fn horizon() -> Horizon {
        Horizon::new(60, NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"))
    }

    fn titles(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    fn projection_with(summary: ProjectionSummary, savings_rates: &[f64]) -> ProjectionResult {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        ProjectionResult {
            monthly_data: savings_rates
                .iter()
                .enumerate()
                .map(|(month, rate)| MonthRecord {
                    month: month as u32,
                    date,
                    balance: 0.0,
                    income: 0.0,
                    expenses: 0.0,
                    decision_cost: 0.0,
                    investment_return: 0.0,
                    savings_rate: *rate,
                    cumulative_income: 0.0,
                    cumulative_expenses: 0.0,
                    cumulative_investment_return: 0.0,
                })
                .collect(),
            summary,
        }
    }

    fn summary(final_balance: f64, total_investment_return: f64) -> ProjectionSummary {
        ProjectionSummary {
            final_balance,
            total_cost: 0.0,
            total_income: 0.0,
            total_investment_return,
            net_change: 0.0,
            avg_monthly_savings: 0.0,
        }
    }

    #[test]
    fn healthy_trip_produces_no_advice() {
        let decision = Decision::new(
            "Trip",
            DecisionTerms::Travel(TravelTerms {
                total_cost: Some(5_000.0),
                ..TravelTerms::default()
            }),
        );
        let p = profile(50_000.0, 10_000.0, 5_000.0);
        let projection = project(&decision, &p, &horizon(), &mut Rng::new(1)).expect("valid");
        assert!(recommend(&decision, &p, &projection).is_empty());
    }

    #[test]
    fn low_savings_warning_precedes_investment_success() {
        let decision = Decision::new(
            "Fund",
            DecisionTerms::Investment(InvestmentTerms {
                initial_amount: Some(10_000.0),
                monthly_contribution: Some(2_500.0),
                annual_return: Some(8.0),
                risk_level: Some(RiskLevel::Low),
            }),
        );
        let p = profile(40_000.0, 10_000.0, 7_000.0);
        let projection = project(&decision, &p, &horizon(), &mut Rng::new(2)).expect("valid");

        let recommendations = recommend(&decision, &p, &projection);
        assert_eq!(
            titles(&recommendations),
            ["Low savings rate", "Good investment opportunity"]
        );
        assert_eq!(recommendations[0].kind, RecommendationKind::Warning);
        assert_eq!(recommendations[0].priority, Priority::High);
        assert_eq!(recommendations[1].kind, RecommendationKind::Success);
        assert!(
            recommendations[1]
                .description
                .contains(&format!("{}", projection.summary.total_investment_return as i64))
        );
    }

    #[test]
    fn all_rules_fire_in_evaluation_order() {
        let decision = Decision::new(
            "Truck",
            DecisionTerms::Car(CarTerms {
                price: Some(90_000.0),
                loan_months: Some(60),
                ..CarTerms::default()
            }),
        );
        let p = profile(100_000.0, 10_000.0, 9_500.0);
        let projection = projection_with(summary(20_000.0, 0.0), &[-5.0, 4.0, 6.0]);

        let recommendations = recommend(&decision, &p, &projection);
        assert_eq!(
            titles(&recommendations),
            ["Low savings rate", "Large savings depletion", "Long loan term"]
        );
        assert_eq!(recommendations[2].kind, RecommendationKind::Info);
        assert_eq!(recommendations[2].priority, Priority::Low);
    }

    #[test]
    fn forty_eight_month_car_loan_is_not_long() {
        let decision = Decision::new(
            "Car",
            DecisionTerms::Car(CarTerms {
                price: Some(10_000.0),
                loan_months: Some(48),
                ..CarTerms::default()
            }),
        );
        let p = profile(10_000.0, 10_000.0, 1_000.0);
        let projection = projection_with(summary(10_000.0, 0.0), &[50.0]);
        assert!(recommend(&decision, &p, &projection).is_empty());
    }

    #[test]
    fn depletion_threshold_is_strictly_below_half() {
        let decision = Decision::new("Gift", DecisionTerms::Unknown("gift".to_string()));
        let p = profile(10_000.0, 1_000.0, 0.0);

        let at_half = projection_with(summary(5_000.0, 0.0), &[100.0]);
        assert!(recommend(&decision, &p, &at_half).is_empty());

        let below = projection_with(summary(4_999.0, 0.0), &[100.0]);
        assert_eq!(titles(&recommend(&decision, &p, &below)), ["Large savings depletion"]);
    }

    #[test]
    fn investment_without_positive_return_gets_no_success() {
        let decision = Decision::new(
            "Fund",
            DecisionTerms::Investment(InvestmentTerms {
                initial_amount: Some(1_000.0),
                ..InvestmentTerms::default()
            }),
        );
        let p = profile(1_000.0, 1_000.0, 0.0);
        let projection = projection_with(summary(2_000.0, 0.0), &[100.0]);
        assert!(recommend(&decision, &p, &projection).is_empty());
    }

    #[test]
    fn empty_series_skips_savings_rate_rule() {
        let decision = Decision::new("Gift", DecisionTerms::Unknown("gift".to_string()));
        let p = profile(0.0, 0.0, 0.0);
        let projection = projection_with(summary(0.0, 0.0), &[]);
        assert!(recommend(&decision, &p, &projection).is_empty());
    }
}
