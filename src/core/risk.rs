use super::engine::round_half_up;
use super::error::ModelError;
use super::types::{Decision, DecisionTerms, RiskAssessment, RiskFactor, RiskLevel, UserProfile};
use super::validate::{validate_decision, validate_profile};

/// Cost ratio in percent reported for a priced decision against no savings.
pub const ZERO_SAVINGS_COST_RATIO: f64 = 1_000.0;

const MAX_SCORE: u8 = 10;

pub fn assess(decision: &Decision, profile: &UserProfile) -> Result<RiskAssessment, ModelError> {
    validate_profile(profile)?;
    validate_decision(decision)?;

    let ratio = cost_ratio(decision.terms.price(), profile.current_savings);
    let (level, base_score) = classify_cost_ratio(ratio);

    let mut score = base_score;
    if let DecisionTerms::Investment(terms) = &decision.terms {
        if terms.risk_level == Some(RiskLevel::High) {
            score += 3;
        }
    }
    if decision.terms.loan_months().is_some_and(|months| months > 60) {
        score += 2;
    }

    // The level stays the one the cost ratio picked.
    Ok(RiskAssessment {
        level,
        score: score.min(MAX_SCORE),
        factors: vec![
            RiskFactor {
                name: "Cost to savings ratio".to_string(),
                value: format!("{}%", round_half_up(ratio) as i64),
            },
            RiskFactor {
                name: "Commitment duration".to_string(),
                value: format!("{} months", commitment_months(decision)),
            },
            RiskFactor {
                name: "Decision type".to_string(),
                value: decision.terms.label().to_string(),
            },
        ],
    })
}

/// Price as a percentage of savings. Unbounded above except for the
/// zero-savings case.
pub fn cost_ratio(price: Option<f64>, current_savings: f64) -> f64 {
    let price = match price {
        Some(price) if price > 0.0 => price,
        _ => return 0.0,
    };
    if current_savings <= 0.0 {
        return ZERO_SAVINGS_COST_RATIO;
    }
    price / current_savings * 100.0
}

pub fn classify_cost_ratio(ratio: f64) -> (RiskLevel, u8) {
    if ratio > 80.0 {
        (RiskLevel::High, 8)
    } else if ratio > 50.0 {
        (RiskLevel::Medium, 5)
    } else {
        (RiskLevel::Low, 2)
    }
}

fn commitment_months(decision: &Decision) -> u32 {
    decision
        .terms
        .loan_months()
        .filter(|months| *months > 0)
        .or_else(|| decision.terms.duration().filter(|months| *months > 0))
        .unwrap_or(0)
}
