mod advice;
mod cost;
mod engine;
mod error;
mod returns;
mod rng;
mod risk;
mod types;
mod validate;

pub use advice::recommend;
pub use cost::{amortized_payment, break_even_month, decision_cost};
pub use engine::{compare, project};
pub use error::ModelError;
pub use returns::{monthly_return, volatility};
pub use rng::Rng;
pub use risk::{ZERO_SAVINGS_COST_RATIO, assess, classify_cost_ratio, cost_ratio};
pub use types::{
    BusinessTerms, CarTerms, ComparisonDifference, ComparisonResult, DEFAULT_HORIZON_MONTHS,
    Decision, DecisionTerms, EducationTerms, GoalTag, Horizon, InvestmentTerms, MonthRecord,
    Priority, ProjectionResult, ProjectionSummary, PropertyTerms, Recommendation,
    RecommendationKind, RiskAssessment, RiskFactor, RiskLevel, TravelTerms, UserProfile,
};
pub use validate::{validate_decision, validate_profile};
