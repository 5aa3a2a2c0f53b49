use std::collections::BTreeSet;

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ModelError;

pub const DEFAULT_HORIZON_MONTHS: u32 = 60;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTag {
    Savings,
    Investment,
    Property,
    Car,
    Travel,
    Retirement,
    Education,
    Business,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub current_savings: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub financial_goals: BTreeSet<GoalTag>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_months: Option<u32>,
    /// Annual percentage rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_maintenance: Option<f64>,
    /// Annual premium, charged every twelfth month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentTerms {
    #[serde(alias = "price", skip_serializing_if = "Option::is_none")]
    pub initial_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<f64>,
    /// Expected annual return in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_return: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_fees: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_investment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_month: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecisionTerms {
    Car(CarTerms),
    Investment(InvestmentTerms),
    Travel(TravelTerms),
    Property(PropertyTerms),
    Education(EducationTerms),
    Business(BusinessTerms),
    /// A type tag this crate does not model. It carries no financial effect.
    Unknown(String),
}

impl DecisionTerms {
    pub fn type_tag(&self) -> &str {
        match self {
            DecisionTerms::Car(_) => "car",
            DecisionTerms::Investment(_) => "investment",
            DecisionTerms::Travel(_) => "travel",
            DecisionTerms::Property(_) => "property",
            DecisionTerms::Education(_) => "education",
            DecisionTerms::Business(_) => "business",
            DecisionTerms::Unknown(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DecisionTerms::Car(_) => "Car purchase",
            DecisionTerms::Investment(_) => "Investment",
            DecisionTerms::Travel(_) => "Travel",
            DecisionTerms::Property(_) => "Property purchase",
            DecisionTerms::Education(_) => "Education",
            DecisionTerms::Business(_) => "Business venture",
            DecisionTerms::Unknown(tag) => tag,
        }
    }

    /// Amount weighed against savings when scoring risk. An investment's
    /// initial amount counts as its price.
    pub fn price(&self) -> Option<f64> {
        match self {
            DecisionTerms::Car(terms) => terms.price,
            DecisionTerms::Investment(terms) => terms.initial_amount,
            DecisionTerms::Property(terms) => terms.price,
            _ => None,
        }
    }

    pub fn loan_months(&self) -> Option<u32> {
        match self {
            DecisionTerms::Car(terms) => terms.loan_months,
            DecisionTerms::Property(terms) => terms.loan_months,
            _ => None,
        }
    }

    pub fn duration(&self) -> Option<u32> {
        match self {
            DecisionTerms::Travel(terms) => terms.duration,
            DecisionTerms::Education(terms) => terms.duration,
            _ => None,
        }
    }

    fn from_parts(tag: &str, data: Value) -> Result<Self, ModelError> {
        let data = if data.is_null() {
            Value::Object(Map::new())
        } else {
            data
        };
        let malformed = |e: serde_json::Error| ModelError::MalformedTerms {
            kind: tag.to_string(),
            message: e.to_string(),
        };

        let terms = match tag {
            "car" => DecisionTerms::Car(serde_json::from_value(data).map_err(malformed)?),
            "investment" => {
                DecisionTerms::Investment(serde_json::from_value(data).map_err(malformed)?)
            }
            "travel" => DecisionTerms::Travel(serde_json::from_value(data).map_err(malformed)?),
            "property" => DecisionTerms::Property(serde_json::from_value(data).map_err(malformed)?),
            "education" => {
                DecisionTerms::Education(serde_json::from_value(data).map_err(malformed)?)
            }
            "business" => DecisionTerms::Business(serde_json::from_value(data).map_err(malformed)?),
            other => DecisionTerms::Unknown(other.to_string()),
        };
        Ok(terms)
    }

    fn data_value(&self) -> Value {
        let value = match self {
            DecisionTerms::Car(terms) => serde_json::to_value(terms),
            DecisionTerms::Investment(terms) => serde_json::to_value(terms),
            DecisionTerms::Travel(terms) => serde_json::to_value(terms),
            DecisionTerms::Property(terms) => serde_json::to_value(terms),
            DecisionTerms::Education(terms) => serde_json::to_value(terms),
            DecisionTerms::Business(terms) => serde_json::to_value(terms),
            DecisionTerms::Unknown(_) => Ok(Value::Object(Map::new())),
        };
        value.unwrap_or(Value::Null)
    }
}

/// A hypothetical financial action. On the wire it keeps the
/// `{ "name", "type", "data" }` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDecision", into = "RawDecision")]
pub struct Decision {
    pub name: String,
    pub terms: DecisionTerms,
}

impl Decision {
    pub fn new(name: impl Into<String>, terms: DecisionTerms) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawDecision {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

impl TryFrom<RawDecision> for Decision {
    type Error = ModelError;

    fn try_from(raw: RawDecision) -> Result<Self, Self::Error> {
        let terms = DecisionTerms::from_parts(&raw.kind, raw.data)?;
        Ok(Decision {
            name: raw.name,
            terms,
        })
    }
}

impl From<Decision> for RawDecision {
    fn from(decision: Decision) -> Self {
        RawDecision {
            kind: decision.terms.type_tag().to_string(),
            data: decision.terms.data_value(),
            name: decision.name,
        }
    }
}

/// Simulated span: `months + 1` samples starting at `start`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Horizon {
    pub months: u32,
    pub start: NaiveDate,
}

impl Horizon {
    pub fn new(months: u32, start: NaiveDate) -> Self {
        Self { months, start }
    }

    pub fn starting_today(months: u32) -> Self {
        Self::new(months, Local::now().date_naive())
    }

    pub fn date_of(&self, month: u32) -> Result<NaiveDate, ModelError> {
        self.start
            .checked_add_months(Months::new(month))
            .ok_or(ModelError::HorizonOutOfRange {
                months: self.months,
                start: self.start,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    pub month: u32,
    pub date: NaiveDate,
    pub balance: f64,
    pub income: f64,
    pub expenses: f64,
    pub decision_cost: f64,
    pub investment_return: f64,
    pub savings_rate: f64,
    pub cumulative_income: f64,
    pub cumulative_expenses: f64,
    pub cumulative_investment_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_balance: f64,
    pub total_cost: f64,
    pub total_income: f64,
    pub total_investment_return: f64,
    pub net_change: f64,
    pub avg_monthly_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub monthly_data: Vec<MonthRecord>,
    pub summary: ProjectionSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u8,
    pub factors: Vec<RiskFactor>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Success,
    Info,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDifference {
    pub final_balance: f64,
    pub total_cost: f64,
    pub net_change: f64,
}

impl ComparisonDifference {
    pub fn between(a: &ProjectionSummary, b: &ProjectionSummary) -> Self {
        Self {
            final_balance: a.final_balance - b.final_balance,
            total_cost: a.total_cost - b.total_cost,
            net_change: a.net_change - b.net_change,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub result_a: ProjectionResult,
    pub result_b: ProjectionResult,
    pub difference: ComparisonDifference,
}
