use super::cost::installment_plan;
use super::error::ModelError;
use super::types::{Decision, DecisionTerms, UserProfile};

pub fn validate_profile(profile: &UserProfile) -> Result<(), ModelError> {
    non_negative("currentSavings", profile.current_savings)?;
    non_negative("monthlyIncome", profile.monthly_income)?;
    non_negative("monthlyExpenses", profile.monthly_expenses)?;
    Ok(())
}

pub fn validate_decision(decision: &Decision) -> Result<(), ModelError> {
    match &decision.terms {
        DecisionTerms::Car(terms) => {
            let price = required("car", "price", terms.price)?;
            validate_loan(price, terms.down_payment, terms.interest_rate)?;
            optional_non_negative("monthlyMaintenance", terms.monthly_maintenance)?;
            optional_non_negative("insurance", terms.insurance)?;
        }
        DecisionTerms::Investment(terms) => {
            required("investment", "initialAmount", terms.initial_amount)?;
            optional_non_negative("monthlyContribution", terms.monthly_contribution)?;
            if let Some(rate) = terms.annual_return {
                finite("annualReturn", rate)?;
            }
        }
        DecisionTerms::Travel(terms) => validate_staged(
            "travel",
            terms.total_cost,
            terms.monthly_payment,
            terms.duration,
        )?,
        DecisionTerms::Property(terms) => {
            let price = required("property", "price", terms.price)?;
            validate_loan(price, terms.down_payment, terms.interest_rate)?;
            optional_non_negative("monthlyFees", terms.monthly_fees)?;
        }
        DecisionTerms::Education(terms) => validate_staged(
            "education",
            terms.total_cost,
            terms.monthly_payment,
            terms.duration,
        )?,
        DecisionTerms::Business(terms) => {
            required("business", "initialInvestment", terms.initial_investment)?;
            optional_non_negative("monthlyExpenses", terms.monthly_expenses)?;
            optional_non_negative("monthlyRevenue", terms.monthly_revenue)?;
        }
        DecisionTerms::Unknown(_) => {}
    }
    Ok(())
}

fn validate_loan(
    price: f64,
    down_payment: Option<f64>,
    interest_rate: Option<f64>,
) -> Result<(), ModelError> {
    optional_non_negative("downPayment", down_payment)?;
    optional_non_negative("interestRate", interest_rate)?;
    if let Some(down_payment) = down_payment {
        if down_payment > price {
            return Err(ModelError::DownPaymentExceedsPrice {
                price,
                down_payment,
            });
        }
    }
    Ok(())
}

/// Lump sum unless a full installment plan is given.
fn validate_staged(
    kind: &'static str,
    total_cost: Option<f64>,
    monthly_payment: Option<f64>,
    duration: Option<u32>,
) -> Result<(), ModelError> {
    optional_non_negative("totalCost", total_cost)?;
    optional_non_negative("monthlyPayment", monthly_payment)?;
    if installment_plan(monthly_payment, duration).is_none() {
        required(kind, "totalCost", total_cost)?;
    }
    Ok(())
}

fn required(
    kind: &'static str,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, ModelError> {
    let value = value.ok_or(ModelError::MissingField { kind, field })?;
    non_negative(field, value)
}

fn optional_non_negative(field: &'static str, value: Option<f64>) -> Result<(), ModelError> {
    if let Some(value) = value {
        non_negative(field, value)?;
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ModelError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ModelError::Negative { field });
    }
    Ok(value)
}

fn finite(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite { field })
    }
}
