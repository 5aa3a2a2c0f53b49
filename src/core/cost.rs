use super::types::{
    BusinessTerms, CarTerms, Decision, DecisionTerms, InvestmentTerms, PropertyTerms,
};

/// Cash the decision consumes in `month` (0-indexed).
pub fn decision_cost(decision: &Decision, month: u32) -> f64 {
    match &decision.terms {
        DecisionTerms::Car(terms) => car_cost(terms, month),
        DecisionTerms::Investment(terms) => investment_cost(terms, month),
        DecisionTerms::Travel(terms) => staged_cost(
            terms.total_cost,
            terms.monthly_payment,
            terms.duration,
            month,
        ),
        DecisionTerms::Property(terms) => property_cost(terms, month),
        DecisionTerms::Education(terms) => staged_cost(
            terms.total_cost,
            terms.monthly_payment,
            terms.duration,
            month,
        ),
        DecisionTerms::Business(terms) => business_cost(terms, month),
        DecisionTerms::Unknown(_) => 0.0,
    }
}

/// Fixed monthly payment that repays `principal` over `months` at
/// `annual_rate_pct` compounded monthly.
pub fn amortized_payment(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }

    let n = months as f64;
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if monthly_rate.abs() < f64::EPSILON {
        return principal / n;
    }

    let growth = (1.0 + monthly_rate).powf(n);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Months until a business's cumulative profit covers its initial investment.
pub fn break_even_month(decision: &Decision) -> Option<u32> {
    let DecisionTerms::Business(terms) = &decision.terms else {
        return None;
    };

    let monthly_profit =
        terms.monthly_revenue.unwrap_or(0.0) - terms.monthly_expenses.unwrap_or(0.0);
    if !monthly_profit.is_finite() || monthly_profit <= 0.0 {
        return None;
    }

    let months = (terms.initial_investment.unwrap_or(0.0) / monthly_profit).ceil();
    if months.is_finite() && (0.0..=u32::MAX as f64).contains(&months) {
        Some(months as u32)
    } else {
        None
    }
}

pub(crate) fn installment_plan(
    monthly_payment: Option<f64>,
    duration: Option<u32>,
) -> Option<(f64, u32)> {
    match (monthly_payment, duration) {
        (Some(payment), Some(months)) if payment > 0.0 && months > 0 => Some((payment, months)),
        _ => None,
    }
}

fn car_cost(terms: &CarTerms, month: u32) -> f64 {
    let down_payment = terms.down_payment.unwrap_or(0.0);
    if month == 0 {
        return down_payment;
    }

    let insurance = if month % 12 == 0 {
        terms.insurance.unwrap_or(0.0)
    } else {
        0.0
    };
    loan_installment(
        terms.price,
        down_payment,
        terms.loan_months,
        terms.interest_rate,
        month,
    ) + terms.monthly_maintenance.unwrap_or(0.0)
        + insurance
}

fn property_cost(terms: &PropertyTerms, month: u32) -> f64 {
    let down_payment = terms.down_payment.unwrap_or(0.0);
    if month == 0 {
        return down_payment;
    }

    loan_installment(
        terms.price,
        down_payment,
        terms.loan_months,
        terms.interest_rate,
        month,
    ) + terms.monthly_fees.unwrap_or(0.0)
}

fn loan_installment(
    price: Option<f64>,
    down_payment: f64,
    loan_months: Option<u32>,
    interest_rate: Option<f64>,
    month: u32,
) -> f64 {
    match loan_months {
        Some(n) if n > 0 && month <= n => {
            let principal = (price.unwrap_or(0.0) - down_payment).max(0.0);
            amortized_payment(principal, interest_rate.unwrap_or(0.0), n)
        }
        _ => 0.0,
    }
}

fn investment_cost(terms: &InvestmentTerms, month: u32) -> f64 {
    if month == 0 {
        terms.initial_amount.unwrap_or(0.0)
    } else {
        terms.monthly_contribution.unwrap_or(0.0)
    }
}

fn staged_cost(
    total_cost: Option<f64>,
    monthly_payment: Option<f64>,
    duration: Option<u32>,
    month: u32,
) -> f64 {
    match installment_plan(monthly_payment, duration) {
        Some((payment, months)) if month < months => payment,
        Some(_) => 0.0,
        None if month == 0 => total_cost.unwrap_or(0.0),
        None => 0.0,
    }
}

// Revenue is not netted against cost here.
fn business_cost(terms: &BusinessTerms, month: u32) -> f64 {
    if month == 0 {
        terms.initial_investment.unwrap_or(0.0)
    } else {
        terms.monthly_expenses.unwrap_or(0.0)
    }
}
