use super::cost::decision_cost;
use super::error::ModelError;
use super::returns::monthly_return;
use super::rng::Rng;
use super::types::{
    ComparisonDifference, ComparisonResult, Decision, Horizon, MonthRecord, ProjectionResult,
    ProjectionSummary, UserProfile,
};
use super::validate::{validate_decision, validate_profile};

#[derive(Debug, Clone, Copy)]
struct MonthFlow {
    income: f64,
    base_expenses: f64,
    decision_cost: f64,
    investment_return: f64,
}

impl MonthFlow {
    fn expenses(self) -> f64 {
        self.base_expenses + self.decision_cost
    }

    fn net(self) -> f64 {
        self.income - self.expenses() + self.investment_return
    }

    fn savings_rate(self) -> f64 {
        if self.income > 0.0 {
            (self.income - self.expenses()) / self.income * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug)]
struct Ledger {
    balance: f64,
    income: f64,
    expenses: f64,
    investment_return: f64,
}

impl Ledger {
    fn opening(balance: f64) -> Self {
        Self {
            balance,
            income: 0.0,
            expenses: 0.0,
            investment_return: 0.0,
        }
    }

    fn apply(&mut self, flow: MonthFlow) {
        self.balance += flow.net();
        self.income += flow.income;
        self.expenses += flow.expenses();
        self.investment_return += flow.investment_return;
    }

    fn record(
        &self,
        month: u32,
        horizon: &Horizon,
        flow: MonthFlow,
    ) -> Result<MonthRecord, ModelError> {
        Ok(MonthRecord {
            month,
            date: horizon.date_of(month)?,
            balance: round_half_up(self.balance),
            income: flow.income,
            expenses: flow.expenses(),
            decision_cost: flow.decision_cost,
            investment_return: round_half_up(flow.investment_return),
            savings_rate: round_tenths(flow.savings_rate()),
            cumulative_income: round_half_up(self.income),
            cumulative_expenses: round_half_up(self.expenses),
            cumulative_investment_return: round_half_up(self.investment_return),
        })
    }

    fn summary(&self, opening_balance: f64, months: u32) -> ProjectionSummary {
        let net_change = self.balance - opening_balance;
        let avg_monthly_savings = if months > 0 {
            net_change / months as f64
        } else {
            0.0
        };

        ProjectionSummary {
            final_balance: round_half_up(self.balance),
            total_cost: round_half_up(self.expenses),
            total_income: round_half_up(self.income),
            total_investment_return: round_half_up(self.investment_return),
            net_change: round_half_up(net_change),
            avg_monthly_savings: round_half_up(avg_monthly_savings),
        }
    }
}

/// Simulates `horizon.months + 1` months of `profile` living with `decision`.
pub fn project(
    decision: &Decision,
    profile: &UserProfile,
    horizon: &Horizon,
    rng: &mut Rng,
) -> Result<ProjectionResult, ModelError> {
    validate_profile(profile)?;
    validate_decision(decision)?;
    horizon.date_of(horizon.months)?;

    let mut ledger = Ledger::opening(profile.current_savings);
    let mut monthly_data = Vec::with_capacity(horizon.months as usize + 1);

    for month in 0..=horizon.months {
        let flow = MonthFlow {
            income: profile.monthly_income,
            base_expenses: profile.monthly_expenses,
            decision_cost: decision_cost(decision, month),
            investment_return: monthly_return(decision, ledger.balance, rng),
        };
        ledger.apply(flow);
        monthly_data.push(ledger.record(month, horizon, flow)?);
    }

    let summary = ledger.summary(profile.current_savings, horizon.months);
    tracing::debug!(
        decision = %decision.name,
        kind = decision.terms.type_tag(),
        months = horizon.months,
        final_balance = summary.final_balance,
        net_change = summary.net_change,
        "projection complete"
    );

    Ok(ProjectionResult {
        monthly_data,
        summary,
    })
}

/// Projects both decisions against the same profile and horizon, each on its
/// own random stream forked from `rng`.
pub fn compare(
    decision_a: &Decision,
    decision_b: &Decision,
    profile: &UserProfile,
    horizon: &Horizon,
    rng: &mut Rng,
) -> Result<ComparisonResult, ModelError> {
    let result_a = project(decision_a, profile, horizon, &mut rng.fork())?;
    let result_b = project(decision_b, profile, horizon, &mut rng.fork())?;
    let difference = ComparisonDifference::between(&result_a.summary, &result_b.summary);

    Ok(ComparisonResult {
        result_a,
        result_b,
        difference,
    })
}

/// Nearest integer, halves rounded towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_tenths(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
