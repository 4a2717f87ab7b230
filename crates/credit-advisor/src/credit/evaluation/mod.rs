mod config;
mod policy;
mod rules;

pub use config::RuleTable;
pub use policy::{Decision, RejectionReason};
pub use rules::{CreditRule, RuleCheck};

#[cfg(test)]
pub(crate) use rules::RuleSignals;
#[cfg(test)]
pub(crate) use policy::decide_outcome as decide;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::affordability::{self, AffordabilityError};
use super::domain::{CreditApplication, MINIMUM_REQUESTED_AMOUNT};
use policy::decide_outcome;

const CENT: Decimal = dec!(0.01);

/// Stateless evaluator that applies a rule table to credit applications.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    table: RuleTable,
}

impl EvaluationEngine {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn evaluate(
        &self,
        application: &CreditApplication,
    ) -> Result<EvaluationResult, AffordabilityError> {
        let (checks, signals) = rules::check_application(application, &self.table)?;
        let (decision, mut reasons) = decide_outcome(&signals, &self.table);

        let suggested_amount = if self.table.accepts_installment_ratio(signals.installment_ratio) {
            None
        } else {
            let amount = self.suggest_amount(
                application.client.monthly_income,
                application.term.months(),
            )?;
            if amount < MINIMUM_REQUESTED_AMOUNT {
                reasons.push(RejectionReason::AffordableAmountBelowMinimum {
                    minimum: MINIMUM_REQUESTED_AMOUNT,
                });
                None
            } else {
                Some(amount)
            }
        };

        Ok(EvaluationResult {
            installment: signals.installment,
            installment_ratio: affordability::round_currency(signals.installment_ratio),
            decision,
            reasons,
            suggested_amount,
            checks,
        })
    }

    /// Largest amount that passes the installment rule for this income and term.
    pub fn suggest_amount(
        &self,
        monthly_income: Decimal,
        term_months: u32,
    ) -> Result<Decimal, AffordabilityError> {
        let rate = self.table.annual_interest_rate;
        let cap = affordability::installment_cap(monthly_income, self.table.maximum_installment_ratio)?;
        let mut amount = affordability::principal_for_installment(cap, term_months, rate)?;

        // Cent rounding of the installment can push the inverse back over the cap.
        while amount > Decimal::ZERO {
            let payment = affordability::installment(amount, term_months, rate)?;
            let ratio = affordability::installment_ratio(payment, monthly_income)?;
            if self.table.accepts_installment_ratio(ratio) {
                break;
            }
            amount -= CENT;
        }

        Ok(amount.max(Decimal::ZERO))
    }
}

/// Evaluates an application against the standard rule table.
pub fn evaluate(application: &CreditApplication) -> Result<EvaluationResult, AffordabilityError> {
    EvaluationEngine::default().evaluate(application)
}

/// Decision record for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub installment: Decimal,
    /// Installment as percent of monthly income, rounded to two decimals.
    pub installment_ratio: Decimal,
    pub decision: Decision,
    /// Empty exactly when the application is approved.
    pub reasons: Vec<RejectionReason>,
    /// Present only when the installment rule failed and the amount is still
    /// one an application may request.
    pub suggested_amount: Option<Decimal>,
    pub checks: Vec<RuleCheck>,
}

impl EvaluationResult {
    pub fn justification(&self) -> Vec<String> {
        self.reasons.iter().map(RejectionReason::message).collect()
    }
}
