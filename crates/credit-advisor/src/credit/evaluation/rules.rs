use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::RuleTable;
use crate::credit::affordability::{self, AffordabilityError};
use crate::credit::domain::CreditApplication;

/// Threshold rules in the order their outcomes are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditRule {
    CreditScore,
    DebtRatio,
    InstallmentRatio,
}

/// Outcome of a single rule, kept for audits and the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule: CreditRule,
    pub passed: bool,
    pub notes: String,
}

pub(crate) struct RuleSignals {
    pub installment: Decimal,
    pub installment_ratio: Decimal,
    pub credit_score: u16,
    pub debt_ratio: Decimal,
}

pub(crate) fn check_application(
    application: &CreditApplication,
    table: &RuleTable,
) -> Result<(Vec<RuleCheck>, RuleSignals), AffordabilityError> {
    let client = &application.client;
    let installment = affordability::installment(
        application.requested_amount,
        application.term.months(),
        table.annual_interest_rate,
    )?;
    let installment_ratio = affordability::installment_ratio(installment, client.monthly_income)?;

    let mut checks = Vec::with_capacity(3);

    let score = client.credit_score;
    let passed = table.accepts_credit_score(score);
    checks.push(RuleCheck {
        rule: CreditRule::CreditScore,
        passed,
        notes: format!(
            "credit score {score} {} minimum {}",
            if passed { "meets" } else { "below" },
            table.minimum_credit_score
        ),
    });

    let debt_ratio = client.debt_ratio;
    let passed = table.accepts_debt_ratio(debt_ratio);
    checks.push(RuleCheck {
        rule: CreditRule::DebtRatio,
        passed,
        notes: format!(
            "debt ratio {debt_ratio}% {} maximum {}%",
            if passed { "within" } else { "exceeds" },
            table.maximum_debt_ratio
        ),
    });

    let passed = table.accepts_installment_ratio(installment_ratio);
    checks.push(RuleCheck {
        rule: CreditRule::InstallmentRatio,
        passed,
        notes: format!(
            "installment {installment} is {}% of income ({} maximum {}%)",
            affordability::round_currency(installment_ratio),
            if passed { "within" } else { "exceeds" },
            table.maximum_installment_ratio
        ),
    });

    let signals = RuleSignals {
        installment,
        installment_ratio,
        credit_score: score,
        debt_ratio,
    };

    Ok((checks, signals))
}
