use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::credit::affordability::{DEFAULT_ANNUAL_RATE, DEFAULT_MAX_INSTALLMENT_RATIO};

/// Thresholds and pricing the evaluator applies to every application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub minimum_credit_score: u16,
    /// Percent of income.
    pub maximum_debt_ratio: Decimal,
    /// Percent of income.
    pub maximum_installment_ratio: Decimal,
    pub annual_interest_rate: Decimal,
}

impl RuleTable {
    pub const STANDARD: RuleTable = RuleTable {
        minimum_credit_score: 650,
        maximum_debt_ratio: dec!(45),
        maximum_installment_ratio: DEFAULT_MAX_INSTALLMENT_RATIO,
        annual_interest_rate: DEFAULT_ANNUAL_RATE,
    };
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl RuleTable {
    pub fn accepts_credit_score(&self, credit_score: u16) -> bool {
        credit_score >= self.minimum_credit_score
    }

    pub fn accepts_debt_ratio(&self, debt_ratio: Decimal) -> bool {
        debt_ratio <= self.maximum_debt_ratio
    }

    pub fn accepts_installment_ratio(&self, installment_ratio: Decimal) -> bool {
        installment_ratio <= self.maximum_installment_ratio
    }
}
