use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::RuleTable;
use super::rules::RuleSignals;

/// Binary credit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "APROBADO")]
    Approved,
    #[serde(rename = "RECHAZADO")]
    Rejected,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "APROBADO",
            Decision::Rejected => "RECHAZADO",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }
}

/// Failed rule, rendered to the applicant as a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectionReason {
    CreditScoreBelowMinimum { minimum: u16 },
    DebtRatioAboveMaximum { maximum: Decimal },
    InstallmentAboveIncomeShare { maximum: Decimal },
    /// No amount at or above the minimum fits the installment cap.
    AffordableAmountBelowMinimum { minimum: Decimal },
}

impl RejectionReason {
    pub fn message(&self) -> String {
        match self {
            RejectionReason::CreditScoreBelowMinimum { minimum } => {
                format!("El Score SBS es inferior al mínimo requerido ({minimum}).")
            }
            RejectionReason::DebtRatioAboveMaximum { maximum } => {
                format!("El nivel de endeudamiento supera el {maximum}%.")
            }
            RejectionReason::InstallmentAboveIncomeShare { maximum } => {
                format!("La cuota mensual excede el {maximum}% del ingreso.")
            }
            RejectionReason::AffordableAmountBelowMinimum { minimum } => {
                format!("El monto que podrías pagar es inferior al mínimo de S/ {minimum}.")
            }
        }
    }
}

pub(crate) fn decide_outcome(
    signals: &RuleSignals,
    table: &RuleTable,
) -> (Decision, Vec<RejectionReason>) {
    let mut reasons = Vec::new();

    if !table.accepts_credit_score(signals.credit_score) {
        reasons.push(RejectionReason::CreditScoreBelowMinimum {
            minimum: table.minimum_credit_score,
        });
    }
    if !table.accepts_debt_ratio(signals.debt_ratio) {
        reasons.push(RejectionReason::DebtRatioAboveMaximum {
            maximum: table.maximum_debt_ratio,
        });
    }
    if !table.accepts_installment_ratio(signals.installment_ratio) {
        reasons.push(RejectionReason::InstallmentAboveIncomeShare {
            maximum: table.maximum_installment_ratio,
        });
    }

    let decision = if reasons.is_empty() {
        Decision::Approved
    } else {
        Decision::Rejected
    };

    (decision, reasons)
}
