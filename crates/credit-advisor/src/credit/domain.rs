use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Smallest principal the credit form accepts.
pub const MINIMUM_REQUESTED_AMOUNT: Decimal = dec!(1000);

/// Client data as held in the directory or typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub dni: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ingreso_mensual")]
    pub monthly_income: Decimal,
    #[serde(rename = "score_sbs")]
    pub credit_score: u16,
    /// Share of income already committed to debt, in percent.
    #[serde(rename = "endeudamiento")]
    pub debt_ratio: Decimal,
}

/// Declared employment arrangement. Recorded with the evaluation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Dependiente")]
    Employed,
    #[serde(rename = "Independiente")]
    SelfEmployed,
}

impl EmploymentType {
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::Employed => "Dependiente",
            EmploymentType::SelfEmployed => "Independiente",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dependiente" | "employed" => Some(Self::Employed),
            "independiente" | "self-employed" | "self_employed" => Some(Self::SelfEmployed),
            _ => None,
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Loan term restricted to the offered durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u16")]
pub struct LoanTerm(u16);

impl LoanTerm {
    pub const OFFERED_MONTHS: [u16; 5] = [12, 24, 36, 48, 60];

    pub fn new(months: u16) -> Result<Self, ApplicationError> {
        if Self::OFFERED_MONTHS.contains(&months) {
            Ok(Self(months))
        } else {
            Err(ApplicationError::UnsupportedTerm(months))
        }
    }

    pub fn months(&self) -> u32 {
        u32::from(self.0)
    }
}

impl From<LoanTerm> for u16 {
    fn from(value: LoanTerm) -> Self {
        value.0
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input handed to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditApplication {
    pub client: ClientProfile,
    pub employment: EmploymentType,
    pub requested_amount: Decimal,
    pub term: LoanTerm,
}

impl CreditApplication {
    pub fn new(
        client: ClientProfile,
        employment: EmploymentType,
        requested_amount: Decimal,
        term_months: u16,
    ) -> Result<Self, ApplicationError> {
        if client.monthly_income <= Decimal::ZERO {
            return Err(ApplicationError::NonPositiveIncome(client.monthly_income));
        }
        if client.debt_ratio < Decimal::ZERO || client.debt_ratio > Decimal::ONE_HUNDRED {
            return Err(ApplicationError::DebtRatioOutOfRange(client.debt_ratio));
        }
        if requested_amount < MINIMUM_REQUESTED_AMOUNT {
            return Err(ApplicationError::AmountBelowMinimum {
                minimum: MINIMUM_REQUESTED_AMOUNT,
                found: requested_amount,
            });
        }
        let term = LoanTerm::new(term_months)?;

        Ok(Self {
            client,
            employment,
            requested_amount,
            term,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    #[error("monthly income must be positive (found {0})")]
    NonPositiveIncome(Decimal),
    #[error("debt ratio must be between 0 and 100 percent (found {0})")]
    DebtRatioOutOfRange(Decimal),
    #[error("requested amount must be at least {minimum} (found {found})")]
    AmountBelowMinimum { minimum: Decimal, found: Decimal },
    #[error("term of {0} months is not offered (choose 12, 24, 36, 48 or 60)")]
    UnsupportedTerm(u16),
}
