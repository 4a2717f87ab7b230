//! Credit form: affordability math, the three-rule evaluator, the client
//! directory, the evaluation history and the HTTP routes tying them together.

pub mod affordability;
pub mod directory;
pub mod domain;
pub mod evaluation;
pub mod history;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use affordability::{installment, max_affordable_amount, AffordabilityError};
pub use directory::{ClientDirectory, ClientSource, CsvClientSource, DirectoryError};
pub use domain::{
    ApplicationError, ClientProfile, CreditApplication, EmploymentType, LoanTerm,
    MINIMUM_REQUESTED_AMOUNT,
};
pub use evaluation::{
    evaluate, CreditRule, Decision, EvaluationEngine, EvaluationResult, RejectionReason,
    RuleCheck, RuleTable,
};
pub use history::{CsvHistoryLog, HistoryEntry, HistoryError, HistorySink};
pub use router::{credit_router, EvaluationView};
pub use service::{
    CreditEvaluationService, CreditServiceError, EvaluationReceipt, EvaluationRequest,
};
