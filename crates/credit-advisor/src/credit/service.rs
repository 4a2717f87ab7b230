use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::affordability::AffordabilityError;
use super::directory::{ClientDirectory, ClientSource, DirectoryError};
use super::domain::{ApplicationError, ClientProfile, CreditApplication, EmploymentType};
use super::evaluation::{EvaluationEngine, EvaluationResult, RuleTable};
use super::history::{HistoryEntry, HistoryError, HistorySink};

/// Form input for one evaluation.
///
/// A `client_name` picks the profile from the directory; otherwise the manually
/// entered `client` is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client: Option<ClientProfile>,
    #[serde(rename = "tipo_empleo", default)]
    pub employment: EmploymentType,
    #[serde(rename = "monto_solicitado")]
    pub requested_amount: Decimal,
    #[serde(rename = "plazo_meses")]
    pub term_months: u16,
}

/// Evaluation outcome together with the application it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReceipt {
    pub application: CreditApplication,
    pub result: EvaluationResult,
    /// False when the history append failed.
    pub persisted: bool,
}

/// Runs one form interaction: directory lookup, evaluation and history append.
pub struct CreditEvaluationService<S, H> {
    source: Arc<S>,
    history: Arc<H>,
    engine: EvaluationEngine,
}

impl<S, H> CreditEvaluationService<S, H>
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
{
    pub fn new(source: Arc<S>, history: Arc<H>) -> Self {
        Self::with_rules(source, history, RuleTable::STANDARD)
    }

    pub fn with_rules(source: Arc<S>, history: Arc<H>, table: RuleTable) -> Self {
        Self {
            source,
            history,
            engine: EvaluationEngine::new(table),
        }
    }

    pub fn directory(&self) -> Result<ClientDirectory, CreditServiceError> {
        Ok(self.source.load()?)
    }

    pub fn client(&self, name: &str) -> Result<ClientProfile, CreditServiceError> {
        let directory = self.directory()?;
        directory
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| CreditServiceError::ClientNotFound(name.to_string()))
    }

    pub fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationReceipt, CreditServiceError> {
        let directory = self.directory()?;

        let EvaluationRequest {
            client_name,
            client,
            employment,
            requested_amount,
            term_months,
        } = request;

        let selected = client_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let profile = match (selected, client) {
            (Some(name), _) => directory
                .find_by_name(name)
                .cloned()
                .ok_or_else(|| CreditServiceError::ClientNotFound(name.to_string()))?,
            (None, Some(profile)) => profile,
            (None, None) => return Err(CreditServiceError::MissingClient),
        };

        let application =
            CreditApplication::new(profile, employment, requested_amount, term_months)?;
        let result = self.engine.evaluate(&application)?;

        info!(
            dni = %application.client.dni,
            decision = result.decision.label(),
            installment = %result.installment,
            installment_ratio = %result.installment_ratio,
            "credit application evaluated"
        );

        let entry = HistoryEntry::new(&application, &result);
        let persisted = match self.history.append(&entry) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, dni = %entry.dni, "failed to record evaluation history");
                false
            }
        };

        Ok(EvaluationReceipt {
            application,
            result,
            persisted,
        })
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, CreditServiceError> {
        Ok(self.history.recent(limit)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("client '{0}' is not in the directory")]
    ClientNotFound(String),
    #[error("select a client from the directory or enter the client details")]
    MissingClient,
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error(transparent)]
    Affordability(#[from] AffordabilityError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
