use credit_advisor::advisor::{AdvisorService, OpenAiAdvisor};
use credit_advisor::config::{AdvisorConfig, StorageConfig};
use credit_advisor::credit::{
    CreditEvaluationService, CsvClientSource, CsvHistoryLog, EmploymentType,
};
use credit_advisor::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type CsvCreditService = CreditEvaluationService<CsvClientSource, CsvHistoryLog>;

pub(crate) fn credit_service(storage: &StorageConfig) -> CsvCreditService {
    CreditEvaluationService::new(
        Arc::new(CsvClientSource::new(storage.clients_csv.clone())),
        Arc::new(CsvHistoryLog::new(storage.history_csv.clone())),
    )
}

pub(crate) fn advisor_service(
    config: &AdvisorConfig,
) -> Result<AdvisorService<OpenAiAdvisor>, AppError> {
    let gateway = OpenAiAdvisor::new(config)?;
    Ok(AdvisorService::new(gateway))
}

pub(crate) fn parse_employment(raw: &str) -> Result<EmploymentType, String> {
    EmploymentType::parse(raw)
        .ok_or_else(|| format!("unknown employment type '{raw}' (use Dependiente or Independiente)"))
}
