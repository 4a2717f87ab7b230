use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::credit::directory::{ClientDirectory, ClientSource, DirectoryError};
use crate::credit::domain::{ClientProfile, CreditApplication, EmploymentType, LoanTerm};
use crate::credit::history::{HistoryEntry, HistoryError, HistorySink};
use crate::credit::service::{CreditEvaluationService, EvaluationRequest};

pub(super) fn client(
    dni: &str,
    name: &str,
    income: Decimal,
    score: u16,
    debt_ratio: Decimal,
) -> ClientProfile {
    ClientProfile {
        dni: dni.to_string(),
        name: name.to_string(),
        monthly_income: income,
        credit_score: score,
        debt_ratio,
    }
}

pub(super) fn strong_client() -> ClientProfile {
    client("41234567", "Ana Torres", dec!(3500), 720, dec!(20))
}

pub(super) fn application(
    client: ClientProfile,
    requested_amount: Decimal,
    term_months: u16,
) -> CreditApplication {
    CreditApplication {
        client,
        employment: EmploymentType::Employed,
        requested_amount,
        term: LoanTerm::new(term_months).expect("offered term"),
    }
}

pub(super) fn directory() -> ClientDirectory {
    ClientDirectory::new(vec![
        strong_client(),
        client("09876543", "Luis Quispe", dec!(2800), 610, dec!(38)),
        client("70011223", "Rosa Mamani", dec!(1200), 680, dec!(50)),
    ])
}

pub(super) fn request_for(name: &str, amount: Decimal, term_months: u16) -> EvaluationRequest {
    EvaluationRequest {
        client_name: Some(name.to_string()),
        client: None,
        employment: EmploymentType::Employed,
        requested_amount: amount,
        term_months,
    }
}

pub(super) struct MemoryClients(pub ClientDirectory);

impl ClientSource for MemoryClients {
    fn load(&self) -> Result<ClientDirectory, DirectoryError> {
        Ok(self.0.clone())
    }
}

pub(super) struct MissingClients;

impl ClientSource for MissingClients {
    fn load(&self) -> Result<ClientDirectory, DirectoryError> {
        Err(DirectoryError::Missing {
            path: PathBuf::from("clientes.csv"),
        })
    }
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub(super) fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().expect("history mutex poisoned").clone()
    }
}

impl HistorySink for MemoryHistory {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .push(entry.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let guard = self.entries.lock().expect("history mutex poisoned");
        let skip = guard.len().saturating_sub(limit);
        Ok(guard[skip..].to_vec())
    }
}

pub(super) struct ReadOnlyHistory;

impl HistorySink for ReadOnlyHistory {
    fn append(&self, _entry: &HistoryEntry) -> Result<(), HistoryError> {
        Err(HistoryError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only history",
        )))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(Vec::new())
    }
}

pub(super) fn build_service() -> (
    CreditEvaluationService<MemoryClients, MemoryHistory>,
    Arc<MemoryHistory>,
) {
    let history = Arc::new(MemoryHistory::default());
    let service =
        CreditEvaluationService::new(Arc::new(MemoryClients(directory())), history.clone());
    (service, history)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
