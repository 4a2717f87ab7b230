use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{CreditApplication, EmploymentType};
use super::evaluation::{Decision, EvaluationResult};

/// One row of the evaluation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub dni: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ingreso_mensual")]
    pub monthly_income: Decimal,
    #[serde(rename = "score_sbs")]
    pub credit_score: u16,
    #[serde(rename = "endeudamiento")]
    pub debt_ratio: Decimal,
    #[serde(rename = "tipo_empleo")]
    pub employment: EmploymentType,
    #[serde(rename = "monto_solicitado")]
    pub requested_amount: Decimal,
    #[serde(rename = "plazo_meses")]
    pub term_months: u16,
    #[serde(rename = "evaluacion")]
    pub decision: Decision,
    #[serde(rename = "cuota_mensual")]
    pub installment: Decimal,
    #[serde(rename = "ratio_cuota_ingreso")]
    pub installment_ratio: Decimal,
}

impl HistoryEntry {
    pub fn new(application: &CreditApplication, result: &EvaluationResult) -> Self {
        let client = &application.client;
        Self {
            dni: client.dni.clone(),
            name: client.name.clone(),
            monthly_income: client.monthly_income,
            credit_score: client.credit_score,
            debt_ratio: client.debt_ratio,
            employment: application.employment,
            requested_amount: application.requested_amount,
            term_months: application.term.into(),
            decision: result.decision,
            installment: result.installment,
            installment_ratio: result.installment_ratio,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("unable to access evaluation history: {0}")]
    Io(#[from] io::Error),
    #[error("malformed evaluation history: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only destination for evaluation records.
pub trait HistorySink: Send + Sync {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError>;
    /// Last `limit` entries, oldest first.
    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError>;
}

/// Evaluation log stored as CSV. Concurrent writers may interleave rows.
#[derive(Debug, Clone)]
pub struct CsvHistoryLog {
    path: PathBuf,
}

impl CsvHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for CsvHistoryLog {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let mut entries = reader
            .deserialize::<HistoryEntry>()
            .collect::<Result<Vec<_>, _>>()?;

        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
        Ok(entries)
    }
}
