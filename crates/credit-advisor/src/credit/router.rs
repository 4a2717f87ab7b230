use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::directory::ClientSource;
use super::evaluation::{Decision, RuleCheck};
use super::history::HistorySink;
use crate::error::AppError;
use super::service::{
    CreditEvaluationService, CreditServiceError, EvaluationReceipt, EvaluationRequest,
};

const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Router builder exposing the credit form endpoints.
pub fn credit_router<S, H>(service: Arc<CreditEvaluationService<S, H>>) -> Router
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
{
    Router::new()
        .route("/api/v1/clients", get(clients_handler::<S, H>))
        .route("/api/v1/clients/:name", get(client_handler::<S, H>))
        .route(
            "/api/v1/credit/evaluations",
            get(history_handler::<S, H>).post(evaluate_handler::<S, H>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClientSearch {
    #[serde(default)]
    pub(crate) query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// Response body mirroring the form's result panel.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub dni: String,
    pub nombre: String,
    pub evaluacion: Decision,
    pub cuota_mensual_estimada: Decimal,
    pub ratio_cuota_ingreso: Decimal,
    pub justificacion: Vec<String>,
    pub sugerencia_monto: Option<Decimal>,
    pub checks: Vec<RuleCheck>,
    pub persisted: bool,
}

impl From<EvaluationReceipt> for EvaluationView {
    fn from(receipt: EvaluationReceipt) -> Self {
        let justificacion = receipt.result.justification();
        let EvaluationReceipt {
            application,
            result,
            persisted,
        } = receipt;

        Self {
            dni: application.client.dni,
            nombre: application.client.name,
            evaluacion: result.decision,
            cuota_mensual_estimada: result.installment,
            ratio_cuota_ingreso: result.installment_ratio,
            justificacion,
            sugerencia_monto: result.suggested_amount,
            checks: result.checks,
            persisted,
        }
    }
}

pub(crate) async fn clients_handler<S, H>(
    State(service): State<Arc<CreditEvaluationService<S, H>>>,
    Query(search): Query<ClientSearch>,
) -> Response
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
{
    match service.directory() {
        Ok(directory) => {
            let names = directory.search(search.query.as_deref().unwrap_or_default());
            (StatusCode::OK, axum::Json(json!({ "names": names }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn client_handler<S, H>(
    State(service): State<Arc<CreditEvaluationService<S, H>>>,
    Path(name): Path<String>,
) -> Response
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
{
    match service.client(&name) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<S, H>(
    State(service): State<Arc<CreditEvaluationService<S, H>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
{
    match service.evaluate(request) {
        Ok(receipt) => {
            let view = EvaluationView::from(receipt);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<S, H>(
    State(service): State<Arc<CreditEvaluationService<S, H>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.history(limit) {
        Ok(entries) => (StatusCode::OK, axum::Json(json!({ "entries": entries }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CreditServiceError) -> Response {
    AppError::from(err).into_response()
}
