use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use credit_advisor::advisor::{advisor_router, AdvisorGateway, AdvisorService};
use credit_advisor::credit::{credit_router, ClientSource, CreditEvaluationService, HistorySink};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_credit_routes<S, H, G>(
    credit: Arc<CreditEvaluationService<S, H>>,
    advisor: Arc<AdvisorService<G>>,
) -> axum::Router
where
    S: ClientSource + 'static,
    H: HistorySink + 'static,
    G: AdvisorGateway + 'static,
{
    credit_router(credit)
        .merge(advisor_router(advisor))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::credit_service;
    use axum::body::Body;
    use axum::http::Request;
    use credit_advisor::advisor::AdvisorError;
    use credit_advisor::config::StorageConfig;
    use credit_advisor::credit::CsvClientSource;
    use credit_advisor::credit::CsvHistoryLog;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct OfflineAdvisor;

    impl AdvisorGateway for OfflineAdvisor {
        async fn complete(&self, _question: &str) -> Result<String, AdvisorError> {
            Err(AdvisorError::EmptyResponse)
        }
    }

    fn storage(dir: &std::path::Path) -> StorageConfig {
        StorageConfig {
            clients_csv: dir.join("clientes.csv"),
            history_csv: dir.join("historial_evaluaciones.csv"),
        }
    }

    fn router(
        credit: CreditEvaluationService<CsvClientSource, CsvHistoryLog>,
    ) -> axum::Router {
        with_credit_routes(
            Arc::new(credit),
            Arc::new(AdvisorService::new(OfflineAdvisor)),
        )
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_flag_set() {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(
                metrics_exporter_prometheus::PrometheusBuilder::new()
                    .build_recorder()
                    .handle(),
            ),
        };

        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .readiness
            .store(true, std::sync::atomic::Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn csv_backed_form_evaluates_and_lists_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = storage(dir.path());
        std::fs::write(
            &storage.clients_csv,
            "dni,nombre,ingreso_mensual,score_sbs,endeudamiento\n45678912,Carmen Huaman,4200,705,18\n",
        )
        .expect("write clients");

        let response = router(credit_service(&storage))
            .oneshot(
                Request::post("/api/v1/credit/evaluations")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "client_name": "Carmen Huaman",
                            "monto_solicitado": 10000,
                            "plazo_meses": 36
                        })
                        .to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json(response).await;
        assert_eq!(payload["evaluacion"], json!("APROBADO"));
        assert_eq!(payload["persisted"], json!(true));

        let response = router(credit_service(&storage))
            .oneshot(
                Request::get("/api/v1/credit/evaluations")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let payload = read_json(response).await;
        assert_eq!(payload["entries"][0]["dni"], json!("45678912"));
    }

    #[tokio::test]
    async fn missing_directory_returns_service_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");

        let response = router(credit_service(&storage(dir.path())))
            .oneshot(
                Request::get("/api/v1/clients")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn advisor_failure_does_not_fail_the_request() {
        let dir = tempfile::tempdir().expect("tempdir");

        let response = router(credit_service(&storage(dir.path())))
            .oneshot(
                Request::post("/api/v1/advisor/questions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "question": "¿Qué es el score SBS?" }).to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["status"], json!("unavailable"));
    }

    #[tokio::test]
    async fn healthcheck_is_static() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
