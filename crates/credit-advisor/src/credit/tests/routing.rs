use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::credit::router::credit_router;
use crate::credit::service::CreditEvaluationService;

fn evaluation_request(body: Value) -> Request<Body> {
    Request::post("/api/v1/credit/evaluations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn evaluation_route_returns_result_panel() {
    let (service, history) = build_service();
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(evaluation_request(json!({
            "client_name": "Ana Torres",
            "tipo_empleo": "Dependiente",
            "monto_solicitado": 10000,
            "plazo_meses": 36
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["evaluacion"], json!("APROBADO"));
    assert_eq!(payload["cuota_mensual_estimada"], json!("371.64"));
    assert_eq!(payload["justificacion"], json!([]));
    assert_eq!(payload["sugerencia_monto"], Value::Null);
    assert_eq!(history.entries().len(), 1);
}

#[tokio::test]
async fn evaluation_route_includes_suggestion_for_stretched_income() {
    let (service, _) = build_service();
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(evaluation_request(json!({
            "client": {
                "dni": "10000006",
                "nombre": "Raul Paz",
                "ingreso_mensual": 1000,
                "score_sbs": 700,
                "endeudamiento": 10
            },
            "monto_solicitado": "10000",
            "plazo_meses": 12
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["evaluacion"], json!("RECHAZADO"));
    assert_eq!(payload["sugerencia_monto"], json!("3778.28"));
    assert_eq!(
        payload["justificacion"],
        json!(["La cuota mensual excede el 35% del ingreso."])
    );
}

#[tokio::test]
async fn evaluation_route_rejects_unsupported_term() {
    let (service, _) = build_service();
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(evaluation_request(json!({
            "client_name": "Ana Torres",
            "monto_solicitado": 10000,
            "plazo_meses": 18
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn evaluation_route_reports_missing_directory() {
    let service = CreditEvaluationService::new(
        Arc::new(MissingClients),
        Arc::new(MemoryHistory::default()),
    );
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(evaluation_request(json!({
            "client_name": "Ana Torres",
            "monto_solicitado": 10000,
            "plazo_meses": 36
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("clientes.csv"));
}

#[tokio::test]
async fn client_search_route_filters_names() {
    let (service, _) = build_service();
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/clients?query=rosa")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["names"], json!(["Rosa Mamani"]));
}

#[tokio::test]
async fn client_route_returns_not_found_for_unknown_name() {
    let (service, _) = build_service();
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/clients/Nadie")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_route_decodes_names_with_spaces() {
    let (service, _) = build_service();
    let router = credit_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/clients/Luis%20Quispe")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["dni"], json!("09876543"));
    assert_eq!(payload["score_sbs"], json!(610));
}

#[tokio::test]
async fn history_route_lists_recorded_evaluations() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    service
        .evaluate(request_for("Luis Quispe", rust_decimal_macros::dec!(6000), 24))
        .expect("evaluation succeeds");

    let response = credit_router(service)
        .oneshot(
            Request::get("/api/v1/credit/evaluations?limit=5")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["nombre"], json!("Luis Quispe"));
    assert_eq!(entries[0]["evaluacion"], json!("RECHAZADO"));
}
