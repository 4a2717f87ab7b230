use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::{AdvisorGateway, AdvisorService};

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionPayload {
    pub(crate) question: String,
}

pub fn advisor_router<G>(service: Arc<AdvisorService<G>>) -> Router
where
    G: AdvisorGateway + 'static,
{
    Router::new()
        .route("/api/v1/advisor/questions", post(question_handler::<G>))
        .with_state(service)
}

pub(crate) async fn question_handler<G>(
    State(service): State<Arc<AdvisorService<G>>>,
    axum::Json(payload): axum::Json<QuestionPayload>,
) -> Response
where
    G: AdvisorGateway + 'static,
{
    match service.ask(&payload.question).await {
        Some(reply) => (StatusCode::OK, axum::Json(reply)).into_response(),
        None => {
            let payload = json!({ "error": "question must not be blank" });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
