//! Free-text questions forwarded to a language-model service.
//!
//! Failures never escape this module as errors: they are folded into an
//! [`AdvisorReply::Unavailable`] carrying the inline message shown to the user.

mod openai;
mod router;

pub use openai::OpenAiAdvisor;
pub use router::advisor_router;

use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("no API key configured for the advisor")]
    MissingApiKey,
    #[error("advisor request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("advisor responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("advisor returned no answer")]
    EmptyResponse,
}

/// Backend answering a single user question.
pub trait AdvisorGateway: Send + Sync {
    fn complete(
        &self,
        question: &str,
    ) -> impl Future<Output = Result<String, AdvisorError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum AdvisorReply {
    Answer(String),
    Unavailable(String),
}

impl AdvisorReply {
    pub fn message(&self) -> &str {
        match self {
            AdvisorReply::Answer(text) | AdvisorReply::Unavailable(text) => text,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, AdvisorReply::Answer(_))
    }
}

pub struct AdvisorService<G> {
    gateway: G,
}

impl<G> AdvisorService<G>
where
    G: AdvisorGateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Returns `None` for a blank question without contacting the gateway.
    pub async fn ask(&self, question: &str) -> Option<AdvisorReply> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        debug!(chars = question.chars().count(), "forwarding question to advisor");
        let reply = match self.gateway.complete(question).await {
            Ok(answer) => AdvisorReply::Answer(answer.trim().to_string()),
            Err(err) => {
                warn!(error = %err, "advisor unavailable");
                AdvisorReply::Unavailable(format!("⚠️ Error al consultar el asesor: {err}"))
            }
        };

        Some(reply)
    }
}
