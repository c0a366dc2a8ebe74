// ============================================================================
// ANSWER CLIENT - SOLO COMUNICACIÓN HTTP con el servicio de respuestas
// ============================================================================
// Un POST por pregunta. Sin reintentos, sin timeout propio, sin streaming.
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use gloo_net::http::Request;
use thiserror::Error;
use crate::config::CONFIG;
use crate::models::{AnswerRequest, AnswerResponse, ErrorBody};
use crate::utils::QUERY_FALLBACK_MESSAGE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("User not authenticated")]
    NotAuthenticated,
    /// El proveedor no emitió token; la consulta se aborta antes de la red
    #[error("Credential error: {0}")]
    Credential(String),
    /// Fallo antes de recibir respuesta; conserva el mensaje del transporte
    #[error("{0}")]
    Transport(String),
    #[error("Server error: {status}")]
    Server { status: u16, message: Option<String> },
    #[error("Parse error: {0}")]
    Decode(String),
}

impl QueryError {
    /// Mensaje para mostrar en la UI
    pub fn user_message(&self) -> String {
        match self {
            QueryError::Server { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            QueryError::Transport(message) if message.trim().is_empty() => {
                QUERY_FALLBACK_MESSAGE.to_string()
            }
            QueryError::Credential(_) => QUERY_FALLBACK_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Respuesta HTTP cruda
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transporte HTTP (inyectable para poder probar sin navegador)
#[async_trait(?Send)]
pub trait HttpTransport {
    /// POST con `Content-Type: application/json` y `Authorization: Bearer <bearer>`.
    /// `Err` solo si no hubo respuesta; el mensaje es el del transporte.
    async fn post_json(&self, url: &str, bearer: &str, body: String) -> Result<HttpReply, String>;
}

/// Transporte real sobre `fetch` (gloo-net)
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn post_json(&self, url: &str, bearer: &str, body: String) -> Result<HttpReply, String> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", bearer))
            .body(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        // Un cuerpo ilegible se trata como vacío
        let body = response.text().await.unwrap_or_default();
        Ok(HttpReply { status, body })
    }
}

/// Cliente del servicio de respuestas (stateless)
#[derive(Clone)]
pub struct AnswerClient {
    endpoint: String,
    transport: Rc<dyn HttpTransport>,
}

impl AnswerClient {
    pub fn new() -> Self {
        Self::with_transport(CONFIG.answer_service_url.clone(), Rc::new(FetchTransport))
    }

    pub fn with_transport(endpoint: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Enviar una pregunta
    pub async fn ask(&self, question: &str, credential: &str) -> Result<AnswerResponse, QueryError> {
        let body = serde_json::to_string(&AnswerRequest {
            question: question.to_string(),
        })
        .map_err(|e| QueryError::Decode(e.to_string()))?;

        log::info!("❓ [ANSWER] POST {} ({} caracteres)", self.endpoint, question.len());

        let reply = self
            .transport
            .post_json(&self.endpoint, credential, body)
            .await
            .map_err(QueryError::Transport)?;

        if !reply.is_success() {
            let message = ErrorBody::parse_message(&reply.body);
            log::error!("❌ [ANSWER] HTTP {}: {:?}", reply.status, message);
            return Err(QueryError::Server {
                status: reply.status,
                message,
            });
        }

        serde_json::from_str::<AnswerResponse>(&reply.body)
            .map_err(|e| QueryError::Decode(e.to_string()))
    }
}

impl Default for AnswerClient {
    fn default() -> Self {
        Self::new()
    }
}
