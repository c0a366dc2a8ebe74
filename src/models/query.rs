use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Cuerpo del POST al servicio de respuestas
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AnswerRequest {
    pub question: String,
}

/// Respuesta exitosa del servicio. Sin validación de esquema:
/// los campos ausentes se aceptan y se muestran vacíos.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub compliance_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_answer: Option<String>,
}

/// Acepta cualquier valor JSON: strings tal cual, null como ausente,
/// el resto serializado como texto
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Cuerpo de error opcional (`{"error": "..."}`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extrae el campo `error` de un cuerpo que puede no ser JSON o estar vacío
    pub fn parse_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Único resultado retenido por el controlador de consultas
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct QueryResult {
    pub id: String,
    pub question: String,
    pub compliance_summary: String,
    pub customer_answer: String,
    pub created_at: DateTime<Utc>,
}

impl QueryResult {
    pub fn from_response(question: &str, response: AnswerResponse) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.to_string(),
            compliance_summary: response.compliance_summary.unwrap_or_default(),
            customer_answer: response.customer_answer.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}
