use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Failure modes of a completion call.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Non-2xx response carrying a structured API error body.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Non-2xx response without a usable error body.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// Transport-level failure (DNS, TLS, connection).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiContent,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// One client per turn; no timeout is configured at this layer.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Issue a single `generateContent` call: the user text as the sole
    /// content part, the assembled instruction as `systemInstruction`.
    /// Returns `None` when the response decodes but carries no candidate
    /// text; the caller substitutes its placeholder reply.
    pub async fn generate(
        &self,
        user_text: &str,
        system_instruction: &str,
    ) -> Result<Option<String>, GeminiError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let req = build_request(user_text, system_instruction);
        let resp = self.http.post(url).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "gemini call failed");
            if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(&body) {
                return Err(GeminiError::Api {
                    status: status.as_u16(),
                    message: parsed.error.message,
                });
            }
            return Err(GeminiError::Status(status.as_u16()));
        }

        let body: GeminiResponse = resp.json().await?;
        Ok(extract_text(body))
    }
}

fn build_request(user_text: &str, system_instruction: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: user_text.to_string(),
            }],
        }],
        system_instruction: GeminiContent {
            parts: vec![GeminiPart {
                text: system_instruction.to_string(),
            }],
        },
        generation_config: GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 800,
        },
    }
}

fn extract_text(body: GeminiResponse) -> Option<String> {
    body.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .map(|p| p.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = build_request("hello", "be brief");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 800);
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_extract_first_candidate_text() {
        let body: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(body).as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_none_on_unexpected_shape() {
        let empty: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(empty), None);

        let no_content: GeminiResponse =
            serde_json::from_str(r#"{"candidates":[{"content":null}]}"#).unwrap();
        assert_eq!(extract_text(no_content), None);

        let missing: GeminiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_text(missing), None);
    }

    #[test]
    fn test_api_error_display_matches_body_message() {
        let err = GeminiError::Api {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "API key not valid");
        assert_eq!(GeminiError::Status(503).to_string(), "HTTP error! status: 503");
    }
}
