//! Generative-AI client: the `AiClient` trait and the Gemini implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

/// Error type for AI client operations.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API credential was configured at startup.
    #[error("no AI API credential configured (set API_KEY)")]
    MissingCredential,
    /// Network or transport failure.
    #[error("AI network error: {0}")]
    Network(String),
    /// The provider answered with a non-success status.
    #[error("AI API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The provider answered but the reply carried no text.
    #[error("AI response contained no text content")]
    EmptyResponse,
    /// The provider answered with a success status but an undecodable body.
    #[error("AI response body could not be decoded: {0}")]
    MalformedResponse(String),
}

/// Trait for sending a prompt to a generative model and getting its text reply.
///
/// Implementations make exactly one provider call per invocation and never
/// retry. Errors are returned to the caller unchanged.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

// ── Gemini wire types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ── GeminiClient ─────────────────────────────────────────────────────────────

/// Client for the Gemini `generateContent` REST endpoint.
///
/// Uses `ureq` for HTTP inside `spawn_blocking`. The credential is taken from
/// the [`AiConfig`] built at startup and sent as the `x-goog-api-key` header.
pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: config.timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let api_key = self.api_key.clone().ok_or(AiError::MissingCredential)?;
        let url = self.endpoint();
        let timeout = self.timeout;
        let body = serde_json::to_value(GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        })
        .map_err(|e| AiError::Network(format!("failed to encode request: {}", e)))?;

        tokio::task::spawn_blocking(move || {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .timeout_global(timeout)
                .build()
                .into();
            let response = agent
                .post(&url)
                .header("x-goog-api-key", &api_key)
                .header("content-type", "application/json")
                .send_json(body);

            match response {
                Ok(resp) => {
                    let parsed: GenerateContentResponse =
                        resp.into_body()
                            .read_json()
                            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;
                    parsed.into_text().ok_or(AiError::EmptyResponse)
                }
                Err(ureq::Error::StatusCode(status)) => Err(AiError::Api {
                    status,
                    message: "provider returned an error status".to_string(),
                }),
                Err(e) => Err(AiError::Network(e.to_string())),
            }
        })
        .await
        .map_err(|e| AiError::Network(format!("task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://example.invalid/".to_string(),
            timeout: None,
        }
    }

    #[test]
    fn endpoint_includes_model_and_trims_slash() {
        let client = GeminiClient::new(&config(Some("k")));
        assert_eq!(
            client.endpoint(),
            "https://example.invalid/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let json = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "```json\n"}, {"text": "{\"a\":1}```"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        });
        let resp: GenerateContentResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("```json\n{\"a\":1}```"));
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"promptFeedback": {}})).unwrap();
        assert!(resp.into_text().is_none());
    }

    #[tokio::test]
    async fn missing_credential_fails_without_network() {
        let client = GeminiClient::new(&config(None));
        let err = client.complete("prompt").await.unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
    }

    /// Serve one canned HTTP response on a local port after reading the
    /// request headers and body.
    fn serve_once(response: &'static str) -> String {
        use std::io::{BufRead, BufReader, Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut content_length = 0usize;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
                    chunked = true;
                }
            }
            if chunked {
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 {
                        break;
                    }
                    if line == "0\r\n" {
                        reader.read_line(&mut String::new()).unwrap();
                        break;
                    }
                }
            } else {
                let mut body = vec![0u8; content_length];
                reader.read_exact(&mut body).unwrap();
            }
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn undecodable_success_body_is_malformed_response() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 8\r\nconnection: close\r\n\r\nnot json",
        );
        let client = GeminiClient::new(&AiConfig {
            base_url,
            ..config(Some("k"))
        });
        let err = client.complete("prompt").await.unwrap_err();
        assert!(matches!(err, AiError::MalformedResponse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn error_status_is_api_error() {
        let base_url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        );
        let client = GeminiClient::new(&AiConfig {
            base_url,
            ..config(Some("k"))
        });
        let err = client.complete("prompt").await.unwrap_err();
        assert!(matches!(err, AiError::Api { status: 503, .. }), "got {:?}", err);
    }
}
