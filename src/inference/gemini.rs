//! Gemini `generateContent` client.

use super::{GenerationRequest, InferenceClient};
use crate::errors::InferenceError;
use crate::prompt::FALLBACK_RESPONSE;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Client for the hosted Gemini text-generation endpoint.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Build a client. `timeout` of `None` lets a request wait indefinitely.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, InferenceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn send(
        &self,
        url: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, InferenceError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|source| InferenceError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(InferenceError::Decode)
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Default)]
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
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, skipping thought parts.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, InferenceError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        let url = self.url();
        let start = Instant::now();
        tracing::debug!(model = %self.model, prompt_len = request.prompt.len(), "sending generation request");

        let result = self.send(&url, &body).await;

        match result {
            Ok(reply) => {
                let text = reply.text();
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    reply_len = text.len(),
                    "generation finished"
                );
                if text.is_empty() {
                    Ok(FALLBACK_RESPONSE.to_string())
                } else {
                    Ok(text)
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Simulation error");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Captured {
        path: String,
        api_key: Option<String>,
        body: serde_json::Value,
    }

    #[derive(Clone)]
    struct MockState {
        status: StatusCode,
        reply: String,
        captured: Arc<Mutex<Vec<Captured>>>,
    }

    async fn handler(
        State(state): State<MockState>,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        state.captured.lock().unwrap().push(Captured {
            path: uri.path().to_string(),
            api_key: headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
        });
        (state.status, state.reply.clone())
    }

    async fn spawn_mock(
        status: StatusCode,
        reply: serde_json::Value,
    ) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            reply: reply.to_string(),
            captured: captured.clone(),
        };
        let router = Router::new().fallback(handler).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{}", addr), captured)
    }

    fn reply_with(parts: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": parts } }]
        })
    }

    #[tokio::test]
    async fn test_generate_sends_instruction_prompt_and_temperature() {
        let (endpoint, captured) =
            spawn_mock(StatusCode::OK, reply_with(serde_json::json!([{ "text": "1️⃣ Hi" }]))).await;
        let client = GeminiClient::new(endpoint, "secret", "gemini-test", None).unwrap();

        let text = client
            .generate(&GenerationRequest::simulation("Explain entanglement"))
            .await
            .unwrap();
        assert_eq!(text, "1️⃣ Hi");

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let req = &captured[0];
        assert_eq!(req.path, "/v1beta/models/gemini-test:generateContent");
        assert_eq!(req.api_key.as_deref(), Some("secret"));
        assert_eq!(
            req.body["systemInstruction"]["parts"][0]["text"],
            crate::prompt::SYSTEM_INSTRUCTION
        );
        assert_eq!(req.body["contents"][0]["role"], "user");
        assert_eq!(req.body["contents"][0]["parts"][0]["text"], "Explain entanglement");
        let temperature = req.body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_concatenates_parts_and_skips_thoughts() {
        let parts = serde_json::json!([
            { "text": "planning...", "thought": true },
            { "text": "1️⃣ Input" },
            { "text": " Understanding" }
        ]);
        let (endpoint, _) = spawn_mock(StatusCode::OK, reply_with(parts)).await;
        let client = GeminiClient::new(endpoint, "", "m", None).unwrap();

        let text = client.generate(&GenerationRequest::simulation("q")).await.unwrap();
        assert_eq!(text, "1️⃣ Input Understanding");
    }

    #[tokio::test]
    async fn test_generate_empty_reply_falls_back() {
        let (endpoint, _) = spawn_mock(StatusCode::OK, serde_json::json!({})).await;
        let client = GeminiClient::new(endpoint, "", "m", None).unwrap();

        let text = client.generate(&GenerationRequest::simulation("q")).await.unwrap();
        assert_eq!(text, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_generate_service_error_propagates() {
        let (endpoint, captured) = spawn_mock(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({ "error": { "message": "API key not valid" } }),
        )
        .await;
        let client = GeminiClient::new(endpoint, "", "m", None).unwrap();

        let err = client
            .generate(&GenerationRequest::simulation("q"))
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().contains("API key not valid"));
        // No retry.
        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_transport_error() {
        // Bind and drop a listener so the port is very likely closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GeminiClient::new(format!("http://{}", addr), "", "m", None).unwrap();
        let err = client
            .generate(&GenerationRequest::simulation("q"))
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Transport { .. }));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GeminiClient::new("https://example.test/", "", "gemini-x", None).unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-x:generateContent"
        );
        assert_eq!(client.model(), "gemini-x");
    }
}
