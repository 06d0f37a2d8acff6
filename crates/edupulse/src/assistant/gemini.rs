//! HTTP client for `generateContent`-style text services.

use std::time::Duration;

use serde_json::{json, Map, Value};
use tracing::{debug, trace};

use crate::config::AssistantConfig;
use crate::error::{Error, Result};

use super::{GenerationRequest, Role, TextGenerator};

/// Client for a Gemini-compatible `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client from the assistant configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExternalService`] if the HTTP client cannot be built.
    pub fn new(config: &AssistantConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            url: generate_url(&config.endpoint, &config.model),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    /// The URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let body = build_request_body(&request);
        trace!("Request payload is {} bytes", body.to_string().len());

        let mut call = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        let status = response.status();
        let payload: Value = response.json().await?;
        if !status.is_success() {
            let message = payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("no error message");
            return Err(Error::external(format!("HTTP {}: {message}", status.as_u16())));
        }

        debug!("Text service answered {}", status);
        extract_text(&payload)
            .ok_or_else(|| Error::external("response carried no candidate text"))
    }
}

/// `<endpoint>/models/<model>:generateContent`.
fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// Build the JSON body for `request`.
///
/// The service expects the conversation to open with a user turn, so any
/// leading model turns (such as the greeting) are left out.
pub(crate) fn build_request_body(request: &GenerationRequest) -> Value {
    let contents: Vec<Value> = request
        .contents
        .iter()
        .skip_while(|m| m.role == Role::Model)
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Model => "model",
            };
            json!({ "role": role, "parts": [{ "text": m.text }] })
        })
        .collect();

    let mut body = Map::new();
    body.insert("contents".to_string(), Value::Array(contents));

    if let Some(instruction) = &request.system_instruction {
        body.insert(
            "systemInstruction".to_string(),
            json!({ "parts": [{ "text": instruction }] }),
        );
    }

    let mut generation = Map::new();
    if let Some(temperature) = request.temperature {
        generation.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(top_p) = request.top_p {
        generation.insert("topP".to_string(), json!(top_p));
    }
    if !generation.is_empty() {
        body.insert("generationConfig".to_string(), Value::Object(generation));
    }

    Value::Object(body)
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::ChatMessage;

    #[test]
    fn test_generate_url() {
        assert_eq!(
            generate_url("https://example.test/v1beta/", "gemini-3-flash-preview"),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_client_from_default_config() {
        let client = GeminiClient::new(&AssistantConfig::default(), None).unwrap();
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = AssistantConfig {
            api_key: Some("  ".to_string()),
            ..AssistantConfig::default()
        };
        let client = GeminiClient::new(&config, Some(Duration::from_secs(5))).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_body_for_single_prompt() {
        let request = GenerationRequest {
            contents: vec![ChatMessage::user("Write a syllabus")],
            temperature: Some(0.5),
            ..GenerationRequest::default()
        };
        let body = build_request_body(&request);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Write a syllabus");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
        assert!(body["generationConfig"].get("topP").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_body_without_parameters_has_no_generation_config() {
        let request = GenerationRequest {
            contents: vec![ChatMessage::user("hi")],
            ..GenerationRequest::default()
        };
        assert!(build_request_body(&request).get("generationConfig").is_none());
    }

    #[test]
    fn test_body_skips_leading_model_turns() {
        let request = GenerationRequest {
            system_instruction: Some("Be helpful".to_string()),
            contents: vec![
                ChatMessage::model("Hello!"),
                ChatMessage::user("Plan a lesson"),
                ChatMessage::model("On what?"),
                ChatMessage::user("Fractions"),
            ],
            ..GenerationRequest::default()
        };
        let body = build_request_body(&request);
        let contents = body["contents"].as_array().unwrap();

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["parts"][0]["text"], "Plan a lesson");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be helpful");
    }

    #[test]
    fn test_extract_text() {
        let payload = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "- Strong " }, { "text": "work" }]
                }
            }]
        });
        assert_eq!(extract_text(&payload).as_deref(), Some("- Strong work"));
    }

    #[test]
    fn test_extract_text_missing() {
        assert!(extract_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_text(&json!({ "promptFeedback": {} })).is_none());
    }
}
