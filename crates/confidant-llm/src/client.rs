use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed response when the local LLM service cannot be reached. The
/// controller speaks this like any other reply; an unreachable backend is
/// not an error state for the conversation.
pub const CONNECT_APOLOGY: &str = "I'm sorry, I had trouble connecting to the local LLM \
service. Make sure Ollama is running and you have models installed.";

const SYSTEM_PROMPT: &str = "You are a voice chat bot. Answer briefly. Do not use markdown. \
Do not use <think> tags.";

const NO_RESPONSE: &str = "No response received";

/// The language-model collaborator as the conversation controller sees it:
/// a synchronous text-to-text capability plus model listing.
#[async_trait]
pub trait LlmQuery: Send + Sync {
    async fn send(&self, request: &str) -> String;
    async fn list_models(&self) -> Vec<String>;
}

// ── OllamaClient ──────────────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    response: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post_completion(&self, endpoint: &str, prompt: &str) -> Option<reqwest::Response> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        match self.http.post(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => Some(resp),
            Ok(resp) => {
                tracing::debug!(endpoint, status = %resp.status(), "completion request rejected");
                None
            }
            Err(e) => {
                tracing::warn!(endpoint, "error communicating with Ollama API: {e}");
                None
            }
        }
    }
}

/// Prepend the voice-oriented system prompt to a user request.
fn build_prompt(request: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nUser: {request}")
}

/// The generate endpoint streams newline-delimited JSON even with
/// `stream: false` on some server versions; only the first object carries
/// the response text we want.
fn parse_generate_body(body: &str) -> Option<String> {
    let first_line = body.trim().lines().next()?;
    let parsed: CompletionResponse = serde_json::from_str(first_line).ok()?;
    parsed.response
}

#[async_trait]
impl LlmQuery for OllamaClient {
    async fn send(&self, request: &str) -> String {
        let prompt = build_prompt(request);
        tracing::info!(model = %self.model, "sending request to LLM");

        // Newer servers answer on the completion API
        if let Some(resp) = self.post_completion("completion", &prompt).await {
            return match resp.json::<CompletionResponse>().await {
                Ok(parsed) => parsed.response.unwrap_or_else(|| NO_RESPONSE.to_string()),
                Err(e) => {
                    tracing::warn!("failed to decode completion response: {e}");
                    NO_RESPONSE.to_string()
                }
            };
        }

        // Fall back to the older generate API
        tracing::debug!("completion API failed, trying generate API");
        if let Some(resp) = self.post_completion("generate", &prompt).await {
            return match resp.text().await {
                Ok(body) => parse_generate_body(&body)
                    .unwrap_or_else(|| "Received response but couldn't parse it properly".to_string()),
                Err(e) => {
                    tracing::warn!("failed to read generate response: {e}");
                    NO_RESPONSE.to_string()
                }
            };
        }

        CONNECT_APOLOGY.to_string()
    }

    async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = match self.http.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(_) | Err(_) => return Vec::new(),
        };
        match resp.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(_) => Vec::new(),
        }
    }
}
