//! GitHub Models implementation of the [`Analyst`] trait.
//!
//! Talks to GitHub Models' OpenAI-compatible chat-completions endpoint
//! with a personal access token. One blocking request per run, no
//! retries - a failure just means no brief this week.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{build_analysis_prompt, extract_brief, format_event_digest};
use crate::error::{AnalysisError, AnalysisResult};
use crate::security::{optional_env, SecretString};
use crate::traits::analyst::Analyst;
use crate::types::brief::AnalysisBrief;
use crate::types::event::RegulatoryEvent;

/// Default endpoint for GitHub Models inference.
pub const DEFAULT_MODELS_URL: &str = "https://models.inference.ai.azure.com";

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Analyst backed by GitHub Models.
pub struct GitHubModelsAnalyst {
    token: SecretString,
    client: Client,
    model: String,
    base_url: String,
}

impl GitHubModelsAnalyst {
    /// Create a new analyst with the given token.
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_MODELS_URL.to_string(),
        }
    }

    /// Create from `GITHUB_TOKEN` (or `GH_TOKEN`), if either is set.
    ///
    /// The token is optional by design: without one the pipeline simply
    /// runs without the analysis step.
    pub fn from_env() -> Option<Self> {
        optional_env("GITHUB_TOKEN")
            .or_else(|| optional_env("GH_TOKEN"))
            .map(Self::new)
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint (for tests and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl Analyst for GitHubModelsAnalyst {
    async fn analyze(
        &self,
        events: &[RegulatoryEvent],
    ) -> AnalysisResult<Option<AnalysisBrief>> {
        if events.is_empty() {
            return Ok(None);
        }

        #[derive(Serialize)]
        struct ChatMessage {
            role: &'static str,
            content: String,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            #[serde(default)]
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }

        #[derive(Deserialize)]
        struct Message {
            content: String,
        }

        let prompt = build_analysis_prompt(&format_event_digest(events));
        let request = ChatRequest {
            model: self.model.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.3,
            max_tokens: 1000,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.token.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Status {
                status: response.status().as_u16(),
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Http(Box::new(e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        Ok(extract_brief(&content))
    }
}
