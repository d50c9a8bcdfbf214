//! Narrative assessment of an audit via a chat-completions API
//!
//! Optional downstream step: the audit is complete without it, and callers
//! fall back to the raw JSON report when it fails.

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit::AuditResult;

/// Built-in instructions used when no custom system prompt is configured
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an experienced engineering reviewer. \
You receive a JSON audit of a GitHub user: profile, repository statistics, sampled \
source files and recent commits. Write a concise technical assessment in Markdown with \
these sections: Profile Overview (a table), Project Summary, Code Observations \
(cite specific sampled files), Commit Habits, and Overall Assessment. Base every claim \
on the supplied data and say so when the sample is too small to judge.";

/// Settings for the narrative client
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct NarrativeConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Empty means [`DEFAULT_SYSTEM_PROMPT`]
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            system_prompt: String::new(),
            max_tokens: 4000,
            temperature: 0.3,
            timeout_secs: 300,
        }
    }
}

impl NarrativeConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    #[must_use]
    pub fn effective_system_prompt(&self) -> &str {
        if self.system_prompt.trim().is_empty() {
            DEFAULT_SYSTEM_PROMPT
        } else {
            &self.system_prompt
        }
    }
}

/// Narrative generation failures; never fatal to an audit
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative generation not configured: API key required")]
    NotConfigured,

    #[error("failed to serialize audit result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("upstream returned no choices")]
    EmptyResponse,
}

/// Turns an audit into a Markdown narrative
pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        result: &AuditResult,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Wrap the pretty-printed audit in the user prompt.
pub fn build_user_prompt(result: &AuditResult) -> Result<String, NarrativeError> {
    let audit_json = serde_json::to_string_pretty(result)?;
    Ok(format!(
        "Please analyze the following GitHub user data and provide a comprehensive \
         technical assessment:\n\n```json\n{audit_json}\n```"
    ))
}

/// OpenAI-compatible chat-completions client
///
/// One request per audit, a single end-to-end timeout, no retries.
pub struct OpenAiSummarizer {
    http_client: reqwest::Client,
    config: NarrativeConfig,
}

impl OpenAiSummarizer {
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &NarrativeConfig {
        &self.config
    }
}

impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, result: &AuditResult) -> Result<String, NarrativeError> {
        if !self.config.is_configured() {
            return Err(NarrativeError::NotConfigured);
        }

        let system_prompt = self.config.effective_system_prompt();
        let user_prompt = build_user_prompt(result)?;
        debug!(
            "Narrative prompt sizes: system {} bytes, user {} bytes",
            system_prompt.len(),
            user_prompt.len()
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        info!("Requesting narrative from model {}", self.config.model);
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(NarrativeError::EmptyResponse)?;

        debug!("Narrative received: {} bytes", content.len());
        Ok(content)
    }
}
