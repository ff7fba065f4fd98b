//! Blocking client for an OpenAI-compatible chat completions endpoint.
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

use bnrag_core::config::GenerationSettings;
use bnrag_core::traits::Generator;
use bnrag_core::{Error, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

pub struct OpenAiGenerator {
    client: reqwest::blocking::Client,
    settings: GenerationSettings,
    api_key: String,
}

impl OpenAiGenerator {
    /// Reads the API key from the environment variable named by
    /// `settings.api_key_env`; a missing key is a configuration error.
    pub fn from_settings(settings: &GenerationSettings) -> Result<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::config(format!("{} is not set", settings.api_key_env)))?;
        Self::with_api_key(settings, api_key)
    }

    pub fn with_api_key(settings: &GenerationSettings, api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("building http client: {e}")))?;
        Ok(Self { client, settings: settings.clone(), api_key })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.api_base.trim_end_matches('/'))
    }
}

impl Generator for OpenAiGenerator {
    fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage { role: "system", content: system }, ChatMessage { role: "user", content: prompt }],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };
        tracing::debug!(model = %self.settings.model, prompt_chars = prompt.chars().count(), "chat completion request");

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("chat completion request failed")?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            bail!("HTTP {status}: {text}");
        }
        let parsed: ChatResponse = resp.json().context("decoding chat completion response")?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("chat completion returned no content"))
    }
}
