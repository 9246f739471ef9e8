//! Generation client
//!
//! One prompt in, one raw text answer out. The credential is checked here,
//! before the transport is touched, so a misconfigured deployment never makes
//! a network call.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::Error;
use crate::llm::{CompletionRequest, Credential, LlmClient, LlmError, Message};

/// Sends composed prompts to the generation service
#[derive(Clone)]
pub struct GenerationClient {
    llm: Arc<dyn LlmClient>,
    credential: Option<Credential>,
    credential_env: String,
    max_tokens: u32,
    temperature: f32,
}

impl GenerationClient {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        credential: Option<Credential>,
        credential_env: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            llm,
            credential,
            credential_env: credential_env.into(),
            max_tokens,
            temperature,
        }
    }

    /// Build from config, reading the credential from its environment variable
    pub fn from_config(config: &LlmConfig, llm: Arc<dyn LlmClient>) -> Self {
        debug!(model = %config.model, "GenerationClient::from_config: called");
        Self::new(
            llm,
            config.credential(),
            config.api_key_env.clone(),
            config.max_tokens,
            config.temperature,
        )
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Send `prompt` as a single user message and return the answer text
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        debug!(prompt_len = prompt.len(), "generate: called");

        let Some(credential) = self.credential.clone() else {
            warn!(env_var = %self.credential_env, "generate: no credential configured");
            return Err(Error::CredentialMissing {
                env_var: self.credential_env.clone(),
            });
        };

        let request = CompletionRequest {
            system_prompt: String::new(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            credential,
        };

        let response = self.llm.complete(request).await?;
        debug!(
            stop_reason = ?response.stop_reason,
            total_tokens = response.usage.total(),
            "generate: response received"
        );

        match response.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(Error::UpstreamError(LlmError::InvalidResponse(
                "generation service returned an empty answer".to_string(),
            ))),
        }
    }
}
