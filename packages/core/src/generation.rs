//! The single outbound call: configuration in, raw model text out.

use std::time::Duration;

use async_trait::async_trait;
use splashgen_model_provider::{GeminiModel, ModelLogic};
use splashgen_types::anyhow;
use thiserror::Error;

use crate::{config::AnimationConfig, prompt::build_prompt, settings::Settings};

pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate animation. Please check your API key and try again.";

/// Every failure of the generation service collapses into this one error.
/// The underlying cause is logged, never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    Failed,
}

#[async_trait]
pub trait AnimationGenerator: Send + Sync {
    /// Makes exactly one request and returns the unprocessed text payload.
    async fn generate(&self, config: &AnimationConfig) -> Result<String, GenerationError>;
}

pub struct GenerationClient<M: ModelLogic> {
    model: M,
    request_timeout: Option<Duration>,
}

impl GenerationClient<GeminiModel> {
    pub async fn from_settings(settings: &Settings) -> splashgen_types::Result<Self> {
        let model = GeminiModel::new(
            &settings.model_provider(),
            &settings.provider_configuration(),
        )
        .await?;

        Ok(GenerationClient::new(model).with_request_timeout(settings.request_timeout()))
    }
}

impl<M: ModelLogic> GenerationClient<M> {
    pub fn new(model: M) -> Self {
        GenerationClient {
            model,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    async fn request(&self, prompt: &str) -> splashgen_types::Result<String> {
        let invocation = self.model.invoke(prompt);
        let response = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, invocation)
                .await
                .map_err(|_| anyhow!("Request timed out after {:?}", limit))??,
            None => invocation.await?,
        };

        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Model returned no text"))
    }
}

#[async_trait]
impl<M: ModelLogic> AnimationGenerator for GenerationClient<M> {
    async fn generate(&self, config: &AnimationConfig) -> Result<String, GenerationError> {
        let prompt = build_prompt(config);
        let model = self.model.default_model().await;

        tracing::info!(
            model = model.as_deref().unwrap_or("unknown"),
            logo_animation = %config.logo_animation,
            duration = %config.duration,
            "Requesting animation"
        );

        match self.request(&prompt).await {
            Ok(text) => {
                tracing::debug!(bytes = text.len(), "Generation service answered");
                Ok(text)
            }
            Err(e) => {
                tracing::error!("Error calling generation service: {e:#}");
                Err(GenerationError::Failed)
            }
        }
    }
}
