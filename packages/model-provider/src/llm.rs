use rig::client::ProviderClient;
pub use rig::client::completion::CompletionModelHandle;
use rig::completion::{CompletionModel, CompletionRequestBuilder, Message};
use splashgen_types::async_trait;
use splashgen_types::{Result, anyhow};
use std::sync::Arc;

use super::response::{Response, Usage};

pub mod gemini;

#[async_trait]
pub trait ModelLogic: Send + Sync {
    async fn provider(&self) -> Result<ModelConstructor>;
    async fn default_model(&self) -> Option<String>;

    /// Get the underlying rig CompletionModelHandle for use with external libraries
    async fn completion_model_handle(
        &self,
        model_name: Option<&str>,
    ) -> Result<CompletionModelHandle<'static>> {
        let default = self.default_model().await;
        let model_name = model_name
            .map(|s| s.to_string())
            .or(default)
            .ok_or_else(|| anyhow!("No model name provided and no default model available"))?;

        let constructor = self.provider().await?;
        let client = constructor.client();
        let completion_client = client
            .as_ref()
            .as_completion()
            .ok_or_else(|| anyhow!("Provider does not support completion"))?;

        let completion_model = completion_client.completion_model(&model_name);
        Ok(CompletionModelHandle {
            inner: Arc::from(completion_model),
        })
    }

    /// Sends a single user prompt and waits for the complete answer.
    async fn invoke(&self, prompt: &str) -> Result<Response> {
        let model_name = self
            .default_model()
            .await
            .ok_or_else(|| anyhow!("No default model configured"))?;

        let completion_handle = self.completion_model_handle(Some(&model_name)).await?;
        let builder = completion_handle.completion_request(Message::user(prompt));

        invoke_without_stream(builder, &model_name).await
    }
}

pub struct ModelConstructor {
    pub inner: Arc<Box<dyn ProviderClient>>,
}

impl ModelConstructor {
    pub fn client(&self) -> Arc<Box<dyn ProviderClient>> {
        self.inner.clone()
    }
}

async fn invoke_without_stream<'a>(
    builder: CompletionRequestBuilder<CompletionModelHandle<'a>>,
    model_name: &str,
) -> Result<Response> {
    let completion = builder
        .send()
        .await
        .map_err(|e| anyhow!("Rig completion error: {e}"))?;

    let mut response = Response::from_rig_choice(&completion.choice);
    response.model = Some(model_name.to_string());
    response.usage = Usage::from_rig(completion.usage);

    tracing::debug!(
        model = model_name,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        "Completion finished"
    );

    Ok(response)
}
