use std::sync::Arc;

use super::{ModelConstructor, ModelLogic};
use crate::provider::{ModelProvider, ModelProviderConfiguration, random_provider};
use rig::client::ProviderClient;
use splashgen_types::{Result, anyhow, async_trait};

pub struct GeminiModel {
    client: Arc<Box<dyn ProviderClient>>,
    default_model: Option<String>,
}

impl GeminiModel {
    pub async fn new(
        provider: &ModelProvider,
        config: &ModelProviderConfiguration,
    ) -> splashgen_types::Result<Self> {
        let gemini_config = random_provider(&config.gemini_config)?;
        let api_key = gemini_config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("Gemini provider has no API key"))?;
        let model_id = provider.model_id.clone();

        let mut builder = rig::providers::gemini::Client::builder(&api_key);
        if let Some(endpoint) = gemini_config.endpoint.as_deref() {
            builder = builder.base_url(endpoint);
        }

        let client = builder.build()?.boxed();

        Ok(GeminiModel {
            client: Arc::new(client),
            default_model: model_id,
        })
    }
}

#[async_trait]
impl ModelLogic for GeminiModel {
    async fn provider(&self) -> Result<ModelConstructor> {
        Ok(ModelConstructor {
            inner: self.client.clone(),
        })
    }

    async fn default_model(&self) -> Option<String> {
        self.default_model.clone()
    }
}
