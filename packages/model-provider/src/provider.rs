use schemars::JsonSchema;
use splashgen_types::{
    json::{Deserialize, Serialize},
    rand::{self, Rng},
};

/// Identifies which hosted model answers a generation request.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ModelProvider {
    pub provider_name: String,
    pub model_id: Option<String>,
}

impl ModelProvider {
    pub fn gemini(model_id: impl Into<String>) -> Self {
        ModelProvider {
            provider_name: "gemini".to_string(),
            model_id: Some(model_id.into()),
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct ModelProviderConfiguration {
    pub gemini_config: Vec<GeminiConfig>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

pub fn random_provider<T>(vec: &[T]) -> splashgen_types::Result<T>
where
    T: Clone,
{
    if vec.is_empty() {
        return Err(splashgen_types::anyhow!("No Provider found"));
    }

    let index = {
        let mut rng = rand::rng();
        rng.random_range(0..vec.len())
    };
    Ok(vec[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_provider_requires_an_entry() {
        let empty: Vec<GeminiConfig> = vec![];
        assert!(random_provider(&empty).is_err());
    }

    #[test]
    fn random_provider_picks_a_configured_entry() {
        let configs = vec![
            GeminiConfig {
                api_key: Some("a".into()),
                endpoint: None,
            },
            GeminiConfig {
                api_key: Some("b".into()),
                endpoint: None,
            },
        ];

        for _ in 0..16 {
            let picked = random_provider(&configs).unwrap();
            assert!(configs.contains(&picked));
        }
    }

    #[test]
    fn gemini_provider_carries_model_id() {
        let provider = ModelProvider::gemini("gemini-2.5-flash");
        assert_eq!(provider.provider_name, "gemini");
        assert_eq!(provider.model_id.as_deref(), Some("gemini-2.5-flash"));
    }
}
