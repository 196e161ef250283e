//! Text-generation providers used to turn a prompt into markup.

pub mod llm;
pub mod provider;
pub mod response;

pub use llm::{ModelConstructor, ModelLogic, gemini::GeminiModel};
pub use provider::{GeminiConfig, ModelProvider, ModelProviderConfiguration};
pub use response::{Response, Usage};
