//! Configure, generate, preview and export AI-generated SVG splash animations.

pub mod config;
pub mod controller;
pub mod export;
pub mod generation;
pub mod markup;
pub mod preview;
pub mod prompt;
pub mod sanitize;
pub mod settings;
pub mod upload;

pub use config::{AnimationConfig, ConfigEdit, ConfigError};
pub use controller::{AppController, GenerationStatus};
pub use generation::{AnimationGenerator, GenerationClient, GenerationError};
pub use settings::Settings;
