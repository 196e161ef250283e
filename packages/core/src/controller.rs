//! Orchestrates configuration edits, uploads and generation attempts.
//!
//! Every `generate` call takes a ticket from a monotonically increasing sequence.
//! Only the holder of the latest ticket may publish its outcome; answers to
//! superseded calls are dropped on arrival.

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;

use crate::{
    config::{AnimationConfig, ConfigEdit},
    generation::AnimationGenerator,
    sanitize::sanitize,
    upload::{LogoReference, UploadError, read_logo},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    /// Sanitized markup.
    Success(String),
    /// User-facing failure message.
    Error(String),
}

pub struct AppController {
    generator: Arc<dyn AnimationGenerator>,
    config: RwLock<Arc<AnimationConfig>>,
    status: RwLock<GenerationStatus>,
    logo: RwLock<Option<LogoReference>>,
    sequence: AtomicU64,
}

impl AppController {
    pub fn new(generator: Arc<dyn AnimationGenerator>) -> Self {
        Self::with_config(generator, AnimationConfig::default())
    }

    pub fn with_config(generator: Arc<dyn AnimationGenerator>, config: AnimationConfig) -> Self {
        AppController {
            generator,
            config: RwLock::new(Arc::new(config)),
            status: RwLock::new(GenerationStatus::Idle),
            logo: RwLock::new(None),
            sequence: AtomicU64::new(0),
        }
    }

    /// Current configuration snapshot. Edits never mutate a snapshot already handed out.
    pub fn config(&self) -> Arc<AnimationConfig> {
        self.config.read().clone()
    }

    pub fn update(&self, edit: ConfigEdit) -> Arc<AnimationConfig> {
        tracing::debug!(field = edit.field(), "Configuration edited");
        let mut config = self.config.write();
        let next = Arc::new(config.update(edit));
        *config = next.clone();
        next
    }

    pub fn replace_config(&self, config: AnimationConfig) -> Arc<AnimationConfig> {
        let next = Arc::new(config);
        *self.config.write() = next.clone();
        next
    }

    pub fn status(&self) -> GenerationStatus {
        self.status.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.status.read(), GenerationStatus::Loading)
    }

    pub fn result(&self) -> Option<String> {
        match &*self.status.read() {
            GenerationStatus::Success(markup) => Some(markup.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match &*self.status.read() {
            GenerationStatus::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Stores the uploaded logo and seeds `logoName` from its base name.
    /// Returns the seeded name, if any.
    pub fn upload_logo(&self, logo: LogoReference) -> Option<String> {
        let suggested = logo.suggested_name();
        *self.logo.write() = Some(logo);

        if let Some(name) = &suggested {
            self.update(ConfigEdit::LogoName(name.clone()));
        }
        suggested
    }

    /// Reads a logo from disk, then behaves like [`upload_logo`](Self::upload_logo).
    pub async fn upload_logo_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<String>, UploadError> {
        let logo = read_logo(path).await?;
        Ok(self.upload_logo(logo))
    }

    pub fn logo(&self) -> Option<LogoReference> {
        self.logo.read().clone()
    }

    /// Runs one generation attempt against the current configuration.
    ///
    /// Returns the visible status once this attempt settles. A failure replaces any
    /// earlier result instead of sitting next to it.
    pub async fn generate(&self) -> GenerationStatus {
        let config = self.config();
        let ticket = {
            let mut status = self.status.write();
            *status = GenerationStatus::Loading;
            self.sequence.fetch_add(1, Ordering::SeqCst) + 1
        };

        let next = match self.generator.generate(&config).await {
            Ok(raw) => GenerationStatus::Success(sanitize(&raw)),
            Err(e) => GenerationStatus::Error(e.to_string()),
        };

        let mut status = self.status.write();
        if self.sequence.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "Dropping response of a superseded generation");
            return status.clone();
        }

        match &next {
            GenerationStatus::Success(markup) => {
                tracing::info!(ticket, bytes = markup.len(), "Animation generated")
            }
            GenerationStatus::Error(message) => tracing::warn!(ticket, "{message}"),
            _ => {}
        }
        *status = next.clone();
        next
    }
}
