//! Getting a result out of the tool: file, clipboard and a React snippet.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

pub const EXPORT_FILE_NAME: &str = "splash-animation.svg";
pub const EXPORT_MIME_TYPE: &str = "image/svg+xml";

/// How long the "copied" acknowledgment stays visible.
pub const COPY_ACKNOWLEDGMENT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadableFile {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: &'static str,
}

impl DownloadableFile {
    /// Writes the file into `dir`, creating the directory if needed.
    pub async fn save_into(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Saved animation");
        Ok(path)
    }
}

pub fn to_file(result: &str) -> DownloadableFile {
    DownloadableFile {
        bytes: result.as_bytes().to_vec(),
        mime_type: EXPORT_MIME_TYPE,
        file_name: EXPORT_FILE_NAME,
    }
}

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ExportError>;
}

/// The OS clipboard. Access happens on a blocking thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ExportError> {
        use arboard::Clipboard;

        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = Clipboard::new()?;
            clipboard.set_text(text)
        })
        .await
        .map_err(|_| ExportError::Clipboard("Clipboard thread panicked".to_string()))?
        .map_err(|e| ExportError::Clipboard(e.to_string()))
    }
}

/// Transient acknowledgment shown after a successful copy.
#[derive(Debug, Default, Clone)]
pub struct CopyIndicator {
    copied_at: Option<Instant>,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acknowledge(&mut self) {
        self.copied_at = Some(Instant::now());
    }

    pub fn is_copied(&self) -> bool {
        self.copied_at
            .is_some_and(|at| at.elapsed() < COPY_ACKNOWLEDGMENT)
    }

    pub fn label(&self) -> &'static str {
        if self.is_copied() {
            "Copied!"
        } else {
            "Copy SVG Code"
        }
    }
}

/// Best-effort copy. The indicator only flips when the write succeeded.
pub async fn copy_to_clipboard<W>(
    writer: &W,
    text: &str,
    indicator: &mut CopyIndicator,
) -> Result<(), ExportError>
where
    W: ClipboardWriter + ?Sized,
{
    match writer.write_text(text).await {
        Ok(()) => {
            indicator.acknowledge();
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Copy to clipboard failed: {e}");
            Err(e)
        }
    }
}

/// Wraps the markup in a minimal React component that injects it verbatim.
pub fn to_integration_snippet(result: &str) -> String {
    let escaped = escape_template_literal(result);
    format!(
        "import React from 'react';\n\
         \n\
         const AnimatedSplash = () => (\n  \
           <div dangerouslySetInnerHTML={{{{ __html: `\n    \
             {escaped}\n  \
           `}}}} />\n\
         );\n\
         \n\
         export default AnimatedSplash;"
    )
}

fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
