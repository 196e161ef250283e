//! Logo upload: an awaitable file read into a data URL plus the name it suggests.

use std::path::Path;

use splashgen_types::utils::data_url;
use thiserror::Error;

const ACCEPTED_TYPES: &[&str] = &["image/svg+xml", "image/png", "image/jpeg"];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Unsupported logo format '{mime_type}', expected SVG, PNG or JPG")]
    UnsupportedFormat { mime_type: String },

    #[error("Failed to read logo file: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded logo. It only seeds the name and renders a thumbnail; it is never sent
/// to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoReference {
    pub file_name: String,
    pub mime_type: String,
    pub data_url: String,
}

impl LogoReference {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let mime_type = accepted_mime_type(&file_name)?;

        Ok(LogoReference {
            data_url: data_url::encode(bytes, &mime_type),
            file_name,
            mime_type,
        })
    }

    /// The name to seed `logoName` with, if the file has one.
    pub fn suggested_name(&self) -> Option<String> {
        logo_base_name(&self.file_name)
    }
}

fn accepted_mime_type(file_name: &str) -> Result<String, UploadError> {
    let mime_type = mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or("application/octet-stream");

    if !ACCEPTED_TYPES.contains(&mime_type) {
        return Err(UploadError::UnsupportedFormat {
            mime_type: mime_type.to_string(),
        });
    }
    Ok(mime_type.to_string())
}

/// Reads a logo from disk. The format is checked from the name before any bytes are read.
pub async fn read_logo(path: impl AsRef<Path>) -> Result<LogoReference, UploadError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = accepted_mime_type(&file_name)?;

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(file = %file_name, bytes = bytes.len(), "Read logo");

    Ok(LogoReference {
        data_url: data_url::encode(&bytes, &mime_type),
        file_name,
        mime_type,
    })
}

/// Everything before the last `.`; `None` when that is empty or there is no extension.
pub fn logo_base_name(file_name: &str) -> Option<String> {
    let (base, _extension) = file_name.rsplit_once('.')?;
    (!base.is_empty()).then(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_drops_last_extension() {
        assert_eq!(logo_base_name("brand-logo.png").as_deref(), Some("brand-logo"));
        assert_eq!(logo_base_name("acme.v2.svg").as_deref(), Some("acme.v2"));
    }

    #[test]
    fn base_name_needs_a_stem_and_extension() {
        assert_eq!(logo_base_name("logo"), None);
        assert_eq!(logo_base_name(".png"), None);
        assert_eq!(logo_base_name(""), None);
    }

    #[test]
    fn builds_data_url() {
        let logo = LogoReference::from_bytes("mark.svg", b"<svg/>").unwrap();
        assert_eq!(logo.mime_type, "image/svg+xml");
        assert_eq!(logo.data_url, "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn accepts_jpeg_variants() {
        let logo = LogoReference::from_bytes("photo.JPG", &[0xff, 0xd8]).unwrap();
        assert_eq!(logo.mime_type, "image/jpeg");
        assert_eq!(logo.suggested_name().as_deref(), Some("photo"));
    }

    #[test]
    fn rejects_other_formats() {
        let err = LogoReference::from_bytes("notes.txt", b"hello").unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFormat { .. }));
        assert!(LogoReference::from_bytes("logo", b"?").is_err());
    }

    #[tokio::test]
    async fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brand-logo.png");
        tokio::fs::write(&path, [0x89, b'P', b'N', b'G']).await.unwrap();

        let logo = read_logo(&path).await.unwrap();
        assert_eq!(logo.file_name, "brand-logo.png");
        assert_eq!(logo.data_url, "data:image/png;base64,iVBORw==");
        assert_eq!(logo.suggested_name().as_deref(), Some("brand-logo"));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = read_logo("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, UploadError::Io(_)));
    }

    #[tokio::test]
    async fn format_is_checked_before_reading() {
        let err = read_logo("/definitely/not/here.txt").await.unwrap_err();
        assert!(matches!(
            err,
            UploadError::UnsupportedFormat { ref mime_type } if mime_type == "text/plain"
        ));
    }
}
