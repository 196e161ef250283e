//! Helpers for `data:` URLs as produced by a browser `FileReader::readAsDataURL`.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encodes raw bytes as a base64 `data:` URL with the given MIME type.
pub fn encode(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
