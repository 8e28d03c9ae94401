//! `data:` URI encoding for uploaded media.

use crate::error::{FlapperError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub data: Vec<u8>,
}

/// Whether `value` uses the `data:` scheme. This is the only validation
/// applied to stored asset references.
pub fn is_data_uri(value: &str) -> bool {
    value.starts_with(SCHEME)
}

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("{SCHEME}{mime}{BASE64_MARKER},{}", STANDARD.encode(bytes))
}

/// Decode a `data:` URI. Payloads without `;base64` are taken verbatim.
pub fn decode(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix(SCHEME)
        .ok_or_else(|| FlapperError::InvalidDataUri("missing data: scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| FlapperError::InvalidDataUri("missing ',' separator".to_string()))?;

    let (media, is_base64) = match header.strip_suffix(BASE64_MARKER) {
        Some(media) => (media, true),
        None => (header, false),
    };
    let mime = match media.split(';').next() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => "text/plain".to_string(),
    };

    let data = if is_base64 {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| FlapperError::InvalidDataUri(e.to_string()))?
    } else {
        payload.as_bytes().to_vec()
    };

    Ok(DataUri { mime, data })
}

/// Best-effort MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_shape() {
        let uri = encode("image/png", b"hi");
        assert_eq!(uri, "data:image/png;base64,aGk=");
        assert!(is_data_uri(&uri));
    }

    #[test]
    fn test_decode_recovers_bytes_and_mime() {
        let bytes: Vec<u8> = (0..=255).collect();
        let decoded = decode(&encode("audio/mpeg", &bytes)).unwrap();
        assert_eq!(decoded.mime, "audio/mpeg");
        assert_eq!(decoded.data, bytes);
    }

    #[test]
    fn test_decode_plain_payload() {
        let decoded = decode("data:,hello").unwrap();
        assert_eq!(decoded.mime, "text/plain");
        assert_eq!(decoded.data, b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("data/bird.png").is_err());
        assert!(decode("data:image/png;base64").is_err());
        assert!(decode("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/Bird.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("x.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }
}
