use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;

use crate::foundation::error::{AdframeError, AdframeResult};

/// Where an image comes from.
///
/// Hosts hand the compositor plain strings (a template URL, a data URI produced from an upload,
/// or a local path); [`AssetSource::parse`] classifies them.
#[derive(Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Remote `http://` or `https://` URL.
    Http(String),
    /// Inline `data:` URI, already decoded.
    Data {
        /// Declared media type (may be empty).
        mime: String,
        /// Decoded payload.
        bytes: Arc<[u8]>,
    },
    /// Local file path.
    File(PathBuf),
}

impl fmt::Debug for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => f.debug_tuple("Http").field(url).finish(),
            Self::Data { mime, bytes } => f
                .debug_struct("Data")
                .field("mime", mime)
                .field("len", &bytes.len())
                .finish(),
            Self::File(p) => f.debug_tuple("File").field(p).finish(),
        }
    }
}

impl AssetSource {
    /// Classify and, for data URIs, decode a source string.
    pub fn parse(source: &str) -> AdframeResult<Self> {
        let s = source.trim();
        if s.is_empty() {
            return Err(AdframeError::validation("asset source must be non-empty"));
        }
        if let Some(rest) = s.strip_prefix("data:") {
            return parse_data_uri(rest);
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Http(s.to_owned()));
        }
        if let Some(path) = s.strip_prefix("file://") {
            return Ok(Self::File(PathBuf::from(path)));
        }
        if lower.contains("://") {
            return Err(AdframeError::validation(format!(
                "unsupported asset scheme in '{s}'"
            )));
        }
        Ok(Self::File(PathBuf::from(s)))
    }
}

fn parse_data_uri(rest: &str) -> AdframeResult<AssetSource> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AdframeError::asset("malformed data URI: missing ','"))?;
    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_owned();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| AdframeError::asset(format!("malformed data URI payload: {e}")))?
    } else {
        payload.as_bytes().to_vec()
    };
    Ok(AssetSource::Data {
        mime,
        bytes: bytes.into(),
    })
}

/// Encode raw bytes as a base64 `data:` URI.
pub fn data_uri_from_bytes(bytes: &[u8], mime: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{b64}")
}

/// Read a local upload fully into memory and encode it as a `data:` URI.
///
/// The media type is guessed from the file extension. No size limit is enforced.
pub fn data_uri_from_file(path: impl AsRef<Path>) -> AdframeResult<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        AdframeError::asset(format!("failed to read upload '{}': {e}", path.display()))
    })?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(data_uri_from_bytes(&bytes, mime.essence_str()))
}

/// Append a `random=<token>` query parameter so caches cannot serve a stored copy.
pub fn with_cache_buster(url: &str, token: u64) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((b, f)) => (b, Some(f)),
        None => (url, None),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    match fragment {
        Some(f) => format!("{base}{sep}random={token}#{f}"),
        None => format!("{base}{sep}random={token}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
