//! Obtaining the raw index document.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    error::{RegistryError, Result},
    http_client::SHARED_AGENT,
};

/// Upper bound on the size of a downloaded index.
const MAX_INDEX_SIZE: u64 = 64 * 1024 * 1024;

/// Decodes an index document from raw bytes.
///
/// `source` names where the bytes came from and ends up in the error.
pub fn parse_index_bytes(bytes: &[u8], source: &str) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|err| {
        RegistryError::IndexUnavailable {
            url: source.to_string(),
            reason: format!("malformed index: {err}"),
        }
    })
}

/// Reads an index document from a local file.
pub fn load_index_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let source = path.display().to_string();
    debug!(path = %source, "reading index file");

    let bytes = fs::read(path).map_err(|err| {
        RegistryError::IndexUnavailable {
            url: source.clone(),
            reason: err.to_string(),
        }
    })?;

    parse_index_bytes(&bytes, &source)
}

/// Fetches the index document from `url`.
///
/// `file://` URLs are read from disk; anything else goes through the shared
/// HTTP agent. Network failures, non-success statuses and undecodable bodies
/// all surface as [`RegistryError::IndexUnavailable`].
pub fn fetch_index(url: &str) -> Result<Value> {
    let unavailable = |reason: String| {
        RegistryError::IndexUnavailable {
            url: url.to_string(),
            reason,
        }
    };

    if let Ok(parsed) = Url::parse(url) {
        if parsed.scheme() == "file" {
            let path = parsed
                .to_file_path()
                .map_err(|()| unavailable("not a valid file path".into()))?;
            return load_index_file(path);
        }
    }

    debug!(url, "fetching cog index");
    let response = SHARED_AGENT
        .get(url)
        .call()
        .map_err(|err| unavailable(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(unavailable(format!("HTTP status {status}")));
    }

    let bytes = response
        .into_body()
        .with_config()
        .limit(MAX_INDEX_SIZE)
        .read_to_vec()
        .map_err(|err| unavailable(err.to_string()))?;
    debug!(url, bytes = bytes.len(), "downloaded cog index");

    parse_index_bytes(&bytes, url)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_index_bytes() {
        let value = parse_index_bytes(br#"{"k": {"name": "x"}}"#, "mem").unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn test_parse_index_bytes_malformed() {
        let err = parse_index_bytes(b"{not json", "mem").unwrap_err();
        match err {
            RegistryError::IndexUnavailable { url, reason } => {
                assert_eq!(url, "mem");
                assert!(reason.starts_with("malformed index"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_index_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"https://github.com/a/b": {{"name": "b"}}}}"#).unwrap();

        let value = load_index_file(file.path()).unwrap();
        assert!(value.get("https://github.com/a/b").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_index_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RegistryError::IndexUnavailable { .. }));
    }

    #[test]
    fn test_fetch_index_file_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let url = Url::from_file_path(file.path()).unwrap();
        let value = fetch_index(url.as_str()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_fetch_index_unreachable() {
        let err = fetch_index("http://127.0.0.1:1/1-min.json").unwrap_err();
        assert!(matches!(err, RegistryError::IndexUnavailable { .. }));
    }
}
