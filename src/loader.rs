//! Reading the sample payload.
//!
//! A sample is decoded as-is: an object, or a list whose first element
//! stands in for the whole payload once inference samples it. Key order is
//! kept, since it fixes the order of the generated properties.

use std::path::Path;

use serde_json::Value;

use crate::error::GenerateError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// How long a remote sample may take to arrive.
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Read a sample payload saved to disk, such as a captured API response.
///
/// # Errors
///
/// `GenerateError::FileNotFound` when nothing is at `path`, `ReadError`
/// when it cannot be read, `InvalidJson` when the body does not decode.
pub fn load_sample(path: &Path) -> Result<Value, GenerateError> {
    if !path.exists() {
        return Err(GenerateError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| GenerateError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_sample_str(&content)
}

/// Decode a sample held in memory. No shape check happens here; a scalar
/// decodes fine and is rejected later by [`crate::infer_sample`].
///
/// # Errors
///
/// `GenerateError::InvalidJson` when the text does not decode.
pub fn load_sample_str(content: &str) -> Result<Value, GenerateError> {
    serde_json::from_str(content).map_err(|source| GenerateError::InvalidJson { source })
}

/// Fetch a sample by calling a live endpoint with `GET`.
///
/// Non-2xx replies count as failures. Only built with the `remote` feature.
///
/// # Errors
///
/// `GenerateError::NetworkError` for transport failures, error statuses,
/// and bodies that do not decode.
#[cfg(feature = "remote")]
pub fn load_sample_url(url: &str) -> Result<Value, GenerateError> {
    let network_error = |source| GenerateError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json::<Value>())
        .map_err(network_error)
}

/// Whether a sample source names an endpoint rather than a file.
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Read a sample from whatever the CLI was given: `-` reads stdin, an
/// `http(s)://` source is fetched, anything else is a file path.
pub fn load_sample_auto(source: &str) -> Result<Value, GenerateError> {
    if source == "-" {
        let mut content = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut content).map_err(|source| {
            GenerateError::ReadError {
                path: "<stdin>".into(),
                source,
            }
        })?;
        return load_sample_str(&content);
    }

    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_sample_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(GenerateError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_sample(Path::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_sample_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": 48}}"#).unwrap();

        let sample = load_sample(file.path()).unwrap();
        assert_eq!(sample["id"], 48);
    }

    #[test]
    fn load_sample_missing_file() {
        let result = load_sample(Path::new("/nonexistent/sample.json"));
        assert!(matches!(result, Err(GenerateError::FileNotFound { .. })));
    }

    #[test]
    fn load_sample_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json }}").unwrap();

        let result = load_sample(file.path());
        assert!(matches!(result, Err(GenerateError::InvalidJson { .. })));
    }

    #[test]
    fn load_sample_str_preserves_key_order() {
        let sample = load_sample_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<_> = sample.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn is_url_detection() {
        assert!(is_url("http://example.com/sample.json"));
        assert!(is_url("https://example.com/sample.json"));
        assert!(!is_url("sample.json"));
        assert!(!is_url("/path/to/sample.json"));
    }

    #[test]
    fn load_sample_auto_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"id": 1}}]"#).unwrap();

        let sample = load_sample_auto(file.path().to_str().unwrap()).unwrap();
        assert!(sample.is_array());
    }

    #[cfg(feature = "remote")]
    mod remote {
        use super::*;

        #[test]
        fn load_sample_url_success() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/users/48")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"id": 48, "nickname": "Tester 1"}"#)
                .create();

            let sample = load_sample_auto(&format!("{}/users/48", server.url())).unwrap();
            assert_eq!(sample["nickname"], "Tester 1");
            mock.assert();
        }

        #[test]
        fn load_sample_url_http_error() {
            let mut server = mockito::Server::new();
            let _mock = server.mock("GET", "/missing").with_status(404).create();

            let result = load_sample_url(&format!("{}/missing", server.url()));
            assert!(matches!(result, Err(GenerateError::NetworkError { .. })));
        }
    }
}
