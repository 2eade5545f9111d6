use thiserror::Error;

/// Failure of a single catalog endpoint.
///
/// Callers in the catalog loader map every variant to an empty contribution;
/// the type exists so that the suppression is explicit and logged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// Request never produced a response
    #[error("Request to {0} failed: {1}")]
    Network(String, String),

    /// Server answered with a non-success status
    #[error("{0} returned HTTP {1}")]
    Status(String, u16),

    /// Body was not a list of catalog items
    #[error("Failed to parse response from {0}: {1}")]
    Parse(String, String),
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network(url, _) | FetchError::Status(url, _) | FetchError::Parse(url, _) => url,
        }
    }
}

/// Failure of the whole concurrent fetch stage (a fetch task died before
/// reporting a result). Triggers the mock dataset fallback.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Catalog fetch stage aborted: {0}")]
pub struct StageError(pub String);

/// Library scan failures. Only one generic message is ever shown to the user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanError {
    #[error("Scan request failed: {0}")]
    Network(String),

    #[error("Scan endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Scan response was not valid JSON: {0}")]
    Parse(String),
}

impl ScanError {
    /// The notice shown for any scan failure.
    pub fn user_message(&self) -> &'static str {
        "Error durant l'escaneig. Assegura't que el backend està en marxa."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_exposes_url() {
        let err = FetchError::Status("http://localhost:8000/api/movies".into(), 500);
        assert_eq!(err.url(), "http://localhost:8000/api/movies");
        assert_eq!(err.to_string(), "http://localhost:8000/api/movies returned HTTP 500");
    }

    #[test]
    fn test_scan_errors_share_one_message() {
        assert_eq!(
            ScanError::Status(502).user_message(),
            ScanError::Parse("eof".into()).user_message()
        );
    }
}
