//! Catalog error model.

use thiserror::Error;

/// Result type used when loading the project catalog.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure to obtain a usable catalog.
///
/// Keep this focused on the single load attempt made at page start-up. DOM
/// faults are not represented here; they are logged where they happen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog resource answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    /// The request never produced a response (DNS, connection, CORS, IO).
    #[error("network error: {0}")]
    Network(String),

    /// The body was not a well-formed catalog document.
    #[error("malformed catalog: {0}")]
    Parse(String),
}

impl CatalogError {
    pub fn transport(status: u16) -> Self {
        Self::Transport { status }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// HTTP status carried by a transport failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_reports_status() {
        let err = CatalogError::transport(404);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: CatalogError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        match err {
            CatalogError::Parse(detail) => assert!(!detail.is_empty()),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
