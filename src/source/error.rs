//! Source loading errors

use thiserror::Error;

/// Errors that can occur while fetching the data document
///
/// None of these reach the user: the loader logs them and the dashboard
/// falls back to its default data.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading a local document failed
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Remote request failed (connect, timeout, body)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote server answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Document is not valid JSON
    #[error("Invalid JSON in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Document is JSON but not an object
    #[error("Document at {0} is not a JSON object")]
    NotAnObject(String),
}

/// Result type alias for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::Status {
            url: "http://example.test/data.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Request to http://example.test/data.json returned status 404"
        );

        let err = LoadError::NotAnObject("data.json".to_string());
        assert_eq!(err.to_string(), "Document at data.json is not a JSON object");
    }
}
