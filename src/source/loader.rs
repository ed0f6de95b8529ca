//! Document Loader
//!
//! Fetches the dashboard data document exactly once, from a local path or
//! an HTTP(S) URL. Any failure is logged and reported as "no document" so
//! the resolver can fall back to defaults.

use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::document::{ParsedDocument, SourceDocument};
use super::error::{LoadError, LoadResult};

/// Where the data document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Local JSON file
    File(PathBuf),
    /// Remote JSON document
    Url(String),
}

impl SourceLocation {
    /// Interpret a location string: `http://` and `https://` prefixes are
    /// URLs, everything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            SourceLocation::Url(trimmed.to_string())
        } else {
            SourceLocation::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Where the resolved data came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataOrigin {
    /// Document fetched and parsed from `location`. `dropped` lists the
    /// fields that had the wrong type and fell back to their defaults.
    Loaded {
        location: String,
        dropped: Vec<String>,
    },
    /// No usable document; every field is a default
    Defaults { reason: String },
}

impl DataOrigin {
    pub fn is_loaded(&self) -> bool {
        matches!(self, DataOrigin::Loaded { .. })
    }

    /// Loaded with every field readable
    pub fn is_complete(&self) -> bool {
        matches!(self, DataOrigin::Loaded { dropped, .. } if dropped.is_empty())
    }
}

/// Outcome of the one-shot fetch
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub document: Option<SourceDocument>,
    pub origin: DataOrigin,
}

/// Fetches data documents
pub struct DocumentLoader {
    client: Client,
}

impl DocumentLoader {
    /// Create a loader whose HTTP requests time out after `timeout`
    pub fn new(timeout: Duration) -> LoadResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self { client })
    }

    /// Fetch and parse the document, surfacing every failure
    pub async fn fetch(&self, location: &SourceLocation) -> LoadResult<ParsedDocument> {
        let text = match location {
            SourceLocation::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
            SourceLocation::Url(url) => self.fetch_remote(url).await?,
        };

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| LoadError::Parse {
                location: location.to_string(),
                source,
            })?;

        SourceDocument::parse(&value)
            .ok_or_else(|| LoadError::NotAnObject(location.to_string()))
    }

    /// Fetch the document, degrading to `None` on failure
    ///
    /// This is the error boundary for data loading: failures are logged and
    /// never propagated.
    pub async fn load(&self, location: &SourceLocation) -> LoadOutcome {
        match self.fetch(location).await {
            Ok(parsed) => {
                if parsed.dropped.is_empty() {
                    tracing::info!(source = %location, "Dashboard data loaded successfully");
                } else {
                    tracing::warn!(
                        source = %location,
                        dropped = parsed.dropped.len(),
                        "Dashboard data loaded with malformed fields, those use defaults"
                    );
                }
                LoadOutcome {
                    document: Some(parsed.document),
                    origin: DataOrigin::Loaded {
                        location: location.to_string(),
                        dropped: parsed.dropped,
                    },
                }
            }
            Err(e) => {
                tracing::warn!(
                    source = %location,
                    error = %e,
                    "Error loading dashboard data, falling back to defaults"
                );
                LoadOutcome {
                    document: None,
                    origin: DataOrigin::Defaults {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    async fn fetch_remote(&self, url: &str) -> LoadResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn loader() -> DocumentLoader {
        DocumentLoader::new(Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            SourceLocation::parse("https://example.test/data.json"),
            SourceLocation::Url("https://example.test/data.json".to_string())
        );
        assert_eq!(
            SourceLocation::parse(" ./data/dashboard-metrics.json "),
            SourceLocation::File(PathBuf::from("./data/dashboard-metrics.json"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"heroStats": {{"population": 12500}}}}"#).unwrap();

        let location = SourceLocation::File(file.path().to_path_buf());
        let outcome = loader().load(&location).await;

        assert!(outcome.origin.is_loaded());
        assert!(outcome.origin.is_complete());
        let doc = outcome.document.unwrap();
        assert_eq!(doc.hero_stats.unwrap().population, Some(12500));
    }

    #[tokio::test]
    async fn test_malformed_fields_are_reported_in_origin() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"heroStats": {{"population": "many", "pillars": 4}}}}"#
        )
        .unwrap();

        let location = SourceLocation::File(file.path().to_path_buf());
        let outcome = loader().load(&location).await;

        assert!(outcome.origin.is_loaded());
        assert!(!outcome.origin.is_complete());
        match &outcome.origin {
            DataOrigin::Loaded { dropped, .. } => {
                assert_eq!(dropped, &vec!["heroStats.population".to_string()])
            }
            other => panic!("unexpected origin {:?}", other),
        }
        assert_eq!(outcome.document.unwrap().hero_stats.unwrap().pillars, Some(4));
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_defaults() {
        let location = SourceLocation::File(PathBuf::from("/nonexistent/dashboard-metrics.json"));
        let outcome = loader().load(&location).await;

        assert!(outcome.document.is_none());
        assert!(matches!(outcome.origin, DataOrigin::Defaults { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_degrades_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let location = SourceLocation::File(file.path().to_path_buf());
        let err = loader().fetch(&location).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let outcome = loader().load(&location).await;
        assert!(outcome.document.is_none());
    }

    #[tokio::test]
    async fn test_non_object_document_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "42").unwrap();

        let location = SourceLocation::File(file.path().to_path_buf());
        let err = loader().fetch(&location).await.unwrap_err();
        assert!(matches!(err, LoadError::NotAnObject(_)));
    }

    /// Serve a few fixed documents on an ephemeral local port
    async fn serve_documents() -> String {
        use axum::{http::StatusCode, routing::get, Json, Router};

        let app = Router::new()
            .route(
                "/dashboard-metrics.json",
                get(|| async { Json(serde_json::json!({"heroStats": {"population": 31000}})) }),
            )
            .route("/missing.json", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/slow.json",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "{}"
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let base = serve_documents().await;
        let location = SourceLocation::parse(&format!("{}/dashboard-metrics.json", base));

        let outcome = loader().load(&location).await;
        assert!(outcome.origin.is_complete());
        assert_eq!(
            outcome.document.unwrap().hero_stats.unwrap().population,
            Some(31000)
        );
    }

    #[tokio::test]
    async fn test_error_status_degrades_to_defaults() {
        let base = serve_documents().await;
        let location = SourceLocation::parse(&format!("{}/missing.json", base));

        let err = loader().fetch(&location).await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));

        let outcome = loader().load(&location).await;
        assert!(outcome.document.is_none());
        match outcome.origin {
            DataOrigin::Defaults { reason } => assert!(reason.contains("404")),
            other => panic!("unexpected origin {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let base = serve_documents().await;
        let location = SourceLocation::parse(&format!("{}/slow.json", base));

        let quick = DocumentLoader::new(Duration::from_millis(200)).unwrap();
        let err = quick.fetch(&location).await.unwrap_err();
        assert!(matches!(err, LoadError::Request { .. }));
    }
}
