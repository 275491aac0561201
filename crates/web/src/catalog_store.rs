//! Catalog loading: one read of the catalog document, then parse.

use async_trait::async_trait;

use portfolio_core::{Catalog, CatalogError, CatalogResult};

/// Raw response for a catalog location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub status: u16,
    pub body: String,
}

impl FetchedDocument {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport behind the store.
///
/// Returns `Err` only when no response was produced at all; HTTP-level
/// failures come back as a [`FetchedDocument`] with their status.
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch(&self, location: &str) -> CatalogResult<FetchedDocument>;
}

/// Fixed document, for tests and for pages that inline their catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    document: FetchedDocument,
}

impl StaticCatalogSource {
    pub fn new(document: FetchedDocument) -> Self {
        Self { document }
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self::new(FetchedDocument::ok(body))
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self, _location: &str) -> CatalogResult<FetchedDocument> {
        Ok(self.document.clone())
    }
}

/// Reads the catalog from the local filesystem (preview tooling).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct FileCatalogSource;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, location: &str) -> CatalogResult<FetchedDocument> {
        match tokio::fs::read_to_string(location).await {
            Ok(body) => Ok(FetchedDocument::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FetchedDocument {
                status: 404,
                body: String::new(),
            }),
            Err(e) => Err(CatalogError::network(format!("{location}: {e}"))),
        }
    }
}

/// HTTP(S) transport. Relative locations resolve against `base`.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base: Option<reqwest::Url>,
}

impl HttpCatalogSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base: None,
        }
    }

    pub fn with_base(base: reqwest::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: Some(base),
        }
    }

    pub fn resolve(&self, location: &str) -> CatalogResult<reqwest::Url> {
        let parsed = match &self.base {
            Some(base) => base.join(location),
            None => reqwest::Url::parse(location),
        };
        parsed.map_err(|e| CatalogError::network(format!("invalid catalog location {location:?}: {e}")))
    }
}

impl Default for HttpCatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, location: &str) -> CatalogResult<FetchedDocument> {
        let url = self.resolve(location)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;
        Ok(FetchedDocument { status, body })
    }
}

/// Loads the catalog from a fixed location.
///
/// No retry, no timeout, no caching: every [`CatalogStore::load`] is one
/// fresh read.
#[derive(Debug, Clone)]
pub struct CatalogStore<S> {
    source: S,
    location: String,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S, location: impl Into<String>) -> Self {
        Self {
            source,
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn load(&self) -> CatalogResult<Catalog> {
        let document = self.source.fetch(&self.location).await?;
        if !document.is_success() {
            return Err(CatalogError::transport(document.status));
        }

        let catalog = Catalog::from_json(&document.body)?;
        tracing::info!(
            location = %self.location,
            entries = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ENTRY: &str = r#"{ "projects": [ {
        "title": "Orbit",
        "description": "Space game",
        "long-description": "A. B",
        "banner": "img/orbit.png",
        "carousel-images": ["img/1.png"],
        "category": "game",
        "date": "2023",
        "role": "Solo",
        "Technologies": "Rust",
        "links": []
    } ] }"#;

    #[tokio::test]
    async fn load_returns_entries_on_success() {
        let store = CatalogStore::new(StaticCatalogSource::json(ONE_ENTRY), "projects.json");
        let catalog = store.load().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].title, "Orbit");
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let source = StaticCatalogSource::new(FetchedDocument {
            status: 404,
            body: "not found".into(),
        });
        let err = CatalogStore::new(source, "projects.json").load().await.unwrap_err();
        assert_eq!(err, CatalogError::transport(404));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    struct Unreachable;

    #[async_trait(?Send)]
    impl CatalogSource for Unreachable {
        async fn fetch(&self, location: &str) -> CatalogResult<FetchedDocument> {
            Err(CatalogError::network(format!("connection refused: {location}")))
        }
    }

    #[tokio::test]
    async fn missing_response_is_a_network_error() {
        let err = CatalogStore::new(Unreachable, "projects.json").load().await.unwrap_err();
        assert_eq!(err, CatalogError::network("connection refused: projects.json"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let store = CatalogStore::new(StaticCatalogSource::json("{ \"projects\": 3 }"), "x");
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_file_maps_to_not_found() {
        let store = CatalogStore::new(FileCatalogSource, "/definitely/not/here/projects.json");
        let err = store.load().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn relative_locations_resolve_against_base() {
        let base = reqwest::Url::parse("https://example.org/portfolio/index.html").unwrap();
        let source = HttpCatalogSource::with_base(base);
        assert_eq!(
            source.resolve("projects.json").unwrap().as_str(),
            "https://example.org/portfolio/projects.json"
        );
        assert!(HttpCatalogSource::new().resolve("projects.json").is_err());
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(FetchedDocument::ok("").is_success());
        assert!(!FetchedDocument { status: 304, body: String::new() }.is_success());
    }
}
