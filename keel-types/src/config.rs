//! Declarative application configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default path for the OpenAPI document endpoint.
pub const DEFAULT_OPENAPI_PATH: &str = "/openapi.json";
/// Default path for the interactive Swagger UI docs.
pub const DEFAULT_DOCS_PATH: &str = "/docs";
/// Default path for the ReDoc docs page.
pub const DEFAULT_REDOC_PATH: &str = "/redoc";
/// Default path for the Swagger UI OAuth2 redirect helper.
pub const DEFAULT_OAUTH2_REDIRECT_PATH: &str = "/docs/oauth2-redirect";

/// OpenAPI document format version emitted by the composer.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Tag metadata attached to the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMeta {
    /// Tag name referenced by route metadata.
    pub name: String,
    /// Optional human-readable description.
    pub description: Option<String>,
}

impl TagMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Server descriptor attached to the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMeta {
    /// Base URL of the server.
    pub url: String,
    /// Optional human-readable description.
    pub description: Option<String>,
}

impl ServerMeta {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Application configuration, immutable once handed to the composer.
///
/// Each auxiliary endpoint path is optional; `None` or an empty string
/// disables that endpoint entirely (no route is registered for it).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API title, shown in the document info and docs pages.
    pub title: String,
    /// Free-form API description.
    pub description: String,
    /// API version string.
    pub version: String,
    /// Version of the OpenAPI document format.
    pub openapi_version: String,
    /// Path serving the OpenAPI document.
    pub openapi_path: Option<String>,
    /// Path serving the interactive Swagger UI page.
    pub docs_path: Option<String>,
    /// Path serving the ReDoc page.
    pub redoc_path: Option<String>,
    /// Path serving the OAuth2 redirect helper page.
    pub oauth2_redirect_path: Option<String>,
    /// OAuth client configuration injected into the Swagger UI page.
    pub swagger_init_oauth: Option<serde_json::Value>,
    /// Tag metadata forwarded to the generated document.
    pub tags: Vec<TagMeta>,
    /// Server descriptors forwarded to the generated document.
    pub servers: Vec<ServerMeta>,
    /// Free-form extension mapping, not interpreted by the composer.
    pub extensions: BTreeMap<String, serde_json::Value>,
    /// When set, the catch-all error handler may include error details
    /// in the response body.
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Keel".to_string(),
            description: String::new(),
            version: "0.1.0".to_string(),
            openapi_version: OPENAPI_VERSION.to_string(),
            openapi_path: Some(DEFAULT_OPENAPI_PATH.to_string()),
            docs_path: Some(DEFAULT_DOCS_PATH.to_string()),
            redoc_path: Some(DEFAULT_REDOC_PATH.to_string()),
            oauth2_redirect_path: Some(DEFAULT_OAUTH2_REDIRECT_PATH.to_string()),
            swagger_init_oauth: None,
            tags: Vec::new(),
            servers: Vec::new(),
            extensions: BTreeMap::new(),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Creates a configuration with the given title and all defaults.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn openapi_path(mut self, path: impl Into<String>) -> Self {
        self.openapi_path = Some(path.into());
        self
    }

    /// Disables the OpenAPI document endpoint.
    pub fn disable_openapi(mut self) -> Self {
        self.openapi_path = None;
        self
    }

    pub fn docs_path(mut self, path: impl Into<String>) -> Self {
        self.docs_path = Some(path.into());
        self
    }

    /// Disables the Swagger UI endpoint.
    pub fn disable_docs(mut self) -> Self {
        self.docs_path = None;
        self
    }

    pub fn redoc_path(mut self, path: impl Into<String>) -> Self {
        self.redoc_path = Some(path.into());
        self
    }

    /// Disables the ReDoc endpoint.
    pub fn disable_redoc(mut self) -> Self {
        self.redoc_path = None;
        self
    }

    pub fn oauth2_redirect_path(mut self, path: impl Into<String>) -> Self {
        self.oauth2_redirect_path = Some(path.into());
        self
    }

    /// Disables the OAuth2 redirect helper endpoint.
    pub fn disable_oauth2_redirect(mut self) -> Self {
        self.oauth2_redirect_path = None;
        self
    }

    pub fn swagger_init_oauth(mut self, init_oauth: serde_json::Value) -> Self {
        self.swagger_init_oauth = Some(init_oauth);
        self
    }

    pub fn tag(mut self, tag: TagMeta) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn server(mut self, server: ServerMeta) -> Self {
        self.servers.push(server);
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.openapi_path.as_deref(), Some("/openapi.json"));
        assert_eq!(config.docs_path.as_deref(), Some("/docs"));
        assert_eq!(config.redoc_path.as_deref(), Some("/redoc"));
        assert_eq!(
            config.oauth2_redirect_path.as_deref(),
            Some("/docs/oauth2-redirect")
        );
        assert_eq!(config.openapi_version, "3.1.0");
    }

    #[test]
    fn test_disable_clears_path() {
        let config = AppConfig::new("Test").disable_docs().disable_redoc();
        assert!(config.docs_path.is_none());
        assert!(config.redoc_path.is_none());
        assert!(config.openapi_path.is_some());
    }

    #[test]
    fn test_builder_chain() {
        let config = AppConfig::new("Inventory API")
            .version("2.0.0")
            .description("Warehouse inventory")
            .tag(TagMeta::new("items").description("Item operations"))
            .server(ServerMeta::new("https://api.example.com"))
            .extension("x-internal", serde_json::json!(true));

        assert_eq!(config.title, "Inventory API");
        assert_eq!(config.version, "2.0.0");
        assert_eq!(config.tags.len(), 1);
        assert_eq!(config.servers.len(), 1);
        assert_eq!(
            config.extensions.get("x-internal"),
            Some(&serde_json::json!(true))
        );
    }
}
