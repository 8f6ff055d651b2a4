//! Route metadata used for schema enumeration.
//!
//! The composer keeps one `RouteMeta` per registered route. The table is
//! mutated only at setup time (auxiliary endpoints) or through route
//! registration; insertion order is preserved when the schema is generated.

use serde::{Deserialize, Serialize};

/// HTTP method of a registered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a single registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Route path, e.g. `/items/{id}`.
    pub path: String,
    /// HTTP method answered by the route.
    pub method: Method,
    /// Short summary shown in the generated document.
    pub summary: Option<String>,
    /// Longer operation description.
    pub description: Option<String>,
    /// Explicit operation identifier.
    pub operation_id: Option<String>,
    /// Tags grouping the operation in the generated document.
    pub tags: Vec<String>,
    /// Whether the route appears in the generated document. Auxiliary
    /// endpoints registered by the composer itself are excluded.
    pub include_in_schema: bool,
}

impl RouteMeta {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            summary: None,
            description: None,
            operation_id: None,
            tags: Vec::new(),
            include_in_schema: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn include_in_schema(mut self, include: bool) -> Self {
        self.include_in_schema = include;
        self
    }
}
