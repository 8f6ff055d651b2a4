//! Schema-generator port trait.
//!
//! The composer delegates OpenAPI document generation to an implementation
//! of this trait. The default adapter lives in `keel-http`; tests inject
//! counting stubs to observe memoization.

use utoipa::openapi::OpenApi;

use crate::config::{ServerMeta, TagMeta};
use crate::route::RouteMeta;

/// Borrowed view of everything schema generation depends on.
///
/// Generation must be a pure function of this context: same context, same
/// document.
pub struct SchemaContext<'a> {
    pub title: &'a str,
    pub version: &'a str,
    pub description: &'a str,
    pub openapi_version: &'a str,
    /// Full route table in registration order. Entries flagged
    /// `include_in_schema = false` must be skipped by the generator.
    pub routes: &'a [RouteMeta],
    pub tags: &'a [TagMeta],
    pub servers: &'a [ServerMeta],
}

/// Port for the OpenAPI generation algorithm.
///
/// Implementations are assumed total over their inputs; malformed
/// configuration is a caller precondition violation, not a runtime error
/// path.
pub trait SchemaGenerator: Send + Sync + 'static {
    /// Builds the OpenAPI document for the given context.
    fn generate(&self, ctx: SchemaContext<'_>) -> OpenApi;
}
