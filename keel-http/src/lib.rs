//! # Keel HTTP
//!
//! Application composer and HTTP adapter for keel.
//!
//! ## Architecture
//!
//! - `app` - The composer: route table, middleware list, exception table,
//!   memoized schema generation, router assembly
//! - `openapi` - Default schema generator built on utoipa
//! - `docs` - HTML shells for the Swagger UI and ReDoc pages
//! - `exception` - Exception-handler table with fixed precedence
//!
//! The composer is generic over `G: SchemaGenerator`, allowing the
//! generation algorithm to be swapped (tests inject counting stubs).

pub mod app;
pub mod docs;
pub mod exception;
pub mod openapi;

#[cfg(test)]
mod app_tests;

pub use app::{App, Lifecycle};
pub use exception::{ApiError, ErrorClass, ExceptionTable};
pub use openapi::OpenApiGenerator;
