//! # Keel Types
//!
//! Configuration, route metadata, and port traits for the keel application
//! composer. This crate has ZERO IO dependencies - only data structures and
//! trait definitions.
//!
//! ## Architecture
//!
//! - `config` - Declarative application configuration
//! - `route` - Route metadata used for schema enumeration
//! - `error` - Application error categories
//! - `ports` - The schema-generator trait that adapters implement

pub mod config;
pub mod error;
pub mod ports;
pub mod route;

// Re-export commonly used types
pub use config::{AppConfig, ServerMeta, TagMeta};
pub use error::AppError;
pub use ports::{SchemaContext, SchemaGenerator};
pub use route::{Method, RouteMeta};
