//! # Hash API Infrastructure
//!
//! HTTP implementation of the hash API client.
//!
//! This crate contains:
//! - The authenticating client with single-flight token refresh
//! - Resource routes (hash items, receipts, block subscriptions)
//! - The token issuer for `/auth/token` and `/auth/refresh`
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Builds on the types and errors defined in `hashapi-domain`
//! - Contains all I/O (HTTP, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{AuthEndpoint, AuthenticatingHttpClient, AuthenticatingHttpClientBuilder, TokenIssuer};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
