//! Conversions from third-party errors into [`hashapi_domain::HashApiError`].

mod conversions;

pub use conversions::InfraError;
