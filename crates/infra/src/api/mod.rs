//! Hash API client
//!
//! This module provides the authenticated HTTP client for the hash
//! timestamping API and its resource routes.
//!
//! # Architecture
//!
//! - Uses the shared [`HttpClient`](crate::http::HttpClient) (no direct reqwest)
//! - Token exchange behind the [`TokenIssuer`] trait
//! - One refresh-and-retry per request on the expired-token signal
//! - Concurrent refreshes coalesced behind a single gate

pub mod auth;
pub mod client;
pub mod errors;
pub mod resources;

pub use auth::{
    credential_from_response, credential_from_tokens, decode_expiry, AuthEndpoint, TokenIssuer,
};
pub use client::{AuthenticatingHttpClient, AuthenticatingHttpClientBuilder};
pub use errors::{is_expired_token, parse_body};
