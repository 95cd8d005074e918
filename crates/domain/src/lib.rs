//! # Hash API Domain
//!
//! Domain types and models for the hash timestamping API client.
//!
//! This crate contains:
//! - The `Credential` token pair and its expiry metadata
//! - Resource models (hash items, receipts, block subscriptions)
//! - Error taxonomy and Result definitions
//! - Client configuration structures
//! - Wire-level constants shared with the server
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O; pure data structures and conversions

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
