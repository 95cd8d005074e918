//! Domain types and models

pub mod credential;
pub mod resources;

pub use credential::Credential;
pub use resources::{
    BlockSubscription, BlockSubscriptionParams, CredentialsRequest, HashItem, HashItemRequest,
    Receipt, RefreshRequest, TokenResponse,
};
