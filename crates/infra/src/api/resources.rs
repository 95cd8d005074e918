//! Resource routes of the hash API
//!
//! Each operation is a fixed path, a verb, and a pass-through body; token
//! handling lives entirely in [`AuthenticatingHttpClient`].

use hashapi_domain::constants::{BLOCK_SUBSCRIPTIONS_PATH, HASH_ITEMS_PATH, RECEIPTS_PATH};
use hashapi_domain::{
    BlockSubscription, BlockSubscriptionParams, HashApiError, HashItem, HashItemRequest, Receipt,
};

use super::client::AuthenticatingHttpClient;

impl AuthenticatingHttpClient {
    /// Submit a hash for timestamping.
    ///
    /// The request body carries `tag` only when one is given.
    ///
    /// # Errors
    /// See [`AuthenticatingHttpClient::post`]
    pub async fn submit_hash_item(
        &self,
        hash: &str,
        tag: Option<&str>,
    ) -> Result<HashItem, HashApiError> {
        self.post(HASH_ITEMS_PATH, &HashItemRequest::new(hash, tag)).await
    }

    /// # Errors
    /// See [`AuthenticatingHttpClient::get`]
    pub async fn get_receipt(&self, id: &str) -> Result<Receipt, HashApiError> {
        self.get(&item_path(RECEIPTS_PATH, id)).await
    }

    /// # Errors
    /// See [`AuthenticatingHttpClient::get`]
    pub async fn get_all_block_subscriptions(
        &self,
    ) -> Result<Vec<BlockSubscription>, HashApiError> {
        self.get(BLOCK_SUBSCRIPTIONS_PATH).await
    }

    /// # Errors
    /// See [`AuthenticatingHttpClient::get`]
    pub async fn get_block_subscription(
        &self,
        id: &str,
    ) -> Result<BlockSubscription, HashApiError> {
        self.get(&item_path(BLOCK_SUBSCRIPTIONS_PATH, id)).await
    }

    /// Register a block webhook.
    ///
    /// Accepts either [`BlockSubscriptionParams`] or a bare callback URL,
    /// which is sent as `{ "callbackUrl": <url> }`.
    ///
    /// # Errors
    /// See [`AuthenticatingHttpClient::post`]
    pub async fn create_block_subscription(
        &self,
        params: impl Into<BlockSubscriptionParams>,
    ) -> Result<BlockSubscription, HashApiError> {
        self.post(BLOCK_SUBSCRIPTIONS_PATH, &params.into()).await
    }

    /// Update a block webhook; accepts the same inputs as
    /// [`AuthenticatingHttpClient::create_block_subscription`].
    ///
    /// # Errors
    /// See [`AuthenticatingHttpClient::put`]
    pub async fn update_block_subscription(
        &self,
        id: &str,
        params: impl Into<BlockSubscriptionParams>,
    ) -> Result<BlockSubscription, HashApiError> {
        self.put(&item_path(BLOCK_SUBSCRIPTIONS_PATH, id), &params.into()).await
    }

    /// Delete a block webhook, returning the removed subscription.
    ///
    /// # Errors
    /// See [`AuthenticatingHttpClient::delete`]
    pub async fn delete_block_subscription(
        &self,
        id: &str,
    ) -> Result<BlockSubscription, HashApiError> {
        self.delete(&item_path(BLOCK_SUBSCRIPTIONS_PATH, id)).await
    }
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}
