//! Item Service - request orchestration over an ItemStore

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ID_MISMATCH, ITEM_REQUIRED, ItemError, ItemResult};
use crate::models::{AuctionableStatus, Item};
use crate::store::ItemStore;

/// Decides the outcome of every item request.
///
/// Each request makes at most one mutating store call; validation and id
/// checks happen before the store is touched.
pub struct ItemService<S: ItemStore> {
    store: Arc<S>,
}

impl<S: ItemStore> ItemService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> ItemResult<Item> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(ItemError::not_found)
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.store.get_all().await
    }

    /// `None` stands for a request body of `null`.
    #[instrument(skip(self, item))]
    pub async fn create_item(&self, item: Option<Item>) -> ItemResult<Item> {
        let item = item.ok_or_else(|| ItemError::Validation(ITEM_REQUIRED.to_string()))?;
        item.validate()?;

        let created = self
            .store
            .create_if_absent(item)
            .await?
            .ok_or_else(ItemError::already_exists)?;

        tracing::info!(id = %created.id, owner_id = %created.owner_id, "Item created");
        Ok(created)
    }

    /// Replace the item at `id` with `item`, whose own id must match.
    #[instrument(skip(self, item))]
    pub async fn update_item(&self, id: &str, item: Option<Item>) -> ItemResult<Item> {
        let item = item.ok_or_else(|| ItemError::Validation(ITEM_REQUIRED.to_string()))?;
        if item.id != id {
            return Err(ItemError::Validation(ID_MISMATCH.to_string()));
        }
        item.validate()?;

        let updated = self
            .store
            .update(item)
            .await?
            .ok_or_else(ItemError::not_found)?;

        tracing::info!(id = %updated.id, "Item updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ItemResult<()> {
        if !self.store.delete(id).await? {
            return Err(ItemError::not_found());
        }
        tracing::info!(id, "Item deleted");
        Ok(())
    }

    /// Items open for bidding right now.
    pub async fn list_auctionable_items(&self) -> ItemResult<Vec<Item>> {
        self.list_auctionable_items_at(Utc::now()).await
    }

    #[instrument(skip(self))]
    pub async fn list_auctionable_items_at(&self, now: DateTime<Utc>) -> ItemResult<Vec<Item>> {
        self.store.find_by_auction_window(now).await
    }

    /// Items of `owner_id`; an unknown owner yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_items_by_owner(&self, owner_id: &str) -> ItemResult<Vec<Item>> {
        self.store.find_by_owner(owner_id).await
    }

    #[instrument(skip(self))]
    pub async fn is_item_auctionable(&self, id: &str) -> ItemResult<AuctionableStatus> {
        let item = self.get_item(id).await?;
        Ok(AuctionableStatus {
            auctionable: item.is_auctionable_at(Utc::now()),
            id: item.id,
        })
    }
}

impl<S: ItemStore> Clone for ItemService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
