//! In-memory ItemStore for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::ItemResult;
use crate::models::Item;
use crate::store::ItemStore;

/// Vec-backed store; insertion order is store order.
///
/// Clones share the same underlying records.
#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    items: Arc<RwLock<Vec<Item>>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `items`, kept as given.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    async fn filtered(&self, keep: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.items
            .read()
            .await
            .iter()
            .filter(|item| keep(item))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn create_if_absent(&self, mut item: Item) -> ItemResult<Option<Item>> {
        item.prepare_for_insert(Utc::now());

        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Ok(None);
        }

        items.push(item.clone());
        Ok(Some(item))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn update(&self, mut item: Item) -> ItemResult<Option<Item>> {
        let mut items = self.items.write().await;
        let Some(slot) = items.iter_mut().find(|existing| existing.id == item.id) else {
            return Ok(None);
        };

        item.created_date = slot.created_date;
        *slot = item.clone();
        Ok(Some(item))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ItemResult<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }

    #[instrument(skip(self))]
    async fn find_by_auction_window(&self, now: DateTime<Utc>) -> ItemResult<Vec<Item>> {
        Ok(self.filtered(|item| item.is_auctionable_at(now)).await)
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: &str) -> ItemResult<Vec<Item>> {
        Ok(self.filtered(|item| item.owner_id == owner_id).await)
    }
}
