use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ItemResult;
use crate::models::Item;

/// Persistence contract for items.
///
/// Every mutating call is a single atomic operation, so callers never need a
/// separate existence check before writing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert `item` unless a record with its id exists.
    ///
    /// A blank id is replaced by a generated one and `created_date` is
    /// stamped. Returns the stored item, or `None` on an id collision.
    async fn create_if_absent(&self, item: Item) -> ItemResult<Option<Item>>;

    async fn get_by_id(&self, id: &str) -> ItemResult<Option<Item>>;

    /// All items in store order.
    async fn get_all(&self) -> ItemResult<Vec<Item>>;

    /// Replace the record with `item.id`, keeping its stored `created_date`.
    ///
    /// Returns the stored item, or `None` when no record has that id.
    async fn update(&self, item: Item) -> ItemResult<Option<Item>>;

    /// `true` iff a record was removed.
    async fn delete(&self, id: &str) -> ItemResult<bool>;

    /// Items whose auction window contains `now`, bounds included.
    async fn find_by_auction_window(&self, now: DateTime<Utc>) -> ItemResult<Vec<Item>>;

    async fn find_by_owner(&self, owner_id: &str) -> ItemResult<Vec<Item>>;
}
