//! MongoDB implementation of ItemStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    error::{Error as MongoError, ErrorKind, WriteError, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::store::ItemStore;

/// Default collection name
pub const ITEMS_COLLECTION: &str = "items";

const DUPLICATE_KEY: i32 = 11000;

/// Persisted shape of an [`Item`].
///
/// The item id is the document `_id` and timestamps are BSON datetimes so
/// range queries compare instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    item_id: String,
    owner_id: String,
    title: String,
    #[serde(default)]
    description: String,
    created_date: bson::DateTime,
    start_auction_date_time: bson::DateTime,
    end_auction_date_time: bson::DateTime,
    start_price: f64,
    #[serde(rename = "vurderetPrice")]
    estimated_value: f64,
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> ItemResult<DateTime<Utc>> {
    let millis = dt.timestamp_millis();
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ItemError::Database(format!("Stored datetime out of range: {} ms", millis)))
}

impl From<Item> for ItemDocument {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            item_id: item.item_id,
            owner_id: item.owner_id,
            title: item.title,
            description: item.description,
            created_date: to_bson_datetime(item.created_date),
            start_auction_date_time: to_bson_datetime(item.start_auction_date_time),
            end_auction_date_time: to_bson_datetime(item.end_auction_date_time),
            start_price: item.start_price,
            estimated_value: item.estimated_value,
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = ItemError;

    fn try_from(doc: ItemDocument) -> ItemResult<Self> {
        Ok(Self {
            id: doc.id,
            item_id: doc.item_id,
            owner_id: doc.owner_id,
            title: doc.title,
            description: doc.description,
            created_date: from_bson_datetime(doc.created_date)?,
            start_auction_date_time: from_bson_datetime(doc.start_auction_date_time)?,
            end_auction_date_time: from_bson_datetime(doc.end_auction_date_time)?,
            start_price: doc.start_price,
            estimated_value: doc.estimated_value,
        })
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: DUPLICATE_KEY, .. }))
    )
}

/// `$set` body for a replace that must not touch `_id` or `createdDate`.
fn replacement_fields(doc: &ItemDocument) -> ItemResult<Document> {
    let mut fields = bson::to_document(doc)?;
    fields.remove("_id");
    fields.remove("createdDate");
    Ok(fields)
}

/// MongoDB implementation of the ItemStore
pub struct MongoItemStore {
    collection: Collection<ItemDocument>,
}

impl MongoItemStore {
    /// Store backed by the `items` collection of `db`
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let store = MongoItemStore::new(client.database("auction"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, ITEMS_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ItemDocument>(collection_name),
        }
    }

    /// Create the owner and auction-window indexes. Idempotent.
    pub async fn create_indexes(&self) -> ItemResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "ownerId": 1 })
                .options(IndexOptions::builder().name("idx_owner".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "startAuctionDateTime": 1, "endAuctionDateTime": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_auction_window".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Item indexes created successfully");
        Ok(())
    }

    async fn find_many(&self, filter: Document) -> ItemResult<Vec<Item>> {
        let cursor = self.collection.find(filter).await?;
        let docs: Vec<ItemDocument> = cursor.try_collect().await?;
        docs.into_iter().map(Item::try_from).collect()
    }
}

#[async_trait]
impl ItemStore for MongoItemStore {
    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn create_if_absent(&self, mut item: Item) -> ItemResult<Option<Item>> {
        item.prepare_for_insert(Utc::now());
        let doc = ItemDocument::from(item);

        match self.collection.insert_one(&doc).await {
            Ok(_) => {
                tracing::info!(id = %doc.id, "Item inserted");
                Item::try_from(doc).map(Some)
            }
            Err(e) if is_duplicate_key(&e) => {
                tracing::warn!(id = %doc.id, "Insert skipped, id already taken");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ItemResult<Option<Item>> {
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        doc.map(Item::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> ItemResult<Vec<Item>> {
        self.find_many(doc! {}).await
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn update(&self, item: Item) -> ItemResult<Option<Item>> {
        let doc = ItemDocument::from(item);
        let fields = replacement_fields(&doc)?;

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": doc.id.as_str() }, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?;

        updated.map(Item::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ItemResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count == 1)
    }

    #[instrument(skip(self))]
    async fn find_by_auction_window(&self, now: DateTime<Utc>) -> ItemResult<Vec<Item>> {
        let now = to_bson_datetime(now);
        self.find_many(doc! {
            "startAuctionDateTime": { "$lte": now },
            "endAuctionDateTime": { "$gte": now },
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: &str) -> ItemResult<Vec<Item>> {
        self.find_many(doc! { "ownerId": owner_id }).await
    }
}
