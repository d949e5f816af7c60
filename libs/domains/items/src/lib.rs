//! Items Domain
//!
//! Auction items: CRUD plus the "open for bidding" and "by seller" queries.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /item
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Outcome of every request, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  ItemStore  │  ← Persistence contract (MongoDB and in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, AuctionableStatus
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, MongoItemStore, ItemService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let store = MongoItemStore::new(client.database("auction"));
//! store.create_indexes().await?;
//!
//! let router = axum::Router::new()
//!     .nest(handlers::BASE_PATH, handlers::router(ItemService::new(store)));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod service;
pub mod store;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryItemStore;
pub use models::{AuctionableStatus, Item};
pub use mongodb::MongoItemStore;
pub use service::ItemService;
pub use store::ItemStore;
