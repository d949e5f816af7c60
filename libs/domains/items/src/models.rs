use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// An item put up for auction by a seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_auction_window", skip_on_field_errors = false))]
pub struct Item {
    /// Unique identifier; assigned on create when left blank
    #[serde(default)]
    pub id: String,
    /// Secondary human-readable identifier, not unique
    #[serde(default)]
    pub item_id: String,
    /// Seller that owns the item
    pub owner_id: String,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Set when the item is first stored; never changed by updates
    #[serde(default = "Utc::now")]
    pub created_date: DateTime<Utc>,
    pub start_auction_date_time: DateTime<Utc>,
    pub end_auction_date_time: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "Start price cannot be negative."))]
    pub start_price: f64,
    /// Appraised value
    #[serde(rename = "vurderetPrice", alias = "vurdertPrice")]
    #[validate(range(min = 0.0, message = "Estimated value cannot be negative."))]
    pub estimated_value: f64,
}

fn validate_auction_window(item: &Item) -> Result<(), ValidationError> {
    if item.start_auction_date_time > item.end_auction_date_time {
        return Err(ValidationError::new("auction_window")
            .with_message("Auction start must not be after auction end.".into()));
    }
    Ok(())
}

impl Item {
    /// `true` when `instant` lies inside the auction window, bounds included.
    pub fn is_auctionable_at(&self, instant: DateTime<Utc>) -> bool {
        self.start_auction_date_time <= instant && instant <= self.end_auction_date_time
    }

    /// Assign an id when blank and stamp the creation time.
    pub fn prepare_for_insert(&mut self, now: DateTime<Utc>) {
        if self.id.trim().is_empty() {
            self.id = Uuid::now_v7().to_string();
        }
        self.created_date = now;
    }
}

/// Answer to "can this item be bid on right now?"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuctionableStatus {
    pub id: String,
    pub auctionable: bool,
}
