use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    JsonBody,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{AuctionableStatus, Item};
use crate::service::ItemService;
use crate::store::ItemStore;

/// Where the item router is nested by the application
pub const BASE_PATH: &str = "/item";

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        get_item,
        update_item,
        delete_item,
        list_auctionable_items,
        list_items_by_owner,
        is_item_auctionable,
    ),
    components(
        schemas(Item, AuctionableStatus),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Auction item management")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<S: ItemStore + 'static>(service: ItemService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_item))
        .route("/all", get(list_items))
        .route("/auctionable", get(list_auctionable_items))
        .route("/owner/{owner_id}", get(list_items_by_owner))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/{id}/auctionable", get(is_item_auctionable))
        .with_state(shared_service)
}

/// List every item
#[utoipa::path(
    get,
    path = "/all",
    tag = "Items",
    responses(
        (status = 200, description = "All items, possibly empty", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
) -> ItemResult<Json<Vec<Item>>> {
    Ok(Json(service.list_items().await?))
}

/// Create a new item
///
/// A blank `id` is replaced by a generated one.
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = Item,
    responses(
        (status = 201, description = "Item created", body = Item,
            headers(("location" = String, description = "Path of the created item"))),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
    JsonBody(input): JsonBody<Option<Item>>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    let location = format!("{}/{}", BASE_PATH, item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<Item>> {
    Ok(Json(service.get_item(&id).await?))
}

/// Replace an item
///
/// The body's `id` must equal the path id. `createdDate` is kept from the
/// stored item.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    request_body = Item,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<Option<Item>>,
) -> ItemResult<Json<Item>> {
    Ok(Json(service.update_item(&id, input).await?))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<String>,
) -> ItemResult<StatusCode> {
    service.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Items whose auction is open right now
#[utoipa::path(
    get,
    path = "/auctionable",
    tag = "Items",
    responses(
        (status = 200, description = "Items inside their auction window", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_auctionable_items<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
) -> ItemResult<Json<Vec<Item>>> {
    Ok(Json(service.list_auctionable_items().await?))
}

/// Items belonging to one seller
#[utoipa::path(
    get,
    path = "/owner/{owner_id}",
    tag = "Items",
    params(
        ("owner_id" = String, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "The seller's items, empty when there are none", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items_by_owner<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
    Path(owner_id): Path<String>,
) -> ItemResult<Json<Vec<Item>>> {
    Ok(Json(service.list_items_by_owner(&owner_id).await?))
}

/// Whether one item is open for bidding right now
#[utoipa::path(
    get,
    path = "/{id}/auctionable",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Auction window check", body = AuctionableStatus),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn is_item_auctionable<S: ItemStore>(
    State(service): State<Arc<ItemService<S>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<AuctionableStatus>> {
    Ok(Json(service.is_item_auctionable(&id).await?))
}
