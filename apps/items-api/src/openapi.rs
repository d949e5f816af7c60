//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::items::{VersionProperties, VersionResponse};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auction Items API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for auction items",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::items::version),
    components(schemas(VersionResponse, VersionProperties)),
    nest(
        (path = "/item", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Auction item endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
