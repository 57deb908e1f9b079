//! OpenAPI documentation for the JSON endpoints.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRDA Workflow Server",
        version = "0.1.0",
        description = "Citizen request workflow: service requests, inspection reports and final decisions"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::services::delete_service,
        api::reports::delete_report,
        api::results::delete_result,
    ),
    components(
        schemas(
            error::ErrorResponse,
            models::ResultKey,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Services", description = "Citizen service requests"),
        (name = "Reports", description = "Inspection reports"),
        (name = "Results", description = "Final decisions")
    )
)]
pub struct ApiDoc;
