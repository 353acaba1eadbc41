//! OpenAPI document of the Roster API.

use utoipa::OpenApi;

use crate::api;
use crate::common;
use crate::paging;

/// OpenAPI document served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // Paths to be included in the OpenAPI specification.
    paths(
        // Health check endpoints.
        api::handlers::health::get_health,
        // Listing endpoints.
        api::handlers::account::get_accounts,
        api::handlers::config_item::get_config_items,
        api::handlers::project::get_projects,
        api::handlers::group::get_groups,
    ),
    // Components to be included in the OpenAPI specification.
    components(schemas(
        // Entity models.
        api::models::account::Account,
        api::models::config_item::ConfigItem,
        api::models::project::Project,
        api::models::group::Group,
        // List envelopes.
        api::models::common::AccountListResponse,
        api::models::common::ConfigItemListResponse,
        api::models::common::ProjectListResponse,
        api::models::common::GroupListResponse,
        // Paging models.
        paging::Mode,
        paging::meta::PageMeta,
        // Health check datatypes.
        api::models::health::HealthData,
        // Errors.
        common::error::ErrorResponse,
    ))
)]
pub struct ApiDoc;
