//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the sync and health endpoints, the schema wrappers
//! from the inbound layer, and the bearer-token security scheme. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for client codegen.

use crate::inbound::http::schemas::{
    ChemicalsUsedSchema, DeltaSnapshotSchema, ErrorCodeSchema, ErrorSchema, IssueSchema,
    IssueSeveritySchema, IssueStatusSchema, JobSchema, JobStatusSchema, PoolSchema, ReadingSchema,
    TombstoneSchema, VanStockItemSchema, VisitEntrySchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the bearer JWT scheme referenced by authenticated paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "HS256 access token carrying sub, orgId, role, and exp claims.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PoolOps sync API",
        description = "Delta-sync endpoint for the technician mobile app, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::mobile_sync::get_mobile_sync,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DeltaSnapshotSchema,
        JobSchema,
        JobStatusSchema,
        PoolSchema,
        VisitEntrySchema,
        ReadingSchema,
        ChemicalsUsedSchema,
        IssueSchema,
        IssueSeveritySchema,
        IssueStatusSchema,
        VanStockItemSchema,
        TombstoneSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "mobile", description = "Mobile app synchronisation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
