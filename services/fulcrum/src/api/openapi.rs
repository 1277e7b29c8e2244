//! OpenAPI document for the Fulcrum API.
//!
//! # Purpose
//! Collects every route and payload type into one document served at
//! `/api/openapi.json` and rendered by Swagger UI at `/docs`.
use crate::api::{
    onboardings, schemas, system,
    types::{
        DeleteResponse, EnvArnRequest, ErrorResponse, HealthStatus, OnboardingRequest,
        SchemaCreateRequest, SchemaVersionCreateRequest, SystemInfo,
    },
};
use crate::model::{
    CreatedSchema, EnvArn, Environment, OnboardType, Onboarding, Schema, SchemaVersion,
    SchemaWithVersions,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "fulcrum",
        version = "v1",
        description = "Fulcrum onboarding and schema registry API"
    ),
    paths(
        system::system_info,
        system::system_health,
        onboardings::list_onboardings,
        onboardings::get_onboarding,
        onboardings::create_onboarding,
        onboardings::update_onboarding,
        onboardings::delete_onboarding,
        schemas::create_schema,
        schemas::add_schema_version,
        schemas::list_schemas,
        schemas::get_schema,
        schemas::get_schema_version
    ),
    components(schemas(
        SystemInfo,
        HealthStatus,
        ErrorResponse,
        DeleteResponse,
        OnboardingRequest,
        EnvArnRequest,
        SchemaCreateRequest,
        SchemaVersionCreateRequest,
        Onboarding,
        EnvArn,
        Environment,
        OnboardType,
        Schema,
        SchemaVersion,
        SchemaWithVersions,
        CreatedSchema
    )),
    tags(
        (name = "system", description = "Health and service metadata"),
        (name = "onboardings", description = "Producer and consumer onboardings"),
        (name = "schemas", description = "Schema registry")
    )
)]
pub struct ApiDoc;
