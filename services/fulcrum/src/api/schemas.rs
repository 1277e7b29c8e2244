//! Schema registry API handlers.
//!
//! # Purpose
//! Create schemas (optionally with a first version), append versions, and
//! read schemas and individual versions. Duplicate names or versions surface
//! as 409 with a `duplicate key` message.
use crate::api::error::{ApiError, api_internal, api_store_error, api_validation_error};
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{ErrorResponse, SchemaCreateRequest, SchemaVersionCreateRequest};
use crate::app::AppState;
use crate::model::{
    CreatedSchema, NewSchema, NewSchemaVersion, Schema, SchemaVersion, SchemaWithVersions,
};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn present_json(value: Option<Value>) -> Option<Value> {
    value.filter(|value| !value.is_null())
}

#[utoipa::path(
    post,
    path = "/api/schemas",
    tag = "schemas",
    request_body = SchemaCreateRequest,
    responses(
        (status = 201, description = "Schema created", body = CreatedSchema),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 409, description = "Schema already exists", body = ErrorResponse)
    )
)]
pub(crate) async fn create_schema(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SchemaCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(environment), Some(domain), Some(subdomain)) = (
        non_blank(body.environment),
        non_blank(body.domain),
        non_blank(body.subdomain),
    ) else {
        return Err(api_validation_error(
            "environment, domain, and subdomain are required",
        ));
    };
    let new_schema = NewSchema {
        environment,
        domain,
        subdomain,
        namespace: non_blank(body.namespace),
    };
    let first_version = match (non_blank(body.version), present_json(body.schema_json)) {
        (Some(version), Some(schema_json)) => Some(NewSchemaVersion {
            version,
            schema_json,
        }),
        _ => None,
    };

    let created = state
        .store
        .create_schema(new_schema, first_version)
        .await
        .map_err(|err| api_store_error("failed to create schema", err))?;
    tracing::info!(
        schema_id = created.schema.id,
        schema = %created.schema.name,
        with_version = created.version.is_some(),
        "schema created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/schemas/{id}/versions",
    tag = "schemas",
    params(
        ("id" = i64, Path, description = "Schema id")
    ),
    request_body = SchemaVersionCreateRequest,
    responses(
        (status = 201, description = "Version added", body = SchemaVersion),
        (status = 400, description = "Missing version or schema_json", body = ErrorResponse),
        (status = 404, description = "Schema not found", body = ErrorResponse),
        (status = 409, description = "Version already exists", body = ErrorResponse)
    )
)]
pub(crate) async fn add_schema_version(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SchemaVersionCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(version), Some(schema_json)) =
        (non_blank(body.version), present_json(body.schema_json))
    else {
        return Err(api_validation_error("version and schema_json are required"));
    };
    let created = state
        .store
        .add_schema_version(
            id,
            NewSchemaVersion {
                version,
                schema_json,
            },
        )
        .await
        .map_err(|err| api_store_error("failed to add schema version", err))?;
    tracing::info!(schema_id = id, version = %created.version, "schema version added");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/schemas",
    tag = "schemas",
    responses(
        (status = 200, description = "All schemas ordered by name", body = [Schema])
    )
)]
pub(crate) async fn list_schemas(
    State(state): State<AppState>,
) -> Result<Json<Vec<Schema>>, ApiError> {
    let items = state
        .store
        .list_schemas()
        .await
        .map_err(|err| api_internal("failed to list schemas", &err))?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/schemas/{id}",
    tag = "schemas",
    params(
        ("id" = i64, Path, description = "Schema id")
    ),
    responses(
        (status = 200, description = "Schema and its versions", body = SchemaWithVersions),
        (status = 404, description = "Schema not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_schema(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<SchemaWithVersions>, ApiError> {
    state
        .store
        .get_schema(id)
        .await
        .map(Json)
        .map_err(|err| api_store_error("failed to load schema", err))
}

#[utoipa::path(
    get,
    path = "/api/schemas/{id}/versions/{version}",
    tag = "schemas",
    params(
        ("id" = i64, Path, description = "Schema id"),
        ("version" = String, Path, description = "Version label")
    ),
    responses(
        (status = 200, description = "Schema version", body = SchemaVersion),
        (status = 404, description = "Version not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_schema_version(
    ApiPath((id, version)): ApiPath<(i64, String)>,
    State(state): State<AppState>,
) -> Result<Json<SchemaVersion>, ApiError> {
    state
        .store
        .get_schema_version(id, &version)
        .await
        .map(Json)
        .map_err(|err| api_store_error("failed to load schema version", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values_are_treated_as_missing() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" dev ".to_string())), Some("dev".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn null_schema_json_is_missing() {
        assert_eq!(present_json(Some(Value::Null)), None);
        assert_eq!(present_json(Some(json!({}))), Some(json!({})));
    }
}
