//! Onboarding API handlers.
//!
//! # Purpose
//! CRUD endpoints for onboardings. Requests are validated and normalized into
//! an [`OnboardingDraft`] before any store call; derived schema and topic
//! names are always recomputed here.
use crate::api::error::{ApiError, api_internal, api_store_error, api_validation_error};
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{DeleteResponse, ErrorResponse, OnboardingRequest};
use crate::app::AppState;
use crate::model::{EnvArnDraft, Environment, OnboardType, Onboarding, OnboardingDraft};
use crate::naming::derive_onboarding_names;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::collections::HashSet;

#[utoipa::path(
    get,
    path = "/api/onboardings",
    tag = "onboardings",
    responses(
        (status = 200, description = "All onboardings, newest first", body = [Onboarding]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub(crate) async fn list_onboardings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Onboarding>>, ApiError> {
    let items = state
        .store
        .list_onboardings()
        .await
        .map_err(|err| api_internal("failed to list onboardings", &err))?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/onboardings/{id}",
    tag = "onboardings",
    params(
        ("id" = i64, Path, description = "Onboarding id")
    ),
    responses(
        (status = 200, description = "Onboarding with env ARNs", body = Onboarding),
        (status = 404, description = "Onboarding not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_onboarding(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Onboarding>, ApiError> {
    state
        .store
        .get_onboarding(id)
        .await
        .map(Json)
        .map_err(|err| api_store_error("failed to load onboarding", err))
}

#[utoipa::path(
    post,
    path = "/api/onboardings",
    tag = "onboardings",
    request_body = OnboardingRequest,
    responses(
        (status = 201, description = "Onboarding created", body = Onboarding),
        (status = 400, description = "Invalid onboarding", body = ErrorResponse)
    )
)]
pub(crate) async fn create_onboarding(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OnboardingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = into_draft(body)?;
    let onboarding = state
        .store
        .create_onboarding(draft)
        .await
        .map_err(|err| api_store_error("failed to create onboarding", err))?;
    tracing::info!(
        onboarding_id = onboarding.id,
        onboard_type = %onboarding.onboard_type,
        environments = onboarding.env_arns.len(),
        "onboarding created"
    );
    Ok((StatusCode::CREATED, Json(onboarding)))
}

#[utoipa::path(
    put,
    path = "/api/onboardings/{id}",
    tag = "onboardings",
    params(
        ("id" = i64, Path, description = "Onboarding id")
    ),
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Onboarding replaced", body = Onboarding),
        (status = 400, description = "Invalid onboarding", body = ErrorResponse),
        (status = 404, description = "Onboarding not found", body = ErrorResponse)
    )
)]
pub(crate) async fn update_onboarding(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OnboardingRequest>,
) -> Result<Json<Onboarding>, ApiError> {
    let draft = into_draft(body)?;
    let onboarding = state
        .store
        .update_onboarding(id, draft)
        .await
        .map_err(|err| api_store_error("failed to update onboarding", err))?;
    tracing::info!(
        onboarding_id = onboarding.id,
        environments = onboarding.env_arns.len(),
        "onboarding replaced"
    );
    Ok(Json(onboarding))
}

#[utoipa::path(
    delete,
    path = "/api/onboardings/{id}",
    tag = "onboardings",
    params(
        ("id" = i64, Path, description = "Onboarding id")
    ),
    responses(
        (status = 200, description = "Onboarding deleted or absent", body = DeleteResponse)
    )
)]
pub(crate) async fn delete_onboarding(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state
        .store
        .delete_onboarding(id)
        .await
        .map_err(|err| api_internal("failed to delete onboarding", &err))?;
    Ok(Json(DeleteResponse { success: true }))
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(api_validation_error(message)),
    }
}

/// Validate a request and build the draft the store persists.
///
/// Incomplete environment rows are dropped; the remaining rows must name
/// distinct, known environments.
pub(crate) fn into_draft(body: OnboardingRequest) -> Result<OnboardingDraft, ApiError> {
    let lob_name = required(body.lob_name, "LOB Name is required.")?;
    let domain = required(body.domain, "Domain is required.")?;
    let sub_domain = required(body.sub_domain, "Sub Domain is required.")?;
    let onboard_type = required(body.onboard_type, "Onboard Type is required.")?;
    let onboard_type = OnboardType::parse(&onboard_type).ok_or_else(|| {
        api_validation_error(&format!("Unknown onboard type: {onboard_type}."))
    })?;

    let mut seen = HashSet::new();
    let mut env_arns = Vec::new();
    for row in body.env_arns.unwrap_or_default() {
        let env = row.env.unwrap_or_default();
        let arn = row.arn.unwrap_or_default();
        let (env, arn) = (env.trim(), arn.trim());
        if env.is_empty() || arn.is_empty() {
            continue;
        }
        let env = Environment::parse(env)
            .ok_or_else(|| api_validation_error(&format!("Unknown environment: {env}.")))?;
        if !seen.insert(env) {
            return Err(api_validation_error("Duplicate environment selected."));
        }
        env_arns.push(EnvArnDraft {
            env,
            arn: arn.to_string(),
        });
    }

    let names = derive_onboarding_names(
        &domain,
        &sub_domain,
        env_arns.iter().map(|row| row.env.as_str()),
    );

    Ok(OnboardingDraft {
        lob_name,
        domain,
        onboard_type,
        sub_domain,
        volume_of_events: body.volume_of_events.unwrap_or_default(),
        schema_name: names.schema_name,
        topic_name: names.topic_name,
        tentative_prod_date: body.tentative_prod_date.unwrap_or_default(),
        can_perform_pt: body.can_perform_pt.unwrap_or(false),
        notification_email: body.notification_email.unwrap_or_default(),
        contact_emails: body.contact_emails.unwrap_or_default(),
        env_arns,
    })
}
