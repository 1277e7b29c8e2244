//! HTTP API request/response types.
//!
//! # Purpose
//! Defines the payload shapes of the REST API and their OpenAPI schemas.
//! Onboarding requests are camelCase (snake_case aliases accepted); every
//! response is snake_case.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub service: String,
    pub api_version: String,
    pub storage_backend: String,
    pub durable_storage: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
}

/// One environment row of an onboarding request. Rows with either field
/// missing or blank are ignored.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct EnvArnRequest {
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
}

/// Create/replace payload for an onboarding.
///
/// `schemaName` and `topicName` are accepted for compatibility but the server
/// always derives them from domain, sub-domain and the environment rows.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingRequest {
    #[serde(alias = "lob_name")]
    pub lob_name: Option<String>,
    pub domain: Option<String>,
    #[serde(alias = "onboard_type")]
    pub onboard_type: Option<String>,
    #[serde(alias = "sub_domain")]
    pub sub_domain: Option<String>,
    #[serde(alias = "volume_of_events")]
    pub volume_of_events: Option<String>,
    #[serde(alias = "schema_name")]
    #[schema(value_type = Option<String>)]
    pub schema_name: Option<Value>,
    #[serde(alias = "topic_name")]
    #[schema(value_type = Option<Vec<String>>)]
    pub topic_name: Option<Value>,
    #[serde(alias = "tentative_prod_date")]
    pub tentative_prod_date: Option<String>,
    #[serde(rename = "canPerformPT", alias = "can_perform_pt", alias = "canPerformPt")]
    pub can_perform_pt: Option<bool>,
    #[serde(alias = "notification_email")]
    pub notification_email: Option<String>,
    #[serde(alias = "contact_emails")]
    pub contact_emails: Option<String>,
    #[serde(rename = "envARNs", alias = "env_arns", alias = "envArns")]
    pub env_arns: Option<Vec<EnvArnRequest>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct SchemaCreateRequest {
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Optional first version; stored only together with `schema_json`.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub schema_json: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct SchemaVersionCreateRequest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub schema_json: Option<Value>,
}
