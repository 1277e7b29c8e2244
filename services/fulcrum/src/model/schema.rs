//! Schema registry records.
//!
//! # Purpose
//! Defines schemas keyed by (environment, domain, subdomain) and their
//! immutable versions, plus the write inputs accepted by the store.
use crate::naming::derive_schema_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Schema {
    pub id: i64,
    pub name: String,
    pub environment: String,
    pub domain: String,
    pub subdomain: String,
    pub namespace: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SchemaVersion {
    pub id: i64,
    pub schema_id: i64,
    pub version: String,
    #[schema(value_type = Object)]
    pub schema_json: Value,
    pub created_at: DateTime<Utc>,
}

/// A schema with every version, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SchemaWithVersions {
    #[serde(flatten)]
    pub schema: Schema,
    pub versions: Vec<SchemaVersion>,
}

/// Result of creating a schema; `version` is set when a first version was
/// supplied.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CreatedSchema {
    #[serde(flatten)]
    pub schema: Schema,
    pub version: Option<SchemaVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchema {
    pub environment: String,
    pub domain: String,
    pub subdomain: String,
    pub namespace: Option<String>,
}

impl NewSchema {
    pub fn name(&self) -> String {
        derive_schema_name(&self.environment, &self.domain, &self.subdomain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSchemaVersion {
    pub version: String,
    pub schema_json: Value,
}
