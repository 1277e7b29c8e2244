//! Storage layer for onboardings and the schema registry.
//!
//! # Purpose
//! Defines the store traits used by the HTTP handlers and the error type they
//! share. Two backends implement them: [`postgres::PostgresStore`] (durable)
//! and [`memory::InMemoryStore`] (dev and tests).
//!
//! # Key invariants
//! - Multi-row writes are atomic: a failed write leaves no partial children.
//! - Uniqueness violations surface as [`StoreError::Conflict`], never as
//!   driver text the caller has to inspect.
use crate::model::{
    CreatedSchema, NewSchema, NewSchemaVersion, Onboarding, OnboardingDraft, Schema,
    SchemaVersion, SchemaWithVersions,
};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;
#[cfg(all(test, feature = "pg-tests"))]
mod postgres_tests;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate key: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait OnboardingStore: Send + Sync {
    /// All onboardings, newest first, each with its env ARNs.
    async fn list_onboardings(&self) -> StoreResult<Vec<Onboarding>>;
    async fn get_onboarding(&self, id: i64) -> StoreResult<Onboarding>;
    async fn create_onboarding(&self, draft: OnboardingDraft) -> StoreResult<Onboarding>;
    /// Replace every field and the full env ARN set of an onboarding.
    async fn update_onboarding(&self, id: i64, draft: OnboardingDraft) -> StoreResult<Onboarding>;
    /// Delete an onboarding and its env ARNs. Deleting a missing id is a no-op.
    async fn delete_onboarding(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// All schemas ordered by name, without versions.
    async fn list_schemas(&self) -> StoreResult<Vec<Schema>>;
    async fn get_schema(&self, id: i64) -> StoreResult<SchemaWithVersions>;
    async fn create_schema(
        &self,
        schema: NewSchema,
        first_version: Option<NewSchemaVersion>,
    ) -> StoreResult<CreatedSchema>;
    async fn add_schema_version(
        &self,
        schema_id: i64,
        version: NewSchemaVersion,
    ) -> StoreResult<SchemaVersion>;
    async fn get_schema_version(&self, schema_id: i64, version: &str)
    -> StoreResult<SchemaVersion>;
}

/// Everything the HTTP layer needs from a backend.
#[async_trait]
pub trait FulcrumStore: OnboardingStore + SchemaStore {
    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

pub(crate) fn record_onboarding_write(op: &'static str) {
    metrics::counter!("fulcrum_onboarding_writes_total", "op" => op).increment(1);
}

pub(crate) fn record_schema_write(op: &'static str) {
    metrics::counter!("fulcrum_schema_writes_total", "op" => op).increment(1);
}
