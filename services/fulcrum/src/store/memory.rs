//! In-memory implementation of the Fulcrum store.
//!
//! # Purpose
//! Implements [`OnboardingStore`] and [`SchemaStore`] with ordered maps guarded by
//! `tokio::sync::RwLock`. It exists for local development, tests, and
//! deployments that do not need durability.
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - Each aggregate (onboardings, schemas) lives behind a single lock, so a
//!   parent and its children are always replaced together.
//! - Identifiers are assigned from per-table counters starting at 1, like the
//!   `BIGSERIAL` columns of the Postgres backend.
use super::{
    FulcrumStore, OnboardingStore, SchemaStore, StoreError, StoreResult, record_onboarding_write,
    record_schema_write,
};
use crate::model::{
    CreatedSchema, EnvArn, NewSchema, NewSchemaVersion, Onboarding, OnboardingDraft, Schema,
    SchemaVersion, SchemaWithVersions,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct OnboardingTables {
    next_id: i64,
    next_env_arn_id: i64,
    rows: BTreeMap<i64, Onboarding>,
}

impl OnboardingTables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn env_arns_for(&mut self, onboarding_id: i64, draft: &OnboardingDraft) -> Vec<EnvArn> {
        draft
            .env_arns
            .iter()
            .map(|row| {
                self.next_env_arn_id += 1;
                EnvArn {
                    id: self.next_env_arn_id,
                    onboarding_id,
                    env: row.env,
                    arn: row.arn.clone(),
                }
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct SchemaTables {
    next_id: i64,
    next_version_id: i64,
    schemas: BTreeMap<i64, Schema>,
    versions: Vec<SchemaVersion>,
}

impl SchemaTables {
    fn insert_version(
        &mut self,
        schema_id: i64,
        version: NewSchemaVersion,
    ) -> StoreResult<SchemaVersion> {
        let duplicate = self
            .versions
            .iter()
            .any(|row| row.schema_id == schema_id && row.version == version.version);
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "schema {schema_id} already has version {}",
                version.version
            )));
        }
        self.next_version_id += 1;
        let row = SchemaVersion {
            id: self.next_version_id,
            schema_id,
            version: version.version,
            schema_json: version.schema_json,
            created_at: Utc::now(),
        };
        self.versions.push(row.clone());
        Ok(row)
    }
}

/// In-memory Fulcrum store.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    onboardings: Arc<RwLock<OnboardingTables>>,
    schemas: Arc<RwLock<SchemaTables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn onboarding_from_draft(
    id: i64,
    draft: OnboardingDraft,
    env_arns: Vec<EnvArn>,
    created_at: chrono::DateTime<Utc>,
) -> Onboarding {
    Onboarding {
        id,
        lob_name: draft.lob_name,
        domain: draft.domain,
        onboard_type: draft.onboard_type,
        sub_domain: draft.sub_domain,
        volume_of_events: draft.volume_of_events,
        schema_name: draft.schema_name,
        topic_name: draft.topic_name,
        tentative_prod_date: draft.tentative_prod_date,
        can_perform_pt: draft.can_perform_pt,
        notification_email: draft.notification_email,
        contact_emails: draft.contact_emails,
        created_at,
        updated_at: Utc::now(),
        env_arns,
    }
}

#[async_trait]
impl OnboardingStore for InMemoryStore {
    async fn list_onboardings(&self) -> StoreResult<Vec<Onboarding>> {
        let tables = self.onboardings.read().await;
        let mut items: Vec<Onboarding> = tables.rows.values().cloned().collect();
        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(items)
    }

    async fn get_onboarding(&self, id: i64) -> StoreResult<Onboarding> {
        self.onboardings
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("onboarding".into()))
    }

    async fn create_onboarding(&self, draft: OnboardingDraft) -> StoreResult<Onboarding> {
        let mut tables = self.onboardings.write().await;
        let id = tables.allocate_id();
        let env_arns = tables.env_arns_for(id, &draft);
        let onboarding = onboarding_from_draft(id, draft, env_arns, Utc::now());
        tables.rows.insert(id, onboarding.clone());
        let total = tables.rows.len();
        drop(tables);
        record_onboarding_write("created");
        metrics::gauge!("fulcrum_onboardings_total").set(total as f64);
        Ok(onboarding)
    }

    async fn update_onboarding(&self, id: i64, draft: OnboardingDraft) -> StoreResult<Onboarding> {
        let mut tables = self.onboardings.write().await;
        let created_at = match tables.rows.get(&id) {
            Some(existing) => existing.created_at,
            None => return Err(StoreError::NotFound("onboarding".into())),
        };
        // Full replace: the previous env ARN rows are discarded with the old record.
        let env_arns = tables.env_arns_for(id, &draft);
        let onboarding = onboarding_from_draft(id, draft, env_arns, created_at);
        tables.rows.insert(id, onboarding.clone());
        drop(tables);
        record_onboarding_write("updated");
        Ok(onboarding)
    }

    async fn delete_onboarding(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.onboardings.write().await;
        let removed = tables.rows.remove(&id).is_some();
        let total = tables.rows.len();
        drop(tables);
        if removed {
            record_onboarding_write("deleted");
        }
        metrics::gauge!("fulcrum_onboardings_total").set(total as f64);
        Ok(())
    }
}

#[async_trait]
impl SchemaStore for InMemoryStore {
    async fn list_schemas(&self) -> StoreResult<Vec<Schema>> {
        let tables = self.schemas.read().await;
        let mut items: Vec<Schema> = tables.schemas.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn get_schema(&self, id: i64) -> StoreResult<SchemaWithVersions> {
        let tables = self.schemas.read().await;
        let schema = tables
            .schemas
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("schema".into()))?;
        let mut versions: Vec<SchemaVersion> = tables
            .versions
            .iter()
            .filter(|row| row.schema_id == id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(SchemaWithVersions { schema, versions })
    }

    async fn create_schema(
        &self,
        schema: NewSchema,
        first_version: Option<NewSchemaVersion>,
    ) -> StoreResult<CreatedSchema> {
        let name = schema.name();
        let mut tables = self.schemas.write().await;
        let duplicate = tables.schemas.values().any(|row| {
            row.name == name
                || (row.environment == schema.environment
                    && row.domain == schema.domain
                    && row.subdomain == schema.subdomain)
        });
        if duplicate {
            return Err(StoreError::Conflict(format!("schema {name} already exists")));
        }
        tables.next_id += 1;
        let now = Utc::now();
        let row = Schema {
            id: tables.next_id,
            name,
            environment: schema.environment,
            domain: schema.domain,
            subdomain: schema.subdomain,
            namespace: schema.namespace,
            created_at: now,
            updated_at: now,
        };
        // The schema id is fresh, so the first version cannot collide.
        let version = match first_version {
            Some(version) => Some(tables.insert_version(row.id, version)?),
            None => None,
        };
        tables.schemas.insert(row.id, row.clone());
        let total = tables.schemas.len();
        drop(tables);
        record_schema_write("created");
        metrics::gauge!("fulcrum_schemas_total").set(total as f64);
        Ok(CreatedSchema {
            schema: row,
            version,
        })
    }

    async fn add_schema_version(
        &self,
        schema_id: i64,
        version: NewSchemaVersion,
    ) -> StoreResult<SchemaVersion> {
        let mut tables = self.schemas.write().await;
        if !tables.schemas.contains_key(&schema_id) {
            return Err(StoreError::NotFound("schema".into()));
        }
        let row = tables.insert_version(schema_id, version)?;
        drop(tables);
        record_schema_write("version_added");
        Ok(row)
    }

    async fn get_schema_version(
        &self,
        schema_id: i64,
        version: &str,
    ) -> StoreResult<SchemaVersion> {
        self.schemas
            .read()
            .await
            .versions
            .iter()
            .find(|row| row.schema_id == schema_id && row.version == version)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("schema version".into()))
    }
}

#[async_trait]
impl FulcrumStore for InMemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
