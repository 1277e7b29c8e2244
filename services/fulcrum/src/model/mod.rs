//! Fulcrum data model module.
//!
//! # Purpose
//! Re-exports the onboarding and schema registry records shared by the store
//! and API layers, plus the validated inputs the stores accept for writes.
mod onboarding;
mod schema;

pub use onboarding::{EnvArn, EnvArnDraft, Environment, OnboardType, Onboarding, OnboardingDraft};
pub use schema::{
    CreatedSchema, NewSchema, NewSchemaVersion, Schema, SchemaVersion, SchemaWithVersions,
};
